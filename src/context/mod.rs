//! Conversation Context Store.
//!
//! Bounded per-conversation message history, so a mid-conversation backend
//! switch still produces coherent continuations. Each conversation's history
//! is independent; histories are created lazily on first append and trimmed
//! oldest-first on every append. Eviction of whole conversations (LRU, TTL)
//! is a collaborator concern and not handled here.

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Who produced a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    User,
    Assistant,
}

/// One conversation turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: TurnRole,
    pub content: String,
}

impl Turn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: TurnRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: TurnRole::Assistant,
            content: content.into(),
        }
    }
}

/// Keyed store of bounded conversation histories.
///
/// Requests sharing a conversation id serialize their mutations through the
/// per-id guard from [`ContextStore::guard`]; concurrent appends to one id
/// never interleave into a corrupted sequence. Different ids proceed in
/// parallel.
pub struct ContextStore {
    max_turns: usize,
    conversations: DashMap<String, VecDeque<Turn>>,
    guards: DashMap<String, Arc<Mutex<()>>>,
}

impl ContextStore {
    pub fn new(max_turns: usize) -> Self {
        Self {
            max_turns,
            conversations: DashMap::new(),
            guards: DashMap::new(),
        }
    }

    /// Append a turn, evicting the oldest once the history is full.
    pub fn append(&self, conversation_id: &str, turn: Turn) {
        let mut history = self
            .conversations
            .entry(conversation_id.to_string())
            .or_default();

        if history.len() == self.max_turns {
            history.pop_front();
        }
        history.push_back(turn);
    }

    /// Ordered turn history for a conversation.
    ///
    /// Unknown ids yield an empty sequence, never an error.
    pub fn get(&self, conversation_id: &str) -> Vec<Turn> {
        self.conversations
            .get(conversation_id)
            .map(|history| history.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Exclusion guard for one conversation id.
    ///
    /// Hold the lock across read-call-append so same-conversation requests
    /// serialize while other conversations proceed.
    pub fn guard(&self, conversation_id: &str) -> Arc<Mutex<()>> {
        self.guards
            .entry(conversation_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Number of conversations with recorded history.
    pub fn conversation_count(&self) -> usize {
        self.conversations.len()
    }
}
