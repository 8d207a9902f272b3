//! Output formatting helpers for CLI commands

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use serde_json::json;

use crate::registry::{BackendDescriptor, BackendRole};

/// View model for backend display
#[derive(Debug, Clone, serde::Serialize)]
pub struct BackendView {
    pub name: String,
    pub url: String,
    pub role: BackendRole,
    pub timeout_secs: u64,
    pub priority: i32,
}

impl From<&BackendDescriptor> for BackendView {
    fn from(descriptor: &BackendDescriptor) -> Self {
        Self {
            name: descriptor.name.clone(),
            url: descriptor.url.clone(),
            role: descriptor.role,
            timeout_secs: descriptor.timeout.as_secs(),
            priority: descriptor.priority,
        }
    }
}

/// Format backends as a table
pub fn format_backends_table(backends: &[BackendView]) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Name", "URL", "Role", "Timeout", "Priority"]);

    for b in backends {
        let role_str = match b.role {
            BackendRole::Precision => "Precision".cyan().to_string(),
            BackendRole::Fast => "Fast".yellow().to_string(),
        };

        table.add_row(vec![
            Cell::new(&b.name),
            Cell::new(&b.url),
            Cell::new(role_str),
            Cell::new(format!("{}s", b.timeout_secs)),
            Cell::new(b.priority),
        ]);
    }

    table.to_string()
}

/// Format backends as JSON
pub fn format_backends_json(backends: &[BackendView]) -> String {
    serde_json::to_string_pretty(&json!({
        "backends": backends
    }))
    .unwrap()
}
