//! CLI module for Meridian
//!
//! Command-line interface definitions and handlers for the Meridian router.
//!
//! # Commands
//!
//! - `serve` - Start the router server
//! - `backends` - Inspect configured backends
//! - `config` - Configuration utilities (init)
//! - `completions` - Generate shell completions
//!
//! # Example
//!
//! ```bash
//! # Start server with default config
//! meridian serve
//!
//! # List configured backends
//! meridian backends list
//!
//! # Generate shell completions
//! meridian completions bash > ~/.bash_completion.d/meridian
//! ```

pub mod backends;
pub mod completions;
pub mod config;
pub mod output;
pub mod serve;

pub use completions::handle_completions;
pub use config::handle_config_init;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Meridian - Adaptive Multi-Model Router
#[derive(Parser, Debug)]
#[command(
    name = "meridian",
    version,
    about = "Adaptive multi-model routing and fallback service"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the Meridian server
    Serve(ServeArgs),
    /// Inspect backends
    #[command(subcommand)]
    Backends(BackendsCommands),
    /// Configuration utilities
    #[command(subcommand)]
    Config(ConfigCommands),
    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "meridian.toml")]
    pub config: PathBuf,

    /// Override server port
    #[arg(short, long, env = "MERIDIAN_PORT")]
    pub port: Option<u16>,

    /// Override server host
    #[arg(short = 'H', long, env = "MERIDIAN_HOST")]
    pub host: Option<String>,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "MERIDIAN_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Route fast-first instead of precision-first
    #[arg(long)]
    pub fast_first: bool,
}

#[derive(Subcommand, Debug)]
pub enum BackendsCommands {
    /// List configured backends
    List(BackendsListArgs),
}

#[derive(Args, Debug)]
pub struct BackendsListArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Path to configuration file
    #[arg(short, long, default_value = "meridian.toml")]
    pub config: PathBuf,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Initialize a new configuration file
    Init(ConfigInitArgs),
}

#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Output file path
    #[arg(short, long, default_value = "meridian.toml")]
    pub output: PathBuf,

    /// Overwrite existing file
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn cli_parse_serve_defaults() {
        let cli = Cli::try_parse_from(["meridian", "serve"]).unwrap();
        match cli.command {
            Commands::Serve(args) => {
                assert_eq!(args.config, PathBuf::from("meridian.toml"));
                assert!(!args.fast_first);
            }
            _ => panic!("Expected Serve command"),
        }
    }

    #[test]
    fn cli_parse_serve_with_port() {
        let cli = Cli::try_parse_from(["meridian", "serve", "-p", "9000"]).unwrap();
        match cli.command {
            Commands::Serve(args) => assert_eq!(args.port, Some(9000)),
            _ => panic!("Expected Serve command"),
        }
    }

    #[test]
    fn cli_parse_serve_fast_first() {
        let cli = Cli::try_parse_from(["meridian", "serve", "--fast-first"]).unwrap();
        match cli.command {
            Commands::Serve(args) => assert!(args.fast_first),
            _ => panic!("Expected Serve command"),
        }
    }

    #[test]
    fn cli_parse_backends_list() {
        let cli = Cli::try_parse_from(["meridian", "backends", "list"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Backends(BackendsCommands::List(_))
        ));
    }

    #[test]
    fn cli_parse_backends_list_json() {
        let cli = Cli::try_parse_from(["meridian", "backends", "list", "--json"]).unwrap();
        match cli.command {
            Commands::Backends(BackendsCommands::List(args)) => assert!(args.json),
            _ => panic!("Expected Backends List command"),
        }
    }

    #[test]
    fn cli_parse_config_init() {
        let cli = Cli::try_parse_from(["meridian", "config", "init"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Config(ConfigCommands::Init(_))
        ));
    }
}
