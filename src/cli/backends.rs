//! Backends command implementation

use crate::cli::output::{format_backends_json, format_backends_table, BackendView};
use crate::cli::BackendsListArgs;
use crate::config::MeridianConfig;
use crate::registry::Registry;

/// Handle backends list command
pub fn handle_backends_list(args: &BackendsListArgs) -> Result<String, Box<dyn std::error::Error>> {
    let config = if args.config.exists() {
        MeridianConfig::load(Some(&args.config))?
    } else {
        MeridianConfig::default()
    };

    let registry = Registry::from_config(&config.backends)?;
    let views: Vec<BackendView> = registry.list().iter().map(BackendView::from).collect();

    if args.json {
        Ok(format_backends_json(&views))
    } else {
        Ok(format_backends_table(&views))
    }
}
