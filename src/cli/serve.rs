//! Serve command implementation

use std::sync::Arc;

use crate::api::{create_router, AppState};
use crate::cli::ServeArgs;
use crate::client::HttpModelClient;
use crate::config::MeridianConfig;

/// Load configuration with CLI overrides
pub fn load_config_with_overrides(
    args: &ServeArgs,
) -> Result<MeridianConfig, Box<dyn std::error::Error>> {
    // Load from file if it exists, otherwise use defaults
    let mut config = if args.config.exists() {
        MeridianConfig::load(Some(&args.config))?
    } else {
        tracing::debug!("Config file not found, using defaults");
        MeridianConfig::default()
    };

    // Apply environment variable overrides
    config = config.with_env_overrides();

    // Apply CLI overrides (highest priority)
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(ref host) = args.host {
        config.server.host = host.clone();
    }
    if let Some(ref log_level) = args.log_level {
        config.logging.level = log_level.clone();
    }
    if args.fast_first {
        config.routing.precision_first = false;
    }

    Ok(config)
}

/// Run the Meridian server until shutdown.
pub async fn run_serve(args: ServeArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config_with_overrides(&args)?;
    crate::logging::init(&config.logging);
    config.validate()?;

    let config = Arc::new(config);
    let client = Arc::new(HttpModelClient::default());
    let state = Arc::new(AppState::new(Arc::clone(&config), client)?);

    for descriptor in state.registry.list() {
        tracing::info!(
            name = %descriptor.name,
            url = %descriptor.url,
            role = %descriptor.role,
            timeout_ms = descriptor.timeout.as_millis() as u64,
            "registered backend"
        );
    }

    let app = create_router(state);
    let addr = config.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, "meridian listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("meridian shut down");
    Ok(())
}

/// Wait for shutdown signal (SIGINT or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install CTRL+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("received SIGINT, shutting down"),
        _ = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
