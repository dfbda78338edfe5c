//! Macropulse API Server
//!
//! HTTP server exposing the scored economic calendar, category outlook,
//! CSV exports, and price seasonality. Stateless apart from the in-memory
//! TTL cache, so it can be horizontally scaled.

use dotenvy::dotenv;
use macropulse::config::{self, Config};
use macropulse::core::http::start_server;
use macropulse::logging;
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env if present
    dotenv().ok();

    // Initialize logging based on environment
    logging::init_logging();

    let port = config::get_port();
    let env = config::get_environment();
    let app_config = Config::from_env();

    info!("Starting Macropulse API Server");
    info!(environment = %env, "Environment");
    info!(port = port, "HTTP Server: http://0.0.0.0:{}", port);
    info!(
        source = app_config.default_source.as_str(),
        window_days = app_config.default_window_days,
        "Default calendar source: {}",
        app_config.default_source.as_str()
    );

    let server_handle = tokio::spawn(async move {
        if let Err(e) = start_server(port, app_config).await {
            error!(error = %e, "HTTP server error");
        }
    });

    // Graceful shutdown
    info!("API server started, waiting for shutdown signal...");
    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("Shutting down API server...");
            info!("API server stopped");
        }
        _ = server_handle => {
            error!("HTTP server stopped");
        }
    }

    Ok(())
}
