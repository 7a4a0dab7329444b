//! FVG Pattern Detector widget server
//!
//! Serves the upload form, the analysis endpoints, health and metrics.
//! Every request is independent, so the process can be scaled horizontally.

use dotenvy::dotenv;
use fvg_detector::config::{get_environment, Config};
use fvg_detector::core::http::start_server;
use fvg_detector::logging;
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env if present
    dotenv().ok();

    logging::init_logging();

    let config = Config::from_env()?;
    let env = get_environment();
    info!("Starting FVG Pattern Detector");
    info!(environment = %env, "Environment");
    info!(
        port = config.port,
        max_upload_bytes = config.max_upload_bytes,
        "HTTP Server: http://0.0.0.0:{}",
        config.port
    );

    let server_handle = tokio::spawn(async move {
        if let Err(e) = start_server(config).await {
            error!(error = %e, "HTTP server error");
        }
    });

    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("Shutting down widget server...");
        }
        _ = server_handle => {
            error!("HTTP server stopped");
        }
    }

    Ok(())
}
