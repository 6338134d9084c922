//! SHG Platform Server
//!
//! Serves the REST API over the JSON documents in the data directory.
//!
//! Usage:
//!   cargo run --bin load_data      # seed the sample dataset
//!   cargo run --bin shg_platform   # start server (default 0.0.0.0:5000)

use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;
use tracing::{info, warn};

use shg_platform::chat::GeminiClient;
use shg_platform::config::Config;
use shg_platform::rest::create_router;
use shg_platform::{logging, Storage};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // .env is optional
    dotenvy::dotenv().ok();
    let config = Config::parse();
    let _log_guard = logging::init(config.log_format, config.log_dir.as_deref())?;

    let storage = Storage::open(&config.data_dir)?;
    info!(data_dir = %config.data_dir.display(), "storage ready");

    let chat = GeminiClient::new(config.gemini_api_url.clone(), config.gemini_api_key.clone())?;
    if config.gemini_api_key.as_deref().map_or(true, str::is_empty) {
        warn!("GEMINI_API_KEY not set; chat requests will return 503");
    }

    let app = create_router(storage, Arc::new(chat));

    let addr = config.socket_addr();
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "SHG platform API listening");

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
