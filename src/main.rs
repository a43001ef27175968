//! Quitt order webhook relay.
//!
//! Main entry point. Initializes logging, loads configuration, wires
//! the delivery client, webhook handler, and background queue together,
//! and serves the HTTP API until shutdown.

use std::sync::Arc;

use anyhow::{Context, Result};
use quitt_api::{AppState, Config, WebhookHandler};
use quitt_delivery::{EventQueue, VendorClient};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    info!("Starting Quitt order webhook relay");

    let config = Arc::new(Config::load()?);
    info!(
        vendor_base_url = %config.vendor_base_url,
        queue_enabled = config.queue_enabled,
        supported_events = ?config.supported_events,
        signature_verification = config.verify_signatures(),
        "Configuration loaded"
    );

    let client = VendorClient::new(config.to_client_config())
        .context("Failed to build vendor client")?;
    let handler = Arc::new(WebhookHandler::new(config.supported_events.clone(), client));
    let queue = Arc::new(EventQueue::new());

    if config.queue_enabled {
        queue.start(handler.clone()).await;
        info!("Queue worker started");
    } else {
        info!("Queue disabled, events will be processed inline");
    }

    let addr = config.parse_server_addr()?;
    let state = AppState { config, handler, queue: queue.clone() };

    quitt_api::start_server(state, addr).await.context("Server failed")?;

    // Let the worker finish its in-flight item before exiting.
    if queue.is_running().await {
        info!("Stopping queue worker");
        queue.stop().await;
    }

    info!("Quitt shutdown complete");
    Ok(())
}

/// Initializes tracing with environment-based configuration.
fn init_tracing() {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info,quitt=debug,tower_http=debug"))
        .expect("Invalid RUST_LOG environment variable");

    let fmt_layer = fmt::layer().with_target(true).with_file(true).with_line_number(true);

    tracing_subscriber::registry().with(filter).with(fmt_layer).init();
}
