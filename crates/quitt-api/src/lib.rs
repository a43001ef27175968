//! HTTP transport for the order webhook relay.
//!
//! Accepts order-completion webhook events, verifies their signatures,
//! validates and transforms them, and hands them to the delivery layer
//! either inline or through the background queue.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod crypto;
pub mod error;
pub mod handlers;
pub mod server;
pub mod webhook;

use std::sync::Arc;

use quitt_delivery::EventQueue;

pub use config::Config;
pub use error::ApiError;
pub use server::{create_router, start_server};
pub use webhook::{ProcessResult, ValidationError, WebhookHandler};

/// Shared application state threaded through the router.
#[derive(Clone)]
pub struct AppState {
    /// Loaded service configuration.
    pub config: Arc<Config>,
    /// Webhook orchestration pipeline.
    pub handler: Arc<WebhookHandler>,
    /// Background processing queue.
    pub queue: Arc<EventQueue>,
}
