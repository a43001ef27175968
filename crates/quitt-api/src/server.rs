//! HTTP server setup and request routing.
//!
//! Builds the Axum router with tracing, timeout, and request-id
//! middleware, and serves it with graceful shutdown on CTRL+C or
//! SIGTERM.

use std::{net::SocketAddr, time::Duration};

use axum::{
    extract::Request,
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
    Router,
};
use quitt_delivery::MOCK_BASE_URL;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use tracing::info;
use uuid::Uuid;

use crate::{handlers, AppState};

/// Creates the Axum router with all routes and middleware.
///
/// The mock vendor endpoint is mounted only when the vendor base URL is
/// the mock sentinel, so production deployments never expose it.
pub fn create_router(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health_check))
        .route("/webhooks/orders", post(handlers::submit_order))
        .route("/webhooks/orders/simulate", post(handlers::simulate_order));

    if state.config.vendor_base_url == MOCK_BASE_URL {
        router = router
            .route("/mock/vendor/events/v2/transaction/", post(handlers::mock_vendor_transaction));
    }

    router
        .layer(TimeoutLayer::new(Duration::from_secs(state.config.request_timeout_secs)))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(inject_request_id))
        .with_state(state)
}

/// Middleware to inject a request ID into all responses.
///
/// Adds an X-Request-Id header for tracing requests across services.
async fn inject_request_id(req: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4().to_string();

    let mut req = req;
    req.extensions_mut().insert(request_id.clone());

    let mut response = next.run(req).await;

    if let Ok(header_value) = request_id.parse() {
        response.headers_mut().insert("X-Request-Id", header_value);
    }

    response
}

/// Starts the HTTP server with graceful shutdown support.
///
/// Binds to the given address and serves requests until CTRL+C or
/// SIGTERM is received.
///
/// # Errors
///
/// Returns `std::io::Error` if the port is already in use or the
/// network interface is unavailable.
pub async fn start_server(state: AppState, addr: SocketAddr) -> Result<(), std::io::Error> {
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let actual_addr = listener.local_addr()?;

    info!("HTTP server listening on {}", actual_addr);

    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;

    info!("HTTP server stopped gracefully");
    Ok(())
}

/// Waits for shutdown signal (CTRL+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received CTRL+C, starting graceful shutdown");
        },
        () = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        },
    }
}
