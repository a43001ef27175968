//! Webhook intake handlers.
//!
//! Both endpoints accept an order-completion event and return 202 with
//! a processing summary. The main endpoint verifies the webhook
//! signature over the raw body before parsing; the simulation endpoint
//! skips that check so development tooling can post events directly.

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use quitt_core::OrderEvent;
use serde::Serialize;
use tracing::{info, instrument};

use crate::{
    crypto::{verify_signature, SIGNATURE_HEADER},
    error::ApiError,
    webhook::{ProcessResult, ValidationError},
    AppState,
};

/// Response body for accepted webhook events.
#[derive(Debug, Serialize)]
pub struct WebhookResponse {
    /// "accepted" when queued, "processed" when handled inline.
    pub status: String,
    /// Human-readable summary.
    pub message: String,
    /// Whether the event went through the background queue.
    pub queued: bool,
    /// Processing outcome, present only for the inline path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<ProcessResult>,
}

/// Accepts an order-completion webhook event.
///
/// Verifies the signature, validates the event, then either enqueues it
/// for background processing or processes it inline depending on
/// configuration.
#[instrument(name = "submit_order", skip_all)]
pub async fn submit_order(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ApiError> {
    if state.config.verify_signatures() {
        let signature =
            headers.get(SIGNATURE_HEADER).and_then(|v| v.to_str().ok()).unwrap_or("");
        verify_signature(&body, signature, &state.config.webhook_secret)?;
    }

    let event = parse_event(&body)?;
    accept_event(&state, event).await
}

/// Accepts a simulated webhook event without a signature check.
///
/// Behaves exactly like the main endpoint otherwise; intended for
/// testing and development.
#[instrument(name = "simulate_order", skip_all)]
pub async fn simulate_order(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let event = parse_event(&body)?;

    info!(order_id = %event.payload.id, event = %event.name, "simulating webhook event");

    accept_event(&state, event).await
}

fn parse_event(body: &[u8]) -> Result<OrderEvent, ApiError> {
    serde_json::from_slice(body)
        .map_err(|e| ValidationError::MalformedBody { message: e.to_string() }.into())
}

async fn accept_event(state: &AppState, event: OrderEvent) -> Result<Response, ApiError> {
    state.handler.validate_event(&event)?;

    let order_id = event.payload.id.clone();
    let name = event.name.clone();

    let response = if state.config.queue_enabled {
        state.queue.enqueue(event);

        WebhookResponse {
            status: "accepted".to_string(),
            message: format!("Event '{name}' for order {order_id} accepted for processing"),
            queued: true,
            result: None,
        }
    } else {
        let result = state.handler.process_event(&event).await?;

        WebhookResponse {
            status: "processed".to_string(),
            message: format!("Event '{name}' for order {order_id} processed successfully"),
            queued: false,
            result: Some(result),
        }
    };

    Ok((StatusCode::ACCEPTED, Json(response)).into_response())
}
