//! Transport-level error mapping.
//!
//! Every failure mode of the pipeline converges on [`ApiError`], and a
//! single `IntoResponse` implementation maps error kinds to HTTP status
//! codes and a JSON error body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use quitt_core::TransformError;
use quitt_delivery::DeliveryError;
use serde::Serialize;
use thiserror::Error;

use crate::{crypto::SignatureError, webhook::ValidationError};

/// Errors surfaced through the HTTP API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The event failed intake validation.
    #[error("invalid event: {0}")]
    Validation(#[from] ValidationError),

    /// The webhook signature was missing or wrong.
    #[error("unauthorized: {0}")]
    Signature(#[from] SignatureError),

    /// The event could not be transformed into a vendor transaction.
    #[error("transformation failed: {0}")]
    Transform(#[from] TransformError),

    /// Vendor delivery failed.
    #[error("delivery failed: {0}")]
    Delivery(#[from] DeliveryError),

    /// Unexpected internal failure.
    #[error("internal error: {message}")]
    Internal {
        /// Internal error message.
        message: String,
    },
}

/// Error response body with code and message.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error details.
    pub error: ErrorDetail,
}

/// Detailed error information.
#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    /// Stable machine-readable error code.
    pub code: String,
    /// Human-readable error description.
    pub message: String,
}

impl ApiError {
    /// Creates an internal error from a message.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal { message: message.into() }
    }

    /// Stable machine-readable code for this error kind.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "invalid_event",
            Self::Signature(_) => "invalid_signature",
            Self::Transform(_) => "transform_failed",
            Self::Delivery(DeliveryError::ClientError { .. }) => "vendor_rejected",
            Self::Delivery(_) => "delivery_failed",
            Self::Internal { .. } => "internal_error",
        }
    }

    /// HTTP status code this error maps to.
    ///
    /// Vendor 4xx rejections propagate the remote status so callers can
    /// see what the vendor objected to; exhausted retries read as the
    /// vendor being unavailable.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Signature(_) => StatusCode::UNAUTHORIZED,
            Self::Transform(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Delivery(DeliveryError::ClientError { status_code, .. }) => {
                StatusCode::from_u16(*status_code).unwrap_or(StatusCode::BAD_GATEWAY)
            },
            Self::Delivery(DeliveryError::RetriesExhausted { .. }) => {
                StatusCode::SERVICE_UNAVAILABLE
            },
            Self::Delivery(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: ErrorDetail { code: self.code().to_string(), message: self.to_string() },
        };

        (self.status_code(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_bad_request() {
        let error = ApiError::from(ValidationError::MissingOrderId);
        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(error.code(), "invalid_event");
    }

    #[test]
    fn signature_maps_to_unauthorized() {
        let error = ApiError::from(SignatureError::VerificationFailed);
        assert_eq!(error.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(error.code(), "invalid_signature");
    }

    #[test]
    fn transform_maps_to_internal_error() {
        let error = ApiError::from(TransformError::invalid_quantity("SKU-1"));
        assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error.code(), "transform_failed");
    }

    #[test]
    fn vendor_rejection_propagates_remote_status() {
        let error = ApiError::from(DeliveryError::client_error(422, "unprocessable"));
        assert_eq!(error.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(error.code(), "vendor_rejected");
    }

    #[test]
    fn exhausted_retries_map_to_service_unavailable() {
        let error = ApiError::from(DeliveryError::retries_exhausted(3));
        assert_eq!(error.status_code(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(error.code(), "delivery_failed");
    }

    #[test]
    fn error_body_carries_code_and_message() {
        let error = ApiError::from(ValidationError::UnsupportedEvent {
            name: "promo.created".to_string(),
        });
        let response = error.into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
