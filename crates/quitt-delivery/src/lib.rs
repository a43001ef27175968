//! Vendor delivery and background processing.
//!
//! This crate owns the outbound half of the pipeline: the HTTP client
//! that forwards transactions to the vendor API with bounded retries
//! and exponential backoff, and the in-process FIFO queue that decouples
//! webhook intake from delivery when asynchronous processing is enabled.
//!
//! # Retry model
//!
//! Delivery retries are an explicit bounded loop carrying the attempt
//! count as local state. Retryable failures (connect/timeout errors and
//! 5xx responses) back off geometrically with jitter; 4xx responses and
//! internal errors fail immediately. When the configured bound is
//! exhausted the caller receives [`DeliveryError::RetriesExhausted`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod client;
pub mod error;
pub mod queue;

pub use client::{ClientConfig, VendorClient, VendorReceipt, MOCK_BASE_URL};
pub use error::{DeliveryError, Result};
pub use queue::{EventProcessor, EventQueue};

/// Default maximum retry count for vendor deliveries.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Default base delay in seconds for exponential backoff.
pub const DEFAULT_BASE_DELAY_SECS: f64 = 1.0;

/// Default HTTP request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
