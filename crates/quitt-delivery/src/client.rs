//! HTTP client for the vendor transaction API.
//!
//! Handles request construction, response categorization, and the
//! bounded retry loop with exponential backoff. A sentinel base URL
//! selects a no-network mock mode for local and development operation.

use std::time::Duration;

use quitt_core::Transaction;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, info_span, warn, Instrument};

use crate::error::{DeliveryError, Result};

/// Sentinel base URL selecting mock mode: no network call is made and a
/// synthetic success is returned immediately.
pub const MOCK_BASE_URL: &str = "mock";

/// Path suffix of the vendor transaction endpoint.
const TRANSACTION_PATH: &str = "/events/v2/transaction/";

/// Configuration for the vendor delivery client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Vendor API base URL, or [`MOCK_BASE_URL`] for mock mode.
    pub base_url: String,
    /// Bearer token for the vendor API.
    pub api_key: String,
    /// Maximum retries after the initial attempt.
    pub max_retries: u32,
    /// Base delay for exponential backoff.
    pub base_delay: Duration,
    /// Cap on any single backoff delay.
    pub max_delay: Duration,
    /// Jitter percentage (0.0 to 1.0) added to backoff delays.
    pub jitter_factor: f64,
    /// Timeout for each HTTP request.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: MOCK_BASE_URL.to_string(),
            api_key: "mock_api_key".to_string(),
            max_retries: crate::DEFAULT_MAX_RETRIES,
            base_delay: Duration::from_secs_f64(crate::DEFAULT_BASE_DELAY_SECS),
            max_delay: Duration::from_secs(60),
            jitter_factor: 0.1,
            timeout: Duration::from_secs(crate::DEFAULT_TIMEOUT_SECONDS),
        }
    }
}

/// Result of a successful vendor delivery.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VendorReceipt {
    /// Vendor-reported status.
    pub status: String,
    /// Transaction identifier echoed by the vendor.
    pub transaction_id: String,
    /// Vendor message.
    pub message: String,
    /// Total attempts made, including the first.
    pub attempts: u32,
}

/// Vendor response body shape.
#[derive(Debug, Deserialize)]
struct VendorResponse {
    #[serde(default)]
    status: String,
    #[serde(default)]
    transaction_id: String,
    #[serde(default)]
    message: String,
}

/// Client for forwarding transactions to the vendor API.
///
/// Retries transient failures internally: connection and timeout errors
/// and 5xx responses back off geometrically and retry up to the
/// configured bound; 4xx responses fail immediately.
#[derive(Debug, Clone)]
pub struct VendorClient {
    client: reqwest::Client,
    config: ClientConfig,
}

impl VendorClient {
    /// Creates a new vendor client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `DeliveryError::ConfigurationError` if the HTTP client
    /// cannot be built with the provided settings.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent("Quitt-Vendor-Relay/1.0")
            .build()
            .map_err(|e| {
                DeliveryError::configuration(format!("failed to build HTTP client: {e}"))
            })?;

        Ok(Self { client, config })
    }

    /// Creates a client with default (mock mode) configuration.
    pub fn with_defaults() -> Result<Self> {
        Self::new(ClientConfig::default())
    }

    /// Whether the client operates in no-network mock mode.
    pub fn is_mock(&self) -> bool {
        self.config.base_url == MOCK_BASE_URL
    }

    /// Delivers a transaction to the vendor, retrying transient
    /// failures with exponential backoff.
    ///
    /// # Errors
    ///
    /// - `ClientError` for 4xx responses, immediately and without retry
    /// - `RetriesExhausted` once the configured bound is spent on
    ///   retryable failures
    /// - `InternalError` for unexpected conditions
    pub async fn deliver(&self, transaction: &Transaction) -> Result<VendorReceipt> {
        let transaction_id = transaction.receipt.transaction_information.id.clone();

        if self.is_mock() {
            info!(transaction_id = %transaction_id, "mock mode, skipping vendor call");
            return Ok(VendorReceipt {
                status: "success".to_string(),
                transaction_id,
                message: "Transaction processed successfully".to_string(),
                attempts: 1,
            });
        }

        let mut attempt: u32 = 0;
        loop {
            let span = info_span!(
                "vendor_delivery",
                transaction_id = %transaction_id,
                attempt = attempt + 1
            );

            let outcome = self.send_once(transaction).instrument(span).await;

            match outcome {
                Ok(mut receipt) => {
                    receipt.attempts = attempt + 1;
                    info!(
                        transaction_id = %transaction_id,
                        attempts = receipt.attempts,
                        "transaction delivered"
                    );
                    return Ok(receipt);
                },
                Err(error) if error.is_retryable() => {
                    if attempt >= self.config.max_retries {
                        warn!(
                            transaction_id = %transaction_id,
                            max_retries = self.config.max_retries,
                            "retry budget exhausted"
                        );
                        return Err(DeliveryError::retries_exhausted(self.config.max_retries));
                    }

                    let delay = self.backoff_delay(attempt);
                    warn!(
                        transaction_id = %transaction_id,
                        error = %error,
                        retry_in_ms = delay.as_millis() as u64,
                        attempt = attempt + 1,
                        "retryable delivery failure, backing off"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                },
                Err(error) => {
                    warn!(transaction_id = %transaction_id, error = %error, "terminal delivery failure");
                    return Err(error);
                },
            }
        }
    }

    /// Performs a single POST to the vendor endpoint.
    async fn send_once(&self, transaction: &Transaction) -> Result<VendorReceipt> {
        let url = format!("{}{TRANSACTION_PATH}", self.config.base_url.trim_end_matches('/'));

        let response = match self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(transaction)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                if e.is_timeout() {
                    return Err(DeliveryError::timeout(self.config.timeout.as_secs()));
                }
                if e.is_connect() {
                    return Err(DeliveryError::network(format!("connection failed: {e}")));
                }
                return Err(DeliveryError::network(e.to_string()));
            },
        };

        let status = response.status();
        debug!(status = status.as_u16(), "vendor response received");

        if status.is_success() {
            let body: VendorResponse = response
                .json()
                .await
                .map_err(|e| DeliveryError::internal(format!("malformed vendor response: {e}")))?;
            return Ok(VendorReceipt {
                status: body.status,
                transaction_id: body.transaction_id,
                message: body.message,
                attempts: 0,
            });
        }

        let status_code = status.as_u16();
        let body = response.text().await.unwrap_or_default();

        if status.is_server_error() {
            Err(DeliveryError::server_error(status_code, body))
        } else if status.is_client_error() {
            Err(DeliveryError::client_error(status_code, body))
        } else {
            Err(DeliveryError::internal(format!("unexpected vendor status {status_code}")))
        }
    }

    /// Calculates the backoff delay for the given zero-based attempt.
    ///
    /// `base_delay * 2^attempt`, capped at `max_delay`, with jitter.
    fn backoff_delay(&self, attempt: u32) -> Duration {
        let exponent = attempt.min(20);
        let multiplier = 2_u32.saturating_pow(exponent);
        let raw = self.config.base_delay * multiplier;
        let capped = std::cmp::min(raw, self.config.max_delay);

        std::cmp::min(apply_jitter(capped, self.config.jitter_factor), self.config.max_delay)
    }
}

/// Randomizes a delay by ±`jitter_factor` to spread retry storms.
fn apply_jitter(duration: Duration, jitter_factor: f64) -> Duration {
    if jitter_factor <= 0.0 {
        return duration;
    }

    let clamped = jitter_factor.clamp(0.0, 1.0);
    let mut rng = rand::rng();
    let range = duration.as_secs_f64() * clamped;
    let offset = rng.random_range(-range..=range);

    Duration::from_secs_f64((duration.as_secs_f64() + offset).max(0.0))
}
