//! Configuration management for the webhook relay service.

use std::{net::SocketAddr, str::FromStr, time::Duration};

use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use quitt_delivery::ClientConfig;
use serde::{Deserialize, Serialize};

const CONFIG_FILE: &str = "config.toml";

/// Sentinel webhook secret that disables signature verification.
///
/// Local and development deployments have no upstream signing their
/// requests, so the default secret doubles as an off switch.
pub const MOCK_WEBHOOK_SECRET: &str = "mock_webhook_secret";

/// Complete service configuration with defaults, file, and environment
/// overrides.
///
/// Configuration is loaded in priority order:
/// 1. Environment variables prefixed `QUITT_` (highest priority)
/// 2. Configuration file (`config.toml`)
/// 3. Built-in defaults (lowest priority)
///
/// The service works out-of-the-box in mock mode: signature checks are
/// skipped and deliveries short-circuit without touching the network.
/// Create `config.toml` or set environment variables to point at a real
/// vendor deployment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // Intake
    /// Shared secret for webhook signature verification.
    ///
    /// Environment variable: `QUITT_WEBHOOK_SECRET`
    #[serde(default = "default_webhook_secret")]
    pub webhook_secret: String,
    /// Event names accepted by the webhook endpoint.
    ///
    /// Environment variable: `QUITT_SUPPORTED_EVENTS`
    #[serde(default = "default_supported_events")]
    pub supported_events: Vec<String>,

    // Vendor
    /// Vendor API base URL, or `"mock"` for no-network mock mode.
    ///
    /// Environment variable: `QUITT_VENDOR_BASE_URL`
    #[serde(default = "default_vendor_base_url")]
    pub vendor_base_url: String,
    /// Bearer token for the vendor API.
    ///
    /// Environment variable: `QUITT_VENDOR_API_KEY`
    #[serde(default = "default_vendor_api_key")]
    pub vendor_api_key: String,

    // Retry
    /// Maximum delivery retries after the initial attempt.
    ///
    /// Environment variable: `QUITT_MAX_RETRIES`
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Base delay for exponential backoff in seconds.
    ///
    /// Environment variable: `QUITT_RETRY_BASE_DELAY_SECS`
    #[serde(default = "default_retry_base_delay_secs")]
    pub retry_base_delay_secs: f64,
    /// Cap on any single backoff delay in seconds.
    ///
    /// Environment variable: `QUITT_RETRY_MAX_DELAY_SECS`
    #[serde(default = "default_retry_max_delay_secs")]
    pub retry_max_delay_secs: u64,
    /// Jitter factor for retry timing (0.0 to 1.0).
    ///
    /// Environment variable: `QUITT_RETRY_JITTER_FACTOR`
    #[serde(default = "default_retry_jitter_factor")]
    pub retry_jitter_factor: f64,
    /// HTTP request timeout for vendor delivery in seconds.
    ///
    /// Environment variable: `QUITT_DELIVERY_TIMEOUT_SECS`
    #[serde(default = "default_delivery_timeout_secs")]
    pub delivery_timeout_secs: u64,

    // Queue
    /// Whether webhook events are processed through the background queue.
    ///
    /// Environment variable: `QUITT_QUEUE_ENABLED`
    #[serde(default = "default_queue_enabled")]
    pub queue_enabled: bool,

    // Server
    /// Server bind address.
    ///
    /// Environment variable: `QUITT_HOST`
    #[serde(default = "default_host")]
    pub host: String,
    /// Server bind port.
    ///
    /// Environment variable: `QUITT_PORT`
    #[serde(default = "default_port")]
    pub port: u16,
    /// Inbound HTTP request timeout in seconds.
    ///
    /// Environment variable: `QUITT_REQUEST_TIMEOUT_SECS`
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    // Logging
    /// Log level configuration.
    ///
    /// Environment variable: `QUITT_RUST_LOG`
    #[serde(default = "default_log_level")]
    pub rust_log: String,
}

impl Config {
    /// Load configuration from defaults, config file, and environment
    /// variable overrides.
    pub fn load() -> Result<Self> {
        let figment = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Toml::file(CONFIG_FILE))
            .merge(Env::prefixed("QUITT_"));

        let config: Self = figment.extract().context("Failed to load configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Convert to the delivery crate's client configuration.
    pub fn to_client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.vendor_base_url.clone(),
            api_key: self.vendor_api_key.clone(),
            max_retries: self.max_retries,
            base_delay: Duration::from_secs_f64(self.retry_base_delay_secs),
            max_delay: Duration::from_secs(self.retry_max_delay_secs),
            jitter_factor: self.retry_jitter_factor,
            timeout: Duration::from_secs(self.delivery_timeout_secs),
        }
    }

    /// Whether inbound webhook signatures are verified.
    ///
    /// Verification is skipped when the secret is the mock sentinel.
    pub fn verify_signatures(&self) -> bool {
        self.webhook_secret != MOCK_WEBHOOK_SECRET
    }

    /// Parse server socket address from host and port configuration.
    pub fn parse_server_addr(&self) -> Result<SocketAddr> {
        let addr_str = format!("{}:{}", self.host, self.port);
        SocketAddr::from_str(&addr_str).context("Invalid server address")
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.port == 0 {
            anyhow::bail!("port must be greater than 0");
        }

        if self.webhook_secret.is_empty() {
            anyhow::bail!("webhook_secret must not be empty");
        }

        if self.supported_events.is_empty() {
            anyhow::bail!("supported_events must contain at least one event name");
        }

        if self.vendor_base_url.is_empty() {
            anyhow::bail!("vendor_base_url must not be empty");
        }

        if self.retry_base_delay_secs <= 0.0 {
            anyhow::bail!("retry_base_delay_secs must be greater than 0");
        }

        if !(0.0..=1.0).contains(&self.retry_jitter_factor) {
            anyhow::bail!("retry_jitter_factor must be between 0.0 and 1.0");
        }

        if self.delivery_timeout_secs == 0 {
            anyhow::bail!("delivery_timeout_secs must be greater than 0");
        }

        if self.request_timeout_secs == 0 {
            anyhow::bail!("request_timeout_secs must be greater than 0");
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            webhook_secret: default_webhook_secret(),
            supported_events: default_supported_events(),
            vendor_base_url: default_vendor_base_url(),
            vendor_api_key: default_vendor_api_key(),
            max_retries: default_max_retries(),
            retry_base_delay_secs: default_retry_base_delay_secs(),
            retry_max_delay_secs: default_retry_max_delay_secs(),
            retry_jitter_factor: default_retry_jitter_factor(),
            delivery_timeout_secs: default_delivery_timeout_secs(),
            queue_enabled: default_queue_enabled(),
            host: default_host(),
            port: default_port(),
            request_timeout_secs: default_request_timeout_secs(),
            rust_log: default_log_level(),
        }
    }
}

fn default_webhook_secret() -> String {
    MOCK_WEBHOOK_SECRET.to_string()
}

fn default_supported_events() -> Vec<String> {
    vec!["order.completed".to_string()]
}

fn default_vendor_base_url() -> String {
    quitt_delivery::MOCK_BASE_URL.to_string()
}

fn default_vendor_api_key() -> String {
    "mock_api_key".to_string()
}

fn default_max_retries() -> u32 {
    quitt_delivery::DEFAULT_MAX_RETRIES
}

fn default_retry_base_delay_secs() -> f64 {
    quitt_delivery::DEFAULT_BASE_DELAY_SECS
}

fn default_retry_max_delay_secs() -> u64 {
    60
}

fn default_retry_jitter_factor() -> f64 {
    0.1
}

fn default_delivery_timeout_secs() -> u64 {
    quitt_delivery::DEFAULT_TIMEOUT_SECONDS
}

fn default_queue_enabled() -> bool {
    false
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}
