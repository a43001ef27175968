//! HTTP request handlers.
//!
//! - `orders` — webhook intake and the signature-free simulation twin
//! - `vendor_mock` — stand-in vendor endpoint for mock mode
//! - `health` — status document and liveness probe

pub mod health;
pub mod orders;
pub mod vendor_mock;

pub use health::{health_check, index};
pub use orders::{simulate_order, submit_order};
pub use vendor_mock::mock_vendor_transaction;
