//! Domain schema and transformation core.
//!
//! Provides the inbound order-event schema, the outbound vendor
//! transaction-receipt schema, and the pure transformer between them.
//! All entities are immutable value objects constructed once per
//! request or queue item; this crate performs no I/O.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod order;
pub mod receipt;
pub mod transform;

pub use error::TransformError;
pub use order::{Address, OrderEvent, OrderItem, OrderPayload, Payment, TaxBreakdown};
pub use receipt::{Receipt, SaleItem, Tender, Transaction, TransactionInfo};
pub use transform::transform;
