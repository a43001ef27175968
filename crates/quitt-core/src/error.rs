//! Error types for the transformation core.

use thiserror::Error;

/// Result type alias for transform operations.
pub type Result<T> = std::result::Result<T, TransformError>;

/// Failures while mapping an order event into a vendor transaction.
///
/// These indicate upstream data defects, not transient conditions, and
/// are never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    /// An order item carried a quantity of zero. The unit price is the
    /// line total divided by quantity, so zero is a defect, not a
    /// valid state.
    #[error("item {product_id} has zero quantity")]
    InvalidQuantity {
        /// Product SKU of the offending item.
        product_id: String,
    },

    /// A payload field was malformed beyond what the schema enforces.
    #[error("malformed payload: {message}")]
    MalformedPayload {
        /// Description of the defect.
        message: String,
    },
}

impl TransformError {
    /// Creates an invalid-quantity error for the given product.
    pub fn invalid_quantity(product_id: impl Into<String>) -> Self {
        Self::InvalidQuantity { product_id: product_id.into() }
    }

    /// Creates a malformed-payload error from a message.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedPayload { message: message.into() }
    }
}
