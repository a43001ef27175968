//! Stand-in vendor transaction endpoint.
//!
//! Mounted only in mock mode so the full intake-to-delivery path can be
//! exercised against this service itself instead of a live vendor.

use axum::Json;
use quitt_core::Transaction;
use serde_json::{json, Value};
use tracing::{debug, info, instrument};

/// Accepts a vendor transaction and acknowledges it.
#[instrument(name = "mock_vendor_transaction", skip_all)]
pub async fn mock_vendor_transaction(Json(transaction): Json<Transaction>) -> Json<Value> {
    let transaction_id = transaction.receipt.transaction_information.id.clone();

    info!(transaction_id = %transaction_id, "mock vendor received transaction");
    debug!(
        device_ref = %transaction.device_ref,
        items = transaction.receipt.sale_items.len(),
        channels = transaction.delivery_channels.len(),
        "transaction details"
    );

    Json(json!({
        "status": "success",
        "transaction_id": transaction_id,
        "message": "Transaction processed successfully"
    }))
}
