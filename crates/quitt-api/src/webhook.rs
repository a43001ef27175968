//! Webhook event orchestration.
//!
//! [`WebhookHandler`] owns the intake pipeline: validate the event,
//! transform it into a vendor transaction, and deliver it. The same
//! handler serves inline processing and the background queue through
//! the [`EventProcessor`] seam.

use async_trait::async_trait;
use quitt_core::{transform, OrderEvent};
use quitt_delivery::{EventProcessor, VendorClient, VendorReceipt};
use serde::Serialize;
use thiserror::Error;
use tracing::{info, instrument};

use crate::error::ApiError;

/// Intake validation failures.
///
/// Rules run in order; the first violation wins.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The event name is not in the supported set.
    #[error("unsupported event type: {name}")]
    UnsupportedEvent {
        /// The rejected event name.
        name: String,
    },

    /// The order payload carries no identifier.
    #[error("missing order ID")]
    MissingOrderId,

    /// The order has no line items.
    #[error("order must have at least one item")]
    NoItems,

    /// The request body was not a well-formed event.
    #[error("malformed event body: {message}")]
    MalformedBody {
        /// Deserialization error description.
        message: String,
    },
}

/// Outcome of processing one webhook event.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessResult {
    /// Order identifier of the processed event.
    pub event_id: String,
    /// Event name.
    pub event_type: String,
    /// Tenant the order belongs to.
    pub tenant: String,
    /// Processing status, always "processed" on success.
    pub status: String,
    /// Vendor transaction identifier.
    pub transaction_id: String,
    /// Vendor delivery receipt.
    pub delivery: VendorReceipt,
}

/// Validates, transforms, and delivers order-completion events.
pub struct WebhookHandler {
    supported_events: Vec<String>,
    client: VendorClient,
}

impl WebhookHandler {
    /// Creates a handler accepting the given event names.
    pub fn new(supported_events: Vec<String>, client: VendorClient) -> Self {
        Self { supported_events, client }
    }

    /// Validates an event against the intake rules.
    ///
    /// # Errors
    ///
    /// Returns the first rule violation: unsupported event name, missing
    /// order identifier, or empty item list.
    pub fn validate_event(&self, event: &OrderEvent) -> Result<(), ValidationError> {
        if !self.supported_events.iter().any(|name| name == &event.name) {
            return Err(ValidationError::UnsupportedEvent { name: event.name.clone() });
        }

        if event.payload.id.is_empty() {
            return Err(ValidationError::MissingOrderId);
        }

        if event.payload.items.is_empty() {
            return Err(ValidationError::NoItems);
        }

        Ok(())
    }

    /// Transforms an event into a vendor transaction and delivers it.
    ///
    /// # Errors
    ///
    /// Propagates transformation failures and delivery failures; the
    /// caller decides how they surface.
    #[instrument(
        name = "process_event",
        skip(self, event),
        fields(order_id = %event.payload.id, event = %event.name)
    )]
    pub async fn process_event(&self, event: &OrderEvent) -> Result<ProcessResult, ApiError> {
        let transaction = transform(event)?;
        let transaction_id = transaction.receipt.transaction_information.id.clone();

        let delivery = self.client.deliver(&transaction).await?;

        info!(
            transaction_id = %transaction_id,
            attempts = delivery.attempts,
            "event processed"
        );

        Ok(ProcessResult {
            event_id: event.payload.id.clone(),
            event_type: event.name.clone(),
            tenant: event.tenant.clone(),
            status: "processed".to_string(),
            transaction_id,
            delivery,
        })
    }
}

#[async_trait]
impl EventProcessor for WebhookHandler {
    async fn process(&self, event: OrderEvent) -> anyhow::Result<()> {
        self.process_event(&event).await.map(|_| ()).map_err(anyhow::Error::new)
    }
}

#[cfg(test)]
mod tests {
    use quitt_delivery::VendorClient;

    use super::*;

    fn handler() -> WebhookHandler {
        WebhookHandler::new(
            vec!["order.completed".to_string()],
            VendorClient::with_defaults().unwrap(),
        )
    }

    fn event(name: &str, order_id: &str, item_count: usize) -> OrderEvent {
        let item = serde_json::json!({
            "id": "item-1",
            "item_type": "product",
            "product_id": "SKU-A",
            "pricebook_id": "default",
            "pricebook_price": 50.0,
            "list_price": 50.0,
            "item_discounts": 0.0,
            "order_discounts": 0.0,
            "tax": 10.0,
            "tax_provider_details": [{"name": "VAT", "amount": 10.0, "rate": 0.2}],
            "tax_class": "standard",
            "quantity": 1,
            "status": "completed",
            "shipping_service_level": "in_store",
            "is_preorder": false,
            "future_fulfillment_location_id": "",
            "shipping_method": "in_store_handover"
        });
        let address = serde_json::json!({
            "first_name": "Jane",
            "last_name": "Doe",
            "address_line_1": "1 High Street",
            "zip_code": "W1 1AA",
            "city": "London",
            "country": "GB"
        });

        serde_json::from_value(serde_json::json!({
            "tenant": "fashionco",
            "name": name,
            "published_at": "2024-03-01T12:05:00Z",
            "payload": {
                "id": order_id,
                "external_id": "FC-1",
                "created_at": "2024-03-01T11:00:00Z",
                "placed_at": "2024-03-01T11:30:00Z",
                "completed_at": "2024-03-01T12:00:00Z",
                "associate_id": "associate-1",
                "associate_email": "jane.doe@fashionco.example",
                "channel_type": "store",
                "channel": "store-42",
                "is_exchange": false,
                "customer_email": "customer@example.com",
                "customer_id": "cust-9",
                "external_customer_id": "EXT-9",
                "is_historical": false,
                "billing_address": address,
                "shipping_address": address,
                "price_method": "fixed",
                "subtotal": 50.0,
                "discount_total": 0.0,
                "shipping_total": 0.0,
                "shipping_tax": 0.0,
                "tax_total": 10.0,
                "grand_total": 60.0,
                "currency": "GBP",
                "tax_strategy": "inclusive",
                "tax_exempt": false,
                "items": vec![item; item_count],
                "payments": [{
                    "payment_method": "cash",
                    "amount": 60.0,
                    "currency": "GBP",
                    "status": "captured"
                }]
            }
        }))
        .expect("fixture event deserializes")
    }

    #[test]
    fn valid_event_passes() {
        assert!(handler().validate_event(&event("order.completed", "order-1", 1)).is_ok());
    }

    #[test]
    fn unsupported_event_rejected_first() {
        // Even with no items, the event-name rule fires first.
        let result = handler().validate_event(&event("promo.created", "order-1", 0));

        assert_eq!(
            result,
            Err(ValidationError::UnsupportedEvent { name: "promo.created".to_string() })
        );
    }

    #[test]
    fn missing_order_id_rejected() {
        let result = handler().validate_event(&event("order.completed", "", 1));
        assert_eq!(result, Err(ValidationError::MissingOrderId));
    }

    #[test]
    fn empty_items_rejected() {
        let result = handler().validate_event(&event("order.completed", "order-1", 0));
        assert_eq!(result, Err(ValidationError::NoItems));
    }

    #[tokio::test]
    async fn process_event_delivers_in_mock_mode() {
        let result = handler()
            .process_event(&event("order.completed", "order-1", 1))
            .await
            .expect("mock delivery succeeds");

        assert_eq!(result.event_id, "order-1");
        assert_eq!(result.event_type, "order.completed");
        assert_eq!(result.tenant, "fashionco");
        assert_eq!(result.status, "processed");
        assert_eq!(result.transaction_id, "TRX-fashionco-order-1");
        assert_eq!(result.delivery.attempts, 1);
    }
}
