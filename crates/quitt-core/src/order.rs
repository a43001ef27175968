//! Inbound order-event schema.
//!
//! Mirrors the commerce platform's order-completion webhook payload.
//! Monetary values are exact decimals; timestamps are UTC. Payments may
//! arrive either as fully structured records or as loosely-typed
//! mappings with fields missing — both are resolved into the canonical
//! [`Payment`] value at the deserialization boundary so business logic
//! never branches on representation.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Billing or shipping address attached to an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    /// Recipient first name.
    pub first_name: String,
    /// Recipient last name.
    pub last_name: String,
    /// Primary street address line.
    pub address_line_1: String,
    /// Secondary street address line.
    #[serde(default)]
    pub address_line_2: String,
    /// Postal code.
    pub zip_code: String,
    /// City name.
    pub city: String,
    /// State or province.
    #[serde(default)]
    pub state: String,
    /// ISO country code.
    pub country: String,
    /// Contact phone number.
    #[serde(default)]
    pub phone: String,
}

/// One tax-provider breakdown entry for an order item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBreakdown {
    /// Tax name as reported by the provider.
    pub name: String,
    /// Tax amount charged.
    pub amount: Decimal,
    /// Tax rate as a fraction (0.2 means 20%).
    pub rate: Decimal,
}

/// A single line item on an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    /// Item identifier.
    pub id: String,
    /// Item type discriminator.
    pub item_type: String,
    /// Product SKU.
    pub product_id: String,
    /// Pricebook identifier the price was taken from.
    pub pricebook_id: String,
    /// Price from the pricebook.
    pub pricebook_price: Decimal,
    /// Listed line total for the item.
    pub list_price: Decimal,
    /// Item-level discount total.
    pub item_discounts: Decimal,
    /// Order-level discount allocated to this item.
    pub order_discounts: Decimal,
    /// Tax amount for the line.
    pub tax: Decimal,
    /// Per-provider tax breakdown entries.
    pub tax_provider_details: Vec<TaxBreakdown>,
    /// Tax classification code.
    pub tax_class: String,
    /// Quantity ordered. Must be >= 1; the transformer divides by it.
    pub quantity: u32,
    /// Item fulfillment status.
    pub status: String,
    /// Shipping service level.
    pub shipping_service_level: String,
    /// Whether the item is a preorder.
    pub is_preorder: bool,
    /// Future fulfillment location, if preordered.
    pub future_fulfillment_location_id: String,
    /// Shipping method name.
    pub shipping_method: String,
    /// Free-form extended attributes.
    #[serde(default)]
    pub extended_attributes: Vec<serde_json::Value>,
    /// Applied discounts.
    #[serde(default)]
    pub discounts: Vec<serde_json::Value>,
}

/// Canonical payment record for one payment instrument.
///
/// Constructed from [`PaymentWire`], which tolerates the loose-mapping
/// representation some upstreams send.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "PaymentWire")]
pub struct Payment {
    /// Payment method name, e.g. "credit_card".
    pub payment_method: String,
    /// Card brand when the instrument is a card.
    pub card_brand: Option<String>,
    /// Last four digits of the card number.
    pub card_last4: Option<String>,
    /// Amount paid with this instrument.
    pub amount: Decimal,
    /// Currency code of the amount.
    pub currency: String,
    /// Payment status.
    pub status: String,
}

/// Wire representation of a payment.
///
/// Every field is optional or defaulted so loosely-typed payment
/// mappings deserialize without error; missing fields take the same
/// fallbacks the upstream applies ("Payment" method, zero amount).
#[derive(Debug, Deserialize)]
struct PaymentWire {
    #[serde(default = "default_payment_method")]
    payment_method: String,
    #[serde(default)]
    card_brand: Option<String>,
    #[serde(default)]
    card_last4: Option<String>,
    #[serde(default)]
    amount: Decimal,
    #[serde(default)]
    currency: String,
    #[serde(default)]
    status: String,
}

fn default_payment_method() -> String {
    "Payment".to_string()
}

impl From<PaymentWire> for Payment {
    fn from(wire: PaymentWire) -> Self {
        Self {
            payment_method: wire.payment_method,
            card_brand: wire.card_brand,
            card_last4: wire.card_last4,
            amount: wire.amount,
            currency: wire.currency,
            status: wire.status,
        }
    }
}

/// Full order payload carried by an order-completion event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderPayload {
    /// Internal order identifier.
    pub id: String,
    /// External (customer-facing) order number.
    pub external_id: String,
    /// When the order was created.
    pub created_at: DateTime<Utc>,
    /// When the order was placed.
    pub placed_at: DateTime<Utc>,
    /// When the order reached its terminal state.
    pub completed_at: DateTime<Utc>,
    /// Identifier of the sales associate.
    pub associate_id: String,
    /// Email of the sales associate.
    pub associate_email: String,
    /// Sales channel type, e.g. "store".
    pub channel_type: String,
    /// Concrete channel identifier, e.g. a store number.
    pub channel: String,
    /// Whether the order is an exchange.
    pub is_exchange: bool,
    /// Customer email address.
    pub customer_email: String,
    /// Internal customer identifier.
    pub customer_id: String,
    /// External customer identifier.
    pub external_customer_id: String,
    /// Whether the order was imported historically.
    pub is_historical: bool,
    /// Order-level discounts.
    #[serde(default)]
    pub discounts: Vec<serde_json::Value>,
    /// Billing address.
    pub billing_address: Address,
    /// Shipping address.
    pub shipping_address: Address,
    /// Pricing method used.
    pub price_method: String,
    /// Sum of line totals before tax.
    pub subtotal: Decimal,
    /// Total discount applied.
    pub discount_total: Decimal,
    /// Shipping cost total.
    pub shipping_total: Decimal,
    /// Tax on shipping.
    pub shipping_tax: Decimal,
    /// Total tax charged.
    pub tax_total: Decimal,
    /// Grand total including taxes.
    pub grand_total: Decimal,
    /// ISO currency code for all amounts.
    pub currency: String,
    /// Tax calculation strategy.
    pub tax_strategy: String,
    /// Whether the order is tax exempt.
    pub tax_exempt: bool,
    /// Free-form extended attributes.
    #[serde(default)]
    pub extended_attributes: Vec<serde_json::Value>,
    /// Ordered line items.
    pub items: Vec<OrderItem>,
    /// Ordered payment records.
    pub payments: Vec<Payment>,
}

/// An order-completion webhook event as published by the platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderEvent {
    /// Tenant the order belongs to.
    pub tenant: String,
    /// Event name, e.g. "order.completed".
    pub name: String,
    /// When the event was published.
    pub published_at: DateTime<Utc>,
    /// The order payload.
    pub payload: OrderPayload,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structured_payment_deserializes() {
        let json = r#"{
            "payment_method": "credit_card",
            "card_brand": "VISA",
            "card_last4": "4242",
            "amount": 150.0,
            "currency": "GBP",
            "status": "captured"
        }"#;

        let payment: Payment = serde_json::from_str(json).unwrap();
        assert_eq!(payment.payment_method, "credit_card");
        assert_eq!(payment.card_brand.as_deref(), Some("VISA"));
        assert_eq!(payment.amount, "150.0".parse::<Decimal>().unwrap());
    }

    #[test]
    fn loose_payment_mapping_canonicalized() {
        // Upstream sometimes sends a bare mapping with fields missing.
        let json = r#"{"card_brand": "AMEX"}"#;

        let payment: Payment = serde_json::from_str(json).unwrap();
        assert_eq!(payment.payment_method, "Payment");
        assert_eq!(payment.card_brand.as_deref(), Some("AMEX"));
        assert_eq!(payment.amount, Decimal::ZERO);
        assert!(payment.currency.is_empty());
    }

    #[test]
    fn empty_payment_mapping_canonicalized() {
        let payment: Payment = serde_json::from_str("{}").unwrap();
        assert_eq!(payment.payment_method, "Payment");
        assert!(payment.card_brand.is_none());
        assert_eq!(payment.amount, Decimal::ZERO);
    }
}
