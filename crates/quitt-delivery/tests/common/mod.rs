//! Shared fixtures for delivery integration tests.
#![allow(dead_code)]

use quitt_core::{transform, OrderEvent, Transaction};

/// A realistic order-completion event with one item and one card
/// payment.
pub fn sample_event(order_id: &str) -> OrderEvent {
    serde_json::from_value(serde_json::json!({
        "tenant": "fashionco",
        "name": "order.completed",
        "published_at": "2024-03-01T12:05:00Z",
        "payload": {
            "id": order_id,
            "external_id": format!("FC-{order_id}"),
            "created_at": "2024-03-01T11:00:00Z",
            "placed_at": "2024-03-01T11:30:00Z",
            "completed_at": "2024-03-01T12:00:00Z",
            "associate_id": "associate-004521",
            "associate_email": "jane.doe@fashionco.example",
            "channel_type": "store",
            "channel": "store-42",
            "is_exchange": false,
            "customer_email": "customer@example.com",
            "customer_id": "cust-9",
            "external_customer_id": "EXT-9",
            "is_historical": false,
            "billing_address": sample_address(),
            "shipping_address": sample_address(),
            "price_method": "fixed",
            "subtotal": 125.0,
            "discount_total": 0.0,
            "shipping_total": 0.0,
            "shipping_tax": 0.0,
            "tax_total": 25.0,
            "grand_total": 150.0,
            "currency": "GBP",
            "tax_strategy": "inclusive",
            "tax_exempt": false,
            "items": [{
                "id": "item-1",
                "item_type": "product",
                "product_id": "SKU-A",
                "pricebook_id": "default",
                "pricebook_price": 125.0,
                "list_price": 125.0,
                "item_discounts": 0.0,
                "order_discounts": 0.0,
                "tax": 25.0,
                "tax_provider_details": [
                    {"name": "VAT", "amount": 25.0, "rate": 0.2}
                ],
                "tax_class": "standard",
                "quantity": 1,
                "status": "completed",
                "shipping_service_level": "in_store",
                "is_preorder": false,
                "future_fulfillment_location_id": "",
                "shipping_method": "in_store_handover"
            }],
            "payments": [{
                "payment_method": "credit_card",
                "card_brand": "VISA",
                "card_last4": "4242",
                "amount": 150.0,
                "currency": "GBP",
                "status": "captured"
            }]
        }
    }))
    .expect("fixture event deserializes")
}

fn sample_address() -> serde_json::Value {
    serde_json::json!({
        "first_name": "Ada",
        "last_name": "Lovelace",
        "address_line_1": "1 High Street",
        "zip_code": "SW1A 1AA",
        "city": "London",
        "country": "GB"
    })
}

/// A transformed transaction ready for delivery.
pub fn sample_transaction(order_id: &str) -> Transaction {
    transform(&sample_event(order_id)).expect("fixture event transforms")
}
