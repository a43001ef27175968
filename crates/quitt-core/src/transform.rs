//! Order event to vendor transaction mapping.
//!
//! Pure and deterministic apart from the synthesized card tokens: two
//! runs over the same input produce identical identifiers, amounts, and
//! structure, but fresh token material. No I/O happens here.

use rust_decimal::{prelude::ToPrimitive, Decimal};
use uuid::Uuid;

use crate::{
    error::{Result, TransformError},
    order::{OrderEvent, OrderItem, Payment},
    receipt::{
        Amount, Associate, ConsentAction, ConsentValue, Currency, Customer, DeliveryChannel,
        DeliveryRecipient, FiscalInfo, LineTotal, PaymentAuthorization, PaymentCard,
        PaymentProvider, Quantity, Receipt, SaleItem, Subtotal, Tax, TaxAuthority, Tender, Total,
        Transaction, TransactionInfo,
    },
};

/// Order-level tax rate, fixed at 20% regardless of input.
const ORDER_TAX_RATE: Decimal = Decimal::from_parts(20, 0, 0, false, 0);

/// Default item tax rate applied when no provider breakdown is present.
const DEFAULT_ITEM_TAX_RATE: Decimal = ORDER_TAX_RATE;

/// Maps an order-completion event into a vendor transaction.
///
/// Every order item becomes exactly one sale item and every payment
/// exactly one tender, in input order.
///
/// # Errors
///
/// Returns [`TransformError::InvalidQuantity`] if any item has a
/// quantity of zero; the per-unit price is the line total divided by
/// quantity.
pub fn transform(event: &OrderEvent) -> Result<Transaction> {
    let order = &event.payload;
    let tenant = &event.tenant;

    let currency = Currency {
        code: order.currency.clone(),
        language_code: Some("en".to_string()),
        country_code: Some(order.shipping_address.country.clone()),
    };

    let sale_items = order
        .items
        .iter()
        .map(|item| transform_sale_item(item, &currency, &order.associate_id))
        .collect::<Result<Vec<_>>>()?;

    let transaction_info = TransactionInfo {
        date_time: order.completed_at.to_rfc3339(),
        id: format!("TRX-{tenant}-{}", order.id),
        number: order.external_id.clone(),
    };

    let fiscal_info = FiscalInfo {
        transaction_id: order.id.clone(),
        transaction_number: order.external_id.clone(),
        signature: Some(format!("DigitalSignature-{}", order.id)),
        printer_id: Some(format!("Printer-{}", order.channel)),
    };

    let tenders =
        order.payments.iter().map(|payment| transform_tender(payment, &order.currency)).collect();

    let associate = Associate {
        name: associate_display_name(&order.associate_email),
        id: order.associate_id.clone(),
    };

    let total = Total {
        header: "Total".to_string(),
        footer: "Includes all applicable taxes".to_string(),
        amount: Amount::new(order.grand_total, &order.currency),
        text: "Total Amount Due".to_string(),
        kind: "Total".to_string(),
    };

    let subtotal = Subtotal {
        header: "Subtotal".to_string(),
        footer: String::new(),
        amount: Amount::new(order.subtotal, &order.currency),
        text: "Subtotal before taxes".to_string(),
        kind: "Subtotal".to_string(),
    };

    // A single synthesized order-level VAT entry at the fixed rate.
    let taxes = vec![Tax {
        header: "VAT".to_string(),
        footer: String::new(),
        amount: Amount::new(order.tax_total, &order.currency),
        exempt: order.tax_exempt,
        net_taxed_amount: Some(Amount::new(order.subtotal, &order.currency)),
        rate: ORDER_TAX_RATE,
        gross_taxed_amount: Some(Amount::new(order.grand_total, &order.currency)),
        code: "VAT20".to_string(),
        reason: "Standard rate".to_string(),
        authority: Some(TaxAuthority {
            identifier: format!("{}VAT", order.shipping_address.country),
            name: "Tax Authority".to_string(),
        }),
        text: "Value Added Tax at 20%".to_string(),
    }];

    let display_tenant = capitalize(tenant);

    let receipt = Receipt {
        paper_printed: false,
        header: format!("{display_tenant} - Receipt"),
        footer: format!("Thank you for shopping with {display_tenant}!"),
        total,
        sale_items,
        currency,
        additional_attributes: Some(serde_json::json!({
            "product_category": "Fashion",
            "brand": display_tenant,
            "store_id": order.channel,
        })),
        associate: Some(associate.clone()),
        barcode: Some(format!("{}-{}", tenant.to_uppercase(), order.external_id)),
        discounts: Vec::new(),
        fees: Vec::new(),
        fiscal_information: Some(fiscal_info),
        other_totals: Vec::new(),
        reason: "Purchase".to_string(),
        salesperson: Some(associate),
        other_text: Some("Receipt".to_string()),
        // In-store purchase, no shipping block.
        shipping: None,
        subtotal,
        taxes,
        tenders,
        transaction_information: transaction_info,
        vat_refund_receipt_requested: false,
    };

    Ok(Transaction {
        kind: "transaction".to_string(),
        device_ref: format!("{}-DEVICE-{}", tenant.to_uppercase(), order.channel),
        receipt,
        flags: Vec::new(),
        delivery_channels: vec![DeliveryChannel {
            channel: "email".to_string(),
            recipient: DeliveryRecipient { value: order.customer_email.clone() },
        }],
        customer: Some(Customer {
            consent_actions: vec![ConsentAction {
                identifier: "general".to_string(),
                value: ConsentValue::GrantConsent,
            }],
        }),
    })
}

/// Maps one order item into a sale item.
fn transform_sale_item(
    item: &OrderItem,
    currency: &Currency,
    associate_id: &str,
) -> Result<SaleItem> {
    if item.quantity == 0 {
        return Err(TransformError::invalid_quantity(&item.product_id));
    }

    let tax_rate = item
        .tax_provider_details
        .first()
        .map_or(DEFAULT_ITEM_TAX_RATE, |detail| detail.rate * Decimal::ONE_HUNDRED);
    let rate_whole = tax_rate.trunc().to_i64().unwrap_or_default();

    let country = currency.country_code.clone().unwrap_or_default();
    let tax = Tax {
        header: "VAT".to_string(),
        footer: String::new(),
        amount: Amount::new(item.tax, &currency.code),
        exempt: false,
        net_taxed_amount: Some(Amount::new(item.list_price - item.tax, &currency.code)),
        rate: tax_rate,
        gross_taxed_amount: Some(Amount::new(item.list_price, &currency.code)),
        code: format!("VAT{rate_whole}"),
        reason: "Standard rate".to_string(),
        authority: Some(TaxAuthority {
            identifier: format!("{country}VAT"),
            name: "Tax Authority".to_string(),
        }),
        text: format!("VAT at {rate_whole}%"),
    };

    let unit_price = item.list_price / Decimal::from(item.quantity);

    Ok(SaleItem {
        header: format!("Product {}", item.product_id),
        footer: String::new(),
        quantity: Quantity { value: item.quantity, unit: "piece".to_string() },
        total: LineTotal { value: item.list_price },
        sku: item.product_id.clone(),
        currency: currency.clone(),
        salesperson: Some(Associate {
            name: format!("Associate {}", tail_chars(associate_id, 6)),
            id: associate_id.to_string(),
        }),
        color: None,
        size: None,
        alternate_sku: String::new(),
        gtin: String::new(),
        serial_number: String::new(),
        unit_price: Amount::new(unit_price, &currency.code),
        original_price: Amount::new(unit_price, &currency.code),
        text: format!("Product {}", item.product_id),
        notes: String::new(),
        full_text: format!("Product {} x{}", item.product_id, item.quantity),
        tax,
        discounts: Vec::new(),
        additional_attributes: None,
        gift_numbers: Vec::new(),
    })
}

/// Maps one payment into a tender. Card tenders get synthesized token,
/// authorization, and approval material; real card data never transits
/// this system.
fn transform_tender(payment: &Payment, currency_code: &str) -> Tender {
    let (payment_card, payment_authorization) = match payment.card_brand.as_deref() {
        Some(brand) => (
            Some(PaymentCard {
                kind: brand.to_string(),
                start_date: None,
                expiry_date: Some("01/30".to_string()),
                name_on_card: Some("Customer".to_string()),
                slip: String::new(),
                token: Some(format!("CardToken{}", hex_token(10))),
            }),
            Some(PaymentAuthorization {
                provider: PaymentProvider { id: format!("{brand}Provider") },
                reference_id: format!("AuthRef{}", hex_token(8)),
                approval_code: format!("Approval{}", hex_token(8)),
                reference_text: Some("Fashion payment".to_string()),
                token: Some(format!("fashiontoken{}", hex_token(8))),
            }),
        ),
        None => (None, None),
    };

    Tender {
        header: payment.payment_method.clone(),
        footer: String::new(),
        kind: if payment.card_brand.is_some() { "card" } else { "cash" }.to_string(),
        amount: Amount::new(payment.amount, currency_code),
        text: format!("Total paid by {}", payment.card_brand.as_deref().unwrap_or("Cash")),
        payment_card,
        payment_authorization,
    }
}

/// Derives the associate display name from their email: local part,
/// dots replaced with spaces, each word title-cased.
fn associate_display_name(email: &str) -> String {
    let local = email.split('@').next().unwrap_or(email);
    local
        .split('.')
        .filter(|word| !word.is_empty())
        .map(title_case_word)
        .collect::<Vec<_>>()
        .join(" ")
}

fn title_case_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Uppercases the first character and lowercases the rest.
fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Returns the last `n` characters of a string, or the whole string
/// when shorter.
fn tail_chars(value: &str, n: usize) -> &str {
    let char_count = value.chars().count();
    let skip = char_count.saturating_sub(n);
    match value.char_indices().nth(skip) {
        Some((index, _)) => &value[index..],
        None => value,
    }
}

/// Generates `len` random lowercase hex characters.
fn hex_token(len: usize) -> String {
    let hex = Uuid::new_v4().simple().to_string();
    hex[..len.min(hex.len())].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn associate_name_from_email() {
        assert_eq!(associate_display_name("jane.doe@example.com"), "Jane Doe");
        assert_eq!(associate_display_name("SMITH@example.com"), "Smith");
        assert_eq!(associate_display_name("a.b.c@x.io"), "A B C");
    }

    #[test]
    fn capitalize_lowercases_tail() {
        assert_eq!(capitalize("fashionco"), "Fashionco");
        assert_eq!(capitalize("ACME"), "Acme");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn tail_chars_shorter_than_n() {
        assert_eq!(tail_chars("abc", 6), "abc");
        assert_eq!(tail_chars("associate-004521", 6), "004521");
    }

    #[test]
    fn hex_token_length_and_charset() {
        let token = hex_token(10);
        assert_eq!(token.len(), 10);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn cash_tender_has_no_card_material() {
        let payment = Payment {
            payment_method: "cash".to_string(),
            card_brand: None,
            card_last4: None,
            amount: Decimal::new(500, 1),
            currency: "GBP".to_string(),
            status: "captured".to_string(),
        };

        let tender = transform_tender(&payment, "GBP");
        assert_eq!(tender.kind, "cash");
        assert_eq!(tender.text, "Total paid by Cash");
        assert!(tender.payment_card.is_none());
        assert!(tender.payment_authorization.is_none());
    }

    #[test]
    fn card_tender_synthesizes_tokens() {
        let payment = Payment {
            payment_method: "credit_card".to_string(),
            card_brand: Some("VISA".to_string()),
            card_last4: Some("4242".to_string()),
            amount: Decimal::new(1500, 1),
            currency: "GBP".to_string(),
            status: "captured".to_string(),
        };

        let tender = transform_tender(&payment, "GBP");
        assert_eq!(tender.kind, "card");
        assert_eq!(tender.text, "Total paid by VISA");

        let card = tender.payment_card.expect("card tender has card details");
        assert_eq!(card.kind, "VISA");
        assert_eq!(card.expiry_date.as_deref(), Some("01/30"));
        assert!(card.token.unwrap().starts_with("CardToken"));

        let auth = tender.payment_authorization.expect("card tender has authorization");
        assert_eq!(auth.provider.id, "VISAProvider");
        assert!(auth.reference_id.starts_with("AuthRef"));
        assert!(auth.approval_code.starts_with("Approval"));
        assert!(auth.token.unwrap().starts_with("fashiontoken"));
    }
}
