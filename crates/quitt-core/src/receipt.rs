//! Outbound vendor transaction-receipt schema.
//!
//! Structured representation of a completed sale as the vendor's
//! fiscal/reporting API consumes it. Shapes follow the vendor contract
//! exactly; optional fields serialize as `null` when absent.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A monetary amount with an optional currency unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amount {
    /// Decimal value.
    pub value: Decimal,
    /// Currency code, when applicable.
    #[serde(default)]
    pub unit: Option<String>,
}

impl Amount {
    /// Creates an amount denominated in the given currency.
    pub fn new(value: Decimal, unit: impl Into<String>) -> Self {
        Self { value, unit: Some(unit.into()) }
    }
}

/// Currency context for a receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Currency {
    /// ISO currency code.
    pub code: String,
    /// Receipt language code.
    #[serde(default)]
    pub language_code: Option<String>,
    /// Country code the sale occurred in.
    #[serde(default)]
    pub country_code: Option<String>,
}

/// A sales associate reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Associate {
    /// Display name.
    pub name: String,
    /// Associate identifier.
    pub id: String,
}

/// Tax authority attribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxAuthority {
    /// Authority identifier, e.g. "GBVAT".
    pub identifier: String,
    /// Authority display name.
    pub name: String,
}

/// A tax entry at order or item level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tax {
    /// Header text.
    pub header: String,
    /// Footer text.
    #[serde(default)]
    pub footer: String,
    /// Tax amount.
    pub amount: Amount,
    /// Whether the taxed party is exempt.
    pub exempt: bool,
    /// Net amount the tax was computed on.
    #[serde(default)]
    pub net_taxed_amount: Option<Amount>,
    /// Rate as a whole-number percentage (20 means 20%).
    pub rate: Decimal,
    /// Gross amount including the tax.
    #[serde(default)]
    pub gross_taxed_amount: Option<Amount>,
    /// Tax code, e.g. "VAT20".
    pub code: String,
    /// Reason the rate applies.
    pub reason: String,
    /// Issuing authority.
    #[serde(default)]
    pub authority: Option<TaxAuthority>,
    /// Human-readable description.
    pub text: String,
}

/// Quantity of a sale item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quantity {
    /// Number of units.
    pub value: u32,
    /// Unit of measure.
    pub unit: String,
}

/// Line total of a sale item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineTotal {
    /// Total value for the line as given by the order.
    pub value: Decimal,
}

/// One line item on the receipt, derived 1:1 from an order item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleItem {
    /// Header text.
    pub header: String,
    /// Footer text.
    #[serde(default)]
    pub footer: String,
    /// Quantity sold.
    pub quantity: Quantity,
    /// Line total.
    pub total: LineTotal,
    /// Product SKU.
    pub sku: String,
    /// Currency context.
    pub currency: Currency,
    /// Selling associate.
    #[serde(default)]
    pub salesperson: Option<Associate>,
    /// Item color, when known.
    #[serde(default)]
    pub color: Option<String>,
    /// Item size, when known.
    #[serde(default)]
    pub size: Option<String>,
    /// Alternate SKU.
    #[serde(default)]
    pub alternate_sku: String,
    /// Global trade item number.
    #[serde(default)]
    pub gtin: String,
    /// Serial number.
    #[serde(default)]
    pub serial_number: String,
    /// Price per unit (line total divided by quantity).
    pub unit_price: Amount,
    /// Original per-unit price before discounts.
    pub original_price: Amount,
    /// Short description.
    pub text: String,
    /// Free-form notes.
    #[serde(default)]
    pub notes: String,
    /// Long description.
    #[serde(default)]
    pub full_text: String,
    /// Tax entry for the line.
    pub tax: Tax,
    /// Applied discounts.
    #[serde(default)]
    pub discounts: Vec<serde_json::Value>,
    /// Free-form extra attributes.
    #[serde(default)]
    pub additional_attributes: Option<serde_json::Value>,
    /// Gift receipt numbers.
    #[serde(default)]
    pub gift_numbers: Vec<String>,
}

/// Receipt grand total block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Total {
    /// Header text.
    pub header: String,
    /// Footer text.
    #[serde(default)]
    pub footer: String,
    /// Total amount.
    pub amount: Amount,
    /// Display text.
    pub text: String,
    /// Total type tag.
    #[serde(rename = "type")]
    pub kind: String,
}

/// Receipt subtotal block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subtotal {
    /// Header text.
    pub header: String,
    /// Footer text.
    #[serde(default)]
    pub footer: String,
    /// Subtotal amount.
    pub amount: Amount,
    /// Display text.
    pub text: String,
    /// Subtotal type tag.
    #[serde(rename = "type")]
    pub kind: String,
}

/// Shipping charge block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shipping {
    /// Header text.
    pub header: String,
    /// Footer text.
    #[serde(default)]
    pub footer: String,
    /// Shipping amount.
    pub amount: Amount,
}

/// Card details attached to a card tender. Tokens are synthesized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentCard {
    /// Card brand, e.g. "VISA".
    #[serde(rename = "type")]
    pub kind: String,
    /// Card start date.
    #[serde(default)]
    pub start_date: Option<String>,
    /// Card expiry date.
    #[serde(default)]
    pub expiry_date: Option<String>,
    /// Name printed on the card.
    #[serde(default)]
    pub name_on_card: Option<String>,
    /// Printed slip reference.
    #[serde(default)]
    pub slip: String,
    /// Tokenized card reference.
    #[serde(default)]
    pub token: Option<String>,
}

/// Payment provider reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentProvider {
    /// Provider identifier.
    pub id: String,
}

/// Authorization record for a card tender. References are synthesized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentAuthorization {
    /// Authorizing provider.
    pub provider: PaymentProvider,
    /// Authorization reference.
    pub reference_id: String,
    /// Approval code.
    pub approval_code: String,
    /// Display text for the reference.
    #[serde(default)]
    pub reference_text: Option<String>,
    /// Authorization token.
    #[serde(default)]
    pub token: Option<String>,
}

/// One payment instrument's contribution, derived 1:1 from a payment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tender {
    /// Header text.
    pub header: String,
    /// Footer text.
    #[serde(default)]
    pub footer: String,
    /// Tender type: "card" or "cash".
    #[serde(rename = "type")]
    pub kind: String,
    /// Amount tendered.
    pub amount: Amount,
    /// Display text.
    pub text: String,
    /// Card details for card tenders.
    #[serde(default)]
    pub payment_card: Option<PaymentCard>,
    /// Authorization for card tenders.
    #[serde(default)]
    pub payment_authorization: Option<PaymentAuthorization>,
}

/// Transaction identity block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionInfo {
    /// ISO-8601 completion timestamp.
    pub date_time: String,
    /// Synthetic transaction identifier.
    pub id: String,
    /// Transaction number (the order's external id).
    pub number: String,
}

/// Fiscal registration block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FiscalInfo {
    /// Source order identifier.
    pub transaction_id: String,
    /// Source external order number.
    pub transaction_number: String,
    /// Fiscal signature reference.
    #[serde(default)]
    pub signature: Option<String>,
    /// Fiscal printer reference.
    #[serde(default)]
    pub printer_id: Option<String>,
}

/// A discount entry on the receipt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Discount {
    /// Header text.
    pub header: String,
    /// Footer text.
    #[serde(default)]
    pub footer: String,
    /// Display text.
    pub text: String,
    /// Discount amount.
    pub amount: Amount,
    /// Percentage reduction, when percentage-based.
    #[serde(default)]
    pub reduction_percent: Option<Decimal>,
}

/// The full transaction receipt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Receipt {
    /// Whether a paper copy was printed.
    #[serde(default)]
    pub paper_printed: bool,
    /// Receipt header line.
    pub header: String,
    /// Receipt footer line.
    pub footer: String,
    /// Grand total block.
    pub total: Total,
    /// Sale items, in order-item order.
    pub sale_items: Vec<SaleItem>,
    /// Currency context.
    pub currency: Currency,
    /// Free-form extra attributes.
    #[serde(default)]
    pub additional_attributes: Option<serde_json::Value>,
    /// Associate on the receipt.
    #[serde(default)]
    pub associate: Option<Associate>,
    /// Receipt barcode.
    #[serde(default)]
    pub barcode: Option<String>,
    /// Receipt-level discounts.
    #[serde(default)]
    pub discounts: Vec<Discount>,
    /// Fee entries.
    #[serde(default)]
    pub fees: Vec<serde_json::Value>,
    /// Fiscal registration block.
    #[serde(default)]
    pub fiscal_information: Option<FiscalInfo>,
    /// Additional total blocks.
    #[serde(default)]
    pub other_totals: Vec<serde_json::Value>,
    /// Transaction reason.
    pub reason: String,
    /// Selling associate.
    #[serde(default)]
    pub salesperson: Option<Associate>,
    /// Additional display text.
    #[serde(default)]
    pub other_text: Option<String>,
    /// Shipping block, absent for in-store sales.
    #[serde(default)]
    pub shipping: Option<Shipping>,
    /// Subtotal block.
    pub subtotal: Subtotal,
    /// Order-level tax entries.
    pub taxes: Vec<Tax>,
    /// Tenders, in payment order.
    pub tenders: Vec<Tender>,
    /// Transaction identity block.
    pub transaction_information: TransactionInfo,
    /// Whether a VAT refund receipt was requested.
    #[serde(default)]
    pub vat_refund_receipt_requested: bool,
}

/// Recipient of a delivery channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryRecipient {
    /// Recipient address for the channel.
    pub value: String,
}

/// How the receipt reaches the customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryChannel {
    /// Channel name, e.g. "email".
    pub channel: String,
    /// Channel recipient.
    pub recipient: DeliveryRecipient,
}

/// Consent decision values accepted by the vendor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsentValue {
    /// Consent granted.
    GrantConsent,
    /// Consent revoked.
    RevokeConsent,
}

/// One recorded consent action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsentAction {
    /// Consent scope identifier.
    pub identifier: String,
    /// The decision.
    pub value: ConsentValue,
}

/// Customer consent record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    /// Recorded consent actions.
    #[serde(default)]
    pub consent_actions: Vec<ConsentAction>,
}

/// The transaction envelope sent to the vendor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Envelope type tag, always "transaction".
    #[serde(rename = "type")]
    pub kind: String,
    /// Device reference composed from tenant and channel.
    pub device_ref: String,
    /// The receipt.
    pub receipt: Receipt,
    /// Processing flags.
    #[serde(default)]
    pub flags: Vec<String>,
    /// Receipt delivery channels.
    pub delivery_channels: Vec<DeliveryChannel>,
    /// Customer consent record.
    #[serde(default)]
    pub customer: Option<Customer>,
}
