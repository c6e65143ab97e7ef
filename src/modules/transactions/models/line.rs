use rust_decimal::Decimal;
use serde::Serialize;

/// One persisted transaction line.
///
/// `item_code`, `item_name` and `unit_price` are copies taken when the
/// transaction was created. The catalog row may change or disappear later
/// without touching this line.
#[derive(Debug, Clone, Serialize)]
pub struct TransactionLine {
    pub id: i64,
    pub transaction_id: i64,

    /// Catalog id at creation time; not a live reference
    pub item_id: i64,
    pub item_code: String,
    pub item_name: String,

    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub quantity: Decimal,

    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub unit_price: Decimal,

    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub discount_percent: Decimal,

    /// `quantity * unit_price * (1 - discount_percent/100)`, rounded to
    /// two decimal places
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub line_total: Decimal,
}
