// A transaction is the ledger entry for one sale: customer identity, the
// priced lines, the tax snapshot computed at write time, and a lifecycle
// status. Monetary fields are stored amounts, never recomputed on read.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::line::TransactionLine;

/// Transaction lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    /// Editable, deletable
    Draft,
    /// Agreed with the customer, awaiting payment
    Confirmed,
    /// Payment received
    Paid,
    /// Abandoned at any point before cancellation
    Cancelled,
}

impl TransactionStatus {
    /// Whether the status may move to `next`.
    ///
    /// Forward path is draft, confirmed, paid. Cancellation is allowed from
    /// every status except cancelled itself. Re-stating the current status
    /// is a no-op and always allowed.
    pub fn can_transition_to(self, next: TransactionStatus) -> bool {
        use TransactionStatus::*;
        match (self, next) {
            (current, target) if current == target => true,
            (Draft, Confirmed) => true,
            (Confirmed, Paid) => true,
            (Draft | Confirmed | Paid, Cancelled) => true,
            _ => false,
        }
    }
}

impl Default for TransactionStatus {
    fn default() -> Self {
        TransactionStatus::Draft
    }
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionStatus::Draft => write!(f, "draft"),
            TransactionStatus::Confirmed => write!(f, "confirmed"),
            TransactionStatus::Paid => write!(f, "paid"),
            TransactionStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl std::str::FromStr for TransactionStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "draft" => Ok(TransactionStatus::Draft),
            "confirmed" => Ok(TransactionStatus::Confirmed),
            "paid" => Ok(TransactionStatus::Paid),
            "cancelled" => Ok(TransactionStatus::Cancelled),
            _ => Err(format!("Invalid transaction status: {}", s)),
        }
    }
}

/// A recorded sale with its tax snapshot
///
/// Withholding taxes (PPh 22/23) are stored as non-negative amounts and
/// subtracted from the total:
/// `total_amount = subtotal + ppn + regional - pph22 - pph23 + stamp_duty`.
#[derive(Debug, Clone, Serialize)]
pub struct Transaction {
    pub id: i64,

    /// Generated, unique, never user-supplied
    pub transaction_number: String,

    pub customer_name: String,
    pub customer_address: Option<String>,
    pub customer_phone: Option<String>,
    pub customer_email: Option<String>,

    pub status: TransactionStatus,

    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub subtotal: Decimal,

    pub ppn_enabled: bool,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub ppn_amount: Decimal,

    pub regional_tax_enabled: bool,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub regional_tax_amount: Decimal,

    pub pph22_enabled: bool,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub pph22_amount: Decimal,

    pub pph23_enabled: bool,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub pph23_amount: Decimal,

    pub stamp_duty_required: bool,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub stamp_duty_amount: Decimal,

    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub total_amount: Decimal,

    pub notes: Option<String>,

    /// Business date of the sale, defaults to creation time
    pub transaction_date: DateTime<Utc>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    /// Lines in their original order
    pub items: Vec<TransactionLine>,
}

/// A fully computed transaction ready to be persisted
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub transaction_number: String,
    pub customer_name: String,
    pub customer_address: Option<String>,
    pub customer_phone: Option<String>,
    pub customer_email: Option<String>,
    pub status: TransactionStatus,
    pub subtotal: Decimal,
    pub ppn_enabled: bool,
    pub ppn_amount: Decimal,
    pub regional_tax_enabled: bool,
    pub regional_tax_amount: Decimal,
    pub pph22_enabled: bool,
    pub pph22_amount: Decimal,
    pub pph23_enabled: bool,
    pub pph23_amount: Decimal,
    pub stamp_duty_required: bool,
    pub stamp_duty_amount: Decimal,
    pub total_amount: Decimal,
    pub notes: Option<String>,
    pub transaction_date: DateTime<Utc>,
    pub lines: Vec<NewTransactionLine>,
}

/// A priced line with its catalog snapshot, ready to be persisted
#[derive(Debug, Clone)]
pub struct NewTransactionLine {
    pub item_id: i64,
    pub item_code: String,
    pub item_name: String,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    pub discount_percent: Decimal,
    pub line_total: Decimal,
}
