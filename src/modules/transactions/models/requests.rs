use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;

use super::transaction::TransactionStatus;
use crate::core::{AppError, Result};

/// One line of a new transaction as supplied by the caller
#[derive(Debug, Clone, Deserialize)]
pub struct TransactionItemInput {
    pub item_id: i64,

    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub quantity: Decimal,

    /// Price charged for this sale; usually the catalog price, but the
    /// seller may override it per transaction
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub unit_price: Decimal,

    #[serde(default, with = "rust_decimal::serde::arbitrary_precision")]
    pub discount_percent: Decimal,
}

/// Payload for creating a transaction
#[derive(Debug, Deserialize)]
pub struct CreateTransactionRequest {
    pub customer_name: String,
    #[serde(default)]
    pub customer_address: Option<String>,
    #[serde(default)]
    pub customer_phone: Option<String>,
    #[serde(default)]
    pub customer_email: Option<String>,

    pub items: Vec<TransactionItemInput>,

    /// PPN applies to most sales, so it defaults on
    #[serde(default = "default_true")]
    pub ppn_enabled: bool,
    #[serde(default)]
    pub regional_tax_enabled: bool,
    #[serde(default)]
    pub pph22_enabled: bool,
    #[serde(default)]
    pub pph23_enabled: bool,

    #[serde(default)]
    pub notes: Option<String>,

    /// Business date; defaults to the creation time
    #[serde(default)]
    pub transaction_date: Option<DateTime<Utc>>,
}

fn default_true() -> bool {
    true
}

impl CreateTransactionRequest {
    pub fn validate(&self) -> Result<()> {
        if self.customer_name.trim().is_empty() {
            return Err(AppError::validation("Customer name must not be empty"));
        }
        if self.items.is_empty() {
            return Err(AppError::validation(
                "Transaction must have at least one item",
            ));
        }

        for (index, line) in self.items.iter().enumerate() {
            let position = index + 1;
            if line.quantity <= Decimal::ZERO {
                return Err(AppError::validation(format!(
                    "Item {}: quantity must be positive",
                    position
                )));
            }
            if line.unit_price <= Decimal::ZERO {
                return Err(AppError::validation(format!(
                    "Item {}: unit price must be positive",
                    position
                )));
            }
            if line.discount_percent < Decimal::ZERO
                || line.discount_percent > Decimal::from(100)
            {
                return Err(AppError::validation(format!(
                    "Item {}: discount must be between 0 and 100",
                    position
                )));
            }
        }

        Ok(())
    }
}

/// Field-by-field patch for a transaction; absent fields keep their
/// stored value. Lines are never replaced through an update.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTransactionRequest {
    pub customer_name: Option<String>,
    pub customer_address: Option<String>,
    pub customer_phone: Option<String>,
    pub customer_email: Option<String>,
    pub status: Option<TransactionStatus>,
    pub ppn_enabled: Option<bool>,
    pub regional_tax_enabled: Option<bool>,
    pub pph22_enabled: Option<bool>,
    pub pph23_enabled: Option<bool>,
    pub notes: Option<String>,
    pub transaction_date: Option<DateTime<Utc>>,
}

impl UpdateTransactionRequest {
    pub fn validate(&self) -> Result<()> {
        if let Some(name) = &self.customer_name {
            if name.trim().is_empty() {
                return Err(AppError::validation("Customer name must not be empty"));
            }
        }
        Ok(())
    }

    /// A patched tax flag invalidates the stored amounts, which then have
    /// to be recomputed from the persisted lines.
    pub fn touches_tax_flags(&self) -> bool {
        self.ppn_enabled.is_some()
            || self.regional_tax_enabled.is_some()
            || self.pph22_enabled.is_some()
            || self.pph23_enabled.is_some()
    }
}

/// History filters; dates are inclusive business-date bounds
#[derive(Debug, Clone)]
pub struct TransactionFilter {
    pub status: Option<TransactionStatus>,
    pub customer_name: Option<String>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub limit: i64,
    pub offset: i64,
}

impl Default for TransactionFilter {
    fn default() -> Self {
        TransactionFilter {
            status: None,
            customer_name: None,
            date_from: None,
            date_to: None,
            limit: 20,
            offset: 0,
        }
    }
}
