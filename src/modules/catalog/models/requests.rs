use rust_decimal::Decimal;
use serde::Deserialize;

use super::catalog_item::ItemKind;
use crate::core::{AppError, Result};

/// Payload for creating a catalog item
#[derive(Debug, Deserialize)]
pub struct CreateItemRequest {
    pub code: String,
    pub name: String,
    pub kind: ItemKind,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub unit_price: Decimal,
    #[serde(default)]
    pub description: Option<String>,
}

impl CreateItemRequest {
    pub fn validate(&self) -> Result<()> {
        if self.code.trim().is_empty() {
            return Err(AppError::validation("Item code must not be empty"));
        }
        if self.name.trim().is_empty() {
            return Err(AppError::validation("Item name must not be empty"));
        }
        if self.unit_price < Decimal::ZERO {
            return Err(AppError::validation("Unit price must not be negative"));
        }
        Ok(())
    }
}

/// Field-by-field patch for a catalog item; absent fields keep their
/// stored value.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateItemRequest {
    pub code: Option<String>,
    pub name: Option<String>,
    pub kind: Option<ItemKind>,
    #[serde(default, with = "rust_decimal::serde::arbitrary_precision_option")]
    pub unit_price: Option<Decimal>,
    pub description: Option<String>,
}

impl UpdateItemRequest {
    pub fn validate(&self) -> Result<()> {
        if let Some(code) = &self.code {
            if code.trim().is_empty() {
                return Err(AppError::validation("Item code must not be empty"));
            }
        }
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(AppError::validation("Item name must not be empty"));
            }
        }
        if let Some(price) = self.unit_price {
            if price < Decimal::ZERO {
                return Err(AppError::validation("Unit price must not be negative"));
            }
        }
        Ok(())
    }
}
