// A catalog item is something the store sells: physical goods or billed work.
// Transactions copy the code, name and price into their own lines, so editing
// or deleting a catalog item never rewrites history.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// What a catalog entry sells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    /// Physical goods
    Item,
    /// Billed work, no stock
    Service,
}

impl std::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemKind::Item => write!(f, "item"),
            ItemKind::Service => write!(f, "service"),
        }
    }
}

impl std::str::FromStr for ItemKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "item" => Ok(ItemKind::Item),
            "service" => Ok(ItemKind::Service),
            _ => Err(format!("Invalid item kind: {}", s)),
        }
    }
}

/// A sellable catalog entry
#[derive(Debug, Clone, Serialize)]
pub struct CatalogItem {
    pub id: i64,

    /// Human-readable code, unique across the catalog
    pub code: String,

    pub name: String,

    pub kind: ItemKind,

    /// Current selling price per unit
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub unit_price: Decimal,

    pub description: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
