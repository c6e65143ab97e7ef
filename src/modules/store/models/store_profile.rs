use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{AppError, Result};

/// The seller's identity, printed on every generated document.
///
/// One record by convention: the first row created is the profile.
#[derive(Debug, Clone, Serialize)]
pub struct StoreProfile {
    pub id: i64,
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    /// Indonesian tax registration number (NPWP)
    pub npwp: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating or replacing the store profile
#[derive(Debug, Deserialize)]
pub struct UpsertStoreProfileRequest {
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub npwp: Option<String>,
}

impl UpsertStoreProfileRequest {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::validation("Store name must not be empty"));
        }
        Ok(())
    }
}
