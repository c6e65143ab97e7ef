use std::sync::Arc;
use std::time::Duration;

use crate::core::db::with_timeout;
use crate::core::{AppError, Result};
use crate::modules::store::models::{StoreProfile, UpsertStoreProfileRequest};
use crate::modules::store::repositories::store_repository::StoreRepository;

/// Service for store profile business logic
pub struct StoreService {
    repository: Arc<StoreRepository>,
    query_timeout: Duration,
}

impl StoreService {
    pub fn new(repository: Arc<StoreRepository>, query_timeout: Duration) -> Self {
        Self {
            repository,
            query_timeout,
        }
    }

    pub async fn get_profile(&self) -> Result<StoreProfile> {
        with_timeout(self.query_timeout, self.repository.find_first())
            .await?
            .ok_or_else(|| AppError::not_found("Store profile has not been set up"))
    }

    pub async fn upsert_profile(
        &self,
        request: UpsertStoreProfileRequest,
    ) -> Result<StoreProfile> {
        request.validate()?;

        let profile = with_timeout(self.query_timeout, self.repository.upsert(&request)).await?;

        tracing::info!(store = %profile.name, "Store profile saved");
        Ok(profile)
    }
}
