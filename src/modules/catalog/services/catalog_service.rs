use std::sync::Arc;
use std::time::Duration;

use crate::core::db::with_timeout;
use crate::core::{AppError, Result};
use crate::modules::catalog::models::{
    CatalogItem, CreateItemRequest, ItemKind, UpdateItemRequest,
};
use crate::modules::catalog::repositories::catalog_repository::CatalogRepository;

/// Service for catalog business logic
pub struct CatalogService {
    repository: Arc<CatalogRepository>,
    query_timeout: Duration,
}

impl CatalogService {
    pub fn new(repository: Arc<CatalogRepository>, query_timeout: Duration) -> Self {
        Self {
            repository,
            query_timeout,
        }
    }

    pub async fn create_item(&self, request: CreateItemRequest) -> Result<CatalogItem> {
        request.validate()?;

        let item = with_timeout(self.query_timeout, self.repository.create(&request)).await?;

        tracing::info!(item_id = item.id, code = %item.code, "Catalog item created");
        Ok(item)
    }

    pub async fn get_item(&self, id: i64) -> Result<CatalogItem> {
        with_timeout(self.query_timeout, self.repository.find_by_id(id))
            .await?
            .ok_or_else(|| AppError::not_found(format!("Item {} not found", id)))
    }

    pub async fn list_items(
        &self,
        kind: Option<ItemKind>,
        search: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<CatalogItem>> {
        let limit = limit.clamp(1, 100);
        let offset = offset.max(0);

        with_timeout(
            self.query_timeout,
            self.repository.list(kind, search, limit, offset),
        )
        .await
    }

    pub async fn update_item(&self, id: i64, patch: UpdateItemRequest) -> Result<CatalogItem> {
        patch.validate()?;

        with_timeout(self.query_timeout, self.repository.update(id, &patch))
            .await?
            .ok_or_else(|| AppError::not_found(format!("Item {} not found", id)))
    }

    /// Remove an item from the catalog.
    ///
    /// Existing transactions keep their snapshotted code, name and price.
    pub async fn delete_item(&self, id: i64) -> Result<()> {
        let deleted = with_timeout(self.query_timeout, self.repository.delete(id)).await?;
        if !deleted {
            return Err(AppError::not_found(format!("Item {} not found", id)));
        }

        tracing::info!(item_id = id, "Catalog item deleted");
        Ok(())
    }
}
