use chrono::{DateTime, Utc};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::core::{money, AppError, Result};
use crate::modules::catalog::models::{
    CatalogItem, CreateItemRequest, ItemKind, UpdateItemRequest,
};

const ITEM_COLUMNS: &str =
    "id, code, name, kind, unit_price, description, created_at, updated_at";

/// Repository for catalog item persistence
pub struct CatalogRepository {
    pool: SqlitePool,
}

impl CatalogRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, request: &CreateItemRequest) -> Result<CatalogItem> {
        let now = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO catalog_items (code, name, kind, unit_price, description, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(request.code.trim())
        .bind(request.name.trim())
        .bind(request.kind.to_string())
        .bind(request.unit_price.to_string())
        .bind(&request.description)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| Self::map_code_conflict(e, request.code.trim()))?;

        let id = result.last_insert_rowid();
        self.find_by_id(id).await?.ok_or_else(|| {
            AppError::internal(format!("Item {} was created but not found", id))
        })
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<CatalogItem>> {
        let row = sqlx::query_as::<_, CatalogItemRow>(&format!(
            "SELECT {} FROM catalog_items WHERE id = ?",
            ITEM_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(CatalogItemRow::into_domain).transpose()
    }

    /// Fetch several items at once, in no particular order.
    ///
    /// Used when a transaction is created to snapshot item codes and names.
    pub async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<CatalogItem>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(format!(
            "SELECT {} FROM catalog_items WHERE id IN (",
            ITEM_COLUMNS
        ));
        let mut separated = builder.separated(", ");
        for id in ids {
            separated.push_bind(id);
        }
        separated.push_unseparated(")");

        let rows = builder
            .build_query_as::<CatalogItemRow>()
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(CatalogItemRow::into_domain).collect()
    }

    pub async fn list(
        &self,
        kind: Option<ItemKind>,
        search: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<CatalogItem>> {
        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(format!(
            "SELECT {} FROM catalog_items WHERE 1=1",
            ITEM_COLUMNS
        ));

        if let Some(kind) = kind {
            builder.push(" AND kind = ");
            builder.push_bind(kind.to_string());
        }
        if let Some(term) = search {
            let pattern = format!("%{}%", term);
            builder.push(" AND (name LIKE ");
            builder.push_bind(pattern.clone());
            builder.push(" OR code LIKE ");
            builder.push_bind(pattern);
            builder.push(")");
        }

        builder.push(" ORDER BY name ASC LIMIT ");
        builder.push_bind(limit);
        builder.push(" OFFSET ");
        builder.push_bind(offset);

        let rows = builder
            .build_query_as::<CatalogItemRow>()
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(CatalogItemRow::into_domain).collect()
    }

    /// Apply a patch and return the updated item, `None` when the id does
    /// not exist.
    pub async fn update(
        &self,
        id: i64,
        patch: &UpdateItemRequest,
    ) -> Result<Option<CatalogItem>> {
        let Some(current) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let code = patch
            .code
            .as_deref()
            .map(str::trim)
            .unwrap_or(&current.code)
            .to_string();
        let name = patch
            .name
            .as_deref()
            .map(str::trim)
            .unwrap_or(&current.name)
            .to_string();
        let kind = patch.kind.unwrap_or(current.kind);
        let unit_price = patch.unit_price.unwrap_or(current.unit_price);
        let description = patch
            .description
            .clone()
            .or_else(|| current.description.clone());

        sqlx::query(
            r#"
            UPDATE catalog_items
            SET code = ?, name = ?, kind = ?, unit_price = ?, description = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&code)
        .bind(&name)
        .bind(kind.to_string())
        .bind(unit_price.to_string())
        .bind(&description)
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| Self::map_code_conflict(e, &code))?;

        self.find_by_id(id).await
    }

    /// Delete an item; returns whether a row was removed.
    ///
    /// Always allowed: transaction lines carry their own copy of the code,
    /// name and price.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM catalog_items WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    fn map_code_conflict(e: sqlx::Error, code: &str) -> AppError {
        match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                AppError::conflict(format!("Item code {} already exists", code))
            }
            _ => AppError::Database(e),
        }
    }
}

#[derive(sqlx::FromRow)]
struct CatalogItemRow {
    id: i64,
    code: String,
    name: String,
    kind: String,
    unit_price: String,
    description: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl CatalogItemRow {
    fn into_domain(self) -> Result<CatalogItem> {
        Ok(CatalogItem {
            id: self.id,
            code: self.code,
            name: self.name,
            kind: self.kind.parse().map_err(AppError::internal)?,
            unit_price: money::parse_stored("unit_price", &self.unit_price)?,
            description: self.description,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
