use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::core::{AppError, Result};
use crate::modules::store::models::{StoreProfile, UpsertStoreProfileRequest};

/// Repository for the single store profile row
pub struct StoreRepository {
    pool: SqlitePool,
}

impl StoreRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// The profile is the first row ever created.
    pub async fn find_first(&self) -> Result<Option<StoreProfile>> {
        let row = sqlx::query_as::<_, StoreProfileRow>(
            r#"
            SELECT id, name, address, phone, email, npwp, created_at, updated_at
            FROM store_profile
            ORDER BY id ASC
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(StoreProfileRow::into_domain))
    }

    /// Replace the profile, creating it on first call.
    pub async fn upsert(&self, request: &UpsertStoreProfileRequest) -> Result<StoreProfile> {
        let now = Utc::now();

        match self.find_first().await? {
            Some(existing) => {
                sqlx::query(
                    r#"
                    UPDATE store_profile
                    SET name = ?, address = ?, phone = ?, email = ?, npwp = ?, updated_at = ?
                    WHERE id = ?
                    "#,
                )
                .bind(request.name.trim())
                .bind(&request.address)
                .bind(&request.phone)
                .bind(&request.email)
                .bind(&request.npwp)
                .bind(now)
                .bind(existing.id)
                .execute(&self.pool)
                .await?;
            }
            None => {
                sqlx::query(
                    r#"
                    INSERT INTO store_profile (name, address, phone, email, npwp, created_at, updated_at)
                    VALUES (?, ?, ?, ?, ?, ?, ?)
                    "#,
                )
                .bind(request.name.trim())
                .bind(&request.address)
                .bind(&request.phone)
                .bind(&request.email)
                .bind(&request.npwp)
                .bind(now)
                .bind(now)
                .execute(&self.pool)
                .await?;
            }
        }

        self.find_first().await?.ok_or_else(|| {
            AppError::internal("Store profile was saved but not found".to_string())
        })
    }
}

#[derive(sqlx::FromRow)]
struct StoreProfileRow {
    id: i64,
    name: String,
    address: Option<String>,
    phone: Option<String>,
    email: Option<String>,
    npwp: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl StoreProfileRow {
    fn into_domain(self) -> StoreProfile {
        StoreProfile {
            id: self.id,
            name: self.name,
            address: self.address,
            phone: self.phone,
            email: self.email,
            npwp: self.npwp,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
