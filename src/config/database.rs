use crate::core::{AppError, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::env;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub query_timeout_secs: u64,
}

impl DatabaseConfig {
    pub fn from_env() -> Result<Self> {
        Ok(DatabaseConfig {
            url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://notaku.db?mode=rwc".to_string()),
            max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .map_err(|_| {
                    AppError::Configuration("Invalid DATABASE_MAX_CONNECTIONS".to_string())
                })?,
            query_timeout_secs: env::var("DATABASE_QUERY_TIMEOUT_SECS")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .map_err(|_| {
                    AppError::Configuration("Invalid DATABASE_QUERY_TIMEOUT_SECS".to_string())
                })?,
        })
    }

    /// Upper bound applied to every persistence operation.
    pub fn query_timeout(&self) -> Duration {
        Duration::from_secs(self.query_timeout_secs)
    }

    /// Create a SQLite connection pool
    pub async fn create_pool(&self) -> Result<SqlitePool> {
        let mut options = SqliteConnectOptions::from_str(&self.url)
            .map_err(|_| {
                AppError::Configuration(format!("Invalid DATABASE_URL: {}", self.url))
            })?
            .create_if_missing(true)
            .foreign_keys(true);

        // WAL is unavailable on in-memory databases
        if !self.url.contains(":memory:") && !self.url.contains("mode=memory") {
            options = options.journal_mode(SqliteJournalMode::Wal);
        }

        SqlitePoolOptions::new()
            .max_connections(self.max_connections)
            .acquire_timeout(Duration::from_secs(30))
            .connect_with(options)
            .await
            .map_err(AppError::Database)
    }
}
