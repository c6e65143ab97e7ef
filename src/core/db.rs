use std::future::Future;
use std::time::Duration;

use crate::core::error::{AppError, Result};

/// Runs a persistence operation under a deadline.
///
/// Callers never block indefinitely on the database: when the deadline
/// elapses the caller gets [`AppError::Timeout`] and the slow operation is
/// dropped.
pub async fn with_timeout<T, F>(limit: Duration, operation: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match tokio::time::timeout(limit, operation).await {
        Ok(result) => result,
        Err(_) => Err(AppError::Timeout(format!(
            "Database operation exceeded {}s",
            limit.as_secs_f64()
        ))),
    }
}
