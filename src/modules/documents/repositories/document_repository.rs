use chrono::{DateTime, NaiveDate, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::core::{AppError, Result};
use crate::modules::documents::models::{Document, NewDocument};

const DOCUMENT_COLUMNS: &str = "id, transaction_id, document_type, document_number, \
     document_date, recipient_name, custom_notes, html_content, created_at";

/// Repository for rendered documents. Rows are insert-only.
pub struct DocumentRepository {
    pool: SqlitePool,
}

impl DocumentRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a document whose number and html depend on the generated row id.
    ///
    /// The row is first written with a unique placeholder number, then
    /// `finalize(id)` produces the real number and html and the row is
    /// updated, all within one database transaction.
    pub async fn create_with<F>(&self, new: &NewDocument, finalize: F) -> Result<Document>
    where
        F: FnOnce(i64) -> (String, String),
    {
        let placeholder = format!("TMP-{}", Uuid::new_v4().simple());
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            INSERT INTO documents (
                transaction_id, document_type, document_number, document_date,
                recipient_name, custom_notes, html_content, created_at
            )
            VALUES (?, ?, ?, ?, ?, ?, '', ?)
            "#,
        )
        .bind(new.transaction_id)
        .bind(new.document_type.to_string())
        .bind(&placeholder)
        .bind(new.document_date)
        .bind(&new.recipient_name)
        .bind(&new.custom_notes)
        .bind(Utc::now())
        .execute(tx.as_mut())
        .await?;

        let id = result.last_insert_rowid();
        let (document_number, html_content) = finalize(id);

        sqlx::query("UPDATE documents SET document_number = ?, html_content = ? WHERE id = ?")
            .bind(&document_number)
            .bind(&html_content)
            .bind(id)
            .execute(tx.as_mut())
            .await
            .map_err(|e| Self::map_number_conflict(e, &document_number))?;

        tx.commit().await?;

        self.find_by_id(id).await?.ok_or_else(|| {
            AppError::internal(format!("Document {} was created but not found", id))
        })
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Document>> {
        let row = sqlx::query_as::<_, DocumentRow>(&format!(
            "SELECT {} FROM documents WHERE id = ?",
            DOCUMENT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(DocumentRow::into_domain).transpose()
    }

    /// All documents of one transaction, newest first.
    pub async fn find_by_transaction(&self, transaction_id: i64) -> Result<Vec<Document>> {
        let rows = sqlx::query_as::<_, DocumentRow>(&format!(
            "SELECT {} FROM documents WHERE transaction_id = ? ORDER BY id DESC",
            DOCUMENT_COLUMNS
        ))
        .bind(transaction_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(DocumentRow::into_domain).collect()
    }

    fn map_number_conflict(e: sqlx::Error, number: &str) -> AppError {
        match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                AppError::conflict(format!("Document number {} already exists", number))
            }
            _ => AppError::Database(e),
        }
    }
}

#[derive(sqlx::FromRow)]
struct DocumentRow {
    id: i64,
    transaction_id: i64,
    document_type: String,
    document_number: String,
    document_date: NaiveDate,
    recipient_name: Option<String>,
    custom_notes: Option<String>,
    html_content: String,
    created_at: DateTime<Utc>,
}

impl DocumentRow {
    fn into_domain(self) -> Result<Document> {
        Ok(Document {
            id: self.id,
            transaction_id: self.transaction_id,
            document_type: self.document_type.parse().map_err(AppError::internal)?,
            document_number: self.document_number,
            document_date: self.document_date,
            recipient_name: self.recipient_name,
            custom_notes: self.custom_notes,
            html_content: self.html_content,
            created_at: self.created_at,
        })
    }
}
