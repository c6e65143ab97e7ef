use std::sync::Arc;
use std::time::Duration;

use chrono::{Datelike, Utc};

use crate::core::db::with_timeout;
use crate::core::{AppError, Result};
use crate::modules::documents::models::{Document, GenerateDocumentRequest, NewDocument};
use crate::modules::documents::repositories::document_repository::DocumentRepository;
use crate::modules::documents::services::html_renderer::{self, RenderContext};
use crate::modules::store::repositories::store_repository::StoreRepository;
use crate::modules::transactions::repositories::transaction_repository::TransactionRepository;

/// Service for generating and reading documents
pub struct DocumentService {
    repository: Arc<DocumentRepository>,
    transaction_repository: Arc<TransactionRepository>,
    store_repository: Arc<StoreRepository>,
    query_timeout: Duration,
}

impl DocumentService {
    pub fn new(
        repository: Arc<DocumentRepository>,
        transaction_repository: Arc<TransactionRepository>,
        store_repository: Arc<StoreRepository>,
        query_timeout: Duration,
    ) -> Self {
        Self {
            repository,
            transaction_repository,
            store_repository,
            query_timeout,
        }
    }

    /// Render a transaction into a new, immutable document row.
    ///
    /// Calling this twice produces two independent documents with distinct
    /// numbers; earlier copies are never touched.
    pub async fn generate(
        &self,
        transaction_id: i64,
        request: GenerateDocumentRequest,
    ) -> Result<Document> {
        let transaction = with_timeout(
            self.query_timeout,
            self.transaction_repository.find_by_id(transaction_id),
        )
        .await?
        .ok_or_else(|| {
            AppError::not_found(format!("Transaction {} not found", transaction_id))
        })?;

        if transaction.items.is_empty() {
            return Err(AppError::validation(
                "Transaction has no items to render",
            ));
        }

        let store = with_timeout(self.query_timeout, self.store_repository.find_first())
            .await?
            .ok_or_else(|| {
                AppError::precondition(
                    "Store profile must be set up before generating documents",
                )
            })?;

        let document_date = request
            .document_date
            .unwrap_or_else(|| Utc::now().date_naive());

        let new = NewDocument {
            transaction_id,
            document_type: request.document_type,
            document_date,
            recipient_name: request.recipient_name,
            custom_notes: request.custom_notes,
        };

        let document = with_timeout(
            self.query_timeout,
            self.repository.create_with(&new, |id| {
                let number = new.document_type.format_number(document_date.year(), id);
                let html = html_renderer::render(&RenderContext {
                    document_type: new.document_type,
                    document_number: &number,
                    document_date,
                    recipient_name: new.recipient_name.as_deref(),
                    custom_notes: new.custom_notes.as_deref(),
                    store: &store,
                    transaction: &transaction,
                });
                (number, html)
            }),
        )
        .await?;

        tracing::info!(
            document_id = document.id,
            document_number = %document.document_number,
            transaction_id,
            "Document generated"
        );
        Ok(document)
    }

    pub async fn get_document(&self, id: i64) -> Result<Document> {
        with_timeout(self.query_timeout, self.repository.find_by_id(id))
            .await?
            .ok_or_else(|| AppError::not_found(format!("Document {} not found", id)))
    }

    /// All documents of a transaction, newest first. The transaction itself
    /// must exist, even when it has no documents yet.
    pub async fn list_for_transaction(&self, transaction_id: i64) -> Result<Vec<Document>> {
        let status = with_timeout(
            self.query_timeout,
            self.transaction_repository.find_status(transaction_id),
        )
        .await?;
        if status.is_none() {
            return Err(AppError::not_found(format!(
                "Transaction {} not found",
                transaction_id
            )));
        }

        with_timeout(
            self.query_timeout,
            self.repository.find_by_transaction(transaction_id),
        )
        .await
    }
}
