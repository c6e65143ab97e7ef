use std::sync::Arc;

use actix_web::{web, HttpResponse};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::core::error::AppError;
use crate::modules::documents::controllers::document_controller::{
    generate_document, list_transaction_documents,
};
use crate::modules::transactions::models::{
    CreateTransactionRequest, TransactionFilter, TransactionStatus, UpdateTransactionRequest,
};
use crate::modules::transactions::services::transaction_service::TransactionService;

/// Query parameters for the transaction history
#[derive(Debug, Deserialize)]
pub struct TransactionHistoryQuery {
    pub status: Option<TransactionStatus>,
    pub customer_name: Option<String>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    20
}

impl From<TransactionHistoryQuery> for TransactionFilter {
    fn from(query: TransactionHistoryQuery) -> Self {
        TransactionFilter {
            status: query.status,
            customer_name: query.customer_name,
            date_from: query.date_from,
            date_to: query.date_to,
            limit: query.limit,
            offset: query.offset,
        }
    }
}

/// Create a transaction
/// POST /transactions
pub async fn create_transaction(
    service: web::Data<Arc<TransactionService>>,
    request: web::Json<CreateTransactionRequest>,
) -> Result<HttpResponse, AppError> {
    let transaction = service.create_transaction(request.into_inner()).await?;
    Ok(HttpResponse::Created().json(transaction))
}

/// Get a transaction with its lines
/// GET /transactions/{id}
pub async fn get_transaction(
    service: web::Data<Arc<TransactionService>>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let transaction = service.get_transaction(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(transaction))
}

/// List transactions, newest first, with optional filters
/// GET /transactions
pub async fn transaction_history(
    service: web::Data<Arc<TransactionService>>,
    query: web::Query<TransactionHistoryQuery>,
) -> Result<HttpResponse, AppError> {
    let transactions = service.history(query.into_inner().into()).await?;
    Ok(HttpResponse::Ok().json(transactions))
}

/// Patch a transaction
/// PUT /transactions/{id}
pub async fn update_transaction(
    service: web::Data<Arc<TransactionService>>,
    path: web::Path<i64>,
    request: web::Json<UpdateTransactionRequest>,
) -> Result<HttpResponse, AppError> {
    let transaction = service
        .update_transaction(path.into_inner(), request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(transaction))
}

/// Delete a draft transaction
/// DELETE /transactions/{id}
pub async fn delete_transaction(
    service: web::Data<Arc<TransactionService>>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    service.delete_transaction(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "deleted": true })))
}

// The document routes live in this scope because their URLs sit under
// /transactions; the handlers belong to the documents module.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/transactions")
            .route("", web::post().to(create_transaction))
            .route("", web::get().to(transaction_history))
            .route("/{id}", web::get().to(get_transaction))
            .route("/{id}", web::put().to(update_transaction))
            .route("/{id}", web::delete().to(delete_transaction))
            .route("/{id}/documents", web::post().to(generate_document))
            .route("/{id}/documents", web::get().to(list_transaction_documents)),
    );
}
