use std::sync::Arc;

use actix_web::{web, HttpResponse};

use crate::core::error::AppError;
use crate::modules::documents::models::GenerateDocumentRequest;
use crate::modules::documents::services::document_service::DocumentService;

/// Generate a document for a transaction
/// POST /transactions/{id}/documents
pub async fn generate_document(
    service: web::Data<Arc<DocumentService>>,
    path: web::Path<i64>,
    request: web::Json<GenerateDocumentRequest>,
) -> Result<HttpResponse, AppError> {
    let document = service
        .generate(path.into_inner(), request.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(document))
}

/// List a transaction's documents, newest first
/// GET /transactions/{id}/documents
pub async fn list_transaction_documents(
    service: web::Data<Arc<DocumentService>>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let documents = service.list_for_transaction(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(documents))
}

/// Get a single document
/// GET /documents/{id}
pub async fn get_document(
    service: web::Data<Arc<DocumentService>>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let document = service.get_document(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(document))
}

// Only /documents/{id} is registered here; the transaction-scoped document
// routes are wired inside the transactions scope.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/documents").route("/{id}", web::get().to(get_document)));
}
