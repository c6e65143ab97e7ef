use std::sync::Arc;

use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::core::error::AppError;
use crate::modules::catalog::models::{CreateItemRequest, ItemKind, UpdateItemRequest};
use crate::modules::catalog::services::catalog_service::CatalogService;

/// Query parameters for listing catalog items
#[derive(Debug, Deserialize)]
pub struct ListItemsQuery {
    pub kind: Option<ItemKind>,
    pub search: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    50
}

/// Create a catalog item
/// POST /items
pub async fn create_item(
    service: web::Data<Arc<CatalogService>>,
    request: web::Json<CreateItemRequest>,
) -> Result<HttpResponse, AppError> {
    let item = service.create_item(request.into_inner()).await?;
    Ok(HttpResponse::Created().json(item))
}

/// Get a catalog item by id
/// GET /items/{id}
pub async fn get_item(
    service: web::Data<Arc<CatalogService>>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let item = service.get_item(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(item))
}

/// List catalog items with optional kind filter and name/code search
/// GET /items
pub async fn list_items(
    service: web::Data<Arc<CatalogService>>,
    query: web::Query<ListItemsQuery>,
) -> Result<HttpResponse, AppError> {
    let items = service
        .list_items(query.kind, query.search.as_deref(), query.limit, query.offset)
        .await?;
    Ok(HttpResponse::Ok().json(items))
}

/// Update a catalog item
/// PUT /items/{id}
pub async fn update_item(
    service: web::Data<Arc<CatalogService>>,
    path: web::Path<i64>,
    request: web::Json<UpdateItemRequest>,
) -> Result<HttpResponse, AppError> {
    let item = service
        .update_item(path.into_inner(), request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(item))
}

/// Delete a catalog item
/// DELETE /items/{id}
pub async fn delete_item(
    service: web::Data<Arc<CatalogService>>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    service.delete_item(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "deleted": true })))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/items")
            .route("", web::post().to(create_item))
            .route("", web::get().to(list_items))
            .route("/{id}", web::get().to(get_item))
            .route("/{id}", web::put().to(update_item))
            .route("/{id}", web::delete().to(delete_item)),
    );
}
