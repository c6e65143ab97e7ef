use std::sync::Arc;

use actix_web::{web, HttpResponse};

use crate::core::error::AppError;
use crate::modules::store::models::UpsertStoreProfileRequest;
use crate::modules::store::services::store_service::StoreService;

/// Get the store profile
/// GET /store-profile
pub async fn get_profile(
    service: web::Data<Arc<StoreService>>,
) -> Result<HttpResponse, AppError> {
    let profile = service.get_profile().await?;
    Ok(HttpResponse::Ok().json(profile))
}

/// Create or replace the store profile
/// PUT /store-profile
pub async fn upsert_profile(
    service: web::Data<Arc<StoreService>>,
    request: web::Json<UpsertStoreProfileRequest>,
) -> Result<HttpResponse, AppError> {
    let profile = service.upsert_profile(request.into_inner()).await?;
    Ok(HttpResponse::Ok().json(profile))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/store-profile")
            .route("", web::get().to(get_profile))
            .route("", web::put().to(upsert_profile)),
    );
}
