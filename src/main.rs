use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{web, App, HttpResponse, HttpServer};
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use notaku::config::Config;
use notaku::middleware::RequestId;
use notaku::modules::catalog::controllers::catalog_controller;
use notaku::modules::catalog::{CatalogRepository, CatalogService};
use notaku::modules::documents::controllers::document_controller;
use notaku::modules::documents::{DocumentRepository, DocumentService};
use notaku::modules::store::controllers::store_controller;
use notaku::modules::store::{StoreRepository, StoreService};
use notaku::modules::transactions::controllers::transaction_controller;
use notaku::modules::transactions::{TaxEngine, TransactionRepository, TransactionService};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "notaku=debug,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    config.validate()?;

    tracing::info!("Starting Notaku back office");
    tracing::info!("Environment: {}", config.app.env);

    let pool = config.database.create_pool().await?;
    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!(
        "Database ready (max {} connections)",
        config.database.max_connections
    );

    let query_timeout = config.database.query_timeout();

    let catalog_repository = Arc::new(CatalogRepository::new(pool.clone()));
    let store_repository = Arc::new(StoreRepository::new(pool.clone()));
    let transaction_repository = Arc::new(TransactionRepository::new(pool.clone()));
    let document_repository = Arc::new(DocumentRepository::new(pool));

    let catalog_service = Arc::new(CatalogService::new(
        catalog_repository.clone(),
        query_timeout,
    ));
    let store_service = Arc::new(StoreService::new(store_repository.clone(), query_timeout));
    let transaction_service = Arc::new(TransactionService::new(
        transaction_repository.clone(),
        catalog_repository,
        TaxEngine::new(config.tax.clone()),
        query_timeout,
    ));
    let document_service = Arc::new(DocumentService::new(
        document_repository,
        transaction_repository,
        store_repository,
        query_timeout,
    ));

    let bind_address = config.server.bind_address();
    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .wrap(RequestId)
            .wrap(Cors::permissive())
            .app_data(web::Data::new(catalog_service.clone()))
            .app_data(web::Data::new(store_service.clone()))
            .app_data(web::Data::new(transaction_service.clone()))
            .app_data(web::Data::new(document_service.clone()))
            .route("/health", web::get().to(health_check))
            .service(
                web::scope("/api")
                    .configure(transaction_controller::configure)
                    .configure(document_controller::configure)
                    .configure(catalog_controller::configure)
                    .configure(store_controller::configure),
            )
    })
    .bind(&bind_address)?
    .run();

    tracing::info!("Server started at http://{}", bind_address);

    server.await?;
    Ok(())
}

async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "notaku"
    }))
}
