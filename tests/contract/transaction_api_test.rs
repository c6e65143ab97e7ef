// HTTP contract tests for the /api surface.
//
// Each test drives the real handlers over an in-memory database and
// checks status codes, response shapes and the error envelope exactly as
// an API client would see them.

use std::sync::Arc;
use std::time::Duration;

use actix_web::{test, web, App};
use serde_json::json;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

use notaku::catalog::controllers::catalog_controller;
use notaku::catalog::{CatalogRepository, CatalogService};
use notaku::config::TaxConfig;
use notaku::documents::controllers::document_controller;
use notaku::documents::{DocumentRepository, DocumentService};
use notaku::store::controllers::store_controller;
use notaku::store::{StoreRepository, StoreService};
use notaku::transactions::controllers::transaction_controller;
use notaku::transactions::{TaxEngine, TransactionRepository, TransactionService};

const TEST_TIMEOUT: Duration = Duration::from_secs(5);

struct Services {
    transactions: Arc<TransactionService>,
    documents: Arc<DocumentService>,
    catalog: Arc<CatalogService>,
    store: Arc<StoreService>,
}

async fn setup_db() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory database should open");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("migrations should apply");

    pool
}

fn build_services(pool: &SqlitePool) -> Services {
    let catalog_repository = Arc::new(CatalogRepository::new(pool.clone()));
    let store_repository = Arc::new(StoreRepository::new(pool.clone()));
    let transaction_repository = Arc::new(TransactionRepository::new(pool.clone()));

    Services {
        transactions: Arc::new(TransactionService::new(
            transaction_repository.clone(),
            catalog_repository.clone(),
            TaxEngine::new(TaxConfig::default()),
            TEST_TIMEOUT,
        )),
        documents: Arc::new(DocumentService::new(
            Arc::new(DocumentRepository::new(pool.clone())),
            transaction_repository,
            store_repository.clone(),
            TEST_TIMEOUT,
        )),
        catalog: Arc::new(CatalogService::new(catalog_repository, TEST_TIMEOUT)),
        store: Arc::new(StoreService::new(store_repository, TEST_TIMEOUT)),
    }
}

// Mirrors the application wiring in main, without the outer middleware.
fn configure_app(cfg: &mut web::ServiceConfig, services: &Services) {
    cfg.app_data(web::Data::new(services.catalog.clone()))
        .app_data(web::Data::new(services.store.clone()))
        .app_data(web::Data::new(services.transactions.clone()))
        .app_data(web::Data::new(services.documents.clone()))
        .service(
            web::scope("/api")
                .configure(transaction_controller::configure)
                .configure(document_controller::configure)
                .configure(catalog_controller::configure)
                .configure(store_controller::configure),
        );
}

#[actix_web::test]
async fn test_create_transaction_returns_201_with_computed_body() {
    let pool = setup_db().await;
    let services = build_services(&pool);
    let app =
        test::init_service(App::new().configure(|cfg| configure_app(cfg, &services))).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/items")
            .set_json(json!({
                "code": "BRG-001",
                "name": "Laptop Kerja",
                "kind": "item",
                "unit_price": 1000000
            }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status().as_u16(), 201);
    let item: serde_json::Value = test::read_body_json(resp).await;
    let item_id = item["id"].as_i64().expect("item id");

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/transactions")
            .set_json(json!({
                "customer_name": "PT Maju Jaya",
                "items": [
                    {"item_id": item_id, "quantity": 2, "unit_price": 1000000}
                ]
            }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status().as_u16(), 201);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "draft");
    assert!(body["transaction_number"]
        .as_str()
        .expect("number is a string")
        .starts_with("TRX-"));
    assert_eq!(body["subtotal"].as_f64(), Some(2_000_000.0));
    assert_eq!(body["ppn_amount"].as_f64(), Some(220_000.0));
    assert_eq!(body["total_amount"].as_f64(), Some(2_220_000.0));
    assert_eq!(body["stamp_duty_required"], json!(false));

    let items = body["items"].as_array().expect("items array");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["item_code"], "BRG-001");
    assert_eq!(items[0]["line_total"].as_f64(), Some(2_000_000.0));
}

#[actix_web::test]
async fn test_validation_failures_use_the_error_envelope() {
    let pool = setup_db().await;
    let services = build_services(&pool);
    let app =
        test::init_service(App::new().configure(|cfg| configure_app(cfg, &services))).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/transactions")
            .set_json(json!({
                "customer_name": "PT Maju Jaya",
                "items": []
            }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status().as_u16(), 400);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["code"].as_u64(), Some(400));
    assert!(body["error"]["message"]
        .as_str()
        .expect("message is a string")
        .contains("at least one item"));
}

#[actix_web::test]
async fn test_unknown_resources_are_404() {
    let pool = setup_db().await;
    let services = build_services(&pool);
    let app =
        test::init_service(App::new().configure(|cfg| configure_app(cfg, &services))).await;

    for uri in [
        "/api/transactions/9999",
        "/api/items/9999",
        "/api/documents/9999",
    ] {
        let resp =
            test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(resp.status().as_u16(), 404, "expected 404 for {}", uri);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"].as_u64(), Some(404));
    }
}

#[actix_web::test]
async fn test_illegal_status_jump_is_412() {
    let pool = setup_db().await;
    let services = build_services(&pool);
    let app =
        test::init_service(App::new().configure(|cfg| configure_app(cfg, &services))).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/items")
            .set_json(json!({
                "code": "BRG-002",
                "name": "Meja Lipat",
                "kind": "item",
                "unit_price": 200000
            }))
            .to_request(),
    )
    .await;
    let item: serde_json::Value = test::read_body_json(resp).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/transactions")
            .set_json(json!({
                "customer_name": "CV Berkah",
                "items": [{"item_id": item["id"].as_i64().unwrap(), "quantity": 1, "unit_price": 200000}]
            }))
            .to_request(),
    )
    .await;
    let transaction: serde_json::Value = test::read_body_json(resp).await;
    let id = transaction["id"].as_i64().expect("transaction id");

    let resp = test::call_service(
        &app,
        test::TestRequest::put()
            .uri(&format!("/api/transactions/{}", id))
            .set_json(json!({"status": "paid"}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status().as_u16(), 412);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["code"].as_u64(), Some(412));
    assert!(body["error"]["message"]
        .as_str()
        .expect("message is a string")
        .contains("draft"));
}

#[actix_web::test]
async fn test_duplicate_item_code_is_409() {
    let pool = setup_db().await;
    let services = build_services(&pool);
    let app =
        test::init_service(App::new().configure(|cfg| configure_app(cfg, &services))).await;

    let payload = json!({
        "code": "BRG-003",
        "name": "Kursi Susun",
        "kind": "item",
        "unit_price": 150000
    });

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/items")
            .set_json(&payload)
            .to_request(),
    )
    .await;
    assert_eq!(resp.status().as_u16(), 201);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/items")
            .set_json(&payload)
            .to_request(),
    )
    .await;
    assert_eq!(resp.status().as_u16(), 409);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["code"].as_u64(), Some(409));
    assert!(body["error"]["message"]
        .as_str()
        .expect("message is a string")
        .contains("BRG-003"));
}

#[actix_web::test]
async fn test_store_profile_put_then_get() {
    let pool = setup_db().await;
    let services = build_services(&pool);
    let app =
        test::init_service(App::new().configure(|cfg| configure_app(cfg, &services))).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/store-profile").to_request(),
    )
    .await;
    assert_eq!(resp.status().as_u16(), 404);

    let resp = test::call_service(
        &app,
        test::TestRequest::put()
            .uri("/api/store-profile")
            .set_json(json!({
                "name": "Toko Sumber Rejeki",
                "address": "Jl. Melati No. 5, Bandung",
                "npwp": "01.234.567.8-901.000"
            }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status().as_u16(), 200);

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/store-profile").to_request(),
    )
    .await;
    assert_eq!(resp.status().as_u16(), 200);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["name"], "Toko Sumber Rejeki");
    assert_eq!(body["npwp"], "01.234.567.8-901.000");
    assert_eq!(body["phone"], serde_json::Value::Null);
}

#[actix_web::test]
async fn test_document_flow_over_http() {
    let pool = setup_db().await;
    let services = build_services(&pool);
    let app =
        test::init_service(App::new().configure(|cfg| configure_app(cfg, &services))).await;

    test::call_service(
        &app,
        test::TestRequest::put()
            .uri("/api/store-profile")
            .set_json(json!({"name": "Toko Sumber Rejeki"}))
            .to_request(),
    )
    .await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/items")
            .set_json(json!({
                "code": "JSA-001",
                "name": "Jasa Perakitan",
                "kind": "service",
                "unit_price": 300000
            }))
            .to_request(),
    )
    .await;
    let item: serde_json::Value = test::read_body_json(resp).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/transactions")
            .set_json(json!({
                "customer_name": "PT Sinar Abadi",
                "items": [{"item_id": item["id"].as_i64().unwrap(), "quantity": 1, "unit_price": 300000}]
            }))
            .to_request(),
    )
    .await;
    let transaction: serde_json::Value = test::read_body_json(resp).await;
    let transaction_id = transaction["id"].as_i64().expect("transaction id");

    // Generate an invoice for it
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/api/transactions/{}/documents", transaction_id))
            .set_json(json!({"document_type": "invoice"}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status().as_u16(), 201);

    let document: serde_json::Value = test::read_body_json(resp).await;
    let document_id = document["id"].as_i64().expect("document id");
    assert!(document["document_number"]
        .as_str()
        .expect("number is a string")
        .starts_with("INV-"));
    assert_eq!(document["document_type"], "invoice");
    assert!(document["html_content"]
        .as_str()
        .expect("html is a string")
        .contains("Toko Sumber Rejeki"));

    // It shows up in the transaction's document list
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/transactions/{}/documents", transaction_id))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status().as_u16(), 200);
    let listed: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(listed.as_array().expect("array").len(), 1);

    // And is retrievable on its own
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/documents/{}", document_id))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status().as_u16(), 200);

    // Generating against a missing transaction fails cleanly
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/transactions/424242/documents")
            .set_json(json!({"document_type": "invoice"}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status().as_u16(), 404);
}

#[actix_web::test]
async fn test_delete_draft_transaction_over_http() {
    let pool = setup_db().await;
    let services = build_services(&pool);
    let app =
        test::init_service(App::new().configure(|cfg| configure_app(cfg, &services))).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/items")
            .set_json(json!({
                "code": "BRG-004",
                "name": "Papan Tulis",
                "kind": "item",
                "unit_price": 400000
            }))
            .to_request(),
    )
    .await;
    let item: serde_json::Value = test::read_body_json(resp).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/transactions")
            .set_json(json!({
                "customer_name": "CV Cerdas",
                "items": [{"item_id": item["id"].as_i64().unwrap(), "quantity": 1, "unit_price": 400000}]
            }))
            .to_request(),
    )
    .await;
    let transaction: serde_json::Value = test::read_body_json(resp).await;
    let id = transaction["id"].as_i64().expect("transaction id");

    // The draft shows up in the history
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/transactions?status=draft&limit=10")
            .to_request(),
    )
    .await;
    assert_eq!(resp.status().as_u16(), 200);
    let listed: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(listed.as_array().expect("array").len(), 1);

    let resp = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/api/transactions/{}", id))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status().as_u16(), 200);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["deleted"], json!(true));

    let resp = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/api/transactions/{}", id))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status().as_u16(), 404);
}

#[actix_web::test]
async fn test_catalog_list_honors_query_parameters() {
    let pool = setup_db().await;
    let services = build_services(&pool);
    let app =
        test::init_service(App::new().configure(|cfg| configure_app(cfg, &services))).await;

    for (code, name, kind) in [
        ("BRG-010", "Kabel UTP", "item"),
        ("BRG-011", "Switch 8 Port", "item"),
        ("JSA-010", "Instalasi Titik LAN", "service"),
    ] {
        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/items")
                .set_json(json!({
                    "code": code,
                    "name": name,
                    "kind": kind,
                    "unit_price": 100000
                }))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status().as_u16(), 201);
    }

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/items?kind=service")
            .to_request(),
    )
    .await;
    assert_eq!(resp.status().as_u16(), 200);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body.as_array().expect("array").len(), 1);
    assert_eq!(body[0]["code"], "JSA-010");

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/items?search=kabel")
            .to_request(),
    )
    .await;
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body.as_array().expect("array").len(), 1);
    assert_eq!(body[0]["name"], "Kabel UTP");
}
