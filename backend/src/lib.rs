//! # Pesantren Admin Backend
//!
//! REST service behind the pesantren payment administration dashboard.
//!
//! ```text
//! IO Layer (axum handlers, view mappers)
//!     ↓
//! Domain Layer (one service per screen)
//!     ↓
//! Storage Layer (in-memory stores seeded at startup)
//! ```
//!
//! Records live only in process memory. The `database` section of the
//! configuration is read and logged so the data-access settings are in place,
//! but nothing is persisted.

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use anyhow::{Context, Result};
use axum::{
    http::{HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

use crate::config::{AppConfig, SeedMode};
use crate::domain::{
    BalanceService, DashboardService, ExportService, FeeClassService, LaundryCatalogService,
    LaundryTransactionService, PaymentRecordService, SantriService, UangSakuService, UserService,
};
use crate::storage::{memory_store, EmptySeed, SampleSeed, SeedProvider};

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub santri_service: SantriService,
    pub fee_class_service: FeeClassService,
    pub laundry_catalog_service: LaundryCatalogService,
    pub laundry_transaction_service: LaundryTransactionService,
    pub uang_saku_service: UangSakuService,
    pub balance_service: BalanceService,
    pub user_service: UserService,
    pub payment_record_service: PaymentRecordService,
    pub export_service: ExportService,
    pub dashboard_service: DashboardService,
}

impl AppState {
    /// Build every store from `seed` and wire the services that share them
    pub fn from_seed(seed: &dyn SeedProvider) -> Self {
        let santri = memory_store(seed.santri());
        let fee_classes = memory_store(seed.fee_classes());
        let laundry_services = memory_store(seed.laundry_services());
        let laundry_payment_classes = memory_store(seed.laundry_payment_classes());
        let laundry_transactions = memory_store(seed.laundry_transactions());
        let uang_saku = memory_store(seed.uang_saku_transactions());
        let users = memory_store(seed.users());

        let balance_service = BalanceService::new(uang_saku.clone(), santri.clone());

        Self {
            santri_service: SantriService::new(santri.clone()),
            fee_class_service: FeeClassService::new(fee_classes),
            laundry_catalog_service: LaundryCatalogService::new(laundry_services.clone(), laundry_payment_classes),
            laundry_transaction_service: LaundryTransactionService::new(
                laundry_transactions.clone(),
                santri.clone(),
                laundry_services.clone(),
            ),
            uang_saku_service: UangSakuService::new(uang_saku.clone(), santri.clone(), balance_service.clone()),
            user_service: UserService::new(users),
            payment_record_service: PaymentRecordService::new(seed.payment_records(), santri.clone()),
            export_service: ExportService::new(uang_saku),
            dashboard_service: DashboardService::new(
                santri,
                laundry_services,
                laundry_transactions,
                balance_service.clone(),
            ),
            balance_service,
        }
    }
}

/// Initialize the backend with all required services
pub fn initialize_backend(config: &AppConfig) -> Result<AppState> {
    let database = &config.database;
    info!(
        "Data-access settings: schema={}, migrations={}, url from ${}",
        database.schema_path, database.migrations_path, database.url_env
    );
    if database.url().is_none() {
        warn!("{} is not set; running on in-memory stores only", database.url_env);
    }

    info!("Seeding stores with {:?} data", config.seed);
    let app_state = match config.seed {
        SeedMode::Sample => AppState::from_seed(&SampleSeed),
        SeedMode::Empty => AppState::from_seed(&EmptySeed),
    };

    Ok(app_state)
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, cors_origin: &str) -> Result<Router> {
    let origin = cors_origin
        .parse::<HeaderValue>()
        .with_context(|| format!("Invalid CORS origin: {}", cors_origin))?;
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/health", get(io::health))
        .route("/dashboard/summary", get(io::get_dashboard_summary))
        .route("/santri", get(io::list_santri).post(io::create_santri))
        .route(
            "/santri/:id",
            get(io::get_santri).put(io::update_santri).delete(io::delete_santri),
        )
        .route("/santri/:id/payments/:kind", get(io::get_payment_record))
        .route("/santri/:id/payments/:kind/:month", post(io::toggle_payment_month))
        .route(
            "/fee-classes/:kind",
            get(io::list_fee_classes).post(io::create_fee_class),
        )
        .route(
            "/fee-classes/:kind/:id",
            get(io::get_fee_class).put(io::update_fee_class).delete(io::delete_fee_class),
        )
        .route(
            "/laundry/services",
            get(io::list_laundry_services).post(io::create_laundry_service),
        )
        .route(
            "/laundry/services/:id",
            get(io::get_laundry_service)
                .put(io::update_laundry_service)
                .delete(io::delete_laundry_service),
        )
        .route(
            "/laundry/payment-classes",
            get(io::list_laundry_payment_classes).post(io::create_laundry_payment_class),
        )
        .route(
            "/laundry/payment-classes/:id",
            get(io::get_laundry_payment_class)
                .put(io::update_laundry_payment_class)
                .delete(io::delete_laundry_payment_class),
        )
        .route(
            "/laundry/transactions",
            get(io::list_laundry_transactions).post(io::create_laundry_transaction),
        )
        .route(
            "/laundry/transactions/:id",
            get(io::get_laundry_transaction)
                .put(io::update_laundry_transaction)
                .delete(io::delete_laundry_transaction),
        )
        .route(
            "/uang-saku/transactions",
            get(io::list_uang_saku_transactions).post(io::create_uang_saku_transaction),
        )
        .route("/uang-saku/transactions/export", get(io::export_uang_saku_csv))
        .route(
            "/uang-saku/transactions/:id",
            get(io::get_uang_saku_transaction).delete(io::delete_uang_saku_transaction),
        )
        .route("/uang-saku/balances", get(io::list_balances))
        .route("/uang-saku/balances/:santri_id", get(io::get_balance))
        .route("/users", get(io::list_users).post(io::create_user))
        .route(
            "/users/:id",
            get(io::get_user).put(io::update_user).delete(io::delete_user),
        );

    Ok(Router::new()
        .nest("/api", api_routes)
        .layer(cors)
        .with_state(app_state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app() -> Router {
        create_router(AppState::from_seed(&SampleSeed), "http://localhost:8080").unwrap()
    }

    async fn send(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(app(), "GET", "/api/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_laundry_search_dry_single_page() {
        let (status, body) = send(
            app(),
            "GET",
            "/api/laundry/services?search=dry&page=1&page_size=5",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_pages"], 1);
        assert_eq!(body["items"].as_array().unwrap().len(), 1);
        assert_eq!(body["items"][0]["id"], 3);
        assert_eq!(body["items"][0]["name"], "Dry Cleaning");
    }

    #[tokio::test]
    async fn test_edit_spp_monthly_through_the_api() {
        let app = app();
        let (status, body) = send(
            app.clone(),
            "PUT",
            "/api/fee-classes/spp/2",
            Some(json!({ "name": "Class XI", "monthly": "170000", "term_amount": 800000 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["item"]["monthly"], "Rp 170.000");
        assert_eq!(body["item"]["term_amount"], "Rp 800.000");

        let (_, list) = send(app, "GET", "/api/fee-classes/spp?search=class%20xi", None).await;
        assert_eq!(list["items"][0]["monthly"], "Rp 170.000");
        assert_eq!(list["items"][0]["term_amount"], "Rp 800.000");
    }

    #[tokio::test]
    async fn test_create_then_delete_santri() {
        let app = app();
        let (status, body) = send(
            app.clone(),
            "POST",
            "/api/santri",
            Some(json!({ "nis": 2024050, "name": "Yusuf Hamdan", "class_name": "X" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["item"]["id"], 9);
        assert_eq!(body["item"]["nis"], "2024050");

        let (status, _) = send(app.clone(), "DELETE", "/api/santri/9", None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, body) = send(app, "GET", "/api/santri/9", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Santri not found: 9");
    }

    #[tokio::test]
    async fn test_validation_errors_are_keyed() {
        let (status, body) = send(app(), "POST", "/api/users", Some(json!({ "email": "bukan-email" }))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["errors"]["email"], "Format email tidak valid");
        assert_eq!(body["errors"]["password"], "Password wajib diisi");
        assert!(body["errors"].get("name").is_some());
    }

    #[tokio::test]
    async fn test_user_password_never_in_response() {
        let (status, body) = send(app(), "GET", "/api/users/1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["email"], "admin@pesantren.id");
        assert!(body.get("password").is_none());
    }

    #[tokio::test]
    async fn test_payment_toggle_is_501() {
        let app = app();
        let (status, body) = send(app.clone(), "GET", "/api/santri/1/payments/spp", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["months"][0]["paid"], true);
        assert_eq!(body["months"][6]["paid"], false);

        let (status, _) = send(app, "POST", "/api/santri/1/payments/spp/july", None).await;
        assert_eq!(status, StatusCode::NOT_IMPLEMENTED);
    }

    #[tokio::test]
    async fn test_overdraw_is_conflict() {
        let (status, _) = send(
            app(),
            "POST",
            "/api/uang-saku/transactions",
            Some(json!({
                "santri_id": 1,
                "description": "Beli sepatu",
                "amount": 500000,
                "kind": "withdrawal"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_export_route_is_not_taken_for_an_id() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/api/uang-saku/transactions/export")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers()["content-type"].to_str().unwrap().to_string();
        assert!(content_type.starts_with("text/csv"));
    }

    #[test]
    fn test_invalid_cors_origin_is_an_error() {
        assert!(create_router(AppState::from_seed(&EmptySeed), "bad\norigin").is_err());
    }
}
