use axum::{
    routing::get,
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;

use common::types::Health;

use crate::{observability, openapi::ApiDoc, state::AppState};

pub mod clients;
pub mod dashboard;
pub mod deliveries;
pub mod invoices;
pub mod orders;
pub mod products;
pub mod suppliers;

#[utoipa::path(
    get, path = "/health", tag = "health",
    responses((status = 200, description = "Service is up", body = crate::openapi::HealthResponse))
)]
pub async fn health() -> Json<Health> {
    Json(Health::ok())
}

async fn metrics() -> (axum::http::StatusCode, String) {
    observability::encode_metrics()
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/clients", get(clients::list).post(clients::create))
        .route("/clients/:id", get(clients::get).patch(clients::update).delete(clients::delete))
        .route("/suppliers", get(suppliers::list).post(suppliers::create))
        .route("/suppliers/:id", get(suppliers::get).patch(suppliers::update))
        .route("/products", get(products::list).post(products::create))
        .route("/products/:id", get(products::get).patch(products::update))
        .route("/orders", get(orders::list).post(orders::create))
        .route("/orders/recent", get(orders::recent))
        .route("/orders/:id", get(orders::get).patch(orders::update).delete(orders::delete))
        .route("/orders/:id/items", get(orders::items))
        .route("/orders/:id/invoices", get(orders::invoices))
        .route("/deliveries", get(deliveries::list).post(deliveries::create))
        .route("/deliveries/today", get(deliveries::today))
        .route("/deliveries/:id", get(deliveries::get).patch(deliveries::update))
        .route("/invoices", get(invoices::list).post(invoices::create))
        .route("/invoices/:id", get(invoices::get).patch(invoices::update))
        .route("/dashboard/stats", get(dashboard::stats))
}

/// Build the full application router. When `frontend_dir` is given, unmatched
/// paths are served from it with `index.html` as the client-side route fallback.
pub fn build_router(state: AppState, cors: CorsLayer, frontend_dir: Option<&str>) -> Router {
    let mut app = Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .route("/api-docs/openapi.json", get(openapi_json))
        .nest("/api", api_routes())
        .with_state(state);

    if let Some(dir) = frontend_dir {
        let index = format!("{}/index.html", dir.trim_end_matches('/'));
        app = app.fallback_service(ServeDir::new(dir).fallback(ServeFile::new(index)));
    }

    app.layer(cors).layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
            // 5xx
            .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
    )
}
