use once_cell::sync::Lazy;
use prometheus::{register_int_counter, Encoder, IntCounter, TextEncoder};

// Prometheus metrics (default registry)
pub static ORDERS_CREATED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!("gravel_admin_orders_created_total", "Total orders created")
        .expect("register orders_created_total")
});

pub static ORDERS_DELETED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!("gravel_admin_orders_deleted_total", "Total orders deleted with their children")
        .expect("register orders_deleted_total")
});

pub static DELIVERIES_COMPLETED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "gravel_admin_deliveries_completed_total",
        "Total deliveries moved to delivered"
    )
    .expect("register deliveries_completed_total")
});

pub static VALIDATION_ERRORS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "gravel_admin_validation_errors_total",
        "Total requests rejected with 400"
    )
    .expect("register validation_errors_total")
});

pub fn encode_metrics() -> (axum::http::StatusCode, String) {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            format!("metrics encode error: {e}"),
        );
    }
    (
        axum::http::StatusCode::OK,
        String::from_utf8(buffer).unwrap_or_default(),
    )
}
