use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};
use service::errors::ServiceError;
use thiserror::Error;
use tracing::error;

use crate::observability::VALIDATION_ERRORS_TOTAL;

/// Error response rendered as `{"error": <title>, "details": ...}`.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub error: String,
    pub details: Option<Value>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, title: &str, detail: Option<String>) -> Self {
        Self { status, error: title.to_string(), details: detail.map(Value::String) }
    }

    pub fn with_details(status: StatusCode, title: &str, details: Value) -> Self {
        Self { status, error: title.to_string(), details: Some(details) }
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        let body = match self.details {
            Some(details) => json!({"error": self.error, "details": details}),
            None => json!({"error": self.error}),
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Model(m) => {
                VALIDATION_ERRORS_TOTAL.inc();
                let details = m
                    .fields()
                    .iter()
                    .map(|f| json!({"field": f.field, "message": f.message}))
                    .collect();
                JsonApiError::with_details(StatusCode::BAD_REQUEST, "Validation Error", Value::Array(details))
            }
            ServiceError::NotFound(msg) => JsonApiError::new(StatusCode::NOT_FOUND, "Not Found", Some(msg)),
            ServiceError::Internal(msg) => {
                error!(error = %msg, "internal service error");
                JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error", None)
            }
        }
    }
}

/// 404 for an id in the path that does not resolve.
pub fn not_found(entity: &str) -> JsonApiError {
    ServiceError::not_found(entity).into()
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
