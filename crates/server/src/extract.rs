use axum::async_trait;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts, Query, Request};
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::Json;

use crate::errors::JsonApiError;
use crate::observability::VALIDATION_ERRORS_TOTAL;

/// `axum::Json` with every rejection (bad syntax, wrong shape, missing
/// content type) reported as a 400 `JsonApiError`.
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = JsonApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(rejection) => {
                VALIDATION_ERRORS_TOTAL.inc();
                Err(JsonApiError::new(StatusCode::BAD_REQUEST, "Invalid Request Body", Some(rejection.body_text())))
            }
        }
    }
}

/// `axum::Query` with a malformed query string reported as a 400 `JsonApiError`.
pub struct QueryParams<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for QueryParams<T>
where
    Query<T>: FromRequestParts<S, Rejection = QueryRejection>,
    S: Send + Sync,
{
    type Rejection = JsonApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(value)) => Ok(QueryParams(value)),
            Err(rejection) => {
                VALIDATION_ERRORS_TOTAL.inc();
                Err(JsonApiError::new(StatusCode::BAD_REQUEST, "Invalid Query", Some(rejection.body_text())))
            }
        }
    }
}
