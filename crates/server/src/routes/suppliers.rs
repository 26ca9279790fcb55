use axum::{extract::{Path, State}, http::StatusCode, Json};
use models::{NewSupplier, Supplier, SupplierPatch};
use tracing::info;

use crate::{errors::{not_found, JsonApiError}, extract::JsonBody, state::AppState};

#[utoipa::path(
    get, path = "/api/suppliers", tag = "suppliers",
    responses((status = 200, description = "All suppliers"))
)]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Supplier>>, JsonApiError> {
    Ok(Json(state.storage.list_suppliers().await?))
}

#[utoipa::path(
    post, path = "/api/suppliers", tag = "suppliers",
    request_body = crate::openapi::NewSupplierDoc,
    responses(
        (status = 201, description = "Created"),
        (status = 400, description = "Validation Error")
    )
)]
pub async fn create(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<NewSupplier>,
) -> Result<(StatusCode, Json<Supplier>), JsonApiError> {
    let supplier = state.storage.create_supplier(input).await?;
    info!(id = %supplier.id, name = %supplier.name, "created supplier");
    Ok((StatusCode::CREATED, Json(supplier)))
}

#[utoipa::path(
    get, path = "/api/suppliers/{id}", tag = "suppliers",
    params(("id" = String, Path, description = "Supplier ID")),
    responses(
        (status = 200, description = "OK"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Supplier>, JsonApiError> {
    state.storage.get_supplier(&id).await?.map(Json).ok_or_else(|| not_found("supplier"))
}

#[utoipa::path(
    patch, path = "/api/suppliers/{id}", tag = "suppliers",
    params(("id" = String, Path, description = "Supplier ID")),
    request_body = crate::openapi::SupplierPatchDoc,
    responses(
        (status = 200, description = "Updated"),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(patch): JsonBody<SupplierPatch>,
) -> Result<Json<Supplier>, JsonApiError> {
    let supplier = state.storage.update_supplier(&id, patch).await?.ok_or_else(|| not_found("supplier"))?;
    info!(id = %supplier.id, "updated supplier");
    Ok(Json(supplier))
}
