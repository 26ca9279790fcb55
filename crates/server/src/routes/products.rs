use axum::{extract::{Path, State}, http::StatusCode, Json};
use models::{NewProduct, Product, ProductPatch};
use tracing::info;

use crate::{errors::{not_found, JsonApiError}, extract::JsonBody, state::AppState};

#[utoipa::path(
    get, path = "/api/products", tag = "products",
    responses((status = 200, description = "All products, inactive included"))
)]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Product>>, JsonApiError> {
    Ok(Json(state.storage.list_products().await?))
}

#[utoipa::path(
    post, path = "/api/products", tag = "products",
    request_body = crate::openapi::NewProductDoc,
    responses(
        (status = 201, description = "Created"),
        (status = 400, description = "Validation Error")
    )
)]
pub async fn create(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<NewProduct>,
) -> Result<(StatusCode, Json<Product>), JsonApiError> {
    let product = state.storage.create_product(input).await?;
    info!(id = %product.id, name = %product.name, unit = %product.unit, "created product");
    Ok((StatusCode::CREATED, Json(product)))
}

#[utoipa::path(
    get, path = "/api/products/{id}", tag = "products",
    params(("id" = String, Path, description = "Product ID")),
    responses(
        (status = 200, description = "OK"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Product>, JsonApiError> {
    state.storage.get_product(&id).await?.map(Json).ok_or_else(|| not_found("product"))
}

#[utoipa::path(
    patch, path = "/api/products/{id}", tag = "products",
    params(("id" = String, Path, description = "Product ID")),
    request_body = crate::openapi::ProductPatchDoc,
    responses(
        (status = 200, description = "Updated"),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(patch): JsonBody<ProductPatch>,
) -> Result<Json<Product>, JsonApiError> {
    let product = state.storage.update_product(&id, patch).await?.ok_or_else(|| not_found("product"))?;
    info!(id = %product.id, "updated product");
    Ok(Json(product))
}
