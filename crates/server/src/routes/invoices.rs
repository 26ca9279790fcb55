use axum::{extract::{Path, State}, http::StatusCode, Json};
use models::{Invoice, InvoicePatch, NewInvoice};
use tracing::info;

use crate::{errors::{not_found, JsonApiError}, extract::JsonBody, state::AppState};

#[utoipa::path(
    get, path = "/api/invoices", tag = "invoices",
    responses((status = 200, description = "All invoices"))
)]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Invoice>>, JsonApiError> {
    Ok(Json(state.storage.list_invoices().await?))
}

#[utoipa::path(
    post, path = "/api/invoices", tag = "invoices",
    request_body = crate::openapi::NewInvoiceDoc,
    responses(
        (status = 201, description = "Created"),
        (status = 400, description = "Validation Error")
    )
)]
pub async fn create(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<NewInvoice>,
) -> Result<(StatusCode, Json<Invoice>), JsonApiError> {
    let invoice = state.storage.create_invoice(input).await?;
    info!(id = %invoice.id, order_id = %invoice.order_id, number = %invoice.number, "created invoice");
    Ok((StatusCode::CREATED, Json(invoice)))
}

#[utoipa::path(
    get, path = "/api/invoices/{id}", tag = "invoices",
    params(("id" = String, Path, description = "Invoice ID")),
    responses(
        (status = 200, description = "OK"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Invoice>, JsonApiError> {
    state.storage.get_invoice(&id).await?.map(Json).ok_or_else(|| not_found("invoice"))
}

#[utoipa::path(
    patch, path = "/api/invoices/{id}", tag = "invoices",
    params(("id" = String, Path, description = "Invoice ID")),
    request_body = crate::openapi::InvoicePatchDoc,
    responses(
        (status = 200, description = "Updated"),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(patch): JsonBody<InvoicePatch>,
) -> Result<Json<Invoice>, JsonApiError> {
    let invoice = state.storage.update_invoice(&id, patch).await?.ok_or_else(|| not_found("invoice"))?;
    info!(id = %invoice.id, "updated invoice");
    Ok(Json(invoice))
}
