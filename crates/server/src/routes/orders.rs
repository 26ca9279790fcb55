use axum::{extract::{Path, State}, http::StatusCode, Json};
use models::{CreateOrder, Invoice, Order, OrderItem, OrderPatch, OrderWithDetails};
use serde::Deserialize;
use tracing::info;

use crate::{
    errors::{not_found, JsonApiError},
    extract::{JsonBody, QueryParams},
    observability::{ORDERS_CREATED_TOTAL, ORDERS_DELETED_TOTAL},
    state::AppState,
};

const DEFAULT_RECENT_LIMIT: usize = 5;

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct RecentQuery {
    /// Maximum number of orders returned (default 5).
    pub limit: Option<usize>,
}

#[utoipa::path(
    get, path = "/api/orders", tag = "orders",
    responses((status = 200, description = "Orders with client, supplier, items, deliveries and invoices; newest first"))
)]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<OrderWithDetails>>, JsonApiError> {
    let orders = state.storage.orders_with_details().await?;
    info!(count = orders.len(), "list orders");
    Ok(Json(orders))
}

#[utoipa::path(
    get, path = "/api/orders/recent", tag = "orders",
    params(RecentQuery),
    responses((status = 200, description = "Newest orders with details"))
)]
pub async fn recent(
    State(state): State<AppState>,
    QueryParams(q): QueryParams<RecentQuery>,
) -> Result<Json<Vec<OrderWithDetails>>, JsonApiError> {
    let limit = q.limit.unwrap_or(DEFAULT_RECENT_LIMIT);
    Ok(Json(state.storage.recent_orders(limit).await?))
}

#[utoipa::path(
    post, path = "/api/orders", tag = "orders",
    request_body = crate::openapi::CreateOrderDoc,
    responses(
        (status = 201, description = "Created"),
        (status = 400, description = "Validation Error")
    )
)]
pub async fn create(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CreateOrder>,
) -> Result<(StatusCode, Json<Order>), JsonApiError> {
    let items = input.items.len();
    let order = state.storage.create_order(input).await?;
    ORDERS_CREATED_TOTAL.inc();
    info!(id = %order.id, order_number = order.order_number, items, total = %order.total_value, "created order");
    Ok((StatusCode::CREATED, Json(order)))
}

#[utoipa::path(
    get, path = "/api/orders/{id}", tag = "orders",
    params(("id" = String, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order with details"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<OrderWithDetails>, JsonApiError> {
    state.storage.order_with_details(&id).await?.map(Json).ok_or_else(|| not_found("order"))
}

#[utoipa::path(
    patch, path = "/api/orders/{id}", tag = "orders",
    params(("id" = String, Path, description = "Order ID")),
    request_body = crate::openapi::OrderPatchDoc,
    responses(
        (status = 200, description = "Updated"),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(patch): JsonBody<OrderPatch>,
) -> Result<Json<Order>, JsonApiError> {
    let order = state.storage.update_order(&id, patch).await?.ok_or_else(|| not_found("order"))?;
    info!(id = %order.id, status = ?order.status, "updated order");
    Ok(Json(order))
}

#[utoipa::path(
    delete, path = "/api/orders/{id}", tag = "orders",
    params(("id" = String, Path, description = "Order ID")),
    responses(
        (status = 204, description = "Deleted together with its items, deliveries and invoices"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> Result<StatusCode, JsonApiError> {
    if !state.storage.delete_order(&id).await? {
        return Err(not_found("order"));
    }
    ORDERS_DELETED_TOTAL.inc();
    info!(id = %id, "deleted order");
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get, path = "/api/orders/{id}/items", tag = "orders",
    params(("id" = String, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Items of the order"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn items(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Vec<OrderItem>>, JsonApiError> {
    let items = state.storage.items_of_order(&id).await?.ok_or_else(|| not_found("order"))?;
    Ok(Json(items))
}

#[utoipa::path(
    get, path = "/api/orders/{id}/invoices", tag = "orders",
    params(("id" = String, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Invoices of the order"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn invoices(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Vec<Invoice>>, JsonApiError> {
    let invoices = state.storage.invoices_of_order(&id).await?.ok_or_else(|| not_found("order"))?;
    Ok(Json(invoices))
}
