use axum::{extract::{Path, State}, http::StatusCode, Json};
use models::{Delivery, DeliveryPatch, DeliveryStatus, DeliveryWithOrder, NewDelivery};
use tracing::info;

use crate::{
    errors::{not_found, JsonApiError},
    extract::JsonBody,
    observability::DELIVERIES_COMPLETED_TOTAL,
    state::AppState,
};

#[utoipa::path(
    get, path = "/api/deliveries", tag = "deliveries",
    responses((status = 200, description = "Deliveries with their order, client and supplier; latest scheduled first"))
)]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<DeliveryWithOrder>>, JsonApiError> {
    Ok(Json(state.storage.deliveries_with_details().await?))
}

#[utoipa::path(
    get, path = "/api/deliveries/today", tag = "deliveries",
    responses((status = 200, description = "Deliveries scheduled for the current local day"))
)]
pub async fn today(State(state): State<AppState>) -> Result<Json<Vec<DeliveryWithOrder>>, JsonApiError> {
    let deliveries = state.storage.today_deliveries().await?;
    info!(count = deliveries.len(), "today's deliveries");
    Ok(Json(deliveries))
}

#[utoipa::path(
    post, path = "/api/deliveries", tag = "deliveries",
    request_body = crate::openapi::NewDeliveryDoc,
    responses(
        (status = 201, description = "Scheduled"),
        (status = 400, description = "Validation Error")
    )
)]
pub async fn create(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<NewDelivery>,
) -> Result<(StatusCode, Json<Delivery>), JsonApiError> {
    let delivery = state.storage.create_delivery(input).await?;
    if delivery.status == DeliveryStatus::Delivered {
        DELIVERIES_COMPLETED_TOTAL.inc();
    }
    info!(id = %delivery.id, order_id = %delivery.order_id, scheduled = %delivery.scheduled_date, "scheduled delivery");
    Ok((StatusCode::CREATED, Json(delivery)))
}

#[utoipa::path(
    get, path = "/api/deliveries/{id}", tag = "deliveries",
    params(("id" = String, Path, description = "Delivery ID")),
    responses(
        (status = 200, description = "Delivery with its order"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<DeliveryWithOrder>, JsonApiError> {
    state.storage.delivery_with_details(&id).await?.map(Json).ok_or_else(|| not_found("delivery"))
}

#[utoipa::path(
    patch, path = "/api/deliveries/{id}", tag = "deliveries",
    params(("id" = String, Path, description = "Delivery ID")),
    request_body = crate::openapi::DeliveryPatchDoc,
    responses(
        (status = 200, description = "Updated; the first switch to delivered stamps deliveredAt"),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(patch): JsonBody<DeliveryPatch>,
) -> Result<Json<Delivery>, JsonApiError> {
    let update = state.storage.update_delivery(&id, patch).await?.ok_or_else(|| not_found("delivery"))?;
    if update.completed {
        DELIVERIES_COMPLETED_TOTAL.inc();
    }
    let delivery = update.delivery;
    info!(id = %delivery.id, status = ?delivery.status, completed = update.completed, "updated delivery");
    Ok(Json(delivery))
}
