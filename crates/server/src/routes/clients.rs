use axum::{extract::{Path, State}, http::StatusCode, Json};
use models::{Client, ClientPatch, NewClient};
use tracing::info;

use crate::{errors::{not_found, JsonApiError}, extract::JsonBody, state::AppState};

#[utoipa::path(
    get, path = "/api/clients", tag = "clients",
    responses((status = 200, description = "All clients in insertion order"))
)]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Client>>, JsonApiError> {
    let clients = state.storage.list_clients().await?;
    Ok(Json(clients))
}

#[utoipa::path(
    post, path = "/api/clients", tag = "clients",
    request_body = crate::openapi::NewClientDoc,
    responses(
        (status = 201, description = "Created"),
        (status = 400, description = "Validation Error")
    )
)]
pub async fn create(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<NewClient>,
) -> Result<(StatusCode, Json<Client>), JsonApiError> {
    let client = state.storage.create_client(input).await?;
    info!(id = %client.id, name = %client.name, "created client");
    Ok((StatusCode::CREATED, Json(client)))
}

#[utoipa::path(
    get, path = "/api/clients/{id}", tag = "clients",
    params(("id" = String, Path, description = "Client ID")),
    responses(
        (status = 200, description = "OK"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Client>, JsonApiError> {
    state.storage.get_client(&id).await?.map(Json).ok_or_else(|| not_found("client"))
}

#[utoipa::path(
    patch, path = "/api/clients/{id}", tag = "clients",
    params(("id" = String, Path, description = "Client ID")),
    request_body = crate::openapi::ClientPatchDoc,
    responses(
        (status = 200, description = "Updated"),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(patch): JsonBody<ClientPatch>,
) -> Result<Json<Client>, JsonApiError> {
    let client = state.storage.update_client(&id, patch).await?.ok_or_else(|| not_found("client"))?;
    info!(id = %client.id, "updated client");
    Ok(Json(client))
}

#[utoipa::path(
    delete, path = "/api/clients/{id}", tag = "clients",
    params(("id" = String, Path, description = "Client ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> Result<StatusCode, JsonApiError> {
    if state.storage.delete_client(&id).await? {
        info!(id = %id, "deleted client");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found("client"))
    }
}
