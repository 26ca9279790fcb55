use axum::{extract::State, Json};
use models::DashboardStats;

use crate::{errors::JsonApiError, state::AppState};

#[utoipa::path(
    get, path = "/api/dashboard/stats", tag = "dashboard",
    responses((status = 200, description = "Dashboard counters", body = crate::openapi::DashboardStatsDoc))
)]
pub async fn stats(State(state): State<AppState>) -> Result<Json<DashboardStats>, JsonApiError> {
    Ok(Json(state.storage.dashboard_stats().await?))
}
