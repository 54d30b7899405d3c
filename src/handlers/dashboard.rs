// src/handlers/dashboard.rs

use axum::{Json, extract::State, response::IntoResponse};

use crate::{
    common::{error::AppError, response::ApiResponse},
    config::AppState,
    middleware::rbac::RequireMasterAdmin,
    models::dashboard::{DashboardStats, PropertyOverview},
};

// GET /api/dashboard/stats
#[utoipa::path(
    get,
    path = "/api/dashboard/stats",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Global aggregates across all tenants", body = DashboardStats),
        (status = 403, description = "Caller is not a master admin")
    ),
    security(("api_jwt" = []))
)]
pub async fn dashboard_stats(
    State(app_state): State<AppState>,
    _master: RequireMasterAdmin,
) -> Result<impl IntoResponse, AppError> {
    let stats = app_state.dashboard_repo.stats().await?;

    Ok(Json(ApiResponse::ok(stats, "Dashboard statistics loaded")))
}

// GET /api/dashboard/properties
#[utoipa::path(
    get,
    path = "/api/dashboard/properties",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Per-property occupancy overview", body = Vec<PropertyOverview>)
    ),
    security(("api_jwt" = []))
)]
pub async fn properties_overview(
    State(app_state): State<AppState>,
    _master: RequireMasterAdmin,
) -> Result<impl IntoResponse, AppError> {
    let overview = app_state.dashboard_repo.properties_overview().await?;

    Ok(Json(ApiResponse::ok(overview, "Properties overview loaded")))
}
