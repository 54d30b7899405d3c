// src/handlers/properties.rs
//
// CRUD de tenants — exclusivo do console do master admin.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{error::AppError, response::ApiResponse},
    config::AppState,
    middleware::rbac::RequireMasterAdmin,
    models::property::{CreatePropertyPayload, TogglePropertyStatusPayload, UpdatePropertyPayload},
};

// GET /api/properties
#[utoipa::path(
    get,
    path = "/api/properties",
    tag = "Properties",
    responses(
        (status = 200, description = "All properties"),
        (status = 403, description = "Caller is not a master admin")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_properties(
    State(app_state): State<AppState>,
    _master: RequireMasterAdmin,
) -> Result<impl IntoResponse, AppError> {
    let properties = app_state.property_repo.list().await?;

    Ok(Json(ApiResponse::ok(properties, "Properties loaded")))
}

// POST /api/properties
#[utoipa::path(
    post,
    path = "/api/properties",
    tag = "Properties",
    request_body = CreatePropertyPayload,
    responses((status = 201, description = "Property created")),
    security(("api_jwt" = []))
)]
pub async fn create_property(
    State(app_state): State<AppState>,
    _master: RequireMasterAdmin,
    Json(payload): Json<CreatePropertyPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let property = app_state.property_repo.create(&payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(property, "Property created")),
    ))
}

// GET /api/properties/{id}
pub async fn get_property(
    State(app_state): State<AppState>,
    _master: RequireMasterAdmin,
    Path(property_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let property = app_state
        .property_repo
        .find(property_id)
        .await?
        .ok_or(AppError::NotFound("Property"))?;

    Ok(Json(ApiResponse::ok(property, "Property loaded")))
}

// PUT /api/properties/{id}
pub async fn update_property(
    State(app_state): State<AppState>,
    _master: RequireMasterAdmin,
    Path(property_id): Path<Uuid>,
    Json(payload): Json<UpdatePropertyPayload>,
) -> Result<impl IntoResponse, AppError> {
    let property = app_state
        .property_repo
        .update(property_id, &payload)
        .await?
        .ok_or(AppError::NotFound("Property"))?;

    Ok(Json(ApiResponse::ok(property, "Property updated")))
}

// DELETE /api/properties/{id}
pub async fn delete_property(
    State(app_state): State<AppState>,
    _master: RequireMasterAdmin,
    Path(property_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    if !app_state.property_repo.delete(property_id).await? {
        return Err(AppError::NotFound("Property"));
    }

    Ok(Json(ApiResponse::message("Property deleted")))
}

// PATCH /api/properties/{id}/status
pub async fn toggle_property_status(
    State(app_state): State<AppState>,
    _master: RequireMasterAdmin,
    Path(property_id): Path<Uuid>,
    Json(payload): Json<TogglePropertyStatusPayload>,
) -> Result<impl IntoResponse, AppError> {
    let property = app_state
        .property_repo
        .set_active(property_id, payload.is_active)
        .await?
        .ok_or(AppError::NotFound("Property"))?;

    Ok(Json(ApiResponse::ok(property, "Property status updated")))
}
