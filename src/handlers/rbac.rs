// src/handlers/rbac.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{error::AppError, response::ApiResponse},
    config::AppState,
    middleware::rbac::{PermEditRoles, PermViewRoles, RequirePermission},
    models::{
        auth::UserType,
        rbac::{
            AssignPermissionPayload, CreatePermissionPayload, CreateRolePayload, UpdateRolePayload,
        },
    },
    services::permissions::{PERMISSION_CATALOG, fallback_permissions},
};

// GET /api/role-permissions/roles
#[utoipa::path(
    get,
    path = "/api/role-permissions/roles",
    tag = "RBAC",
    responses((status = 200, description = "Roles with their permission codes")),
    security(("api_jwt" = []))
)]
pub async fn list_roles(
    State(app_state): State<AppState>,
    _perm: RequirePermission<PermViewRoles>,
) -> Result<impl IntoResponse, AppError> {
    let roles = app_state.rbac_repo.list_roles().await?;

    Ok(Json(ApiResponse::ok(roles, "Roles loaded")))
}

// POST /api/role-permissions/roles
#[utoipa::path(
    post,
    path = "/api/role-permissions/roles",
    tag = "RBAC",
    request_body = CreateRolePayload,
    responses(
        (status = 201, description = "Role created with its initial permissions"),
        (status = 409, description = "Role name already exists")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_role(
    State(app_state): State<AppState>,
    _perm: RequirePermission<PermEditRoles>,
    Json(payload): Json<CreateRolePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let role = app_state
        .rbac_service
        .create_role_with_permissions(&payload)
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(role, "Role created"))))
}

// PUT /api/role-permissions/roles/{id}
pub async fn update_role(
    State(app_state): State<AppState>,
    _perm: RequirePermission<PermEditRoles>,
    Path(role_id): Path<Uuid>,
    Json(payload): Json<UpdateRolePayload>,
) -> Result<impl IntoResponse, AppError> {
    let role = app_state
        .rbac_repo
        .update_role(role_id, &payload)
        .await?
        .ok_or(AppError::NotFound("Role"))?;

    Ok(Json(ApiResponse::ok(role, "Role updated")))
}

// DELETE /api/role-permissions/roles/{id}
pub async fn delete_role(
    State(app_state): State<AppState>,
    _perm: RequirePermission<PermEditRoles>,
    Path(role_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    if !app_state.rbac_repo.delete_role(role_id).await? {
        return Err(AppError::NotFound("Role"));
    }

    Ok(Json(ApiResponse::message("Role deleted")))
}

// GET /api/role-permissions/permissions
#[utoipa::path(
    get,
    path = "/api/role-permissions/permissions",
    tag = "RBAC",
    responses((status = 200, description = "All registered permissions")),
    security(("api_jwt" = []))
)]
pub async fn list_permissions(
    State(app_state): State<AppState>,
    _perm: RequirePermission<PermViewRoles>,
) -> Result<impl IntoResponse, AppError> {
    let permissions = app_state.rbac_repo.list_permissions().await?;

    Ok(Json(ApiResponse::ok(permissions, "Permissions loaded")))
}

// POST /api/role-permissions/permissions
pub async fn create_permission(
    State(app_state): State<AppState>,
    _perm: RequirePermission<PermEditRoles>,
    Json(payload): Json<CreatePermissionPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let permission = app_state
        .rbac_repo
        .create_permission(&payload.code, &payload.description, &payload.module)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(permission, "Permission created")),
    ))
}

// DELETE /api/role-permissions/permissions/{id}
pub async fn delete_permission(
    State(app_state): State<AppState>,
    _perm: RequirePermission<PermEditRoles>,
    Path(permission_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    if !app_state.rbac_repo.delete_permission(permission_id).await? {
        return Err(AppError::NotFound("Permission"));
    }

    Ok(Json(ApiResponse::message("Permission deleted")))
}

// POST /api/role-permissions/roles/{id}/permissions
// Idempotente: atribuir duas vezes deixa o conjunto igual a uma vez.
pub async fn assign_permission(
    State(app_state): State<AppState>,
    _perm: RequirePermission<PermEditRoles>,
    Path(role_id): Path<Uuid>,
    Json(payload): Json<AssignPermissionPayload>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .rbac_repo
        .find_role(role_id)
        .await?
        .ok_or(AppError::NotFound("Role"))?;

    app_state
        .rbac_repo
        .assign_permission(&app_state.db_pool, role_id, payload.permission_id)
        .await?;

    let codes = app_state.rbac_repo.role_permission_codes(role_id).await?;

    Ok(Json(ApiResponse::ok(codes, "Permission assigned")))
}

// DELETE /api/role-permissions/roles/{id}/permissions/{permission_id}
pub async fn remove_permission(
    State(app_state): State<AppState>,
    _perm: RequirePermission<PermEditRoles>,
    Path((role_id, permission_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .rbac_repo
        .remove_permission(role_id, permission_id)
        .await?;

    let codes = app_state.rbac_repo.role_permission_codes(role_id).await?;

    Ok(Json(ApiResponse::ok(codes, "Permission removed")))
}

// GET /api/role-permissions/catalog
// A tabela declarativa completa: é daqui que o frontend deriva o espelho
// de exibição (esconder botões), sem manter uma cópia própria.
#[utoipa::path(
    get,
    path = "/api/role-permissions/catalog",
    tag = "RBAC",
    responses((status = 200, description = "Permission catalog and per-user-type fallback sets")),
    security(("api_jwt" = []))
)]
pub async fn permission_catalog(
    _perm: RequirePermission<PermViewRoles>,
) -> Result<impl IntoResponse, AppError> {
    let catalog = json!({
        "catalog": PERMISSION_CATALOG,
        "fallbacks": {
            "MASTER_ADMIN": fallback_permissions(UserType::MasterAdmin),
            "PROPERTY_ADMIN": fallback_permissions(UserType::PropertyAdmin),
            "STAFF": fallback_permissions(UserType::Staff),
        },
    });

    Ok(Json(ApiResponse::ok(catalog, "Permission catalog loaded")))
}
