// src/handlers/auth.rs

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use validator::Validate;

use crate::{
    common::{error::AppError, response::ApiResponse},
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::auth::{
        ChangePasswordPayload, LoginPayload, LoginResponse, ProfileResponse, RefreshPayload,
    },
};

// POST /api/auth/login
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Auth",
    request_body = LoginPayload,
    responses(
        (status = 200, description = "Authenticated; returns user and token pair", body = LoginResponse),
        (status = 401, description = "Login failed"),
        (status = 403, description = "Master admin on the tenant client")
    )
)]
pub async fn login(
    State(app_state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let (user, tokens) = app_state
        .auth_service
        .login(&payload.email, &payload.password, payload.client)
        .await?;

    Ok(Json(ApiResponse::ok(
        LoginResponse { user, tokens },
        "Login successful",
    )))
}

// POST /api/auth/refresh-token
#[utoipa::path(
    post,
    path = "/api/auth/refresh-token",
    tag = "Auth",
    request_body = RefreshPayload,
    responses(
        (status = 200, description = "New token pair"),
        (status = 401, description = "Invalid or expired refresh token")
    )
)]
pub async fn refresh_token(
    State(app_state): State<AppState>,
    Json(payload): Json<RefreshPayload>,
) -> Result<impl IntoResponse, AppError> {
    let tokens = app_state.auth_service.refresh(&payload.refresh_token).await?;

    Ok(Json(ApiResponse::ok(tokens, "Tokens refreshed")))
}

// POST /api/auth/logout
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = "Auth",
    responses((status = 200, description = "Refresh token revoked")),
    security(("api_jwt" = []))
)]
pub async fn logout(
    State(app_state): State<AppState>,
    AuthenticatedUser(current): AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    app_state.auth_service.revoke(current.user.id).await?;

    Ok(Json(ApiResponse::message("Logged out")))
}

// GET /api/auth/profile
#[utoipa::path(
    get,
    path = "/api/auth/profile",
    tag = "Auth",
    responses((status = 200, description = "Current user with effective permissions", body = ProfileResponse)),
    security(("api_jwt" = []))
)]
pub async fn profile(
    AuthenticatedUser(current): AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let permissions = current.effective_permissions();

    Ok(Json(ApiResponse::ok(
        ProfileResponse {
            roles: current.roles.clone(),
            permissions,
            user: current.user,
        },
        "Profile loaded",
    )))
}

// PUT /api/auth/change-password
#[utoipa::path(
    put,
    path = "/api/auth/change-password",
    tag = "Auth",
    request_body = ChangePasswordPayload,
    responses(
        (status = 200, description = "Password changed; refresh session revoked"),
        (status = 400, description = "Wrong current password")
    ),
    security(("api_jwt" = []))
)]
pub async fn change_password(
    State(app_state): State<AppState>,
    AuthenticatedUser(current): AuthenticatedUser,
    Json(payload): Json<ChangePasswordPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    app_state
        .auth_service
        .change_password(&current.user, &payload.current_password, &payload.new_password)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::message("Password changed")),
    ))
}
