// src/handlers/users.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{error::AppError, response::ApiResponse},
    config::AppState,
    middleware::{
        auth::{AuthenticatedUser, CurrentUser},
        rbac::{PermEditUsers, PermViewUsers, RequireMasterAdmin, RequirePermission},
    },
    models::{
        auth::{
            CreateUserPayload, ToggleUserStatusPayload, UpdateUserPayload, User, UserListQuery,
            UserType,
        },
        rbac::AssignRolePayload,
    },
};

// O filtro de listagem que o chamador pode usar: master escolhe livremente
// (inclusive nenhum filtro); os demais ficam presos à própria property e,
// sem uma, não enxergam usuário nenhum (pode acontecer se a property deles
// foi apagada — o FK é ON DELETE SET NULL).
fn property_filter(
    caller: &CurrentUser,
    requested: Option<Uuid>,
) -> Result<Option<Uuid>, AppError> {
    if caller.is_master_admin() {
        return Ok(requested);
    }
    match caller.user.property_id {
        Some(pid) => Ok(Some(pid)),
        None => Err(AppError::Forbidden(
            "Your account is not assigned to any property".into(),
        )),
    }
}

// Escopo sobre um usuário-alvo: não-master só toca usuários da própria
// property (e nunca um master admin, que não tem property).
fn ensure_user_scope(caller: &CurrentUser, target: &User) -> Result<(), AppError> {
    if caller.is_master_admin() {
        return Ok(());
    }
    match target.property_id {
        Some(pid) if caller.can_access_property(pid) => Ok(()),
        _ => Err(AppError::Forbidden(
            "You cannot access users of another property".into(),
        )),
    }
}

// GET /api/users
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "Users",
    responses((status = 200, description = "Users visible to the caller")),
    security(("api_jwt" = []))
)]
pub async fn list_users(
    State(app_state): State<AppState>,
    AuthenticatedUser(caller): AuthenticatedUser,
    _perm: RequirePermission<PermViewUsers>,
    Query(query): Query<UserListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let filter = property_filter(&caller, query.property_id)?;

    let users = app_state.user_repo.list(filter).await?;

    Ok(Json(ApiResponse::ok(users, "Users loaded")))
}

// POST /api/users
#[utoipa::path(
    post,
    path = "/api/users",
    tag = "Users",
    request_body = CreateUserPayload,
    responses(
        (status = 201, description = "User created"),
        (status = 409, description = "E-mail already in use")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_user(
    State(app_state): State<AppState>,
    AuthenticatedUser(caller): AuthenticatedUser,
    _perm: RequirePermission<PermEditUsers>,
    Json(payload): Json<CreateUserPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    // Admin de property não cria master nem cria fora da própria property
    let property_id = if caller.is_master_admin() {
        if payload.user_type != UserType::MasterAdmin && payload.property_id.is_none() {
            return Err(AppError::BadRequest(
                "A property_id is required for non-master users".into(),
            ));
        }
        payload.property_id
    } else {
        if payload.user_type == UserType::MasterAdmin {
            return Err(AppError::Forbidden(
                "Only master administrators can create master accounts".into(),
            ));
        }
        // Sem property o admin não cria ninguém (nem usuários soltos)
        let Some(pid) = caller.user.property_id else {
            return Err(AppError::Forbidden(
                "Your account is not assigned to any property".into(),
            ));
        };
        Some(pid)
    };

    let password_hash = app_state.auth_service.hash_password(&payload.password).await?;

    let user = app_state
        .user_repo
        .create(
            &payload.first_name,
            &payload.last_name,
            &payload.email,
            &password_hash,
            payload.user_type,
            property_id,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(user, "User created"))))
}

// GET /api/users/{id}
pub async fn get_user(
    State(app_state): State<AppState>,
    AuthenticatedUser(caller): AuthenticatedUser,
    _perm: RequirePermission<PermViewUsers>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let user = app_state
        .user_repo
        .find_by_id(user_id)
        .await?
        .ok_or(AppError::NotFound("User"))?;

    ensure_user_scope(&caller, &user)?;

    Ok(Json(ApiResponse::ok(user, "User loaded")))
}

// PUT /api/users/{id}
pub async fn update_user(
    State(app_state): State<AppState>,
    AuthenticatedUser(caller): AuthenticatedUser,
    _perm: RequirePermission<PermEditUsers>,
    Path(user_id): Path<Uuid>,
    Json(payload): Json<UpdateUserPayload>,
) -> Result<impl IntoResponse, AppError> {
    let target = app_state
        .user_repo
        .find_by_id(user_id)
        .await?
        .ok_or(AppError::NotFound("User"))?;

    ensure_user_scope(&caller, &target)?;

    // Não-master não pode mover ninguém para outra property
    if let Some(new_property) = payload.property_id {
        if !caller.can_access_property(new_property) {
            return Err(AppError::Forbidden(
                "You cannot move a user to another property".into(),
            ));
        }
    }

    let user = app_state
        .user_repo
        .update(user_id, &payload)
        .await?
        .ok_or(AppError::NotFound("User"))?;

    Ok(Json(ApiResponse::ok(user, "User updated")))
}

// DELETE /api/users/{id}
pub async fn delete_user(
    State(app_state): State<AppState>,
    AuthenticatedUser(caller): AuthenticatedUser,
    _perm: RequirePermission<PermEditUsers>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let target = app_state
        .user_repo
        .find_by_id(user_id)
        .await?
        .ok_or(AppError::NotFound("User"))?;

    ensure_user_scope(&caller, &target)?;

    app_state.user_repo.delete(user_id).await?;

    Ok(Json(ApiResponse::message("User deleted")))
}

// PATCH /api/users/{id}/status
pub async fn toggle_user_status(
    State(app_state): State<AppState>,
    AuthenticatedUser(caller): AuthenticatedUser,
    _perm: RequirePermission<PermEditUsers>,
    Path(user_id): Path<Uuid>,
    Json(payload): Json<ToggleUserStatusPayload>,
) -> Result<impl IntoResponse, AppError> {
    let target = app_state
        .user_repo
        .find_by_id(user_id)
        .await?
        .ok_or(AppError::NotFound("User"))?;

    ensure_user_scope(&caller, &target)?;

    // Desativar vale na hora: o guard recusa o próximo request do usuário
    // mesmo com access token ainda não expirado.
    let user = app_state
        .user_repo
        .set_active(user_id, payload.is_active)
        .await?
        .ok_or(AppError::NotFound("User"))?;

    if !payload.is_active {
        app_state.auth_service.revoke(user_id).await?;
    }

    Ok(Json(ApiResponse::ok(user, "User status updated")))
}

// POST /api/users/{id}/roles — atribuição idempotente (repetir é no-op)
pub async fn assign_role(
    State(app_state): State<AppState>,
    AuthenticatedUser(caller): AuthenticatedUser,
    _perm: RequirePermission<PermEditUsers>,
    Path(user_id): Path<Uuid>,
    Json(payload): Json<AssignRolePayload>,
) -> Result<impl IntoResponse, AppError> {
    let target = app_state
        .user_repo
        .find_by_id(user_id)
        .await?
        .ok_or(AppError::NotFound("User"))?;

    ensure_user_scope(&caller, &target)?;

    app_state
        .rbac_repo
        .find_role(payload.role_id)
        .await?
        .ok_or(AppError::NotFound("Role"))?;

    app_state.rbac_repo.assign_role(user_id, payload.role_id).await?;

    let roles = app_state.user_repo.role_names(user_id).await?;

    Ok(Json(ApiResponse::ok(roles, "Role assigned")))
}

// DELETE /api/users/{id}/roles/{role_id}
pub async fn remove_role(
    State(app_state): State<AppState>,
    AuthenticatedUser(caller): AuthenticatedUser,
    _perm: RequirePermission<PermEditUsers>,
    Path((user_id, role_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, AppError> {
    let target = app_state
        .user_repo
        .find_by_id(user_id)
        .await?
        .ok_or(AppError::NotFound("User"))?;

    ensure_user_scope(&caller, &target)?;

    app_state.rbac_repo.remove_role(user_id, role_id).await?;

    let roles = app_state.user_repo.role_names(user_id).await?;

    Ok(Json(ApiResponse::ok(roles, "Role removed")))
}

// GET /api/users/stats — só o console master enxerga
#[utoipa::path(
    get,
    path = "/api/users/stats",
    tag = "Users",
    responses(
        (status = 200, description = "Global user statistics", body = crate::models::dashboard::UserStats),
        (status = 403, description = "Caller is not a master admin")
    ),
    security(("api_jwt" = []))
)]
pub async fn user_stats(
    State(app_state): State<AppState>,
    _master: RequireMasterAdmin,
) -> Result<impl IntoResponse, AppError> {
    let stats = app_state.user_repo.stats().await?;

    Ok(Json(ApiResponse::ok(stats, "User statistics loaded")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::collections::HashSet;

    fn caller(user_type: UserType, property_id: Option<Uuid>) -> CurrentUser {
        CurrentUser {
            user: User {
                id: Uuid::new_v4(),
                first_name: "Lia".into(),
                last_name: "Prado".into(),
                email: "lia@example.com".into(),
                password_hash: "$2b$12$irrelevant".into(),
                user_type,
                property_id,
                is_active: true,
                refresh_token: None,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            },
            roles: Vec::new(),
            permissions: HashSet::new(),
        }
    }

    #[test]
    fn master_admin_picks_any_listing_filter() {
        let master = caller(UserType::MasterAdmin, None);
        let requested = Uuid::new_v4();

        assert_eq!(property_filter(&master, None).unwrap(), None);
        assert_eq!(
            property_filter(&master, Some(requested)).unwrap(),
            Some(requested)
        );
    }

    #[test]
    fn tenant_caller_is_pinned_to_their_own_property() {
        let own = Uuid::new_v4();
        let other = Uuid::new_v4();
        let admin = caller(UserType::PropertyAdmin, Some(own));

        // O filtro pedido é ignorado: vale sempre a property do chamador
        assert_eq!(property_filter(&admin, Some(other)).unwrap(), Some(own));
        assert_eq!(property_filter(&admin, None).unwrap(), Some(own));
    }

    #[test]
    fn tenant_caller_without_a_property_gets_forbidden_not_the_global_list() {
        // Estado alcançável: a property do admin foi apagada (FK SET NULL)
        for user_type in [UserType::PropertyAdmin, UserType::Staff] {
            let orphan = caller(user_type, None);
            assert!(matches!(
                property_filter(&orphan, None),
                Err(AppError::Forbidden(_))
            ));
        }
    }
}
