// src/middleware/rbac.rs

use std::marker::PhantomData;

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::{
    common::error::AppError,
    middleware::auth::CurrentUser,
    services::permissions,
};

/// O trait que define o que é uma permissão exigível por rota.
pub trait PermissionDef: Send + Sync + 'static {
    fn code() -> &'static str;
}

/// O extractor-guardião: colocar `RequirePermission<PermEditRooms>` na
/// assinatura do handler nega a requisição com 403 antes do corpo rodar.
/// A checagem é em memória — o guard de autenticação já agregou tudo.
pub struct RequirePermission<T>(PhantomData<T>);

impl<T, S> FromRequestParts<S> for RequirePermission<T>
where
    T: PermissionDef,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Autorização nunca roda sem autenticação: sem CurrentUser é 401.
        let user = parts
            .extensions
            .get::<CurrentUser>()
            .ok_or(AppError::MissingToken)?;

        if !user.has_permission(T::code()) {
            return Err(AppError::forbidden_permission(T::code()));
        }

        Ok(RequirePermission(PhantomData))
    }
}

/// Variante por nome de cargo: passa se o usuário tiver QUALQUER um dos
/// nomes listados (MASTER_ADMIN passa sempre).
pub trait RoleDef: Send + Sync + 'static {
    fn names() -> &'static [&'static str];
}

pub struct RequireRole<T>(PhantomData<T>);

impl<T, S> FromRequestParts<S> for RequireRole<T>
where
    T: RoleDef,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<CurrentUser>()
            .ok_or(AppError::MissingToken)?;

        if user.is_master_admin() || user.has_any_role(T::names()) {
            return Ok(RequireRole(PhantomData));
        }

        Err(AppError::Forbidden(format!(
            "You need one of the roles {:?} to perform this action",
            T::names()
        )))
    }
}

/// Rotas exclusivas do console: /properties, /dashboard, /users/stats.
pub struct RequireMasterAdmin;

impl<S> FromRequestParts<S> for RequireMasterAdmin
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<CurrentUser>()
            .ok_or(AppError::MissingToken)?;

        if !user.is_master_admin() {
            return Err(AppError::Forbidden(
                "This action is restricted to master administrators".into(),
            ));
        }

        Ok(RequireMasterAdmin)
    }
}

// ---
// DEFINIÇÃO DAS PERMISSÕES (TIPOS)
// ---

macro_rules! permission_type {
    ($name:ident, $code:expr) => {
        pub struct $name;
        impl PermissionDef for $name {
            fn code() -> &'static str {
                $code
            }
        }
    };
}

permission_type!(PermViewRooms, permissions::VIEW_ROOMS);
permission_type!(PermEditRooms, permissions::EDIT_ROOMS);
permission_type!(PermViewBookings, permissions::VIEW_BOOKINGS);
permission_type!(PermEditBookings, permissions::EDIT_BOOKINGS);
permission_type!(PermViewProperty, permissions::VIEW_PROPERTY);
permission_type!(PermViewStats, permissions::VIEW_STATS);
permission_type!(PermViewUsers, permissions::VIEW_USERS);
permission_type!(PermEditUsers, permissions::EDIT_USERS);
permission_type!(PermViewRoles, permissions::VIEW_ROLES);
permission_type!(PermEditRoles, permissions::EDIT_ROLES);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::auth::{User, UserType};
    use chrono::Utc;
    use std::collections::HashSet;
    use uuid::Uuid;

    struct ManagerRole;
    impl RoleDef for ManagerRole {
        fn names() -> &'static [&'static str] {
            &["Manager", "Front Desk"]
        }
    }

    fn parts_with(user: Option<CurrentUser>) -> axum::http::request::Parts {
        let (mut parts, _) = axum::http::Request::builder()
            .uri("/")
            .body(())
            .unwrap()
            .into_parts();
        if let Some(user) = user {
            parts.extensions.insert(user);
        }
        parts
    }

    fn staff_with_roles(roles: &[&str], perms: &[&str]) -> CurrentUser {
        CurrentUser {
            user: User {
                id: Uuid::new_v4(),
                first_name: "Bia".into(),
                last_name: "Lima".into(),
                email: "bia@example.com".into(),
                password_hash: "$2b$12$irrelevant".into(),
                user_type: UserType::Staff,
                property_id: Some(Uuid::new_v4()),
                is_active: true,
                refresh_token: None,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            },
            roles: roles.iter().map(|r| r.to_string()).collect(),
            permissions: perms.iter().map(|p| p.to_string()).collect(),
        }
    }

    #[tokio::test]
    async fn permission_guard_denies_with_403_and_allows_with_the_code() {
        let mut parts = parts_with(Some(staff_with_roles(&["Housekeeping"], &[])));
        let denied = RequirePermission::<PermEditRoles>::from_request_parts(&mut parts, &()).await;
        assert!(matches!(denied, Err(AppError::Forbidden(_))));

        let mut parts = parts_with(Some(staff_with_roles(
            &["Housekeeping"],
            &[permissions::EDIT_ROLES],
        )));
        assert!(
            RequirePermission::<PermEditRoles>::from_request_parts(&mut parts, &())
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn guards_fail_with_401_when_unauthenticated() {
        // Autorização nunca roda sem autenticação
        let mut parts = parts_with(None);
        let result = RequirePermission::<PermViewRooms>::from_request_parts(&mut parts, &()).await;
        assert!(matches!(result, Err(AppError::MissingToken)));

        let mut parts = parts_with(None);
        let result = RequireMasterAdmin::from_request_parts(&mut parts, &()).await;
        assert!(matches!(result, Err(AppError::MissingToken)));
    }

    #[tokio::test]
    async fn role_guard_intersects_names() {
        let mut parts = parts_with(Some(staff_with_roles(&["Front Desk"], &[])));
        assert!(
            RequireRole::<ManagerRole>::from_request_parts(&mut parts, &())
                .await
                .is_ok()
        );

        let mut parts = parts_with(Some(staff_with_roles(&["Housekeeping"], &[])));
        assert!(matches!(
            RequireRole::<ManagerRole>::from_request_parts(&mut parts, &()).await,
            Err(AppError::Forbidden(_))
        ));
    }

    #[tokio::test]
    async fn master_admin_guard_rejects_tenant_users() {
        let mut parts = parts_with(Some(staff_with_roles(&[], &[])));
        assert!(matches!(
            RequireMasterAdmin::from_request_parts(&mut parts, &()).await,
            Err(AppError::Forbidden(_))
        ));
    }
}
