// src/middleware/auth.rs

use std::collections::HashSet;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    models::auth::{User, UserType},
    services::permissions::fallback_permissions,
};

// O usuário resolvido pelo guard, com cargos e permissões já agregados.
// Todas as decisões de autorização dali em diante são checagens em memória.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user: User,
    pub roles: Vec<String>,
    pub permissions: HashSet<String>,
}

impl CurrentUser {
    pub fn is_master_admin(&self) -> bool {
        self.user.user_type == UserType::MasterAdmin
    }

    // MASTER_ADMIN passa em qualquer checagem. Usuário sem nenhum cargo
    // cai no conjunto fixo derivado do user_type; com cargos, vale a
    // união das permissões deles.
    pub fn has_permission(&self, code: &str) -> bool {
        if self.is_master_admin() {
            return true;
        }
        if self.roles.is_empty() {
            return fallback_permissions(self.user.user_type).contains(&code);
        }
        self.permissions.contains(code)
    }

    pub fn has_any_role(&self, names: &[&str]) -> bool {
        self.roles.iter().any(|r| names.contains(&r.as_str()))
    }

    // Escopo de tenant: MASTER_ADMIN enxerga tudo; os demais só a
    // própria property.
    pub fn can_access_property(&self, property_id: Uuid) -> bool {
        self.is_master_admin() || self.user.property_id == Some(property_id)
    }

    // O conjunto efetivo, já resolvido, que o perfil devolve ao frontend.
    // É daqui que o espelho de exibição do cliente deriva — uma fonte só.
    pub fn effective_permissions(&self) -> Vec<String> {
        if self.is_master_admin() {
            return crate::services::permissions::PERMISSION_CATALOG
                .iter()
                .map(|p| p.code.to_string())
                .collect();
        }
        if self.roles.is_empty() {
            return fallback_permissions(self.user.user_type)
                .iter()
                .map(|c| c.to_string())
                .collect();
        }
        let mut codes: Vec<String> = self.permissions.iter().cloned().collect();
        codes.sort();
        codes
    }
}

// O middleware em si. Extrai o bearer token, valida, carrega o usuário
// com cargos e permissões e o injeta nos "extensions" da requisição.
// Usuário inativo ou apagado falha aqui mesmo com token ainda válido —
// desativação vale imediatamente, sem esperar a expiração.
pub async fn auth_guard(
    State(app_state): State<AppState>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let TypedHeader(Authorization(bearer)) = bearer.ok_or(AppError::MissingToken)?;

    let claims = app_state
        .token_service
        .verify_access(bearer.token())
        .ok_or(AppError::InvalidToken)?;

    let user = admit(app_state.user_repo.find_by_id(claims.sub).await?)?;

    let roles = app_state.user_repo.role_names(user.id).await?;
    let permissions: HashSet<String> = app_state
        .user_repo
        .permission_codes(user.id)
        .await?
        .into_iter()
        .collect();

    request.extensions_mut().insert(CurrentUser {
        user,
        roles,
        permissions,
    });

    Ok(next.run(request).await)
}

// A decisão pós-carga: usuário apagado ou desativado é recusado mesmo com
// um access token ainda não expirado — desativação vale na hora.
fn admit(user: Option<User>) -> Result<User, AppError> {
    user.filter(|u| u.is_active)
        .ok_or(AppError::UserNotFoundOrInactive)
}

// Extrator para obter o usuário autenticado diretamente nos handlers
pub struct AuthenticatedUser(pub CurrentUser);

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .map(AuthenticatedUser)
            .ok_or(AppError::MissingToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::permissions::{EDIT_ROLES, EDIT_USERS, VIEW_BOOKINGS, VIEW_ROOMS};
    use chrono::Utc;

    fn user(user_type: UserType, property_id: Option<Uuid>) -> User {
        User {
            id: Uuid::new_v4(),
            first_name: "Ana".into(),
            last_name: "Souza".into(),
            email: "ana@example.com".into(),
            password_hash: "$2b$12$irrelevant".into(),
            user_type,
            property_id,
            is_active: true,
            refresh_token: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn current(user_type: UserType, roles: &[&str], perms: &[&str]) -> CurrentUser {
        CurrentUser {
            user: user(user_type, None),
            roles: roles.iter().map(|r| r.to_string()).collect(),
            permissions: perms.iter().map(|p| p.to_string()).collect(),
        }
    }

    #[test]
    fn master_admin_passes_any_permission_check() {
        let master = current(UserType::MasterAdmin, &[], &[]);
        assert!(master.has_permission(EDIT_ROLES));
        assert!(master.has_permission("some_future_permission"));
    }

    #[test]
    fn staff_without_roles_uses_the_fallback_set() {
        let staff = current(UserType::Staff, &[], &[]);
        assert!(staff.has_permission(VIEW_ROOMS));
        assert!(staff.has_permission(VIEW_BOOKINGS));
        assert!(!staff.has_permission(EDIT_USERS));
        assert!(!staff.has_permission(EDIT_ROLES));
    }

    #[test]
    fn user_with_roles_uses_the_aggregated_union_not_the_fallback() {
        // Com cargo atribuído, o fallback deixa de valer: só a união conta.
        let staff = current(UserType::Staff, &["Housekeeping"], &[VIEW_ROOMS]);
        assert!(staff.has_permission(VIEW_ROOMS));
        assert!(!staff.has_permission(VIEW_BOOKINGS));
    }

    #[test]
    fn role_check_intersects_names() {
        let staff = current(UserType::Staff, &["Housekeeping", "Front Desk"], &[]);
        assert!(staff.has_any_role(&["Front Desk", "Manager"]));
        assert!(!staff.has_any_role(&["Manager"]));
    }

    #[test]
    fn deactivated_or_deleted_user_is_rejected_even_with_a_live_token() {
        // A verificação do token já passou quando admit() roda; mesmo assim
        // a conta precisa existir e estar ativa.
        assert!(matches!(
            admit(None),
            Err(AppError::UserNotFoundOrInactive)
        ));

        let mut deactivated = user(UserType::Staff, None);
        deactivated.is_active = false;
        assert!(matches!(
            admit(Some(deactivated)),
            Err(AppError::UserNotFoundOrInactive)
        ));

        let active = user(UserType::Staff, None);
        let admitted = admit(Some(active.clone())).unwrap();
        assert_eq!(admitted.id, active.id);
    }

    #[test]
    fn property_scope_denies_other_tenants() {
        let own = Uuid::new_v4();
        let other = Uuid::new_v4();

        let mut admin = current(UserType::PropertyAdmin, &[], &[]);
        admin.user.property_id = Some(own);

        assert!(admin.can_access_property(own));
        assert!(!admin.can_access_property(other));

        let master = current(UserType::MasterAdmin, &[], &[]);
        assert!(master.can_access_property(other));
    }
}
