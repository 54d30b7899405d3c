// src/middleware/tenancy.rs

use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{common::error::AppError, middleware::auth::CurrentUser};

// A property efetiva de uma requisição /hotel/*:
// - STAFF e PROPERTY_ADMIN usam sempre a própria (403 se não tiverem uma);
// - MASTER_ADMIN precisa dizer qual quer ver, via ?property_id=.
#[derive(Debug, Clone, Copy)]
pub struct PropertyContext(pub Uuid);

#[derive(Deserialize)]
struct PropertyQuery {
    property_id: Option<Uuid>,
}

impl<S> FromRequestParts<S> for PropertyContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or(AppError::MissingToken)?;

        if user.is_master_admin() {
            let Query(query) = Query::<PropertyQuery>::try_from_uri(&parts.uri)
                .map_err(|_| AppError::BadRequest("Invalid property_id query parameter".into()))?;

            return query.property_id.map(PropertyContext).ok_or_else(|| {
                AppError::BadRequest(
                    "Master administrators must pass ?property_id= on hotel routes".into(),
                )
            });
        }

        user.user.property_id.map(PropertyContext).ok_or_else(|| {
            AppError::Forbidden("Your account is not assigned to any property".into())
        })
    }
}

// Para ids de property que chegam em corpo ou rota: barra acesso cruzado
// entre tenants (MASTER_ADMIN passa).
pub fn ensure_property_scope(user: &CurrentUser, property_id: Uuid) -> Result<(), AppError> {
    if user.can_access_property(property_id) {
        Ok(())
    } else {
        Err(AppError::Forbidden(
            "You cannot access resources of another property".into(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::auth::{User, UserType};
    use chrono::Utc;
    use std::collections::HashSet;

    fn scoped_user(property_id: Option<Uuid>, user_type: UserType) -> CurrentUser {
        CurrentUser {
            user: User {
                id: Uuid::new_v4(),
                first_name: "Rui".into(),
                last_name: "Melo".into(),
                email: "rui@example.com".into(),
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
    fn scope_allows_own_property_and_denies_others() {
        let own = Uuid::new_v4();
        let other = Uuid::new_v4();
        let user = scoped_user(Some(own), UserType::PropertyAdmin);

        assert!(ensure_property_scope(&user, own).is_ok());
        assert!(matches!(
            ensure_property_scope(&user, other),
            Err(AppError::Forbidden(_))
        ));
    }

    #[test]
    fn master_admin_bypasses_scope() {
        let user = scoped_user(None, UserType::MasterAdmin);
        assert!(ensure_property_scope(&user, Uuid::new_v4()).is_ok());
    }
}
