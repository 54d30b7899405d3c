// src/services/rbac.rs

use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::RbacRepository,
    models::rbac::{CreateRolePayload, RoleWithPermissions},
};

#[derive(Clone)]
pub struct RbacService {
    repo: RbacRepository,
    pool: PgPool,
}

impl RbacService {
    pub fn new(repo: RbacRepository, pool: PgPool) -> Self {
        Self { repo, pool }
    }

    // Cria o cargo e vincula as permissões iniciais na mesma transação.
    // Códigos desconhecidos no payload são ignorados em silêncio: o que
    // vale é o catálogo do banco.
    pub async fn create_role_with_permissions(
        &self,
        payload: &CreateRolePayload,
    ) -> Result<RoleWithPermissions, AppError> {
        let mut tx = self.pool.begin().await?;

        let role = self
            .repo
            .create_role(&mut *tx, &payload.name, payload.description.as_deref())
            .await?;

        let permissions = self
            .repo
            .find_permissions_by_codes(&mut *tx, &payload.permissions)
            .await?;

        for permission in &permissions {
            self.repo
                .assign_permission(&mut *tx, role.id, permission.id)
                .await?;
        }

        tx.commit().await?;

        let mut codes: Vec<String> = permissions.into_iter().map(|p| p.code).collect();
        codes.sort();

        Ok(RoleWithPermissions {
            id: role.id,
            name: role.name,
            description: role.description,
            created_at: role.created_at,
            updated_at: role.updated_at,
            permissions: codes,
        })
    }
}
