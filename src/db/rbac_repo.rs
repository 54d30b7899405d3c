// src/db/rbac_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::rbac::{Permission, Role, RoleWithPermissions, UpdateRolePayload},
};

const ROLE_COLUMNS: &str = "id, name, description, created_at, updated_at";
const PERMISSION_COLUMNS: &str = "id, code, description, module";

#[derive(Clone)]
pub struct RbacRepository {
    pool: PgPool,
}

impl RbacRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // --- Cargos ---

    // Aceita um executor para poder participar de uma transação
    pub async fn create_role<'e, E>(
        &self,
        executor: E,
        name: &str,
        description: Option<&str>,
    ) -> Result<Role, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let role = sqlx::query_as::<_, Role>(&format!(
            "INSERT INTO roles (name, description) VALUES ($1, $2) RETURNING {ROLE_COLUMNS}"
        ))
        .bind(name)
        .bind(description)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::Conflict("A role with this name already exists".into());
                }
            }
            e.into()
        })?;

        Ok(role)
    }

    pub async fn find_role(&self, id: Uuid) -> Result<Option<Role>, AppError> {
        let role = sqlx::query_as::<_, Role>(&format!(
            "SELECT {ROLE_COLUMNS} FROM roles WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(role)
    }

    // Cada cargo já sai com os códigos das permissões agregados
    pub async fn list_roles(&self) -> Result<Vec<RoleWithPermissions>, AppError> {
        let roles = sqlx::query_as::<_, RoleWithPermissions>(
            "SELECT r.id, r.name, r.description, r.created_at, r.updated_at, \
                COALESCE(array_agg(p.code ORDER BY p.code) \
                    FILTER (WHERE p.code IS NOT NULL), '{}') AS permissions \
             FROM roles r \
             LEFT JOIN role_permissions rp ON rp.role_id = r.id \
             LEFT JOIN permissions p ON p.id = rp.permission_id \
             GROUP BY r.id \
             ORDER BY r.name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(roles)
    }

    pub async fn update_role(
        &self,
        id: Uuid,
        payload: &UpdateRolePayload,
    ) -> Result<Option<Role>, AppError> {
        let role = sqlx::query_as::<_, Role>(&format!(
            "UPDATE roles SET \
                name = COALESCE($2, name), \
                description = COALESCE($3, description), \
                updated_at = now() \
             WHERE id = $1 RETURNING {ROLE_COLUMNS}"
        ))
        .bind(id)
        .bind(payload.name.as_deref())
        .bind(payload.description.as_deref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::Conflict("A role with this name already exists".into());
                }
            }
            e.into()
        })?;

        Ok(role)
    }

    pub async fn delete_role(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM roles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    // --- Permissões ---

    pub async fn list_permissions(&self) -> Result<Vec<Permission>, AppError> {
        let permissions = sqlx::query_as::<_, Permission>(&format!(
            "SELECT {PERMISSION_COLUMNS} FROM permissions ORDER BY module, code"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(permissions)
    }

    pub async fn create_permission(
        &self,
        code: &str,
        description: &str,
        module: &str,
    ) -> Result<Permission, AppError> {
        let permission = sqlx::query_as::<_, Permission>(&format!(
            "INSERT INTO permissions (code, description, module) \
             VALUES ($1, $2, $3) RETURNING {PERMISSION_COLUMNS}"
        ))
        .bind(code)
        .bind(description)
        .bind(module)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::Conflict("A permission with this code already exists".into());
                }
            }
            e.into()
        })?;

        Ok(permission)
    }

    pub async fn delete_permission(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM permissions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn find_permissions_by_codes<'e, E>(
        &self,
        executor: E,
        codes: &[String],
    ) -> Result<Vec<Permission>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let permissions = sqlx::query_as::<_, Permission>(&format!(
            "SELECT {PERMISSION_COLUMNS} FROM permissions WHERE code = ANY($1)"
        ))
        .bind(codes)
        .fetch_all(executor)
        .await?;

        Ok(permissions)
    }

    // --- Vínculos (sempre idempotentes: ON CONFLICT DO NOTHING) ---

    pub async fn assign_permission<'e, E>(
        &self,
        executor: E,
        role_id: Uuid,
        permission_id: Uuid,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            "INSERT INTO role_permissions (role_id, permission_id) \
             VALUES ($1, $2) ON CONFLICT DO NOTHING",
        )
        .bind(role_id)
        .bind(permission_id)
        .execute(executor)
        .await?;

        Ok(())
    }

    pub async fn remove_permission(
        &self,
        role_id: Uuid,
        permission_id: Uuid,
    ) -> Result<(), AppError> {
        sqlx::query("DELETE FROM role_permissions WHERE role_id = $1 AND permission_id = $2")
            .bind(role_id)
            .bind(permission_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn assign_role(&self, user_id: Uuid, role_id: Uuid) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO user_roles (user_id, role_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
        )
        .bind(user_id)
        .bind(role_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn remove_role(&self, user_id: Uuid, role_id: Uuid) -> Result<(), AppError> {
        sqlx::query("DELETE FROM user_roles WHERE user_id = $1 AND role_id = $2")
            .bind(user_id)
            .bind(role_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn role_permission_codes(&self, role_id: Uuid) -> Result<Vec<String>, AppError> {
        let codes = sqlx::query_scalar::<_, String>(
            "SELECT p.code FROM role_permissions rp \
             JOIN permissions p ON p.id = rp.permission_id \
             WHERE rp.role_id = $1 \
             ORDER BY p.code",
        )
        .bind(role_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(codes)
    }
}
