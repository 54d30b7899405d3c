// src/models/rbac.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// O que sai do banco (Tabela roles)
#[derive(Debug, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,

    #[schema(example = "Front Desk Manager")]
    pub name: String,

    #[schema(example = "Full access to rooms and bookings")]
    pub description: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// O que sai do banco (Tabela permissions)
#[derive(Debug, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Permission {
    pub id: Uuid,

    #[schema(example = "view_rooms")]
    pub code: String,

    #[schema(example = "View rooms and availability")]
    pub description: String,

    #[schema(example = "HOTEL")]
    pub module: String,
}

// Cargo + os códigos das permissões vinculadas
#[derive(Debug, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoleWithPermissions {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    #[schema(example = json!(["view_rooms", "edit_rooms"]))]
    pub permissions: Vec<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRolePayload {
    #[validate(length(min = 1, message = "The role name is required."))]
    #[schema(example = "Housekeeping")]
    pub name: String,

    pub description: Option<String>,

    // Códigos das permissões que o cargo nasce tendo
    #[serde(default)]
    #[schema(example = json!(["view_rooms"]))]
    pub permissions: Vec<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRolePayload {
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePermissionPayload {
    #[validate(length(min = 1, message = "The permission code is required."))]
    #[schema(example = "export_reports")]
    pub code: String,
    pub description: String,
    #[schema(example = "HOTEL")]
    pub module: String,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssignPermissionPayload {
    pub permission_id: Uuid,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssignRolePayload {
    pub role_id: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_role_payload_rejects_an_empty_name() {
        let empty = CreateRolePayload {
            name: String::new(),
            description: None,
            permissions: Vec::new(),
        };
        assert!(empty.validate().is_err());

        let named = CreateRolePayload {
            name: "Housekeeping".into(),
            description: None,
            permissions: vec!["view_rooms".into()],
        };
        assert!(named.validate().is_ok());
    }

    #[test]
    fn create_permission_payload_rejects_an_empty_code() {
        let empty = CreatePermissionPayload {
            code: String::new(),
            description: "Export reports".into(),
            module: "HOTEL".into(),
        };
        assert!(empty.validate().is_err());
    }
}
