// src/services/permissions.rs
//
// A tabela declarativa de permissões. É a única fonte da verdade:
// a migration de seed espelha PERMISSION_CATALOG, o fallback por tipo de
// usuário sai de fallback_permissions(), e o endpoint /role-permissions/catalog
// entrega as duas coisas para o frontend montar o espelho de exibição
// (que é só cosmético — a checagem que vale é a do servidor).

use serde::Serialize;
use utoipa::ToSchema;

use crate::models::auth::UserType;

pub const VIEW_ROOMS: &str = "view_rooms";
pub const EDIT_ROOMS: &str = "edit_rooms";
pub const VIEW_BOOKINGS: &str = "view_bookings";
pub const EDIT_BOOKINGS: &str = "edit_bookings";
pub const VIEW_PROPERTY: &str = "view_property";
pub const VIEW_STATS: &str = "view_stats";
pub const VIEW_USERS: &str = "view_users";
pub const EDIT_USERS: &str = "edit_users";
pub const VIEW_ROLES: &str = "view_roles";
pub const EDIT_ROLES: &str = "edit_roles";

#[derive(Debug, Clone, Copy, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PermissionSpec {
    pub code: &'static str,
    pub description: &'static str,
    pub module: &'static str,
}

pub const PERMISSION_CATALOG: &[PermissionSpec] = &[
    PermissionSpec { code: VIEW_ROOMS, description: "View rooms and availability", module: "HOTEL" },
    PermissionSpec { code: EDIT_ROOMS, description: "Create and update rooms", module: "HOTEL" },
    PermissionSpec { code: VIEW_BOOKINGS, description: "View bookings", module: "HOTEL" },
    PermissionSpec { code: EDIT_BOOKINGS, description: "Create bookings and change status", module: "HOTEL" },
    PermissionSpec { code: VIEW_PROPERTY, description: "View the property record", module: "HOTEL" },
    PermissionSpec { code: VIEW_STATS, description: "View property statistics", module: "HOTEL" },
    PermissionSpec { code: VIEW_USERS, description: "View users", module: "USERS" },
    PermissionSpec { code: EDIT_USERS, description: "Create, update and deactivate users", module: "USERS" },
    PermissionSpec { code: VIEW_ROLES, description: "View roles and permissions", module: "RBAC" },
    PermissionSpec { code: EDIT_ROLES, description: "Manage roles and their permissions", module: "RBAC" },
];

// O conjunto que vale quando o usuário não tem nenhum cargo atribuído.
// MASTER_ADMIN nem consulta isso: ele passa direto em qualquer checagem.
pub fn fallback_permissions(user_type: UserType) -> &'static [&'static str] {
    match user_type {
        UserType::MasterAdmin => &[],
        UserType::PropertyAdmin => &[
            VIEW_ROOMS,
            EDIT_ROOMS,
            VIEW_BOOKINGS,
            EDIT_BOOKINGS,
            VIEW_PROPERTY,
            VIEW_STATS,
            VIEW_USERS,
            EDIT_USERS,
            VIEW_ROLES,
            EDIT_ROLES,
        ],
        UserType::Staff => &[VIEW_ROOMS, VIEW_BOOKINGS, EDIT_BOOKINGS, VIEW_PROPERTY],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn catalog_codes_are_unique() {
        let codes: HashSet<_> = PERMISSION_CATALOG.iter().map(|p| p.code).collect();
        assert_eq!(codes.len(), PERMISSION_CATALOG.len());
    }

    #[test]
    fn fallback_sets_only_contain_catalog_codes() {
        let codes: HashSet<_> = PERMISSION_CATALOG.iter().map(|p| p.code).collect();
        for user_type in [UserType::PropertyAdmin, UserType::Staff] {
            for code in fallback_permissions(user_type) {
                assert!(codes.contains(code), "unknown fallback code {code}");
            }
        }
    }

    #[test]
    fn staff_fallback_is_read_mostly() {
        let staff = fallback_permissions(UserType::Staff);
        assert!(staff.contains(&VIEW_ROOMS));
        assert!(!staff.contains(&EDIT_USERS));
        assert!(!staff.contains(&EDIT_ROLES));
    }
}
