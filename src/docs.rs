// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};

use crate::handlers;
use crate::models;
use crate::services;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::login,
        handlers::auth::refresh_token,
        handlers::auth::logout,
        handlers::auth::profile,
        handlers::auth::change_password,

        // --- Hotel ---
        handlers::hotel::list_rooms,
        handlers::hotel::create_room,
        handlers::hotel::room_availability,
        handlers::hotel::list_bookings,
        handlers::hotel::create_booking,
        handlers::hotel::update_booking_status,
        handlers::hotel::get_property,
        handlers::hotel::hotel_stats,

        // --- Users ---
        handlers::users::list_users,
        handlers::users::create_user,
        handlers::users::user_stats,

        // --- RBAC ---
        handlers::rbac::list_roles,
        handlers::rbac::create_role,
        handlers::rbac::list_permissions,
        handlers::rbac::permission_catalog,

        // --- Properties ---
        handlers::properties::list_properties,
        handlers::properties::create_property,

        // --- Dashboard ---
        handlers::dashboard::dashboard_stats,
        handlers::dashboard::properties_overview,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::UserType,
            models::auth::User,
            models::auth::LoginClient,
            models::auth::LoginPayload,
            models::auth::RefreshPayload,
            models::auth::ChangePasswordPayload,
            models::auth::TokenPair,
            models::auth::LoginResponse,
            models::auth::ProfileResponse,
            models::auth::CreateUserPayload,
            models::auth::UpdateUserPayload,
            models::auth::ToggleUserStatusPayload,

            // --- RBAC ---
            models::rbac::Role,
            models::rbac::Permission,
            models::rbac::RoleWithPermissions,
            models::rbac::CreateRolePayload,
            models::rbac::UpdateRolePayload,
            models::rbac::CreatePermissionPayload,
            models::rbac::AssignPermissionPayload,
            models::rbac::AssignRolePayload,

            // --- Properties ---
            models::property::PropertyType,
            models::property::Property,
            models::property::CreatePropertyPayload,
            models::property::UpdatePropertyPayload,
            models::property::TogglePropertyStatusPayload,

            // --- Hotel ---
            models::hotel::RoomStatus,
            models::hotel::BookingStatus,
            models::hotel::Room,
            models::hotel::Booking,
            models::hotel::CreateRoomPayload,
            models::hotel::CreateBookingPayload,
            models::hotel::UpdateBookingStatusPayload,
            models::hotel::HotelStats,

            // --- Dashboard ---
            models::dashboard::DashboardStats,
            models::dashboard::PropertyOverview,
            models::dashboard::UserStats,

            // --- Catálogo ---
            services::permissions::PermissionSpec,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticação, tokens e perfil"),
        (name = "Hotel", description = "Operação do tenant: quartos e reservas"),
        (name = "Users", description = "Gestão de usuários"),
        (name = "RBAC", description = "Controle de acesso (cargos e permissões)"),
        (name = "Properties", description = "Gestão de tenants (console master)"),
        (name = "Dashboard", description = "Indicadores globais (console master)")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
