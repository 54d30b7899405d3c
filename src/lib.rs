// src/lib.rs

pub mod common;
pub mod config;
pub mod db;
pub mod docs;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;

use axum::{
    Json, Router,
    http::StatusCode,
    middleware as axum_middleware,
    response::IntoResponse,
    routing::{delete, get, patch, post, put},
};
use serde_json::json;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::AppState;
use crate::middleware::auth::auth_guard;

// Monta o router completo da aplicação. Fica na lib (e não no main) para
// os testes de integração poderem montar o app inteiro com oneshot().
pub fn app(app_state: AppState) -> Router {
    // Rotas de autenticação públicas
    let auth_public = Router::new()
        .route("/login", post(handlers::auth::login))
        .route("/refresh-token", post(handlers::auth::refresh_token));

    // Rotas de autenticação que exigem access token
    let auth_protected = Router::new()
        .route("/logout", post(handlers::auth::logout))
        .route("/profile", get(handlers::auth::profile))
        .route("/change-password", put(handlers::auth::change_password))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Operação do tenant (quartos, reservas, property, stats)
    let hotel_routes = Router::new()
        .route(
            "/rooms",
            get(handlers::hotel::list_rooms).post(handlers::hotel::create_room),
        )
        .route("/rooms/availability", get(handlers::hotel::room_availability))
        .route(
            "/bookings",
            get(handlers::hotel::list_bookings).post(handlers::hotel::create_booking),
        )
        .route(
            "/bookings/{id}/status",
            patch(handlers::hotel::update_booking_status),
        )
        .route("/property", get(handlers::hotel::get_property))
        .route("/stats", get(handlers::hotel::hotel_stats))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Cargos e permissões
    let rbac_routes = Router::new()
        .route(
            "/roles",
            get(handlers::rbac::list_roles).post(handlers::rbac::create_role),
        )
        .route(
            "/roles/{id}",
            put(handlers::rbac::update_role).delete(handlers::rbac::delete_role),
        )
        .route(
            "/roles/{id}/permissions",
            post(handlers::rbac::assign_permission),
        )
        .route(
            "/roles/{id}/permissions/{permission_id}",
            delete(handlers::rbac::remove_permission),
        )
        .route(
            "/permissions",
            get(handlers::rbac::list_permissions).post(handlers::rbac::create_permission),
        )
        .route(
            "/permissions/{id}",
            delete(handlers::rbac::delete_permission),
        )
        .route("/catalog", get(handlers::rbac::permission_catalog))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Usuários
    let user_routes = Router::new()
        .route(
            "/",
            get(handlers::users::list_users).post(handlers::users::create_user),
        )
        .route("/stats", get(handlers::users::user_stats))
        .route(
            "/{id}",
            get(handlers::users::get_user)
                .put(handlers::users::update_user)
                .delete(handlers::users::delete_user),
        )
        .route("/{id}/status", patch(handlers::users::toggle_user_status))
        .route("/{id}/roles", post(handlers::users::assign_role))
        .route(
            "/{id}/roles/{role_id}",
            delete(handlers::users::remove_role),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Console do master admin
    let property_routes = Router::new()
        .route(
            "/",
            get(handlers::properties::list_properties).post(handlers::properties::create_property),
        )
        .route(
            "/{id}",
            get(handlers::properties::get_property)
                .put(handlers::properties::update_property)
                .delete(handlers::properties::delete_property),
        )
        .route(
            "/{id}/status",
            patch(handlers::properties::toggle_property_status),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let dashboard_routes = Router::new()
        .route("/stats", get(handlers::dashboard::dashboard_stats))
        .route("/properties", get(handlers::dashboard::properties_overview))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/auth", auth_public.merge(auth_protected))
        .nest("/api/hotel", hotel_routes)
        .nest("/api/role-permissions", rbac_routes)
        .nest("/api/users", user_routes)
        .nest("/api/properties", property_routes)
        .nest("/api/dashboard", dashboard_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", docs::ApiDoc::openapi()))
        .fallback(fallback_404)
        .with_state(app_state)
}

// Rotas não mapeadas também respondem com o envelope padrão
async fn fallback_404() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "success": false, "message": "Route not found" })),
    )
}
