// src/models/dashboard.rs

use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// Os cards do console do master admin (visão de todos os tenants)
#[derive(Debug, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_properties: i64,
    pub active_properties: i64,
    pub total_users: i64,
    pub total_rooms: i64,
    pub total_bookings: i64,
    pub total_revenue: Decimal,
}

// Uma linha da visão por property (ocupação)
#[derive(Debug, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PropertyOverview {
    pub property_id: Uuid,
    pub property_name: String,
    pub is_active: bool,
    pub total_rooms: i64,
    pub occupied_rooms: i64,
    pub active_bookings: i64,
}

// Estatísticas de usuários (restrito a MASTER_ADMIN)
#[derive(Debug, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub total_users: i64,
    pub active_users: i64,
    pub master_admins: i64,
    pub property_admins: i64,
    pub staff: i64,
}
