// src/db/dashboard_repo.rs

use sqlx::PgPool;

use crate::{
    common::error::AppError,
    models::dashboard::{DashboardStats, PropertyOverview},
};

// Agregados globais do console do master admin.
#[derive(Clone)]
pub struct DashboardRepository {
    pool: PgPool,
}

impl DashboardRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn stats(&self) -> Result<DashboardStats, AppError> {
        let stats = sqlx::query_as::<_, DashboardStats>(
            "SELECT \
                (SELECT COUNT(*) FROM properties) AS total_properties, \
                (SELECT COUNT(*) FROM properties WHERE is_active) AS active_properties, \
                (SELECT COUNT(*) FROM users) AS total_users, \
                (SELECT COUNT(*) FROM rooms) AS total_rooms, \
                (SELECT COUNT(*) FROM bookings) AS total_bookings, \
                (SELECT COALESCE(SUM(total_amount), 0) FROM bookings \
                    WHERE status <> 'CANCELLED') AS total_revenue",
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(stats)
    }

    pub async fn properties_overview(&self) -> Result<Vec<PropertyOverview>, AppError> {
        let overview = sqlx::query_as::<_, PropertyOverview>(
            "SELECT p.id AS property_id, p.name AS property_name, p.is_active, \
                COUNT(r.id) AS total_rooms, \
                COUNT(r.id) FILTER (WHERE r.status = 'OCCUPIED') AS occupied_rooms, \
                (SELECT COUNT(*) FROM bookings b WHERE b.property_id = p.id \
                    AND b.status IN ('PENDING', 'CONFIRMED', 'CHECKED_IN')) AS active_bookings \
             FROM properties p \
             LEFT JOIN rooms r ON r.property_id = p.id \
             GROUP BY p.id \
             ORDER BY p.name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(overview)
    }
}
