// src/db/property_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::property::{CreatePropertyPayload, Property, UpdatePropertyPayload},
};

const PROPERTY_COLUMNS: &str =
    "id, name, property_type, address, city, phone, email, is_active, created_at, updated_at";

#[derive(Clone)]
pub struct PropertyRepository {
    pool: PgPool,
}

impl PropertyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, payload: &CreatePropertyPayload) -> Result<Property, AppError> {
        let property = sqlx::query_as::<_, Property>(&format!(
            "INSERT INTO properties (name, property_type, address, city, phone, email) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {PROPERTY_COLUMNS}"
        ))
        .bind(&payload.name)
        .bind(payload.property_type)
        .bind(payload.address.as_deref())
        .bind(payload.city.as_deref())
        .bind(payload.phone.as_deref())
        .bind(payload.email.as_deref())
        .fetch_one(&self.pool)
        .await?;

        Ok(property)
    }

    pub async fn list(&self) -> Result<Vec<Property>, AppError> {
        let properties = sqlx::query_as::<_, Property>(&format!(
            "SELECT {PROPERTY_COLUMNS} FROM properties ORDER BY name"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(properties)
    }

    pub async fn find(&self, id: Uuid) -> Result<Option<Property>, AppError> {
        let property = sqlx::query_as::<_, Property>(&format!(
            "SELECT {PROPERTY_COLUMNS} FROM properties WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(property)
    }

    pub async fn update(
        &self,
        id: Uuid,
        payload: &UpdatePropertyPayload,
    ) -> Result<Option<Property>, AppError> {
        let property = sqlx::query_as::<_, Property>(&format!(
            "UPDATE properties SET \
                name = COALESCE($2, name), \
                property_type = COALESCE($3, property_type), \
                address = COALESCE($4, address), \
                city = COALESCE($5, city), \
                phone = COALESCE($6, phone), \
                email = COALESCE($7, email), \
                updated_at = now() \
             WHERE id = $1 RETURNING {PROPERTY_COLUMNS}"
        ))
        .bind(id)
        .bind(payload.name.as_deref())
        .bind(payload.property_type)
        .bind(payload.address.as_deref())
        .bind(payload.city.as_deref())
        .bind(payload.phone.as_deref())
        .bind(payload.email.as_deref())
        .fetch_optional(&self.pool)
        .await?;

        Ok(property)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM properties WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn set_active(
        &self,
        id: Uuid,
        is_active: bool,
    ) -> Result<Option<Property>, AppError> {
        let property = sqlx::query_as::<_, Property>(&format!(
            "UPDATE properties SET is_active = $2, updated_at = now() \
             WHERE id = $1 RETURNING {PROPERTY_COLUMNS}"
        ))
        .bind(id)
        .bind(is_active)
        .fetch_optional(&self.pool)
        .await?;

        Ok(property)
    }
}
