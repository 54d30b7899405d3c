// src/db/hotel_repo.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::hotel::{Booking, BookingStatus, HotelStats, Room, RoomStatus},
};

const ROOM_COLUMNS: &str =
    "id, property_id, number, room_type, floor, price_per_night, status, created_at, updated_at";
const BOOKING_COLUMNS: &str = "id, property_id, room_id, guest_name, guest_email, guest_phone, \
                               check_in, check_out, status, total_amount, created_at, updated_at";

// Quartos e reservas. Toda query recebe o property_id resolvido pelo
// middleware de escopo — nada aqui enxerga dados de outro tenant.
#[derive(Clone)]
pub struct HotelRepository {
    pool: PgPool,
}

impl HotelRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // --- Quartos ---

    pub async fn list_rooms(&self, property_id: Uuid) -> Result<Vec<Room>, AppError> {
        let rooms = sqlx::query_as::<_, Room>(&format!(
            "SELECT {ROOM_COLUMNS} FROM rooms WHERE property_id = $1 ORDER BY number"
        ))
        .bind(property_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rooms)
    }

    pub async fn find_room(
        &self,
        property_id: Uuid,
        room_id: Uuid,
    ) -> Result<Option<Room>, AppError> {
        let room = sqlx::query_as::<_, Room>(&format!(
            "SELECT {ROOM_COLUMNS} FROM rooms WHERE property_id = $1 AND id = $2"
        ))
        .bind(property_id)
        .bind(room_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(room)
    }

    pub async fn create_room(
        &self,
        property_id: Uuid,
        number: &str,
        room_type: &str,
        floor: Option<i32>,
        price_per_night: Decimal,
        status: RoomStatus,
    ) -> Result<Room, AppError> {
        let room = sqlx::query_as::<_, Room>(&format!(
            "INSERT INTO rooms (property_id, number, room_type, floor, price_per_night, status) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {ROOM_COLUMNS}"
        ))
        .bind(property_id)
        .bind(number)
        .bind(room_type)
        .bind(floor)
        .bind(price_per_night)
        .bind(status)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::Conflict(
                        "A room with this number already exists in this property".into(),
                    );
                }
            }
            e.into()
        })?;

        Ok(room)
    }

    // Disponíveis = status AVAILABLE e, se o período foi informado, sem
    // nenhuma reserva ativa que se sobreponha a ele.
    pub async fn available_rooms(
        &self,
        property_id: Uuid,
        check_in: Option<NaiveDate>,
        check_out: Option<NaiveDate>,
    ) -> Result<Vec<Room>, AppError> {
        let rooms = sqlx::query_as::<_, Room>(&format!(
            "SELECT {ROOM_COLUMNS} FROM rooms r \
             WHERE r.property_id = $1 \
               AND r.status = 'AVAILABLE' \
               AND ($2::date IS NULL OR $3::date IS NULL OR NOT EXISTS ( \
                    SELECT 1 FROM bookings b \
                    WHERE b.room_id = r.id \
                      AND b.status IN ('PENDING', 'CONFIRMED', 'CHECKED_IN') \
                      AND b.check_in < $3 \
                      AND b.check_out > $2)) \
             ORDER BY r.number"
        ))
        .bind(property_id)
        .bind(check_in)
        .bind(check_out)
        .fetch_all(&self.pool)
        .await?;

        Ok(rooms)
    }

    pub async fn set_room_status<'e, E>(
        &self,
        executor: E,
        room_id: Uuid,
        status: RoomStatus,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("UPDATE rooms SET status = $2, updated_at = now() WHERE id = $1")
            .bind(room_id)
            .bind(status)
            .execute(executor)
            .await?;

        Ok(())
    }

    // --- Reservas ---

    pub async fn list_bookings(
        &self,
        property_id: Uuid,
        status: Option<BookingStatus>,
    ) -> Result<Vec<Booking>, AppError> {
        let bookings = sqlx::query_as::<_, Booking>(&format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings \
             WHERE property_id = $1 AND ($2::booking_status IS NULL OR status = $2) \
             ORDER BY check_in DESC"
        ))
        .bind(property_id)
        .bind(status)
        .fetch_all(&self.pool)
        .await?;

        Ok(bookings)
    }

    pub async fn find_booking(
        &self,
        property_id: Uuid,
        booking_id: Uuid,
    ) -> Result<Option<Booking>, AppError> {
        let booking = sqlx::query_as::<_, Booking>(&format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings WHERE property_id = $1 AND id = $2"
        ))
        .bind(property_id)
        .bind(booking_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(booking)
    }

    pub async fn has_overlapping_booking(
        &self,
        room_id: Uuid,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS ( \
                SELECT 1 FROM bookings \
                WHERE room_id = $1 \
                  AND status IN ('PENDING', 'CONFIRMED', 'CHECKED_IN') \
                  AND check_in < $3 \
                  AND check_out > $2)",
        )
        .bind(room_id)
        .bind(check_in)
        .bind(check_out)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn insert_booking<'e, E>(
        &self,
        executor: E,
        property_id: Uuid,
        room_id: Uuid,
        guest_name: &str,
        guest_email: Option<&str>,
        guest_phone: Option<&str>,
        check_in: NaiveDate,
        check_out: NaiveDate,
        total_amount: Decimal,
    ) -> Result<Booking, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let booking = sqlx::query_as::<_, Booking>(&format!(
            "INSERT INTO bookings (property_id, room_id, guest_name, guest_email, guest_phone, \
                                   check_in, check_out, total_amount) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING {BOOKING_COLUMNS}"
        ))
        .bind(property_id)
        .bind(room_id)
        .bind(guest_name)
        .bind(guest_email)
        .bind(guest_phone)
        .bind(check_in)
        .bind(check_out)
        .bind(total_amount)
        .fetch_one(executor)
        .await?;

        Ok(booking)
    }

    pub async fn update_booking_status<'e, E>(
        &self,
        executor: E,
        booking_id: Uuid,
        status: BookingStatus,
    ) -> Result<Booking, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let booking = sqlx::query_as::<_, Booking>(&format!(
            "UPDATE bookings SET status = $2, updated_at = now() \
             WHERE id = $1 RETURNING {BOOKING_COLUMNS}"
        ))
        .bind(booking_id)
        .bind(status)
        .fetch_one(executor)
        .await?;

        Ok(booking)
    }

    // --- Estatísticas da property ---

    pub async fn property_stats(&self, property_id: Uuid) -> Result<HotelStats, AppError> {
        let stats = sqlx::query_as::<_, HotelStats>(
            "SELECT \
                (SELECT COUNT(*) FROM rooms WHERE property_id = $1) AS total_rooms, \
                (SELECT COUNT(*) FROM rooms WHERE property_id = $1 AND status = 'AVAILABLE') AS available_rooms, \
                (SELECT COUNT(*) FROM rooms WHERE property_id = $1 AND status = 'OCCUPIED') AS occupied_rooms, \
                (SELECT COUNT(*) FROM rooms WHERE property_id = $1 AND status = 'RESERVED') AS reserved_rooms, \
                (SELECT COUNT(*) FROM rooms WHERE property_id = $1 AND status = 'MAINTENANCE') AS maintenance_rooms, \
                (SELECT COUNT(*) FROM bookings WHERE property_id = $1 \
                    AND status IN ('PENDING', 'CONFIRMED', 'CHECKED_IN')) AS active_bookings, \
                (SELECT COUNT(*) FROM bookings WHERE property_id = $1 \
                    AND check_in = CURRENT_DATE AND status IN ('PENDING', 'CONFIRMED')) AS arrivals_today, \
                (SELECT COUNT(*) FROM bookings WHERE property_id = $1 \
                    AND check_out = CURRENT_DATE AND status = 'CHECKED_IN') AS departures_today, \
                (SELECT COALESCE(SUM(total_amount), 0) FROM bookings WHERE property_id = $1 \
                    AND status <> 'CANCELLED' \
                    AND date_trunc('month', created_at) = date_trunc('month', now())) AS revenue_this_month",
        )
        .bind(property_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(stats)
    }
}
