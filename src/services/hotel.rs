// src/services/hotel.rs

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::HotelRepository,
    models::hotel::{Booking, BookingStatus, CreateBookingPayload},
};

#[derive(Clone)]
pub struct HotelService {
    repo: HotelRepository,
    pool: PgPool,
}

impl HotelService {
    pub fn new(repo: HotelRepository, pool: PgPool) -> Self {
        Self { repo, pool }
    }

    // Cria uma reserva para um quarto da property do solicitante.
    // Valida o período, checa sobreposição e calcula o total quando o
    // payload não informa (noites * diária).
    pub async fn create_booking(
        &self,
        property_id: Uuid,
        payload: &CreateBookingPayload,
    ) -> Result<Booking, AppError> {
        if payload.check_out <= payload.check_in {
            return Err(AppError::BadRequest(
                "The check-out date must be after the check-in date".into(),
            ));
        }

        let room = self
            .repo
            .find_room(property_id, payload.room_id)
            .await?
            .ok_or(AppError::NotFound("Room"))?;

        // Mesma regra do endpoint de disponibilidade: manutenção e ocupado
        // não aceitam reserva, independente das datas.
        if !room.status.accepts_bookings() {
            return Err(AppError::Conflict(
                "The room cannot take bookings in its current status".into(),
            ));
        }

        let overlapping = self
            .repo
            .has_overlapping_booking(room.id, payload.check_in, payload.check_out)
            .await?;
        if overlapping {
            return Err(AppError::Conflict(
                "The room is not available for the requested dates".into(),
            ));
        }

        let nights = (payload.check_out - payload.check_in).num_days();
        let total_amount = payload
            .total_amount
            .unwrap_or_else(|| room.price_per_night * Decimal::from(nights));

        let booking = self
            .repo
            .insert_booking(
                &self.pool,
                property_id,
                room.id,
                &payload.guest_name,
                payload.guest_email.as_deref(),
                payload.guest_phone.as_deref(),
                payload.check_in,
                payload.check_out,
                total_amount,
            )
            .await?;

        Ok(booking)
    }

    // Transiciona o status da reserva e ajusta o quarto junto, na mesma
    // transação (PENDING -> AVAILABLE, CONFIRMED -> RESERVED,
    // CHECKED_IN -> OCCUPIED, CHECKED_OUT/CANCELLED -> AVAILABLE).
    pub async fn update_booking_status(
        &self,
        property_id: Uuid,
        booking_id: Uuid,
        new_status: BookingStatus,
    ) -> Result<Booking, AppError> {
        let booking = self
            .repo
            .find_booking(property_id, booking_id)
            .await?
            .ok_or(AppError::NotFound("Booking"))?;

        if booking.status.is_terminal() {
            return Err(AppError::Conflict(format!(
                "A booking in status {:?} can no longer change",
                booking.status
            )));
        }

        let mut tx = self.pool.begin().await?;

        let updated = self
            .repo
            .update_booking_status(&mut *tx, booking.id, new_status)
            .await?;

        self.repo
            .set_room_status(&mut *tx, booking.room_id, new_status.room_status())
            .await?;

        tx.commit().await?;

        Ok(updated)
    }
}
