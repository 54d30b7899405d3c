// src/models/hotel.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "room_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoomStatus {
    Available,
    Occupied,
    Maintenance,
    Reserved,
}

impl RoomStatus {
    // Quartos em manutenção ou ocupados não aceitam novas reservas.
    // AVAILABLE e RESERVED aceitam; a sobreposição de datas é checada à parte.
    pub fn accepts_bookings(self) -> bool {
        matches!(self, RoomStatus::Available | RoomStatus::Reserved)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "booking_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    CheckedIn,
    CheckedOut,
    Cancelled,
}

impl BookingStatus {
    // CANCELLED e CHECKED_OUT encerram o ciclo de vida da reserva.
    pub fn is_terminal(self) -> bool {
        matches!(self, BookingStatus::Cancelled | BookingStatus::CheckedOut)
    }

    // O status do quarto acompanha o status da reserva.
    pub fn room_status(self) -> RoomStatus {
        match self {
            BookingStatus::Pending => RoomStatus::Available,
            BookingStatus::Confirmed => RoomStatus::Reserved,
            BookingStatus::CheckedIn => RoomStatus::Occupied,
            BookingStatus::CheckedOut | BookingStatus::Cancelled => RoomStatus::Available,
        }
    }
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: Uuid,
    pub property_id: Uuid,

    #[schema(example = "204")]
    pub number: String,

    #[schema(example = "Double")]
    pub room_type: String,

    pub floor: Option<i32>,
    pub price_per_night: Decimal,
    pub status: RoomStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: Uuid,
    pub property_id: Uuid,
    pub room_id: Uuid,
    pub guest_name: String,
    pub guest_email: Option<String>,
    pub guest_phone: Option<String>,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub status: BookingStatus,
    pub total_amount: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomPayload {
    #[validate(length(min = 1, message = "The room number is required."))]
    #[schema(example = "204")]
    pub number: String,

    #[validate(length(min = 1, message = "The room type is required."))]
    #[schema(example = "Double")]
    pub room_type: String,

    pub floor: Option<i32>,
    pub price_per_night: Decimal,

    // Quartos nascem AVAILABLE a não ser que o payload diga o contrário
    pub status: Option<RoomStatus>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingPayload {
    pub room_id: Uuid,

    #[validate(length(min = 1, message = "The guest name is required."))]
    pub guest_name: String,

    #[validate(email(message = "The provided e-mail is invalid."))]
    pub guest_email: Option<String>,

    pub guest_phone: Option<String>,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,

    // Quando ausente, calculamos: noites * diária do quarto
    pub total_amount: Option<Decimal>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookingStatusPayload {
    pub status: BookingStatus,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AvailabilityQuery {
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct BookingListQuery {
    pub status: Option<BookingStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn room_status_follows_every_booking_transition() {
        // Inclusive a volta para PENDING, que libera o quarto
        assert_eq!(BookingStatus::Pending.room_status(), RoomStatus::Available);
        assert_eq!(BookingStatus::Confirmed.room_status(), RoomStatus::Reserved);
        assert_eq!(BookingStatus::CheckedIn.room_status(), RoomStatus::Occupied);
        assert_eq!(BookingStatus::CheckedOut.room_status(), RoomStatus::Available);
        assert_eq!(BookingStatus::Cancelled.room_status(), RoomStatus::Available);
    }

    #[test]
    fn only_checked_out_and_cancelled_are_terminal() {
        assert!(BookingStatus::CheckedOut.is_terminal());
        assert!(BookingStatus::Cancelled.is_terminal());
        assert!(!BookingStatus::Pending.is_terminal());
        assert!(!BookingStatus::Confirmed.is_terminal());
        assert!(!BookingStatus::CheckedIn.is_terminal());
    }

    #[test]
    fn maintenance_and_occupied_rooms_do_not_take_bookings() {
        assert!(RoomStatus::Available.accepts_bookings());
        assert!(RoomStatus::Reserved.accepts_bookings());
        assert!(!RoomStatus::Maintenance.accepts_bookings());
        assert!(!RoomStatus::Occupied.accepts_bookings());
    }
}

// Cards de estatísticas da tela de operação do hotel
#[derive(Debug, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HotelStats {
    pub total_rooms: i64,
    pub available_rooms: i64,
    pub occupied_rooms: i64,
    pub reserved_rooms: i64,
    pub maintenance_rooms: i64,
    pub active_bookings: i64,
    pub arrivals_today: i64,
    pub departures_today: i64,
    pub revenue_this_month: Decimal,
}
