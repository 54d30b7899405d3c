// src/handlers/hotel.rs
//
// Rotas de operação do tenant. PropertyContext resolve qual property a
// requisição enxerga; os extractors RequirePermission barram quem não pode.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{error::AppError, response::ApiResponse},
    config::AppState,
    middleware::{
        rbac::{
            PermEditBookings, PermEditRooms, PermViewBookings, PermViewProperty, PermViewRooms,
            PermViewStats, RequirePermission,
        },
        tenancy::PropertyContext,
    },
    models::hotel::{
        AvailabilityQuery, BookingListQuery, CreateBookingPayload, CreateRoomPayload, RoomStatus,
        UpdateBookingStatusPayload,
    },
};

// GET /api/hotel/rooms
#[utoipa::path(
    get,
    path = "/api/hotel/rooms",
    tag = "Hotel",
    responses((status = 200, description = "Rooms of the caller's property")),
    security(("api_jwt" = []))
)]
pub async fn list_rooms(
    State(app_state): State<AppState>,
    _perm: RequirePermission<PermViewRooms>,
    PropertyContext(property_id): PropertyContext,
) -> Result<impl IntoResponse, AppError> {
    let rooms = app_state.hotel_repo.list_rooms(property_id).await?;

    Ok(Json(ApiResponse::ok(rooms, "Rooms loaded")))
}

// POST /api/hotel/rooms
#[utoipa::path(
    post,
    path = "/api/hotel/rooms",
    tag = "Hotel",
    request_body = CreateRoomPayload,
    responses(
        (status = 201, description = "Room created"),
        (status = 409, description = "Duplicated room number")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_room(
    State(app_state): State<AppState>,
    _perm: RequirePermission<PermEditRooms>,
    PropertyContext(property_id): PropertyContext,
    Json(payload): Json<CreateRoomPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let room = app_state
        .hotel_repo
        .create_room(
            property_id,
            &payload.number,
            &payload.room_type,
            payload.floor,
            payload.price_per_night,
            payload.status.unwrap_or(RoomStatus::Available),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(room, "Room created"))))
}

// GET /api/hotel/rooms/availability
#[utoipa::path(
    get,
    path = "/api/hotel/rooms/availability",
    tag = "Hotel",
    responses((status = 200, description = "Available rooms, optionally for a date range")),
    security(("api_jwt" = []))
)]
pub async fn room_availability(
    State(app_state): State<AppState>,
    _perm: RequirePermission<PermViewRooms>,
    PropertyContext(property_id): PropertyContext,
    Query(query): Query<AvailabilityQuery>,
) -> Result<impl IntoResponse, AppError> {
    let rooms = app_state
        .hotel_repo
        .available_rooms(property_id, query.check_in, query.check_out)
        .await?;

    Ok(Json(ApiResponse::ok(rooms, "Available rooms loaded")))
}

// GET /api/hotel/bookings
#[utoipa::path(
    get,
    path = "/api/hotel/bookings",
    tag = "Hotel",
    responses((status = 200, description = "Bookings of the caller's property")),
    security(("api_jwt" = []))
)]
pub async fn list_bookings(
    State(app_state): State<AppState>,
    _perm: RequirePermission<PermViewBookings>,
    PropertyContext(property_id): PropertyContext,
    Query(query): Query<BookingListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let bookings = app_state
        .hotel_repo
        .list_bookings(property_id, query.status)
        .await?;

    Ok(Json(ApiResponse::ok(bookings, "Bookings loaded")))
}

// POST /api/hotel/bookings
#[utoipa::path(
    post,
    path = "/api/hotel/bookings",
    tag = "Hotel",
    request_body = CreateBookingPayload,
    responses(
        (status = 201, description = "Booking created"),
        (status = 409, description = "Room unavailable for the requested dates")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_booking(
    State(app_state): State<AppState>,
    _perm: RequirePermission<PermEditBookings>,
    PropertyContext(property_id): PropertyContext,
    Json(payload): Json<CreateBookingPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let booking = app_state
        .hotel_service
        .create_booking(property_id, &payload)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(booking, "Booking created")),
    ))
}

// PATCH /api/hotel/bookings/{id}/status
#[utoipa::path(
    patch,
    path = "/api/hotel/bookings/{id}/status",
    tag = "Hotel",
    params(("id" = Uuid, Path, description = "Booking id")),
    request_body = UpdateBookingStatusPayload,
    responses(
        (status = 200, description = "Status updated; room status follows"),
        (status = 409, description = "Booking already in a terminal status")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_booking_status(
    State(app_state): State<AppState>,
    _perm: RequirePermission<PermEditBookings>,
    PropertyContext(property_id): PropertyContext,
    Path(booking_id): Path<Uuid>,
    Json(payload): Json<UpdateBookingStatusPayload>,
) -> Result<impl IntoResponse, AppError> {
    let booking = app_state
        .hotel_service
        .update_booking_status(property_id, booking_id, payload.status)
        .await?;

    Ok(Json(ApiResponse::ok(booking, "Booking status updated")))
}

// GET /api/hotel/property
#[utoipa::path(
    get,
    path = "/api/hotel/property",
    tag = "Hotel",
    responses((status = 200, description = "The caller's property record")),
    security(("api_jwt" = []))
)]
pub async fn get_property(
    State(app_state): State<AppState>,
    _perm: RequirePermission<PermViewProperty>,
    PropertyContext(property_id): PropertyContext,
) -> Result<impl IntoResponse, AppError> {
    let property = app_state
        .property_repo
        .find(property_id)
        .await?
        .ok_or(AppError::NotFound("Property"))?;

    Ok(Json(ApiResponse::ok(property, "Property loaded")))
}

// GET /api/hotel/stats
#[utoipa::path(
    get,
    path = "/api/hotel/stats",
    tag = "Hotel",
    responses((status = 200, description = "Operational statistics of the property", body = crate::models::hotel::HotelStats)),
    security(("api_jwt" = []))
)]
pub async fn hotel_stats(
    State(app_state): State<AppState>,
    _perm: RequirePermission<PermViewStats>,
    PropertyContext(property_id): PropertyContext,
) -> Result<impl IntoResponse, AppError> {
    let stats = app_state.hotel_repo.property_stats(property_id).await?;

    Ok(Json(ApiResponse::ok(stats, "Statistics loaded")))
}
