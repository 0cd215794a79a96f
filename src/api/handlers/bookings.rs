use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    api::{envelope::ApiResponse, middleware::auth::CurrentUser, state::AppState},
    domain::{BookingDetail, CreateBookingRequest},
    error::{AppError, Result},
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingDto {
    service_id: String,
    date: String,
    time: String,
    duration: i64,
    guest_count: Option<i64>,
    address: String,
    notes: Option<String>,
}

pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(dto): Json<CreateBookingDto>,
) -> Result<(StatusCode, Json<ApiResponse<BookingDetail>>)> {
    let service_id = Uuid::parse_str(&dto.service_id)
        .map_err(|_| AppError::NotFound("Service not found".to_string()))?;

    let request = CreateBookingRequest {
        service_id,
        date: dto.date,
        time: dto.time,
        duration_hours: dto.duration,
        guest_count: dto.guest_count,
        address: dto.address,
        notes: dto.notes,
    };

    let booking = state
        .service_context
        .booking_service
        .create_booking(user.id, request)
        .await?;

    Ok((
        StatusCode::CREATED,
        ApiResponse::ok("Booking created successfully", booking),
    ))
}

pub async fn list(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<ApiResponse<Vec<BookingDetail>>>> {
    let bookings = state
        .service_context
        .booking_service
        .list_for_user(user.id)
        .await?;

    Ok(ApiResponse::ok("Bookings retrieved", bookings))
}

pub async fn get(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<BookingDetail>>> {
    let id = Uuid::parse_str(&id)
        .map_err(|_| AppError::NotFound("Booking not found".to_string()))?;

    let booking = state
        .service_context
        .booking_service
        .get_for_user(id, user.id)
        .await?;

    Ok(ApiResponse::ok("Booking retrieved", booking))
}
