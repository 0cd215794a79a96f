use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::{Deserialize, Deserializer};
use uuid::Uuid;

use crate::{
    api::{envelope::ApiResponse, middleware::auth::CurrentUser, state::AppState},
    domain::{BookingDetail, BookingStatus, UpdateBookingRequest},
    error::{AppError, Result},
    service::DashboardStats,
};

#[derive(Debug, Deserialize)]
pub struct ListBookingsQuery {
    status: Option<String>,
}

pub async fn list_bookings(
    State(state): State<AppState>,
    Extension(_user): Extension<CurrentUser>,
    Query(query): Query<ListBookingsQuery>,
) -> Result<Json<ApiResponse<Vec<BookingDetail>>>> {
    let status = match query.status {
        Some(raw) => Some(
            BookingStatus::parse(&raw)
                .ok_or_else(|| AppError::field_error("status", "Invalid booking status"))?,
        ),
        None => None,
    };

    let bookings = state.service_context.booking_service.list_all(status).await?;

    Ok(ApiResponse::ok("Bookings retrieved", bookings))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookingDto {
    id: String,
    status: Option<String>,
    /// Absent means "leave assignment untouched", an explicit null
    /// means "unassign".
    #[serde(default, deserialize_with = "explicit_null")]
    worker_id: Option<Option<String>>,
}

fn explicit_null<'de, D>(deserializer: D) -> std::result::Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

pub async fn update_booking(
    State(state): State<AppState>,
    Extension(_user): Extension<CurrentUser>,
    Json(dto): Json<UpdateBookingDto>,
) -> Result<Json<ApiResponse<BookingDetail>>> {
    let id = Uuid::parse_str(&dto.id)
        .map_err(|_| AppError::NotFound("Booking not found".to_string()))?;

    let status = match dto.status {
        Some(raw) => Some(
            BookingStatus::parse(&raw)
                .ok_or_else(|| AppError::field_error("status", "Invalid booking status"))?,
        ),
        None => None,
    };

    let worker_id = match dto.worker_id {
        Some(Some(raw)) => Some(Some(
            Uuid::parse_str(&raw)
                .map_err(|_| AppError::field_error("workerId", "Invalid worker id"))?,
        )),
        Some(None) => Some(None),
        None => None,
    };

    let booking = state
        .service_context
        .booking_service
        .update_booking(id, UpdateBookingRequest { status, worker_id })
        .await?;

    Ok(ApiResponse::ok("Booking updated", booking))
}

pub async fn dashboard(
    State(state): State<AppState>,
    Extension(_user): Extension<CurrentUser>,
) -> Result<Json<ApiResponse<DashboardStats>>> {
    let stats = state.service_context.dashboard_service.stats().await?;

    Ok(ApiResponse::ok("Dashboard data retrieved", stats))
}
