use axum::{
    extract::{Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    api::{envelope::ApiResponse, middleware::auth::CurrentUser, state::AppState},
    domain::{CreateWorkerRequest, UpdateWorkerRequest, Worker, WorkerStatus, WorkerWithBookings},
    error::{AppError, Result},
};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    status: Option<String>,
}

pub async fn list(
    State(state): State<AppState>,
    Extension(_user): Extension<CurrentUser>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ApiResponse<Vec<WorkerWithBookings>>>> {
    let status = match query.status {
        Some(raw) => Some(
            WorkerStatus::parse(&raw)
                .ok_or_else(|| AppError::field_error("status", "Invalid worker status"))?,
        ),
        None => None,
    };

    let workers = state.service_context.worker_service.list(status).await?;

    Ok(ApiResponse::ok("Workers retrieved", workers))
}

pub async fn create(
    State(state): State<AppState>,
    Extension(_user): Extension<CurrentUser>,
    Json(request): Json<CreateWorkerRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Worker>>)> {
    let worker = state.service_context.worker_service.create(request).await?;

    Ok((
        StatusCode::CREATED,
        ApiResponse::ok("Worker created successfully", worker),
    ))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWorkerDto {
    id: String,
    #[serde(flatten)]
    update: UpdateWorkerRequest,
}

pub async fn update(
    State(state): State<AppState>,
    Extension(_user): Extension<CurrentUser>,
    Json(dto): Json<UpdateWorkerDto>,
) -> Result<Json<ApiResponse<Worker>>> {
    let id = parse_worker_id(&dto.id)?;
    let worker = state
        .service_context
        .worker_service
        .update(id, dto.update)
        .await?;

    Ok(ApiResponse::ok("Worker updated", worker))
}

#[derive(Debug, Deserialize)]
pub struct DeleteQuery {
    id: String,
}

pub async fn delete(
    State(state): State<AppState>,
    Extension(_user): Extension<CurrentUser>,
    Query(query): Query<DeleteQuery>,
) -> Result<Json<ApiResponse<()>>> {
    let id = parse_worker_id(&query.id)?;
    state.service_context.worker_service.delete(id).await?;

    Ok(ApiResponse::message_only("Worker deleted"))
}

fn parse_worker_id(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::NotFound("Worker not found".to_string()))
}
