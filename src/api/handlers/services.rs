use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    api::{envelope::ApiResponse, middleware::auth::CurrentUser, state::AppState},
    domain::{CreateServiceRequest, Service, ServiceType, UpdateServiceRequest},
    error::{AppError, Result},
};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(rename = "type")]
    service_type: Option<String>,
}

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ApiResponse<Vec<Service>>>> {
    let service_type = match query.service_type {
        Some(raw) => Some(
            ServiceType::parse(&raw)
                .ok_or_else(|| AppError::field_error("type", "Unknown service type"))?,
        ),
        None => None,
    };

    let services = state.service_context.catalog_service.list(service_type).await?;

    Ok(ApiResponse::ok("Services retrieved", services))
}

pub async fn create(
    State(state): State<AppState>,
    Extension(_user): Extension<CurrentUser>,
    Json(request): Json<CreateServiceRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Service>>)> {
    let service = state.service_context.catalog_service.create(request).await?;

    Ok((
        StatusCode::CREATED,
        ApiResponse::ok("Service created successfully", service),
    ))
}

pub async fn update(
    State(state): State<AppState>,
    Extension(_user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(request): Json<UpdateServiceRequest>,
) -> Result<Json<ApiResponse<Service>>> {
    let id = parse_service_id(&id)?;
    let service = state.service_context.catalog_service.update(id, request).await?;

    Ok(ApiResponse::ok("Service updated successfully", service))
}

pub async fn delete(
    State(state): State<AppState>,
    Extension(_user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>> {
    let id = parse_service_id(&id)?;
    state.service_context.catalog_service.delete(id).await?;

    Ok(ApiResponse::message_only("Service deleted successfully"))
}

fn parse_service_id(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::NotFound("Service not found".to_string()))
}
