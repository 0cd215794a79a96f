use axum::{extract::State, Extension, Json};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    api::{envelope::ApiResponse, middleware::auth::CurrentUser, state::AppState},
    domain::{CustomerAccount, UserProfile},
    error::{AppError, Result},
};

pub async fn list(
    State(state): State<AppState>,
    Extension(_user): Extension<CurrentUser>,
) -> Result<Json<ApiResponse<Vec<CustomerAccount>>>> {
    let users = state.service_context.user_repo.list_customers().await?;

    Ok(ApiResponse::ok("Users retrieved", users))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetActiveDto {
    id: String,
    is_active: bool,
}

pub async fn set_active(
    State(state): State<AppState>,
    Extension(_user): Extension<CurrentUser>,
    Json(dto): Json<SetActiveDto>,
) -> Result<Json<ApiResponse<UserProfile>>> {
    let id = Uuid::parse_str(&dto.id)
        .map_err(|_| AppError::NotFound("User not found".to_string()))?;

    let user = state
        .service_context
        .user_repo
        .set_active(id, dto.is_active)
        .await?;

    let message = if dto.is_active {
        "User activated"
    } else {
        "User deactivated"
    };

    Ok(ApiResponse::ok(message, UserProfile::from(user)))
}
