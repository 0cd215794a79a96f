use axum::{extract::State, http::StatusCode, Extension, Json};

use crate::{
    api::{envelope::ApiResponse, middleware::auth::CurrentUser, state::AppState},
    domain::{LoginRequest, RegisterRequest, UserProfile},
    error::Result,
    service::AuthenticatedUser,
};

pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AuthenticatedUser>>)> {
    let authenticated = state.service_context.user_service.register(request).await?;

    Ok((
        StatusCode::CREATED,
        ApiResponse::ok("User registered successfully", authenticated),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<ApiResponse<AuthenticatedUser>>> {
    let authenticated = state.service_context.user_service.login(request).await?;

    Ok(ApiResponse::ok("Login successful", authenticated))
}

pub async fn me(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<ApiResponse<UserProfile>>> {
    let profile = state.service_context.user_service.get_profile(user.id).await?;

    Ok(ApiResponse::ok("User retrieved", profile))
}
