use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::{
    api::state::AppState,
    auth::Claims,
    domain::UserRole,
    error::AppError,
};

/// The verified identity of the caller, injected into request
/// extensions by the auth middleware.
#[derive(Clone)]
pub struct CurrentUser {
    pub id: uuid::Uuid,
    pub email: String,
    pub role: UserRole,
}

impl From<Claims> for CurrentUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.sub,
            email: claims.email,
            role: claims.role,
        }
    }
}

pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let claims = authenticate(&state, &request).ok_or(AppError::Unauthorized)?;

    request.extensions_mut().insert(CurrentUser::from(claims));

    Ok(next.run(request).await)
}

pub async fn require_admin(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let claims = authenticate(&state, &request).ok_or(AppError::Unauthorized)?;

    if claims.role != UserRole::Admin {
        return Err(AppError::Forbidden);
    }

    request.extensions_mut().insert(CurrentUser::from(claims));

    Ok(next.run(request).await)
}

fn authenticate(state: &AppState, request: &Request) -> Option<Claims> {
    let header = request.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let token = header.strip_prefix("Bearer ")?;

    state.service_context.auth_service.verify_token(token)
}
