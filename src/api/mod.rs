pub mod envelope;
pub mod handlers;
pub mod middleware;
pub mod state;

use std::sync::Arc;

use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::{config::Settings, service::ServiceContext};
use state::AppState;

pub fn create_app(service_context: Arc<ServiceContext>, settings: Arc<Settings>) -> Router {
    let app_state = AppState::new(service_context, settings);

    Router::new()
        // Root and health endpoints
        .route("/", get(handlers::root::root))
        .route("/health", get(handlers::root::health_check))
        // Auth routes
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .nest("/auth", authed_routes(app_state.clone()))
        // Public service catalog
        .route("/services", get(handlers::services::list))
        // Customer booking routes
        .nest("/bookings", booking_routes(app_state.clone()))
        // Admin routes
        .nest("/admin", admin_routes(app_state.clone()))
        // Add state to the router
        .with_state(app_state)
        // Middleware
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

fn authed_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/me", get(handlers::auth::me))
        .route_layer(axum::middleware::from_fn_with_state(
            state,
            middleware::auth::require_auth,
        ))
}

fn booking_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", post(handlers::bookings::create))
        .route("/", get(handlers::bookings::list))
        .route("/:id", get(handlers::bookings::get))
        .route_layer(axum::middleware::from_fn_with_state(
            state,
            middleware::auth::require_auth,
        ))
}

fn admin_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(handlers::admin::dashboard))
        .route("/bookings", get(handlers::admin::list_bookings))
        .route("/bookings", put(handlers::admin::update_booking))
        .route("/workers", get(handlers::workers::list))
        .route("/workers", post(handlers::workers::create))
        .route("/workers", put(handlers::workers::update))
        .route("/workers", delete(handlers::workers::delete))
        .route("/services", post(handlers::services::create))
        .route("/services/:id", patch(handlers::services::update))
        .route("/services/:id", delete(handlers::services::delete))
        .route("/users", get(handlers::users::list))
        .route("/users", put(handlers::users::set_active))
        .layer(axum::middleware::from_fn_with_state(
            state,
            middleware::auth::require_admin,
        ))
}
