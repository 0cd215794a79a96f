use std::sync::Arc;

use sqlx::sqlite::SqlitePoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tasknest::{
    api,
    auth::AuthService,
    config::Settings,
    repository::{
        SqliteBookingRepository, SqlitePaymentRepository, SqliteServiceRepository,
        SqliteUserRepository, SqliteWorkerRepository,
    },
    service::ServiceContext,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tasknest=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let settings = Settings::new().unwrap_or_else(|e| {
        tracing::warn!("Failed to load config: {}. Using defaults.", e);
        Settings::default()
    });

    tracing::info!(
        "Starting TaskNest server on {}:{}",
        settings.server.host,
        settings.server.port
    );

    // Initialize database
    let db_pool = SqlitePoolOptions::new()
        .max_connections(settings.database.max_connections)
        .connect(&settings.database.url)
        .await?;

    // Run migrations
    sqlx::migrate!("./migrations").run(&db_pool).await?;

    // Initialize auth service
    let auth_service = Arc::new(AuthService::new(
        settings.auth.jwt_secret.clone(),
        settings.auth.token_ttl_hours,
    ));

    // Initialize repositories
    let user_repo = Arc::new(SqliteUserRepository::new(db_pool.clone()));
    let service_repo = Arc::new(SqliteServiceRepository::new(db_pool.clone()));
    let worker_repo = Arc::new(SqliteWorkerRepository::new(db_pool.clone()));
    let booking_repo = Arc::new(SqliteBookingRepository::new(db_pool.clone()));
    let payment_repo = Arc::new(SqlitePaymentRepository::new(db_pool.clone()));

    // Create service context
    let service_context = Arc::new(ServiceContext::new(
        user_repo,
        service_repo,
        worker_repo,
        booking_repo,
        payment_repo,
        auth_service,
        settings.booking.clone(),
        db_pool.clone(),
    ));

    let app = api::create_app(service_context, Arc::new(settings.clone()));

    let listener = tokio::net::TcpListener::bind(format!(
        "{}:{}",
        settings.server.host, settings.server.port
    ))
    .await?;

    tracing::info!(
        "Server listening on http://{}:{}",
        settings.server.host,
        settings.server.port
    );

    axum::serve(listener, app).await?;

    Ok(())
}
