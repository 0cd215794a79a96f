pub mod booking_service;
pub mod catalog_service;
pub mod dashboard_service;
pub mod user_service;
pub mod worker_service;

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::AuthService;
use crate::config::BookingConfig;
use crate::repository::*;

pub use booking_service::BookingService;
pub use catalog_service::CatalogService;
pub use dashboard_service::{DashboardService, DashboardStats};
pub use user_service::{AuthenticatedUser, UserService};
pub use worker_service::WorkerService;

pub struct ServiceContext {
    pub user_repo: Arc<dyn UserRepository>,
    pub service_repo: Arc<dyn ServiceRepository>,
    pub worker_repo: Arc<dyn WorkerRepository>,
    pub booking_repo: Arc<dyn BookingRepository>,
    pub payment_repo: Arc<dyn PaymentRepository>,
    pub auth_service: Arc<AuthService>,
    pub user_service: Arc<UserService>,
    pub catalog_service: Arc<CatalogService>,
    pub worker_service: Arc<WorkerService>,
    pub booking_service: Arc<BookingService>,
    pub dashboard_service: Arc<DashboardService>,
    pub db_pool: SqlitePool,
}

impl ServiceContext {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        service_repo: Arc<dyn ServiceRepository>,
        worker_repo: Arc<dyn WorkerRepository>,
        booking_repo: Arc<dyn BookingRepository>,
        payment_repo: Arc<dyn PaymentRepository>,
        auth_service: Arc<AuthService>,
        booking_config: BookingConfig,
        db_pool: SqlitePool,
    ) -> Self {
        let user_service = Arc::new(UserService::new(user_repo.clone(), auth_service.clone()));
        let catalog_service = Arc::new(CatalogService::new(service_repo.clone()));
        let worker_service = Arc::new(WorkerService::new(worker_repo.clone()));
        let booking_service = Arc::new(BookingService::new(
            booking_repo.clone(),
            service_repo.clone(),
            worker_repo.clone(),
            booking_config,
        ));
        let dashboard_service = Arc::new(DashboardService::new(
            user_repo.clone(),
            worker_repo.clone(),
            booking_repo.clone(),
            payment_repo.clone(),
        ));

        Self {
            user_repo,
            service_repo,
            worker_repo,
            booking_repo,
            payment_repo,
            auth_service,
            user_service,
            catalog_service,
            worker_service,
            booking_service,
            dashboard_service,
            db_pool,
        }
    }
}
