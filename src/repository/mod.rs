use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::*;
use crate::error::Result;

pub mod booking_repository;
pub mod payment_repository;
pub mod service_repository;
pub mod user_repository;
pub mod worker_repository;

pub use booking_repository::SqliteBookingRepository;
pub use payment_repository::SqlitePaymentRepository;
pub use service_repository::SqliteServiceRepository;
pub use user_repository::SqliteUserRepository;
pub use worker_repository::SqliteWorkerRepository;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: NewUser) -> Result<User>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;
    async fn list_customers(&self) -> Result<Vec<CustomerAccount>>;
    async fn set_active(&self, id: Uuid, is_active: bool) -> Result<User>;
    async fn count_by_role(&self, role: UserRole) -> Result<i64>;
}

#[async_trait]
pub trait ServiceRepository: Send + Sync {
    async fn create(&self, request: CreateServiceRequest) -> Result<Service>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Service>>;
    async fn find_by_type(&self, service_type: ServiceType) -> Result<Option<Service>>;
    async fn list(&self, service_type: Option<ServiceType>) -> Result<Vec<Service>>;
    async fn update(&self, id: Uuid, update: UpdateServiceRequest) -> Result<Service>;
    async fn delete(&self, id: Uuid) -> Result<()>;
    /// Insert or refresh the catalog entry for a type. Used by seeding.
    async fn upsert_by_type(&self, request: CreateServiceRequest) -> Result<Service>;
    async fn count_bookings(&self, id: Uuid) -> Result<i64>;
}

#[async_trait]
pub trait WorkerRepository: Send + Sync {
    async fn create(&self, request: CreateWorkerRequest) -> Result<Worker>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Worker>>;
    async fn list(&self, status: Option<WorkerStatus>) -> Result<Vec<WorkerWithBookings>>;
    async fn update(&self, id: Uuid, update: UpdateWorkerRequest) -> Result<Worker>;
    async fn delete(&self, id: Uuid) -> Result<()>;
    async fn count_by_status(&self, status: WorkerStatus) -> Result<i64>;
}

#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Persist a booking together with its payment record in one
    /// transaction: either both rows land or neither does.
    async fn create_with_payment(&self, booking: &Booking, payment: &Payment) -> Result<()>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Booking>>;
    async fn find_detail(&self, id: Uuid) -> Result<Option<BookingDetail>>;
    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<BookingDetail>>;
    async fn list_all(&self, status: Option<BookingStatus>) -> Result<Vec<BookingDetail>>;
    async fn list_recent(&self, limit: i64) -> Result<Vec<BookingDetail>>;
    async fn update(&self, id: Uuid, update: &UpdateBookingRequest) -> Result<Booking>;
    async fn count(&self) -> Result<i64>;
}

#[async_trait]
pub trait PaymentRepository: Send + Sync {
    async fn find_by_booking(&self, booking_id: Uuid) -> Result<Option<Payment>>;
    async fn update_status(&self, id: Uuid, status: PaymentStatus) -> Result<Payment>;
    /// Sum of all COMPLETED payment amounts.
    async fn total_completed(&self) -> Result<f64>;
}
