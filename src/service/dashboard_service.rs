use std::sync::Arc;

use serde::Serialize;

use crate::{
    domain::{BookingDetail, UserRole, WorkerStatus},
    error::Result,
    repository::{BookingRepository, PaymentRepository, UserRepository, WorkerRepository},
};

const RECENT_BOOKINGS_LIMIT: i64 = 10;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_customers: i64,
    pub total_bookings: i64,
    pub active_workers: i64,
    pub total_revenue: f64,
    pub recent_bookings: Vec<BookingDetail>,
}

pub struct DashboardService {
    users: Arc<dyn UserRepository>,
    workers: Arc<dyn WorkerRepository>,
    bookings: Arc<dyn BookingRepository>,
    payments: Arc<dyn PaymentRepository>,
}

impl DashboardService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        workers: Arc<dyn WorkerRepository>,
        bookings: Arc<dyn BookingRepository>,
        payments: Arc<dyn PaymentRepository>,
    ) -> Self {
        Self {
            users,
            workers,
            bookings,
            payments,
        }
    }

    pub async fn stats(&self) -> Result<DashboardStats> {
        let (total_customers, total_bookings, active_workers, total_revenue) = tokio::join!(
            self.users.count_by_role(UserRole::Customer),
            self.bookings.count(),
            self.workers.count_by_status(WorkerStatus::Active),
            self.payments.total_completed(),
        );

        let recent_bookings = self.bookings.list_recent(RECENT_BOOKINGS_LIMIT).await?;

        Ok(DashboardStats {
            total_customers: total_customers?,
            total_bookings: total_bookings?,
            active_workers: active_workers?,
            total_revenue: total_revenue?,
            recent_bookings,
        })
    }
}
