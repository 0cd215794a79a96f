use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{PaymentStatus, ServiceType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    InProgress,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "PENDING",
            BookingStatus::Confirmed => "CONFIRMED",
            BookingStatus::InProgress => "IN_PROGRESS",
            BookingStatus::Completed => "COMPLETED",
            BookingStatus::Cancelled => "CANCELLED",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "PENDING" => Some(BookingStatus::Pending),
            "CONFIRMED" => Some(BookingStatus::Confirmed),
            "IN_PROGRESS" => Some(BookingStatus::InProgress),
            "COMPLETED" => Some(BookingStatus::Completed),
            "CANCELLED" => Some(BookingStatus::Cancelled),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, BookingStatus::Completed | BookingStatus::Cancelled)
    }

    /// The forward chain PENDING -> CONFIRMED -> IN_PROGRESS -> COMPLETED,
    /// with CANCELLED reachable from any non-terminal state. Only consulted
    /// when transition enforcement is switched on.
    pub fn can_transition_to(&self, next: BookingStatus) -> bool {
        if *self == next {
            return true;
        }
        match (self, next) {
            (BookingStatus::Pending, BookingStatus::Confirmed) => true,
            (BookingStatus::Confirmed, BookingStatus::InProgress) => true,
            (BookingStatus::InProgress, BookingStatus::Completed) => true,
            (_, BookingStatus::Cancelled) => !self.is_terminal(),
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: Uuid,
    pub user_id: Uuid,
    pub service_id: Uuid,
    pub worker_id: Option<Uuid>,
    pub scheduled_at: DateTime<Utc>,
    pub duration_hours: i64,
    pub guest_count: Option<i64>,
    pub address: String,
    pub notes: Option<String>,
    pub base_price: f64,
    pub final_price: f64,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// What a customer submits to book a service. The date and time stay
/// strings until the validation rules parse and combine them.
#[derive(Debug, Clone)]
pub struct CreateBookingRequest {
    pub service_id: Uuid,
    pub date: String,
    pub time: String,
    pub duration_hours: i64,
    pub guest_count: Option<i64>,
    pub address: String,
    pub notes: Option<String>,
}

/// Admin-side mutation of a booking. `worker_id` distinguishes
/// "leave untouched" (None) from "unassign" (Some(None)).
#[derive(Debug, Clone, Default)]
pub struct UpdateBookingRequest {
    pub status: Option<BookingStatus>,
    pub worker_id: Option<Option<Uuid>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceSummary {
    pub name: String,
    #[serde(rename = "type")]
    pub service_type: ServiceType,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerSummary {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkerSummary {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSummary {
    pub status: PaymentStatus,
    pub amount: f64,
}

/// A booking joined with its service, owner, assigned worker, and
/// payment record. This is the shape every read endpoint returns.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingDetail {
    pub id: Uuid,
    pub user_id: Uuid,
    pub service_id: Uuid,
    pub worker_id: Option<Uuid>,
    pub scheduled_at: DateTime<Utc>,
    pub duration_hours: i64,
    pub guest_count: Option<i64>,
    pub address: String,
    pub notes: Option<String>,
    pub base_price: f64,
    pub final_price: f64,
    pub status: BookingStatus,
    pub service: ServiceSummary,
    pub customer: CustomerSummary,
    pub worker: Option<WorkerSummary>,
    pub payment: Option<PaymentSummary>,
    pub created_at: DateTime<Utc>,
}
