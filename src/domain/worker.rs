use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::domain::ServiceType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkerStatus {
    Active,
    Inactive,
    Verified,
    Suspended,
}

impl WorkerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkerStatus::Active => "ACTIVE",
            WorkerStatus::Inactive => "INACTIVE",
            WorkerStatus::Verified => "VERIFIED",
            WorkerStatus::Suspended => "SUSPENDED",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ACTIVE" => Some(WorkerStatus::Active),
            "INACTIVE" => Some(WorkerStatus::Inactive),
            "VERIFIED" => Some(WorkerStatus::Verified),
            "SUSPENDED" => Some(WorkerStatus::Suspended),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Worker {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    /// The set of service types this worker can be assigned to.
    #[serde(rename = "serviceType")]
    pub service_types: Vec<ServiceType>,
    pub hourly_rate: f64,
    pub status: WorkerStatus,
    pub bio: Option<String>,
    pub experience_years: Option<i64>,
    pub avg_rating: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Worker {
    pub fn covers(&self, service_type: ServiceType) -> bool {
        self.service_types.contains(&service_type)
    }
}

/// Admin listing row: the worker plus how many bookings reference it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkerWithBookings {
    #[serde(flatten)]
    pub worker: Worker,
    pub booking_count: i64,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateWorkerRequest {
    #[validate(length(min = 2, message = "Name must be at least 2 characters"))]
    pub name: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 8, message = "Phone must be at least 8 characters"))]
    pub phone: String,
    #[serde(rename = "serviceType")]
    pub service_types: Vec<ServiceType>,
    #[validate(range(min = 0.0, message = "Hourly rate cannot be negative"))]
    pub hourly_rate: f64,
    pub bio: Option<String>,
    pub experience_years: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWorkerRequest {
    #[validate(length(min = 2, message = "Name must be at least 2 characters"))]
    pub name: Option<String>,
    #[validate(length(min = 8, message = "Phone must be at least 8 characters"))]
    pub phone: Option<String>,
    #[serde(rename = "serviceType")]
    pub service_types: Option<Vec<ServiceType>>,
    #[validate(range(min = 0.0, message = "Hourly rate cannot be negative"))]
    pub hourly_rate: Option<f64>,
    pub status: Option<WorkerStatus>,
    pub bio: Option<String>,
    pub experience_years: Option<i64>,
    pub avg_rating: Option<f64>,
}
