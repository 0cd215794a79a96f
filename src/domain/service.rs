use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The five bookable offerings. Stored and serialized in the
/// SCREAMING_SNAKE_CASE form the public API uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServiceType {
    HomeCooking,
    EventCooking,
    HomeOrganization,
    SeasonalConcierge,
    CustomCooking,
}

impl ServiceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceType::HomeCooking => "HOME_COOKING",
            ServiceType::EventCooking => "EVENT_COOKING",
            ServiceType::HomeOrganization => "HOME_ORGANIZATION",
            ServiceType::SeasonalConcierge => "SEASONAL_CONCIERGE",
            ServiceType::CustomCooking => "CUSTOM_COOKING",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "HOME_COOKING" => Some(ServiceType::HomeCooking),
            "EVENT_COOKING" => Some(ServiceType::EventCooking),
            "HOME_ORGANIZATION" => Some(ServiceType::HomeOrganization),
            "SEASONAL_CONCIERGE" => Some(ServiceType::SeasonalConcierge),
            "CUSTOM_COOKING" => Some(ServiceType::CustomCooking),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub service_type: ServiceType,
    pub starting_price: f64,
    pub description: String,
    pub long_description: Option<String>,
    pub included: Option<Vec<String>>,
    pub excluded: Option<Vec<String>>,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateServiceRequest {
    pub name: String,
    #[serde(rename = "type")]
    pub service_type: ServiceType,
    pub starting_price: f64,
    pub description: String,
    pub long_description: Option<String>,
    pub included: Option<Vec<String>>,
    pub excluded: Option<Vec<String>>,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateServiceRequest {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub service_type: Option<ServiceType>,
    pub starting_price: Option<f64>,
    pub description: Option<String>,
    pub long_description: Option<String>,
    pub included: Option<Vec<String>>,
    pub excluded: Option<Vec<String>>,
    pub image: Option<String>,
}
