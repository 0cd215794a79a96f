//! Price computation for a booking. Pure: the caller is responsible
//! for having validated duration and guest count beforehand.

use serde::Serialize;

use crate::domain::ServiceType;

pub const HOME_COOKING_DEFAULT_RATE: f64 = 499.0;
pub const EVENT_COOKING_DEFAULT_RATE: f64 = 299.0;
pub const HOME_ORGANIZATION_DEFAULT_RATE: f64 = 249.0;
pub const SEASONAL_CONCIERGE_DEFAULT_RATE: f64 = 1499.0;
pub const CUSTOM_COOKING_DEFAULT_RATE: f64 = 499.0;

pub const DEFAULT_GUEST_COUNT: i64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub base_price: f64,
    pub final_price: f64,
}

/// Compute the price of a booking from the service's configured rate
/// and the booking parameters. Hourly types charge per hour, event
/// cooking charges per guest, and the concierge package is a flat fee
/// that ignores both duration and guest count.
///
/// No discounts or surcharges exist: the final price equals the base
/// price.
pub fn quote(
    service_type: ServiceType,
    starting_price: f64,
    duration_hours: i64,
    guest_count: Option<i64>,
) -> Quote {
    let base_price = match service_type {
        ServiceType::HomeCooking => {
            rate_or(starting_price, HOME_COOKING_DEFAULT_RATE) * duration_hours as f64
        }
        ServiceType::CustomCooking => {
            rate_or(starting_price, CUSTOM_COOKING_DEFAULT_RATE) * duration_hours as f64
        }
        ServiceType::EventCooking => {
            guest_count.unwrap_or(DEFAULT_GUEST_COUNT) as f64
                * rate_or(starting_price, EVENT_COOKING_DEFAULT_RATE)
        }
        ServiceType::HomeOrganization => {
            rate_or(starting_price, HOME_ORGANIZATION_DEFAULT_RATE) * duration_hours as f64
        }
        ServiceType::SeasonalConcierge => rate_or(starting_price, SEASONAL_CONCIERGE_DEFAULT_RATE),
    };

    Quote {
        base_price,
        final_price: base_price,
    }
}

/// A configured rate of 0 is treated as unset and falls back to the
/// type default. A service deliberately priced at 0 is therefore
/// charged the default rate as well.
fn rate_or(configured: f64, default: f64) -> f64 {
    if configured == 0.0 {
        default
    } else {
        configured
    }
}
