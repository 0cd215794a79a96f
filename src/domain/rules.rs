//! Per-service-type booking constraints. The same rules the booking
//! form applies before submit are enforced here so a handcrafted
//! request cannot bypass them.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::domain::ServiceType;
use crate::error::FieldErrors;

pub const MIN_DURATION_HOURS: i64 = 1;
pub const MAX_DURATION_HOURS: i64 = 12;
pub const EVENT_MIN_GUESTS: i64 = 7;
pub const EVENT_MAX_GUESTS: i64 = 15;
pub const MIN_ADDRESS_LEN: usize = 10;

/// Validate a booking request and combine its date and time strings
/// into the timestamp that gets stored. `today` is passed in so the
/// date rule stays deterministic under test.
///
/// Collects every violation rather than stopping at the first, keyed
/// by field name.
pub fn validate_booking(
    service_type: ServiceType,
    date: &str,
    time: &str,
    duration_hours: i64,
    guest_count: Option<i64>,
    address: &str,
    today: NaiveDate,
) -> Result<NaiveDateTime, FieldErrors> {
    let mut errors = FieldErrors::new();

    let parsed_date = match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        Ok(d) => Some(d),
        Err(_) => {
            add(&mut errors, "date", "Invalid date (expected YYYY-MM-DD)");
            None
        }
    };

    let parsed_time = match NaiveTime::parse_from_str(time, "%H:%M") {
        Ok(t) => Some(t),
        Err(_) => {
            add(&mut errors, "time", "Invalid time (expected HH:MM)");
            None
        }
    };

    if let Some(d) = parsed_date {
        if d < today {
            add(&mut errors, "date", "Date must be in the future");
        }
    }

    // Type-specific minimums win over the generic bounds, mirroring
    // the order the booking form reports them in.
    match service_type {
        ServiceType::HomeCooking if duration_hours < 2 => {
            add(&mut errors, "duration", "Minimum 2 hours required for Home Cooking");
        }
        ServiceType::HomeOrganization if duration_hours < 3 => {
            add(&mut errors, "duration", "Minimum 3 hours required for Home Organization");
        }
        ServiceType::CustomCooking if duration_hours < 3 => {
            add(&mut errors, "duration", "Minimum 3 hours required for Custom Cooking");
        }
        _ if duration_hours < MIN_DURATION_HOURS => {
            add(&mut errors, "duration", "Duration must be at least 1 hour");
        }
        _ if duration_hours > MAX_DURATION_HOURS => {
            add(&mut errors, "duration", "Duration cannot exceed 12 hours");
        }
        _ => {}
    }

    if service_type == ServiceType::EventCooking {
        match guest_count {
            None => add(&mut errors, "guestCount", "Guest count is required for events"),
            Some(n) if n < EVENT_MIN_GUESTS => {
                add(&mut errors, "guestCount", "Minimum 7 guests required for events");
            }
            Some(n) if n > EVENT_MAX_GUESTS => {
                add(&mut errors, "guestCount", "Maximum 15 guests allowed");
            }
            Some(_) => {}
        }
    }

    if address.trim().len() < MIN_ADDRESS_LEN {
        add(
            &mut errors,
            "address",
            "Please enter a complete address (minimum 10 characters)",
        );
    }

    match (parsed_date, parsed_time) {
        (Some(d), Some(t)) if errors.is_empty() => Ok(d.and_time(t)),
        _ => Err(errors),
    }
}

fn add(errors: &mut FieldErrors, field: &str, message: &str) {
    errors.entry(field.to_string()).or_default().push(message.to_string());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    fn ok_address() -> &'static str {
        "42 Lakeview Road, Delhi"
    }

    #[test]
    fn valid_request_returns_combined_timestamp() {
        let at = validate_booking(
            ServiceType::HomeCooking,
            "2025-06-15",
            "10:00",
            2,
            None,
            ok_address(),
            today(),
        )
        .unwrap();
        assert_eq!(at.to_string(), "2025-06-15 10:00:00");
    }

    #[test]
    fn short_address_is_field_scoped() {
        let errs = validate_booking(
            ServiceType::HomeCooking,
            "2025-06-15",
            "10:00",
            2,
            None,
            "short",
            today(),
        )
        .unwrap_err();
        assert!(errs.contains_key("address"));
        assert_eq!(errs.len(), 1);
    }

    #[test]
    fn whitespace_padding_does_not_satisfy_address_minimum() {
        let errs = validate_booking(
            ServiceType::HomeCooking,
            "2025-06-15",
            "10:00",
            2,
            None,
            "   abc    ",
            today(),
        )
        .unwrap_err();
        assert!(errs.contains_key("address"));
    }

    #[test]
    fn per_type_duration_minimums() {
        for (ty, min) in [
            (ServiceType::HomeCooking, 2),
            (ServiceType::HomeOrganization, 3),
            (ServiceType::CustomCooking, 3),
        ] {
            let errs = validate_booking(
                ty,
                "2025-06-15",
                "10:00",
                min - 1,
                None,
                ok_address(),
                today(),
            )
            .unwrap_err();
            assert!(errs.contains_key("duration"), "{:?} should require {} hours", ty, min);

            assert!(validate_booking(
                ty,
                "2025-06-15",
                "10:00",
                min,
                None,
                ok_address(),
                today(),
            )
            .is_ok());
        }
    }

    #[test]
    fn duration_outer_bounds() {
        let errs = validate_booking(
            ServiceType::SeasonalConcierge,
            "2025-06-15",
            "10:00",
            0,
            None,
            ok_address(),
            today(),
        )
        .unwrap_err();
        assert_eq!(errs["duration"], vec!["Duration must be at least 1 hour"]);

        let errs = validate_booking(
            ServiceType::SeasonalConcierge,
            "2025-06-15",
            "10:00",
            13,
            None,
            ok_address(),
            today(),
        )
        .unwrap_err();
        assert_eq!(errs["duration"], vec!["Duration cannot exceed 12 hours"]);
    }

    #[test]
    fn event_guest_count_window() {
        let ok = |n| {
            validate_booking(
                ServiceType::EventCooking,
                "2025-06-15",
                "18:00",
                4,
                Some(n),
                ok_address(),
                today(),
            )
        };
        assert!(ok(7).is_ok());
        assert!(ok(15).is_ok());
        assert!(ok(6).unwrap_err().contains_key("guestCount"));
        assert!(ok(16).unwrap_err().contains_key("guestCount"));

        let errs = validate_booking(
            ServiceType::EventCooking,
            "2025-06-15",
            "18:00",
            4,
            None,
            ok_address(),
            today(),
        )
        .unwrap_err();
        assert!(errs.contains_key("guestCount"));
    }

    #[test]
    fn guest_count_ignored_for_non_event_types() {
        assert!(validate_booking(
            ServiceType::HomeCooking,
            "2025-06-15",
            "10:00",
            2,
            Some(1),
            ok_address(),
            today(),
        )
        .is_ok());
    }

    #[test]
    fn past_date_rejected_today_allowed() {
        let errs = validate_booking(
            ServiceType::HomeCooking,
            "2025-05-31",
            "10:00",
            2,
            None,
            ok_address(),
            today(),
        )
        .unwrap_err();
        assert_eq!(errs["date"], vec!["Date must be in the future"]);

        assert!(validate_booking(
            ServiceType::HomeCooking,
            "2025-06-01",
            "10:00",
            2,
            None,
            ok_address(),
            today(),
        )
        .is_ok());
    }

    #[test]
    fn malformed_date_and_time_are_field_errors() {
        let errs = validate_booking(
            ServiceType::HomeCooking,
            "15/06/2025",
            "10 AM",
            2,
            None,
            ok_address(),
            today(),
        )
        .unwrap_err();
        assert!(errs.contains_key("date"));
        assert!(errs.contains_key("time"));
    }

    #[test]
    fn violations_accumulate_across_fields() {
        let errs = validate_booking(
            ServiceType::EventCooking,
            "2025-06-15",
            "18:00",
            0,
            Some(2),
            "x",
            today(),
        )
        .unwrap_err();
        assert_eq!(errs.len(), 3);
        assert!(errs.contains_key("duration"));
        assert!(errs.contains_key("guestCount"));
        assert!(errs.contains_key("address"));
    }
}
