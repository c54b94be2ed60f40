//! Clock offset between callers and the service.
//!
//! The service schedules orders on its own local clock (US Eastern) while
//! this library works in UTC. Time fields are converted once, when an
//! order document is rendered. Callers who need DST-correct conversion
//! can supply their own offset via [`to_local`].

use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};

/// Standard-time offset of the service's clock from UTC, in hours.
pub const SERVICE_UTC_OFFSET_HOURS: i32 = -5;

/// The service's fixed offset from UTC.
pub fn service_offset() -> FixedOffset {
    FixedOffset::east_opt(SERVICE_UTC_OFFSET_HOURS * 3600).expect("offset is in range")
}

/// Convert a UTC instant to the service's local wall-clock time.
pub fn service_local(utc: DateTime<Utc>) -> NaiveDateTime {
    to_local(utc, service_offset())
}

/// Convert a UTC instant to wall-clock time at the given offset.
pub fn to_local(utc: DateTime<Utc>, offset: FixedOffset) -> NaiveDateTime {
    utc.with_timezone(&offset).naive_local()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn service_local_shifts_back_five_hours() {
        let utc = Utc.with_ymd_and_hms(2025, 3, 1, 14, 30, 0).unwrap();
        let local = service_local(utc);
        assert_eq!(local.format("%Y-%m-%d %H:%M").to_string(), "2025-03-01 09:30");
    }

    #[test]
    fn conversion_crosses_date_boundaries() {
        let utc = Utc.with_ymd_and_hms(2025, 3, 1, 2, 0, 0).unwrap();
        let local = service_local(utc);
        assert_eq!(local.format("%Y-%m-%d %H:%M").to_string(), "2025-02-28 21:00");
    }

    #[test]
    fn custom_offset_is_honored() {
        let utc = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let offset = FixedOffset::east_opt(-4 * 3600).unwrap();
        assert_eq!(
            to_local(utc, offset).format("%H:%M").to_string(),
            "08:00"
        );
    }
}
