//! Instant parsing for the CLI boundary.
//!
//! Timestamps are entered as `YYYY-MM-DD` (interpreted as UTC midnight) or
//! `YYYY-MM-DD HH:MM` (UTC).

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

pub fn parse_instant(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M") {
        return Some(Utc.from_utc_datetime(&dt));
    }

    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(Utc.from_utc_datetime(&d.and_hms_opt(0, 0, 0)?));
    }

    None
}

pub fn now() -> DateTime<Utc> {
    Utc::now()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_date_as_utc_midnight() {
        let dt = parse_instant("2026-01-06").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2026, 1, 6, 0, 0, 0).unwrap());
    }

    #[test]
    fn parses_date_time() {
        let dt = parse_instant("2026-01-06 13:45").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2026, 1, 6, 13, 45, 0).unwrap());
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_instant("06.01.2026").is_none());
        assert!(parse_instant("not a date").is_none());
        assert!(parse_instant("2026-13-40").is_none());
    }
}
