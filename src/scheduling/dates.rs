use std::sync::OnceLock;

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use chrono_tz::Tz;

use crate::error::ScheduleError;

/// How far ahead of today a schedulable date may lie, in days.
pub const HORIZON_DAYS: i64 = 365;

const DEFAULT_OPERATING_TZ: Tz = chrono_tz::Europe::Brussels;

static OPERATING_TZ: OnceLock<Tz> = OnceLock::new();

/// The civil timezone the board operates in. "Today", "past" and the horizon
/// are all evaluated against this zone, never against the server's local one.
/// Overridable via `OPERATING_TZ` for deployments outside Belgium.
pub fn operating_tz() -> Tz {
    *OPERATING_TZ.get_or_init(|| {
        std::env::var("OPERATING_TZ")
            .ok()
            .and_then(|name| name.parse().ok())
            .unwrap_or(DEFAULT_OPERATING_TZ)
    })
}

/// Parses a strict `YYYY-MM-DD` wall-date. Anything else, including
/// unpadded months or trailing text, is rejected.
pub fn parse_ymd(s: &str) -> Result<NaiveDate, ScheduleError> {
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| ScheduleError::InvalidDateFormat(s.to_string()))?;
    if format_ymd(date) != s {
        return Err(ScheduleError::InvalidDateFormat(s.to_string()));
    }
    Ok(date)
}

pub fn format_ymd(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Calendar-day arithmetic. Wall-dates carry no clock, so this is immune to
/// DST transitions by construction.
pub fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    date + Duration::days(days)
}

/// The UTC-midnight instant for a wall-date. This is the only instant
/// representation that crosses the store boundary; everything else stays a
/// plain date.
pub fn utc_midnight(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// Recovers the wall-date from a UTC-midnight instant by reading its UTC
/// calendar fields. Inverse of [`utc_midnight`].
pub fn wall_date_of(instant: DateTime<Utc>) -> NaiveDate {
    instant.date_naive()
}

/// Today's wall-date in the operating timezone.
pub fn today_in_operating_tz() -> NaiveDate {
    Utc::now().with_timezone(&operating_tz()).date_naive()
}

/// True when the date is strictly before today in the operating timezone.
/// Today itself is not past.
pub fn is_past_date(date: NaiveDate) -> bool {
    date < today_in_operating_tz()
}

/// True when the date is no more than [`HORIZON_DAYS`] after today in the
/// operating timezone. Past dates are within the horizon; callers that also
/// reject the past pair this with [`is_past_date`].
pub fn is_within_horizon(date: NaiveDate) -> bool {
    date <= add_days(today_in_operating_tz(), HORIZON_DAYS)
}

/// English weekday label stored on Day rows for display.
pub fn weekday_name(date: NaiveDate) -> String {
    date.format("%A").to_string()
}

/// Parses an `HH:MM` (or `HH:MM:SS`) time-of-day form value.
pub fn parse_hm(s: &str) -> Result<NaiveTime, ScheduleError> {
    NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .map_err(|_| ScheduleError::invalid_input(format!("Invalid time: {s} (expected HH:MM)")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        parse_ymd(s).unwrap()
    }

    #[test]
    fn parses_strict_ymd() {
        assert_eq!(d("2024-06-10"), NaiveDate::from_ymd_opt(2024, 6, 10).unwrap());
        assert_eq!(d("2024-02-29"), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    }

    #[test]
    fn rejects_malformed_dates() {
        for bad in ["2024/06/10", "2024-6-1", "10-06-2024", "2024-06-10T00:00", "2023-02-29", "junk", ""] {
            assert!(parse_ymd(bad).is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn format_round_trips() {
        let date = d("2024-12-31");
        assert_eq!(parse_ymd(&format_ymd(date)).unwrap(), date);
    }

    #[test]
    fn add_days_crosses_month_and_year_boundaries() {
        assert_eq!(add_days(d("2024-01-31"), 1), d("2024-02-01"));
        assert_eq!(add_days(d("2024-12-31"), 1), d("2025-01-01"));
        assert_eq!(add_days(d("2024-03-01"), -1), d("2024-02-29"));
    }

    #[test]
    fn utc_midnight_round_trips() {
        let date = d("2024-06-10");
        let instant = utc_midnight(date);
        assert_eq!(instant.to_rfc3339(), "2024-06-10T00:00:00+00:00");
        assert_eq!(wall_date_of(instant), date);
    }

    #[test]
    fn today_is_not_past_and_yesterday_is() {
        let today = today_in_operating_tz();
        assert!(!is_past_date(today));
        assert!(is_past_date(add_days(today, -1)));
        assert!(!is_past_date(add_days(today, 1)));
    }

    #[test]
    fn horizon_boundary_is_inclusive() {
        let today = today_in_operating_tz();
        assert!(is_within_horizon(today));
        assert!(is_within_horizon(add_days(today, HORIZON_DAYS)));
        assert!(!is_within_horizon(add_days(today, HORIZON_DAYS + 1)));
        assert!(is_within_horizon(add_days(today, -30)));
    }

    #[test]
    fn weekday_names_are_english() {
        assert_eq!(weekday_name(d("2024-06-10")), "Monday");
        assert_eq!(weekday_name(d("2024-06-16")), "Sunday");
    }

    #[test]
    fn parses_form_times() {
        assert_eq!(parse_hm("08:30").unwrap(), NaiveTime::from_hms_opt(8, 30, 0).unwrap());
        assert_eq!(parse_hm("19:00:00").unwrap(), NaiveTime::from_hms_opt(19, 0, 0).unwrap());
        assert!(parse_hm("8.30").is_err());
        assert!(parse_hm("25:00").is_err());
    }
}
