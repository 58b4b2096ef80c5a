//! Internal helpers for stored identifiers and date ranges.
//!
//! These utilities are **not** part of the public API. All ranges are
//! half-open UTC intervals `[start, end)`, which keeps the boundary
//! arithmetic exact at month and day edges.

use chrono::{DateTime, Datelike, Days, Months, NaiveDate, NaiveTime, Utc};
use uuid::Uuid;

use crate::{EngineError, ResultEngine};

/// Parse a UUID from storage and return a labeled error on failure.
pub(crate) fn parse_uuid(value: &str, label: &str) -> ResultEngine<Uuid> {
    Uuid::parse_str(value).map_err(|_| EngineError::InvalidId(format!("invalid {label} id")))
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

fn invalid_date() -> EngineError {
    EngineError::InvalidAmount("date out of supported range".to_string())
}

/// The calendar month containing `at`, as `[first day 00:00, next first day)`.
pub(crate) fn month_range(at: DateTime<Utc>) -> ResultEngine<(DateTime<Utc>, DateTime<Utc>)> {
    let first = at.date_naive().with_day(1).ok_or_else(invalid_date)?;
    let next = first
        .checked_add_months(Months::new(1))
        .ok_or_else(invalid_date)?;
    Ok((start_of_day(first), start_of_day(next)))
}

/// The calendar day containing `at`, as `[00:00, next day 00:00)`.
pub(crate) fn day_range(at: DateTime<Utc>) -> ResultEngine<(DateTime<Utc>, DateTime<Utc>)> {
    let day = at.date_naive();
    let next = day.checked_add_days(Days::new(1)).ok_or_else(invalid_date)?;
    Ok((start_of_day(day), start_of_day(next)))
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn month_range_spans_whole_month() {
        let at = Utc.with_ymd_and_hms(2026, 8, 15, 13, 45, 12).unwrap();
        let (start, end) = month_range(at).unwrap();

        assert_eq!(start, Utc.with_ymd_and_hms(2026, 8, 1, 0, 0, 0).unwrap());
        assert_eq!(end, Utc.with_ymd_and_hms(2026, 9, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn month_range_handles_leap_february() {
        let at = Utc.with_ymd_and_hms(2024, 2, 29, 23, 59, 59).unwrap();
        let (start, end) = month_range(at).unwrap();

        assert_eq!(start, Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap());
        assert_eq!(end, Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn month_range_wraps_december() {
        let at = Utc.with_ymd_and_hms(2025, 12, 31, 12, 0, 0).unwrap();
        let (_, end) = month_range(at).unwrap();

        assert_eq!(end, Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn day_range_covers_single_day() {
        let at = Utc.with_ymd_and_hms(2026, 8, 6, 0, 0, 0).unwrap();
        let (start, end) = day_range(at).unwrap();

        assert_eq!(start, Utc.with_ymd_and_hms(2026, 8, 6, 0, 0, 0).unwrap());
        assert_eq!(end, Utc.with_ymd_and_hms(2026, 8, 7, 0, 0, 0).unwrap());
    }

    #[test]
    fn parse_uuid_labels_the_error() {
        let err = parse_uuid("not-a-uuid", "wallet").unwrap_err();
        assert_eq!(err, EngineError::InvalidId("invalid wallet id".to_string()));
    }
}
