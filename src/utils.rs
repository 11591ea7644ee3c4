//! Time helpers for XMLTV timestamps and UTC calendar days.
//!
//! - XMLTV timestamp rendering and parsing (`YYYYMMDDHHMMSS +0000`)
//! - Midnight / "today" computations in UTC

use crate::error::{GuideError, GuideResult};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

/// chrono layout of an XMLTV timestamp with a numeric offset.
const XMLTV_PARSE_FORMAT: &str = "%Y%m%d%H%M%S %z";

/// Render a UTC instant as an XMLTV timestamp.
///
/// The result is the 14-digit `YYYYMMDDHHMMSS` date-time followed by a space
/// and the literal offset `+0000`. Sub-second precision is dropped.
///
/// # Examples
///
/// ```ignore
/// let t = Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap();
/// assert_eq!(to_xmltv_timestamp(t), "20240101080000 +0000");
/// ```
pub fn to_xmltv_timestamp(instant: DateTime<Utc>) -> String {
    instant.format("%Y%m%d%H%M%S +0000").to_string()
}

/// Parse an XMLTV timestamp back into a UTC instant.
///
/// Any numeric offset is accepted and normalized to UTC, so
/// `"20240101090000 +0100"` and `"20240101080000 +0000"` are the same instant.
///
/// # Errors
///
/// Returns [`GuideError::Timestamp`] when the value does not follow the
/// `YYYYMMDDHHMMSS ±HHMM` layout.
pub fn parse_xmltv_timestamp(value: &str) -> GuideResult<DateTime<Utc>> {
    DateTime::parse_from_str(value.trim(), XMLTV_PARSE_FORMAT)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| GuideError::Timestamp {
            value: value.to_string(),
            reason: e.to_string(),
        })
}

/// Midnight UTC at the start of `day`.
pub fn midnight_utc(day: NaiveDate) -> DateTime<Utc> {
    day.and_time(NaiveTime::MIN).and_utc()
}

/// The UTC calendar day containing `now`.
pub fn start_of_day_utc(now: DateTime<Utc>) -> NaiveDate {
    let day = now.date_naive();
    tracing::debug!(%now, %day, "Computed reference day");
    day
}
