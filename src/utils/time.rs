//! Time utilities: parsing backend timestamps, elapsed time computations.

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};

/// Layouts of a naive `LocalDateTime` as serialized by the backend.
/// Java omits the seconds when they are zero, hence the short form.
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Parse a server timestamp.
///
/// RFC 3339 values carry their own offset. Naive values are read in the
/// local time zone, like a browser would.
pub fn parse_timestamp(raw: &str) -> AppResult<DateTime<Utc>> {
    parse_timestamp_in(raw, &Local)
}

/// Same as [`parse_timestamp`] with an explicit zone for naive values.
pub fn parse_timestamp_in<Tz: TimeZone>(raw: &str, tz: &Tz) -> AppResult<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }

    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            let local = tz
                .from_local_datetime(&naive)
                .earliest()
                .map(|dt| dt.with_timezone(&Utc))
                // falls in a DST gap: nothing better than reading it as UTC
                .unwrap_or_else(|| naive.and_utc());
            return Ok(local);
        }
    }

    Err(AppError::InvalidTimestamp(raw.to_string()))
}

pub fn parse_optional_timestamp(raw: Option<&str>) -> AppResult<Option<DateTime<Utc>>> {
    match raw {
        Some(s) if !s.trim().is_empty() => parse_timestamp(s).map(Some),
        _ => Ok(None),
    }
}

/// Whole seconds elapsed since `start`. Never negative, even when the server
/// clock runs ahead of ours.
pub fn elapsed_seconds(start: DateTime<Utc>, now: DateTime<Utc>) -> u64 {
    let millis = (now - start).num_milliseconds();
    if millis <= 0 { 0 } else { (millis / 1000) as u64 }
}

pub fn to_local(ts: DateTime<Utc>) -> DateTime<Local> {
    ts.with_timezone(&Local)
}
