use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::{ReshapeError, Result};
use crate::value::Value;

// ---------------------------------------------------------------------------
// Reference-zone date parsing
// ---------------------------------------------------------------------------

/// The zone in which the feed's date strings are expressed.
///
/// The feed delivers wall-clock values with no offset, so parsing them in
/// the host's local zone would silently shift the calendar day. Everything
/// date-typed in this crate is interpreted here instead.
pub const REFERENCE_ZONE: Tz = chrono_tz::Europe::London;

/// Interpret one raw feed value as a date in [`REFERENCE_ZONE`].
///
/// Accepted inputs:
/// * RFC 3339 timestamps (explicit offset, converted into the zone)
/// * `YYYY-MM-DD HH:MM:SS` and bare `YYYY-MM-DD` (zone wall clock)
/// * integer / float epoch milliseconds
/// * an already-parsed `Value::Date`, passed through unchanged
///
/// `column` only labels the error.
pub fn parse_wall_clock(column: &str, value: &Value) -> Result<DateTime<Tz>> {
    match value {
        Value::Date(d) => Ok(*d),
        Value::String(s) => parse_date_str(column, s),
        Value::Integer(ms) => from_epoch_millis(column, *ms),
        Value::Float(ms) => from_epoch_millis(column, *ms as i64),
        other => Err(date_error(column, &other.to_string(), "not a date-typed value")),
    }
}

fn parse_date_str(column: &str, s: &str) -> Result<DateTime<Tz>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&REFERENCE_ZONE));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return resolve_wall_clock(column, s, naive);
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return resolve_wall_clock(column, s, NaiveDateTime::new(date, NaiveTime::MIN));
    }
    Err(date_error(column, s, "unrecognized date format"))
}

/// Pin a naive wall-clock value to the reference zone. DST can make a wall
/// clock ambiguous or nonexistent; both cases are reported rather than
/// resolved arbitrarily.
fn resolve_wall_clock(column: &str, raw: &str, naive: NaiveDateTime) -> Result<DateTime<Tz>> {
    REFERENCE_ZONE
        .from_local_datetime(&naive)
        .single()
        .ok_or_else(|| {
            date_error(
                column,
                raw,
                "wall-clock time is ambiguous or nonexistent in the reference zone",
            )
        })
}

fn from_epoch_millis(column: &str, ms: i64) -> Result<DateTime<Tz>> {
    Utc.timestamp_millis_opt(ms)
        .single()
        .map(|dt| dt.with_timezone(&REFERENCE_ZONE))
        .ok_or_else(|| date_error(column, &ms.to_string(), "epoch milliseconds out of range"))
}

fn date_error(column: &str, value: &str, reason: &str) -> ReshapeError {
    ReshapeError::DateParse {
        column: column.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
