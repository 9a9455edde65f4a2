//! Date normalization
//!
//! The document store hands out dates in several shapes: `{seconds,
//! nanoseconds}` wrapper objects, epoch milliseconds, and strings. All of
//! them are turned into a single `DateTime<Utc>` at ingestion so the report
//! code only ever sees one instant type.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A date exactly as it appears in a stored record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawDate {
    /// Store timestamp wrapper, e.g. `{"seconds": 1704412800, "nanoseconds": 0}`
    Wrapper {
        #[serde(alias = "_seconds")]
        seconds: i64,
        #[serde(default, alias = "_nanoseconds")]
        nanoseconds: u32,
    },
    /// Milliseconds since the Unix epoch
    Millis(f64),
    /// RFC 3339 timestamp, naive `YYYY-MM-DDTHH:MM:SS`, or plain `YYYY-MM-DD`
    Text(String),
}

impl RawDate {
    /// Convert to the canonical instant
    pub fn normalize(&self) -> Result<DateTime<Utc>, TimestampError> {
        match self {
            Self::Wrapper {
                seconds,
                nanoseconds,
            } => DateTime::from_timestamp(*seconds, *nanoseconds)
                .ok_or(TimestampError::OutOfRange),
            Self::Millis(millis) => {
                if !millis.is_finite() {
                    return Err(TimestampError::OutOfRange);
                }
                DateTime::from_timestamp_millis(millis.trunc() as i64)
                    .ok_or(TimestampError::OutOfRange)
            }
            Self::Text(text) => parse_text(text),
        }
    }
}

impl From<DateTime<Utc>> for RawDate {
    fn from(instant: DateTime<Utc>) -> Self {
        Self::Text(instant.to_rfc3339())
    }
}

fn parse_text(text: &str) -> Result<DateTime<Utc>, TimestampError> {
    let s = text.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(Utc.from_utc_datetime(&naive));
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(day_start(date));
    }

    Err(TimestampError::Unparsable(s.to_string()))
}

/// 00:00:00.000 UTC of the given day
pub fn day_start(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
}

/// 23:59:59.999 UTC of the given day
pub fn day_end(date: NaiveDate) -> DateTime<Utc> {
    let last_milli =
        NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or(NaiveTime::MIN);
    Utc.from_utc_datetime(&date.and_time(last_milli))
}

/// Errors raised while normalizing a stored date
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimestampError {
    Unparsable(String),
    OutOfRange,
}

impl fmt::Display for TimestampError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unparsable(s) => write!(f, "Unparsable date: {:?}", s),
            Self::OutOfRange => write!(f, "Date out of range"),
        }
    }
}

impl std::error::Error for TimestampError {}
