//! Timestamp strings as they travel between the page, the API and the data file.
//!
//! The server writes local wall-clock times without an offset. Manual entries
//! arrive as `datetime-local` input values (`YYYY-MM-DDTHH:MM`). Offset-carrying
//! RFC 3339 values are converted into local time.

use chrono::{DateTime, Local, NaiveDateTime};

pub const STORED_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

const NAIVE_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

#[derive(Debug, thiserror::Error, PartialEq)]
#[error("unrecognised timestamp `{0}`")]
pub struct TimestampError(pub String);

pub fn format_stamp(value: NaiveDateTime) -> String {
    value.format(STORED_FORMAT).to_string()
}

pub fn now_stamp() -> String {
    format_stamp(Local::now().naive_local())
}

pub fn parse_local(value: &str) -> Result<NaiveDateTime, TimestampError> {
    let value = value.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed.with_timezone(&Local).naive_local());
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .ok_or_else(|| TimestampError(value.to_string()))
}
