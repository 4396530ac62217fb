use chrono::NaiveDateTime;

use crate::domain::errors::DateError;

pub const DATE_FORMAT: &str = "%Y%m%d %H:%M:%S";

/// Shape of `YYYYMMDD HH:MM:SS`, checked byte by byte. chrono accepts
/// unpadded fields, so the layout is enforced before parsing.
const DATE_SHAPE: &[u8; 17] = b"dddddddd dd:dd:dd";

/// Parse a `YYYYMMDD HH:MM:SS` string as UTC and return seconds since the epoch.
pub fn parse_timestamp(input: &str) -> Result<i64, DateError> {
    let invalid = || DateError {
        input: input.to_string(),
    };

    let bytes = input.as_bytes();
    if bytes.len() != DATE_SHAPE.len() {
        return Err(invalid());
    }
    let shape_matches = bytes
        .iter()
        .zip(DATE_SHAPE.iter())
        .all(|(b, expected)| match expected {
            b'd' => b.is_ascii_digit(),
            other => b == other,
        });
    if !shape_matches {
        return Err(invalid());
    }

    NaiveDateTime::parse_from_str(input, DATE_FORMAT)
        .map(|dt| dt.and_utc().timestamp())
        .map_err(|_| invalid())
}
