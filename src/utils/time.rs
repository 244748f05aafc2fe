// @file: src/utils/time.rs
// @description: Human date strings ("1 Jan, 2017") to epoch milliseconds.
// @author: LAS.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use crate::core::error::FetchError;

const DATE_FORMATS: [&str; 3] = ["%d %b, %Y", "%d %b %Y", "%Y-%m-%d"];
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

//
// PUBLIC INTERFACE
//

pub fn parse_date_to_millis(input: &str) -> Result<i64, FetchError> {
    let s: &str = input.trim();

    // #1. Already epoch milliseconds
    if let Ok(ms) = s.parse::<i64>() {
        return Ok(ms);
    }

    // #2. Full timestamps
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.timestamp_millis());
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(Utc.from_utc_datetime(&ndt).timestamp_millis());
        }
    }

    // #3. Calendar dates at midnight UTC
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            let midnight = date
                .and_hms_opt(0, 0, 0)
                .ok_or_else(|| FetchError::InvalidDate(input.to_string()))?;
            return Ok(Utc.from_utc_datetime(&midnight).timestamp_millis());
        }
    }

    Err(FetchError::InvalidDate(input.to_string()))
}

pub fn millis_to_utc(ms: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp_millis(ms)
}
