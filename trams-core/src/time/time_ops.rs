//! string-level time-of-day arithmetic. these operate on zero-padded `HH:mm`
//! values and wrap within a single day.
use std::str::FromStr;

use chrono::NaiveDateTime;

use super::{ClockTime, TimeError};

/// formats the time of day of a date-time as `HH:mm`.
pub fn format_time_as_string(date_time: &NaiveDateTime) -> String {
    ClockTime::from_date_time(date_time).to_string()
}

/// adds a minute offset to an `HH:mm` time, wrapping at midnight.
pub fn add_time(time: &str, minutes: i32) -> Result<String, TimeError> {
    let clock = ClockTime::from_str(time)?;
    Ok(clock.add_minutes(minutes).to_string())
}

/// subtracts a minute offset from an `HH:mm` time, wrapping at midnight.
pub fn subtract_time(time: &str, minutes: i32) -> Result<String, TimeError> {
    let clock = ClockTime::from_str(time)?;
    Ok(clock.subtract_minutes(minutes).to_string())
}
