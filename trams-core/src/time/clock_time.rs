use std::{fmt::Display, str::FromStr};

use chrono::{NaiveDateTime, Timelike};
use serde::{de::Error, Deserialize, Deserializer, Serialize, Serializer};

use super::TimeError;

pub const MINUTES_PER_HOUR: u32 = 60;
pub const MINUTES_PER_DAY: u32 = 24 * MINUTES_PER_HOUR;

/// a time of day with minute resolution, stored as minutes since midnight.
///
/// the string form is always zero-padded `HH:mm`, so ordering the integer value
/// and ordering the string form lexicographically agree.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime(u32);

impl ClockTime {
    pub const MIDNIGHT: ClockTime = ClockTime(0);

    pub fn new(hour: u32, minute: u32) -> Result<ClockTime, TimeError> {
        if hour >= 24 {
            return Err(TimeError::HourOutOfRange(hour));
        }
        if minute >= MINUTES_PER_HOUR {
            return Err(TimeError::MinuteOutOfRange(minute));
        }
        Ok(ClockTime(hour * MINUTES_PER_HOUR + minute))
    }

    /// const form of [`ClockTime::new`] for literal times. values past 23:59
    /// wrap around midnight.
    pub const fn from_hour_minute(hour: u32, minute: u32) -> ClockTime {
        ClockTime((hour * MINUTES_PER_HOUR + minute) % MINUTES_PER_DAY)
    }

    /// builds a time from minutes since midnight, if within a single day.
    pub fn from_minutes(minutes: u32) -> Option<ClockTime> {
        if minutes < MINUTES_PER_DAY {
            Some(ClockTime(minutes))
        } else {
            None
        }
    }

    /// time of day of a date-time value, truncated to the minute.
    pub fn from_date_time(date_time: &NaiveDateTime) -> ClockTime {
        ClockTime(date_time.hour() * MINUTES_PER_HOUR + date_time.minute())
    }

    pub fn minutes_since_midnight(&self) -> u32 {
        self.0
    }

    pub fn hour(&self) -> u32 {
        self.0 / MINUTES_PER_HOUR
    }

    pub fn minute(&self) -> u32 {
        self.0 % MINUTES_PER_HOUR
    }

    /// adds a (possibly negative) minute offset, wrapping around midnight.
    /// the date is never carried.
    pub fn add_minutes(&self, minutes: i32) -> ClockTime {
        let day = MINUTES_PER_DAY as i64;
        let wrapped = (self.0 as i64 + minutes as i64).rem_euclid(day);
        ClockTime(wrapped as u32)
    }

    /// subtracts a (possibly negative) minute offset, wrapping around midnight.
    pub fn subtract_minutes(&self, minutes: i32) -> ClockTime {
        self.add_minutes(minutes.saturating_neg())
    }

    /// adds a minute offset, returning None instead of passing midnight.
    pub fn checked_add_minutes(&self, minutes: u32) -> Option<ClockTime> {
        self.0
            .checked_add(minutes)
            .and_then(ClockTime::from_minutes)
    }

    /// signed number of minutes from this time until `other` on the same day.
    pub fn minutes_until(&self, other: &ClockTime) -> i32 {
        other.0 as i32 - self.0 as i32
    }
}

impl Display for ClockTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for ClockTime {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (hour_str, minute_str) = trimmed
            .split_once(':')
            .ok_or_else(|| TimeError::InvalidFormat(s.to_string()))?;
        let hour = hour_str
            .parse::<u32>()
            .map_err(|_| TimeError::InvalidFormat(s.to_string()))?;
        let minute = minute_str
            .parse::<u32>()
            .map_err(|_| TimeError::InvalidFormat(s.to_string()))?;
        ClockTime::new(hour, minute)
    }
}

impl Serialize for ClockTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ClockTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let time_str: String = String::deserialize(deserializer)?;
        ClockTime::from_str(&time_str)
            .map_err(|e| D::Error::custom(format!("Invalid time format: {e}")))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn t(s: &str) -> ClockTime {
        ClockTime::from_str(s).unwrap()
    }

    #[test]
    fn test_display_zero_pads_hours_and_minutes() {
        assert_eq!(ClockTime::new(6, 5).unwrap().to_string(), "06:05");
        assert_eq!(ClockTime::new(0, 0).unwrap().to_string(), "00:00");
        assert_eq!(ClockTime::new(23, 59).unwrap().to_string(), "23:59");
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(ClockTime::from_str("6").is_err());
        assert!(ClockTime::from_str("ab:cd").is_err());
        assert_eq!(
            ClockTime::from_str("24:00"),
            Err(TimeError::HourOutOfRange(24))
        );
        assert_eq!(
            ClockTime::from_str("12:60"),
            Err(TimeError::MinuteOutOfRange(60))
        );
    }

    #[test]
    fn test_add_minutes_wraps_within_day() {
        assert_eq!(t("06:45").add_minutes(30), t("07:15"));
        assert_eq!(t("23:50").add_minutes(20), t("00:10"));
        assert_eq!(t("00:05").subtract_minutes(10), t("23:55"));
        assert_eq!(t("06:35").subtract_minutes(-10), t("06:45"));
    }

    #[test]
    fn test_checked_add_stops_at_midnight() {
        assert_eq!(t("23:30").checked_add_minutes(29), Some(t("23:59")));
        assert_eq!(t("23:30").checked_add_minutes(30), None);
    }

    #[test]
    fn test_ordering_matches_padded_string_ordering() {
        let times = ["00:00", "05:59", "06:00", "09:30", "10:00", "23:59"];
        for pair in times.windows(2) {
            assert!(t(pair[0]) < t(pair[1]));
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn test_serde_uses_string_form() {
        let json = serde_json::to_string(&t("07:05")).unwrap();
        assert_eq!(json, "\"07:05\"");
        let back: ClockTime = serde_json::from_str(&json).unwrap();
        assert_eq!(back, t("07:05"));
    }
}
