use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::FrequencyPattern;

/// a dated set of frequency patterns for a route.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timetable {
    pub name: String,
    pub valid_from_date: NaiveDate,
    pub valid_to_date: NaiveDate,
    pub frequency_patterns: Vec<FrequencyPattern>,
}

impl Timetable {
    /// true when the date falls within the (inclusive) validity window.
    pub fn is_valid_on(&self, date: &NaiveDate) -> bool {
        self.valid_from_date <= *date && *date <= self.valid_to_date
    }
}
