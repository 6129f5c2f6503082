use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::time::ClockTime;

/// a recurring service pattern: between `start_time` and `end_time` a vehicle
/// departs from `start_stop` every `frequency_in_minutes`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyPattern {
    pub name: String,
    /// days on which this pattern runs. empty means every day.
    #[serde(default)]
    pub days_of_operation: Vec<Weekday>,
    pub start_stop: String,
    pub end_stop: String,
    pub start_time: ClockTime,
    pub end_time: ClockTime,
    pub frequency_in_minutes: u32,
}

impl FrequencyPattern {
    pub fn operates_on(&self, weekday: Weekday) -> bool {
        self.days_of_operation.is_empty() || self.days_of_operation.contains(&weekday)
    }
}
