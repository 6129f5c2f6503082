use serde::{Deserialize, Serialize};

use super::ScheduleKey;

/// binds a vehicle to a schedule. a schedule has at most one allocation.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Allocation {
    pub schedule: ScheduleKey,
    pub fleet_number: String,
}

impl Allocation {
    pub fn new(schedule: ScheduleKey, fleet_number: &str) -> Allocation {
        Allocation {
            schedule,
            fleet_number: fleet_number.to_string(),
        }
    }
}

/// an extra tour added to a route on top of its generated schedules.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AdditionalTour {
    pub key: ScheduleKey,
}
