use serde::{Deserialize, Serialize};

use crate::{model::DelayPolicy, schedule::ScheduleGenerator, time::ClockTime};

/// tunable rules of the simulation. every field has a default so partial
/// configuration files are accepted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationPolicy {
    /// simulated minutes that pass per simulation step
    pub minutes_per_tick: u32,
    /// a step only disrupts once more than this many allocations exist
    pub disruption_threshold: usize,
    /// patterns starting at or after this time use evening distances
    pub evening_start: ClockTime,
    pub delay_policy: DelayPolicy,
    /// satisfaction percentage points lost when shortening a service
    pub shorten_service_satisfaction_cost: f64,
    /// satisfaction percentage points lost when taking a service out of service
    pub out_of_service_satisfaction_cost: f64,
    /// share of the round trip duration recovered by taking a service out of service
    pub out_of_service_delay_fraction: f64,
}

impl Default for SimulationPolicy {
    fn default() -> Self {
        Self {
            minutes_per_tick: 1,
            disruption_threshold: 3,
            evening_start: ClockTime::from_hour_minute(18, 0),
            delay_policy: DelayPolicy::Unbounded,
            shorten_service_satisfaction_cost: 5.0,
            out_of_service_satisfaction_cost: 3.0,
            out_of_service_delay_fraction: 0.1,
        }
    }
}

impl SimulationPolicy {
    pub fn generator(&self) -> ScheduleGenerator {
        ScheduleGenerator::new(self.evening_start)
    }
}
