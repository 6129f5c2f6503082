use serde::{Deserialize, Serialize};

/// how a vehicle's delay behaves when it is reduced below zero.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DelayPolicy {
    /// delay may become negative, i.e. the vehicle runs ahead of schedule.
    #[default]
    Unbounded,
    /// delay never drops below zero.
    Floored,
}

impl DelayPolicy {
    pub fn apply(&self, delay: i32) -> i32 {
        match self {
            DelayPolicy::Unbounded => delay,
            DelayPolicy::Floored => delay.max(0),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    pub fleet_number: String,
    /// minutes behind the nominal schedule.
    #[serde(default)]
    pub delay: i32,
}

impl Vehicle {
    pub fn new(fleet_number: &str) -> Vehicle {
        Vehicle {
            fleet_number: fleet_number.to_string(),
            delay: 0,
        }
    }

    /// adds a (possibly negative) change to the delay and returns the new delay.
    pub fn adjust_delay(&mut self, minutes: i32, policy: DelayPolicy) -> i32 {
        self.delay = policy.apply(self.delay.saturating_add(minutes));
        self.delay
    }
}
