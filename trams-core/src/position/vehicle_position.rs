use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// where a vehicle is during the simulation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum VehiclePosition {
    /// not assigned, or not currently running a service.
    Depot,
    /// at (or most recently departed from) `stop`, heading to `destination`.
    Running {
        stop: String,
        destination: String,
        delay: i32,
    },
}

impl VehiclePosition {
    pub const DEPOT: &'static str = "Depot";

    pub fn is_depot(&self) -> bool {
        matches!(self, VehiclePosition::Depot)
    }

    pub fn stop(&self) -> &str {
        match self {
            VehiclePosition::Depot => Self::DEPOT,
            VehiclePosition::Running { stop, .. } => stop,
        }
    }

    /// empty when in the depot.
    pub fn destination(&self) -> &str {
        match self {
            VehiclePosition::Depot => "",
            VehiclePosition::Running { destination, .. } => destination,
        }
    }

    pub fn delay(&self) -> i32 {
        match self {
            VehiclePosition::Depot => 0,
            VehiclePosition::Running { delay, .. } => *delay,
        }
    }
}

impl Display for VehiclePosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VehiclePosition::Depot => write!(f, "{}", Self::DEPOT),
            VehiclePosition::Running {
                stop,
                destination,
                delay,
            } => write!(f, "{stop} towards {destination} (delay {delay} min)"),
        }
    }
}
