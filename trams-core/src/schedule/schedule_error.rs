use crate::time::ClockTime;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("frequency pattern '{0}' has a frequency of 0 minutes")]
    InvalidFrequency(String),
    #[error("frequency pattern '{0}' has no travel time between its stops")]
    DegenerateDistance(String),
    #[error("frequency pattern '{pattern}' ends at {end} which is not after its start at {start}")]
    InvalidOperatingWindow {
        pattern: String,
        start: ClockTime,
        end: ClockTime,
    },
    #[error("route {route_number} has no stop sequence from '{from}' to '{to}'")]
    UnknownStop {
        route_number: String,
        from: String,
        to: String,
    },
    #[error("stop '{0}' is missing from the stop distance table")]
    MissingStopDistance(String),
    #[error("frequency pattern '{0}' produces a trip that runs past midnight")]
    CrossesMidnight(String),
}
