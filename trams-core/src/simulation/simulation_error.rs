use crate::{model::ScheduleKey, schedule::ScheduleError};

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SimulationError {
    #[error("route '{0}' not found")]
    UnknownRoute(String),
    #[error("schedule {0} not found")]
    UnknownSchedule(ScheduleKey),
    #[error("service {service_id} not found on schedule {schedule}")]
    UnknownService {
        schedule: ScheduleKey,
        service_id: u32,
    },
    #[error("vehicle '{0}' not found")]
    UnknownVehicle(String),
    #[error("schedule {schedule} is already assigned to vehicle '{fleet_number}'")]
    AlreadyAssigned {
        schedule: ScheduleKey,
        fleet_number: String,
    },
    #[error("stop range {start_pos}..={end_pos} is not valid for service {service_id} of schedule {schedule} with {stop_count} stops")]
    InvalidStopRange {
        schedule: ScheduleKey,
        service_id: u32,
        start_pos: usize,
        end_pos: usize,
        stop_count: usize,
    },
    #[error("service {service_id} of schedule {schedule} is already out of service")]
    AlreadyOutOfService {
        schedule: ScheduleKey,
        service_id: u32,
    },
    #[error("failure generating schedules: {0}")]
    Schedule(#[from] ScheduleError),
}
