use serde::{Deserialize, Serialize};
use trams_core::{model::Schedule, time::ClockTime};

/// one stop time of a generated schedule, as written to CSV.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct StopTimeRow {
    pub route_number: String,
    pub schedule_id: u32,
    pub service_id: u32,
    /// position of the stop within its service
    pub stop_sequence: usize,
    pub stop: String,
    pub arrival_time: ClockTime,
    pub departure_time: ClockTime,
}

impl StopTimeRow {
    pub fn from_schedule(schedule: &Schedule) -> Vec<StopTimeRow> {
        schedule
            .services
            .iter()
            .flat_map(|service| {
                service
                    .stop_times
                    .iter()
                    .enumerate()
                    .map(move |(idx, st)| StopTimeRow {
                        route_number: schedule.key.route_number.clone(),
                        schedule_id: schedule.key.id,
                        service_id: service.id,
                        stop_sequence: idx,
                        stop: st.stop.clone(),
                        arrival_time: st.arrival,
                        departure_time: st.departure,
                    })
            })
            .collect()
    }
}
