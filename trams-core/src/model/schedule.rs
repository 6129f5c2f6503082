use serde::{Deserialize, Serialize};

use super::ScheduleKey;
use crate::time::ClockTime;

/// arrival and departure at one stop of a service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StopTime {
    pub stop: String,
    pub arrival: ClockTime,
    pub departure: ClockTime,
}

impl StopTime {
    /// a stop with no dwell time.
    pub fn passing(stop: &str, time: ClockTime) -> StopTime {
        StopTime {
            stop: stop.to_string(),
            arrival: time,
            departure: time,
        }
    }
}

/// one directional trip within a schedule.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    pub id: u32,
    pub stop_times: Vec<StopTime>,
    /// set by an operator to take the whole trip out of the running order.
    #[serde(default)]
    pub out_of_service: bool,
    /// set by an operator to start the trip late, at this stop position.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temp_start_stop_pos: Option<usize>,
    /// set by an operator to terminate the trip early, at this stop position.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temp_end_stop_pos: Option<usize>,
}

impl Service {
    pub fn new(id: u32, stop_times: Vec<StopTime>) -> Service {
        Service {
            id,
            stop_times,
            out_of_service: false,
            temp_start_stop_pos: None,
            temp_end_stop_pos: None,
        }
    }

    pub fn first_stop(&self) -> Option<&StopTime> {
        self.stop_times.first()
    }

    pub fn last_stop(&self) -> Option<&StopTime> {
        self.stop_times.last()
    }

    /// clamps a stop position into the temporary stop range, if one is set.
    pub fn effective_stop_pos(&self, pos: usize) -> usize {
        let lower = self.temp_start_stop_pos.unwrap_or(0);
        let upper = self
            .temp_end_stop_pos
            .unwrap_or_else(|| self.stop_times.len().saturating_sub(1));
        pos.clamp(lower, upper.max(lower))
    }

    /// the stop a vehicle on this trip is heading to, respecting an early end.
    pub fn destination(&self) -> Option<&StopTime> {
        match self.temp_end_stop_pos {
            Some(pos) => self.stop_times.get(pos).or_else(|| self.last_stop()),
            None => self.last_stop(),
        }
    }

    /// minutes between the first departure and the final arrival.
    pub fn running_time(&self) -> i32 {
        match (self.first_stop(), self.last_stop()) {
            (Some(first), Some(last)) => first.departure.minutes_until(&last.arrival),
            _ => 0,
        }
    }

    /// running time over the temporary stop range only.
    pub fn effective_running_time(&self) -> i32 {
        let first = self.stop_times.get(self.effective_stop_pos(0));
        let last = self
            .stop_times
            .get(self.effective_stop_pos(self.stop_times.len().saturating_sub(1)));
        match (first, last) {
            (Some(first), Some(last)) => first.departure.minutes_until(&last.arrival),
            _ => 0,
        }
    }

    /// true when the operator has narrowed the stop range of this trip.
    pub fn is_shortened(&self) -> bool {
        self.temp_start_stop_pos.is_some() || self.temp_end_stop_pos.is_some()
    }
}

/// one vehicle's daily duty on a route: an ordered list of services that
/// alternate between the outward and return direction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub key: ScheduleKey,
    pub services: Vec<Service>,
}

impl Schedule {
    pub fn new(key: ScheduleKey, services: Vec<Service>) -> Schedule {
        Schedule { key, services }
    }

    pub fn get_service(&self, service_id: u32) -> Option<&Service> {
        self.services.iter().find(|s| s.id == service_id)
    }

    pub fn get_service_mut(&mut self, service_id: u32) -> Option<&mut Service> {
        self.services.iter_mut().find(|s| s.id == service_id)
    }

    /// first departure of the day.
    pub fn first_departure(&self) -> Option<ClockTime> {
        self.services
            .first()
            .and_then(|s| s.first_stop())
            .map(|st| st.departure)
    }

    /// last arrival of the day.
    pub fn last_arrival(&self) -> Option<ClockTime> {
        self.services
            .last()
            .and_then(|s| s.last_stop())
            .map(|st| st.arrival)
    }
}
