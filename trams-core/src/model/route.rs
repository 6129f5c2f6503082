use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Schedule, Timetable};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    /// unique within a company
    pub route_number: String,
    pub start_stop: String,
    pub end_stop: String,
    /// intermediate stops in outward order, excluding both termini
    #[serde(default)]
    pub stops: Vec<String>,
    #[serde(default)]
    pub timetables: Vec<Timetable>,
    /// schedules generated for the current simulated day
    #[serde(default)]
    pub schedules: Vec<Schedule>,
}

impl Route {
    /// all stops in outward order, termini included.
    pub fn stop_sequence(&self) -> Vec<&str> {
        std::iter::once(self.start_stop.as_str())
            .chain(self.stops.iter().map(String::as_str))
            .chain(std::iter::once(self.end_stop.as_str()))
            .collect()
    }

    /// the stops a trip from `from` to `to` calls at, in travel order. trips
    /// against the outward direction get the reversed sequence. returns None
    /// if either stop is not on this route or both are the same stop.
    pub fn stops_between(&self, from: &str, to: &str) -> Option<Vec<String>> {
        let sequence = self.stop_sequence();
        let src = sequence.iter().position(|s| *s == from)?;
        let dst = sequence.iter().position(|s| *s == to)?;
        let slice: Vec<String> = if src < dst {
            sequence[src..=dst].iter().map(|s| s.to_string()).collect()
        } else if dst < src {
            sequence[dst..=src].iter().rev().map(|s| s.to_string()).collect()
        } else {
            return None;
        };
        Some(slice)
    }

    /// the timetable in force on a date. when several validity windows contain
    /// the date, the one starting most recently wins; on a tie the earlier
    /// entry in the list wins.
    pub fn active_timetable(&self, date: &NaiveDate) -> Option<&Timetable> {
        self.timetables
            .iter()
            .filter(|t| t.is_valid_on(date))
            .fold(None, |best: Option<&Timetable>, t| match best {
                Some(b) if b.valid_from_date >= t.valid_from_date => Some(b),
                _ => Some(t),
            })
    }

    pub fn get_schedule(&self, id: u32) -> Option<&Schedule> {
        self.schedules.iter().find(|s| s.key.id == id)
    }

    pub fn get_schedule_mut(&mut self, id: u32) -> Option<&mut Schedule> {
        self.schedules.iter_mut().find(|s| s.key.id == id)
    }

    /// highest schedule id currently generated for this route, 0 if none.
    pub fn max_schedule_id(&self) -> u32 {
        self.schedules.iter().map(|s| s.key.id).max().unwrap_or(0)
    }
}
