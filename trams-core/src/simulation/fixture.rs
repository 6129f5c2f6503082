use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};

use super::{SimulationContext, SimulationPolicy};
use crate::{
    model::{FrequencyPattern, Route, StopDistanceTable, Timetable, Vehicle},
    time::ClockTime,
};

pub fn date_time(date: (i32, u32, u32), time: &str) -> NaiveDateTime {
    let time = ClockTime::from_str(time).unwrap();
    NaiveDate::from_ymd_opt(date.0, date.1, date.2)
        .unwrap()
        .and_hms_opt(time.hour(), time.minute(), 0)
        .unwrap()
}

fn route(
    number: &str,
    stops: &[&str],
    end_stop: &str,
    start: &str,
    end: &str,
    frequency: u32,
) -> Route {
    Route {
        route_number: number.to_string(),
        start_stop: String::from("Airport"),
        end_stop: end_stop.to_string(),
        stops: stops.iter().map(|s| s.to_string()).collect(),
        timetables: vec![Timetable {
            name: String::from("2024"),
            valid_from_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            valid_to_date: NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
            frequency_patterns: vec![FrequencyPattern {
                name: String::from("weekday"),
                days_of_operation: vec![],
                start_stop: String::from("Airport"),
                end_stop: end_stop.to_string(),
                start_time: ClockTime::from_str(start).unwrap(),
                end_time: ClockTime::from_str(end).unwrap(),
                frequency_in_minutes: frequency,
            }],
        }],
        schedules: vec![],
    }
}

/// route 1 Airport - Town Park (30 min, schedules 1 and 2 from 06:00) and
/// route 2 Airport - Harbour (15 min, schedules 1 and 2 from 07:00), route 3
/// Airport - Harbour - Town Park (schedule 1 from 09:00), five
/// vehicles 101 to 105, clock at 2024-05-06 06:35.
pub fn context() -> SimulationContext {
    let table =
        StopDistanceTable::from_tokens(&["Airport:0:0", "Harbour:15:20", "Town Park:30:40"])
            .unwrap();
    let vehicles = ["101", "102", "103", "104", "105"]
        .iter()
        .map(|f| Vehicle::new(f))
        .collect();
    SimulationContext::create(
        "Test Transport",
        date_time((2024, 5, 6), "06:35"),
        table,
        vec![
            route("1", &[], "Town Park", "06:00", "07:00", 30),
            route("2", &[], "Harbour", "07:00", "08:00", 15),
            route("3", &["Harbour"], "Town Park", "09:00", "10:00", 60),
        ],
        vehicles,
        SimulationPolicy::default(),
    )
    .unwrap()
}
