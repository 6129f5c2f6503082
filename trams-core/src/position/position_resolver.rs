use chrono::NaiveDateTime;

use super::VehiclePosition;
use crate::{
    model::{Schedule, Service},
    time::ClockTime,
};

/// resolves where the vehicle running a schedule is at the simulated
/// `current_date_time`, given its delay. a delayed vehicle is where the
/// schedule says it should have been `delay` minutes ago.
///
/// returns [`VehiclePosition::Depot`] before the first and after the last
/// service of the day.
pub fn resolve_position(
    schedule: &Schedule,
    current_date_time: &NaiveDateTime,
    delay: i32,
) -> VehiclePosition {
    let lookup_time = ClockTime::from_date_time(current_date_time).subtract_minutes(delay);
    match locate(schedule, lookup_time) {
        Some((stop, destination)) => VehiclePosition::Running {
            stop: stop.to_string(),
            destination: destination.to_string(),
            delay,
        },
        None => VehiclePosition::Depot,
    }
}

/// scans the schedule for the stop matching `current`, returning the stop
/// and the destination of the service being run. rules are tried in order at
/// every stop time:
///
///   1. departure equals `current`: at this stop
///   2. arrived but not yet departed: at this stop
///   3. not yet arrived, day already started, not the first stop of the
///      service: at the previous stop of this service
///   4. as 3. but the first stop of a later service: at the last stop of the
///      previous service, heading to this service's destination
///
/// services taken out of service are skipped, and a temporary stop range on
/// a service clamps the reported stop and destination.
pub fn locate(schedule: &Schedule, current: ClockTime) -> Option<(&str, &str)> {
    let started = schedule
        .services
        .first()
        .and_then(|s| s.first_stop())
        .map(|st| st.arrival < current)
        .unwrap_or(false);

    for (i, service) in schedule.services.iter().enumerate() {
        if service.out_of_service {
            continue;
        }
        for (j, stop_time) in service.stop_times.iter().enumerate() {
            if stop_time.departure == current {
                return report(service, j, service);
            }
            if stop_time.arrival <= current && current < stop_time.departure {
                return report(service, j, service);
            }
            let in_transit =
                started && current < stop_time.arrival && current < stop_time.departure;
            if in_transit && j != 0 {
                return report(service, j - 1, service);
            }
            if in_transit && i != 0 {
                let previous = &schedule.services[i - 1];
                if let Some(last) = previous.stop_times.len().checked_sub(1) {
                    return report(previous, last, service);
                }
            }
        }
    }
    None
}

fn report<'a>(at: &'a Service, pos: usize, heading: &'a Service) -> Option<(&'a str, &'a str)> {
    let stop = at.stop_times.get(at.effective_stop_pos(pos))?;
    let destination = heading.destination()?;
    Some((stop.stop.as_str(), destination.stop.as_str()))
}
