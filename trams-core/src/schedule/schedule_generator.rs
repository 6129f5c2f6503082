use chrono::{Datelike, NaiveDate};
use itertools::Itertools;

use super::{
    generator_ops::{cumulative_offsets, round_trip_duration, tour_count},
    schedule_error::ScheduleError,
    schedule_id_sequence::ScheduleIdSequence,
};
use crate::{
    model::{
        DistanceProfile, FrequencyPattern, Route, Schedule, ScheduleKey, Service, StopDistanceTable,
        StopTime,
    },
    time::ClockTime,
};

/// expands frequency patterns into schedules of alternating outward and
/// return services.
#[derive(Clone, Debug)]
pub struct ScheduleGenerator {
    /// patterns starting at or after this time use evening distances.
    pub evening_start: ClockTime,
}

/// the stops and per-stop offsets of one direction of travel.
struct Leg {
    stops: Vec<String>,
    segments: Vec<i32>,
    offsets: Vec<u32>,
}

impl ScheduleGenerator {
    pub fn new(evening_start: ClockTime) -> ScheduleGenerator {
        ScheduleGenerator { evening_start }
    }

    pub fn profile_for(&self, pattern: &FrequencyPattern) -> DistanceProfile {
        if pattern.start_time >= self.evening_start {
            DistanceProfile::Evening
        } else {
            DistanceProfile::Daytime
        }
    }

    /// builds every schedule for a route on a given date, using the route's
    /// active timetable and the patterns that operate on that weekday. schedule
    /// ids are numbered from 1 across all patterns.
    pub fn generate_for_date(
        &self,
        route: &Route,
        table: &StopDistanceTable,
        date: &NaiveDate,
    ) -> Result<Vec<Schedule>, ScheduleError> {
        let timetable = match route.active_timetable(date) {
            Some(t) => t,
            None => {
                log::warn!(
                    "route {} has no timetable valid on {date}, no schedules generated",
                    route.route_number
                );
                return Ok(vec![]);
            }
        };
        let mut ids = ScheduleIdSequence::default();
        let mut schedules = vec![];
        for pattern in timetable
            .frequency_patterns
            .iter()
            .filter(|p| p.operates_on(date.weekday()))
        {
            let generated = self.generate_pattern(route, table, pattern, &mut ids)?;
            schedules.extend(generated);
        }
        log::debug!(
            "generated {} schedules for route {} on {date} from timetable '{}'",
            schedules.len(),
            route.route_number,
            timetable.name
        );
        Ok(schedules)
    }

    /// builds the schedules for a single frequency pattern. the pattern is
    /// validated before anything is generated.
    pub fn generate_pattern(
        &self,
        route: &Route,
        table: &StopDistanceTable,
        pattern: &FrequencyPattern,
        ids: &mut ScheduleIdSequence,
    ) -> Result<Vec<Schedule>, ScheduleError> {
        if pattern.end_time <= pattern.start_time {
            return Err(ScheduleError::InvalidOperatingWindow {
                pattern: pattern.name.clone(),
                start: pattern.start_time,
                end: pattern.end_time,
            });
        }
        let frequency = pattern.frequency_in_minutes;
        let profile = self.profile_for(pattern);
        let outward = self.leg(route, table, &pattern.start_stop, &pattern.end_stop, profile)?;
        let inward = self.leg(route, table, &pattern.end_stop, &pattern.start_stop, profile)?;

        let duration = round_trip_duration(&outward.segments);
        let tours = tour_count(duration, frequency)
            .ok_or_else(|| ScheduleError::InvalidFrequency(pattern.name.clone()))?;
        if duration == 0 {
            return Err(ScheduleError::DegenerateDistance(pattern.name.clone()));
        }
        let half = duration / 2;

        let mut schedules = vec![];
        for tour in 0..tours {
            let tour_start = pattern.start_time.checked_add_minutes(tour * frequency);
            let mut clock = match tour_start {
                Some(start) if start < pattern.end_time => start,
                _ => {
                    log::debug!(
                        "pattern '{}' tour {tour} starts after the operating window, skipped",
                        pattern.name
                    );
                    continue;
                }
            };
            let mut services = vec![];
            while clock < pattern.end_time {
                let next_id = services.len() as u32;
                services.push(build_service(next_id, &outward, clock, &pattern.name)?);
                clock = advance(clock, half, &pattern.name)?;
                let next_id = services.len() as u32;
                services.push(build_service(next_id, &inward, clock, &pattern.name)?);
                clock = advance(clock, half, &pattern.name)?;
            }
            let key = ScheduleKey::new(&route.route_number, ids.next_id());
            schedules.push(Schedule::new(key, services));
        }
        log::debug!(
            "pattern '{}' on route {}: round trip {duration} minutes, {} tours",
            pattern.name,
            route.route_number,
            schedules.len()
        );
        Ok(schedules)
    }

    fn leg(
        &self,
        route: &Route,
        table: &StopDistanceTable,
        from: &str,
        to: &str,
        profile: DistanceProfile,
    ) -> Result<Leg, ScheduleError> {
        let stops =
            route
                .stops_between(from, to)
                .ok_or_else(|| ScheduleError::UnknownStop {
                    route_number: route.route_number.clone(),
                    from: from.to_string(),
                    to: to.to_string(),
                })?;
        let segments = stops
            .iter()
            .tuple_windows()
            .map(|(a, b)| {
                table.distance(a, b, profile).ok_or_else(|| {
                    let missing = if table.contains(a) { b } else { a };
                    ScheduleError::MissingStopDistance(missing.clone())
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let offsets = cumulative_offsets(&segments);
        Ok(Leg {
            stops,
            segments,
            offsets,
        })
    }
}

/// a service departing the first stop of the leg at `start`, reaching every
/// following stop after its cumulative travel time.
fn build_service(
    id: u32,
    leg: &Leg,
    start: ClockTime,
    pattern_name: &str,
) -> Result<Service, ScheduleError> {
    let stop_times = leg
        .stops
        .iter()
        .zip(leg.offsets.iter())
        .map(|(stop, offset)| {
            let time = advance(start, *offset, pattern_name)?;
            Ok(StopTime::passing(stop, time))
        })
        .collect::<Result<Vec<_>, ScheduleError>>()?;
    Ok(Service::new(id, stop_times))
}

fn advance(time: ClockTime, minutes: u32, pattern_name: &str) -> Result<ClockTime, ScheduleError> {
    time.checked_add_minutes(minutes)
        .ok_or_else(|| ScheduleError::CrossesMidnight(pattern_name.to_string()))
}
