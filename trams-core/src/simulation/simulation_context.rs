use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::{SimulationError, SimulationPolicy};
use crate::{
    model::{
        AdditionalTour, Allocation, Route, Schedule, ScheduleKey, StopDistanceTable, Vehicle,
    },
    position::{resolve_position, VehiclePosition},
};

pub const INITIAL_SATISFACTION: f64 = 100.0;
pub const MIN_SATISFACTION: f64 = 0.0;
pub const MAX_SATISFACTION: f64 = 100.0;

/// the complete state of one game. all simulation operations take the context
/// explicitly, and a single owner applies every mutation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationContext {
    pub company_name: String,
    pub current_date_time: NaiveDateTime,
    /// percentage in [0, 100]
    pub passenger_satisfaction: f64,
    #[serde(default)]
    pub balance: f64,
    pub stop_distances: StopDistanceTable,
    pub routes: Vec<Route>,
    pub vehicles: Vec<Vehicle>,
    #[serde(default)]
    pub allocations: Vec<Allocation>,
    #[serde(default)]
    pub additional_tours: Vec<AdditionalTour>,
    #[serde(default)]
    pub policy: SimulationPolicy,
}

impl SimulationContext {
    /// starts a new game and generates the schedules of its first day.
    pub fn create(
        company_name: &str,
        start_date_time: NaiveDateTime,
        stop_distances: StopDistanceTable,
        routes: Vec<Route>,
        vehicles: Vec<Vehicle>,
        policy: SimulationPolicy,
    ) -> Result<SimulationContext, SimulationError> {
        let mut context = SimulationContext {
            company_name: company_name.to_string(),
            current_date_time: start_date_time,
            passenger_satisfaction: INITIAL_SATISFACTION,
            balance: 0.0,
            stop_distances,
            routes,
            vehicles,
            allocations: vec![],
            additional_tours: vec![],
            policy,
        };
        context.regenerate_schedules()?;
        Ok(context)
    }

    /// replaces every route's schedules with those of the current simulated
    /// date. allocations to schedules that no longer exist are released.
    /// returns the number of schedules generated. if any route fails to
    /// generate, no route or allocation is changed.
    pub fn regenerate_schedules(&mut self) -> Result<usize, SimulationError> {
        let generator = self.policy.generator();
        let date = self.current_date_time.date();
        let staged = self
            .routes
            .iter()
            .map(|route| generator.generate_for_date(route, &self.stop_distances, &date))
            .collect::<Result<Vec<_>, _>>()?;
        let mut count = 0;
        for (route, schedules) in self.routes.iter_mut().zip(staged) {
            count += schedules.len();
            route.schedules = schedules;
        }
        let before = self.allocations.len();
        let routes = &self.routes;
        self.allocations.retain(|a| {
            routes
                .iter()
                .find(|r| r.route_number == a.schedule.route_number)
                .and_then(|r| r.get_schedule(a.schedule.id))
                .is_some()
        });
        if self.allocations.len() < before {
            log::warn!(
                "released {} allocations to schedules not running on {date}",
                before - self.allocations.len()
            );
        }
        Ok(count)
    }

    pub fn route(&self, route_number: &str) -> Option<&Route> {
        self.routes.iter().find(|r| r.route_number == route_number)
    }

    pub fn schedule(&self, key: &ScheduleKey) -> Option<&Schedule> {
        self.route(&key.route_number)
            .and_then(|r| r.get_schedule(key.id))
    }

    pub fn schedule_mut(&mut self, key: &ScheduleKey) -> Option<&mut Schedule> {
        self.routes
            .iter_mut()
            .find(|r| r.route_number == key.route_number)
            .and_then(|r| r.get_schedule_mut(key.id))
    }

    pub fn vehicle(&self, fleet_number: &str) -> Option<&Vehicle> {
        self.vehicles.iter().find(|v| v.fleet_number == fleet_number)
    }

    pub fn vehicle_mut(&mut self, fleet_number: &str) -> Option<&mut Vehicle> {
        self.vehicles
            .iter_mut()
            .find(|v| v.fleet_number == fleet_number)
    }

    pub fn allocation_for(&self, key: &ScheduleKey) -> Option<&Allocation> {
        self.allocations.iter().find(|a| &a.schedule == key)
    }

    /// binds a vehicle to a schedule. a schedule carries at most one vehicle.
    pub fn assign(&mut self, key: ScheduleKey, fleet_number: &str) -> Result<(), SimulationError> {
        if self.route(&key.route_number).is_none() {
            return Err(SimulationError::UnknownRoute(key.route_number));
        }
        if self.schedule(&key).is_none() {
            return Err(SimulationError::UnknownSchedule(key));
        }
        if self.vehicle(fleet_number).is_none() {
            return Err(SimulationError::UnknownVehicle(fleet_number.to_string()));
        }
        if let Some(existing) = self.allocation_for(&key) {
            return Err(SimulationError::AlreadyAssigned {
                schedule: key,
                fleet_number: existing.fleet_number.clone(),
            });
        }
        log::debug!("assigned vehicle {fleet_number} to schedule {key}");
        self.allocations.push(Allocation::new(key, fleet_number));
        Ok(())
    }

    /// releases a schedule, returning its vehicle to the depot.
    pub fn unassign(&mut self, key: &ScheduleKey) -> Option<Allocation> {
        let index = self.allocations.iter().position(|a| &a.schedule == key)?;
        Some(self.allocations.remove(index))
    }

    /// where the vehicle running a schedule is right now. unassigned or
    /// unknown schedules are in the depot.
    pub fn position_of(&self, key: &ScheduleKey) -> VehiclePosition {
        let delay = match self
            .allocation_for(key)
            .and_then(|a| self.vehicle(&a.fleet_number))
        {
            Some(vehicle) => vehicle.delay,
            None => return VehiclePosition::Depot,
        };
        match self.schedule(key) {
            Some(schedule) => resolve_position(schedule, &self.current_date_time, delay),
            None => VehiclePosition::Depot,
        }
    }

    /// the tour number an extra tour on this route would get: the highest
    /// generated schedule id plus the extra tours already added, plus one.
    pub fn next_tour_number(&self, route_number: &str) -> u32 {
        let max_id = self.route(route_number).map(|r| r.max_schedule_id()).unwrap_or(0);
        let added = self
            .additional_tours
            .iter()
            .filter(|t| t.key.route_number == route_number)
            .count() as u32;
        max_id + added + 1
    }

    pub fn add_additional_tour(&mut self, route_number: &str) -> ScheduleKey {
        let key = ScheduleKey::new(route_number, self.next_tour_number(route_number));
        self.additional_tours
            .push(AdditionalTour { key: key.clone() });
        key
    }

    /// moves the simulated clock forward, returning true when the date changed.
    pub fn advance_clock(&mut self, minutes: u32) -> bool {
        let previous = self.current_date_time.date();
        self.current_date_time += Duration::minutes(minutes as i64);
        self.current_date_time.date() != previous
    }

    /// applies a change in percentage points, clamped to [0, 100]. returns the
    /// new satisfaction.
    pub fn adjust_satisfaction(&mut self, change: f64) -> f64 {
        self.passenger_satisfaction =
            (self.passenger_satisfaction + change).clamp(MIN_SATISFACTION, MAX_SATISFACTION);
        self.passenger_satisfaction
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        schedule::ScheduleError,
        simulation::fixture::{context, date_time},
    };

    #[test]
    fn test_create_generates_first_day() {
        let ctx = context();
        assert_eq!(ctx.route("1").unwrap().schedules.len(), 2);
        assert_eq!(ctx.route("2").unwrap().schedules.len(), 2);
        assert_eq!(ctx.route("3").unwrap().schedules.len(), 1);
        assert_eq!(ctx.passenger_satisfaction, INITIAL_SATISFACTION);
        assert!(ctx.allocations.is_empty());
    }

    #[test]
    fn test_unassigned_schedule_is_always_in_depot() {
        let mut ctx = context();
        let key = ScheduleKey::new("1", 1);
        for time in ["05:00", "06:00", "06:20", "06:45", "07:00", "23:00"] {
            ctx.current_date_time = date_time((2024, 5, 6), time);
            assert!(ctx.position_of(&key).is_depot());
        }
    }

    #[test]
    fn test_assigned_schedule_reports_delayed_position() {
        let mut ctx = context();
        let key = ScheduleKey::new("1", 1);
        ctx.assign(key.clone(), "101").unwrap();
        ctx.vehicle_mut("101").unwrap().delay = 10;
        let position = ctx.position_of(&key);
        assert_eq!(position.stop(), "Airport");
        assert_eq!(position.destination(), "Town Park");
        assert_eq!(position.delay(), 10);
    }

    #[test]
    fn test_unassign_returns_vehicle_to_depot() {
        let mut ctx = context();
        let key = ScheduleKey::new("1", 1);
        ctx.assign(key.clone(), "101").unwrap();
        assert!(!ctx.position_of(&key).is_depot());
        let removed = ctx.unassign(&key).unwrap();
        assert_eq!(removed.fleet_number, "101");
        assert!(ctx.position_of(&key).is_depot());
        assert!(ctx.unassign(&key).is_none());
    }

    #[test]
    fn test_schedule_takes_one_vehicle() {
        let mut ctx = context();
        let key = ScheduleKey::new("1", 1);
        ctx.assign(key.clone(), "101").unwrap();
        let result = ctx.assign(key.clone(), "102");
        assert_eq!(
            result,
            Err(SimulationError::AlreadyAssigned {
                schedule: key,
                fleet_number: String::from("101"),
            })
        );
        assert_eq!(ctx.allocations.len(), 1);
    }

    #[test]
    fn test_assign_rejects_unknown_references() {
        let mut ctx = context();
        assert_eq!(
            ctx.assign(ScheduleKey::new("9", 1), "101"),
            Err(SimulationError::UnknownRoute(String::from("9")))
        );
        assert_eq!(
            ctx.assign(ScheduleKey::new("1", 7), "101"),
            Err(SimulationError::UnknownSchedule(ScheduleKey::new("1", 7)))
        );
        assert_eq!(
            ctx.assign(ScheduleKey::new("1", 1), "999"),
            Err(SimulationError::UnknownVehicle(String::from("999")))
        );
    }

    #[test]
    fn test_unknown_schedule_position_is_depot() {
        let ctx = context();
        assert!(ctx.position_of(&ScheduleKey::new("9", 1)).is_depot());
        assert!(ctx.position_of(&ScheduleKey::new("1", 42)).is_depot());
    }

    #[test]
    fn test_next_tour_number_counts_additional_tours() {
        let mut ctx = context();
        assert_eq!(ctx.next_tour_number("1"), 3);
        assert_eq!(ctx.add_additional_tour("1"), ScheduleKey::new("1", 3));
        assert_eq!(ctx.next_tour_number("1"), 4);
        assert_eq!(ctx.next_tour_number("2"), 3);
        assert_eq!(ctx.next_tour_number("unknown"), 1);
    }

    #[test]
    fn test_advance_clock_reports_date_change() {
        let mut ctx = context();
        ctx.current_date_time = date_time((2024, 5, 6), "23:58");
        assert!(!ctx.advance_clock(1));
        assert!(ctx.advance_clock(1));
        assert_eq!(ctx.current_date_time, date_time((2024, 5, 7), "00:00"));
    }

    #[test]
    fn test_satisfaction_is_clamped() {
        let mut ctx = context();
        assert_eq!(ctx.adjust_satisfaction(10.0), 100.0);
        assert_eq!(ctx.adjust_satisfaction(-30.0), 70.0);
        assert_eq!(ctx.adjust_satisfaction(-500.0), 0.0);
    }

    #[test]
    fn test_failed_regeneration_changes_nothing() {
        let mut ctx = context();
        ctx.assign(ScheduleKey::new("1", 2), "101").unwrap();
        ctx.routes[0].timetables[0].frequency_patterns[0].frequency_in_minutes = 60;
        ctx.routes[1].timetables[0].frequency_patterns[0].frequency_in_minutes = 0;
        let before = ctx.clone();
        let result = ctx.regenerate_schedules();
        assert!(matches!(
            result,
            Err(SimulationError::Schedule(ScheduleError::InvalidFrequency(_)))
        ));
        assert_eq!(ctx, before);
        assert!(ctx.schedule(&ScheduleKey::new("1", 2)).is_some());
        assert!(ctx.allocation_for(&ScheduleKey::new("1", 2)).is_some());
    }

    #[test]
    fn test_regenerate_releases_stale_allocations() {
        let mut ctx = context();
        ctx.assign(ScheduleKey::new("1", 2), "101").unwrap();
        ctx.assign(ScheduleKey::new("2", 1), "102").unwrap();
        ctx.routes[0].timetables[0].frequency_patterns[0].frequency_in_minutes = 60;
        let count = ctx.regenerate_schedules().unwrap();
        assert_eq!(count, 4);
        assert_eq!(
            ctx.allocations,
            vec![Allocation::new(ScheduleKey::new("2", 1), "102")]
        );
    }
}
