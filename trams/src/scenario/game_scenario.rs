use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use trams_core::{
    model::{Allocation, Route, StopDistanceTable, Vehicle},
    simulation::{SimulationContext, SimulationPolicy},
};

use crate::{app::TramsAppError, config::config_ops};

/// the starting point of a new game: a company, its network and fleet.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Scenario {
    pub company_name: String,
    pub start_date_time: NaiveDateTime,
    #[serde(default)]
    pub balance: f64,
    /// `name:daytime:evening` records, one per stop
    pub stop_distances: Vec<String>,
    pub routes: Vec<Route>,
    #[serde(default)]
    pub vehicles: Vec<Vehicle>,
    /// vehicles already bound to schedules when the game starts
    #[serde(default)]
    pub allocations: Vec<Allocation>,
}

impl Scenario {
    /// creates the game described by this scenario. when `date` is given the
    /// game starts on that date at the scenario's time of day.
    pub fn create_context(
        &self,
        policy: SimulationPolicy,
        date: Option<NaiveDate>,
    ) -> Result<SimulationContext, TramsAppError> {
        if self.routes.is_empty() {
            return Err(TramsAppError::ScenarioError(format!(
                "scenario for '{}' has no routes",
                self.company_name
            )));
        }
        let table = StopDistanceTable::from_tokens(self.stop_distances.as_slice())?;
        let start = match date {
            Some(d) => d.and_time(self.start_date_time.time()),
            None => self.start_date_time,
        };
        let mut context = SimulationContext::create(
            &self.company_name,
            start,
            table,
            self.routes.clone(),
            self.vehicles.clone(),
            policy,
        )?;
        context.balance = self.balance;
        for allocation in self.allocations.iter() {
            context.assign(allocation.schedule.clone(), &allocation.fleet_number)?;
        }
        log::info!(
            "created game for '{}' on {} with {} routes, {} vehicles and {} allocations",
            context.company_name,
            context.current_date_time,
            context.routes.len(),
            context.vehicles.len(),
            context.allocations.len()
        );
        Ok(context)
    }
}

impl TryFrom<&String> for Scenario {
    type Error = TramsAppError;

    fn try_from(f: &String) -> Result<Self, Self::Error> {
        config_ops::read_config_file(f)
    }
}
