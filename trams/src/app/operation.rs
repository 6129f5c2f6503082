use std::path::Path;

use chrono::NaiveDate;
use clap::{value_parser, Subcommand};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use trams_core::{
    model::ScheduleKey,
    position::resolve_position,
    simulation::{apply_operator_action, OperatorAction, SimulationContext},
    time::ClockTime,
};

use super::TramsAppError;
use crate::{
    config::SimulationConfig,
    runtime::{SimulationHandle, Ticker},
    scenario::{Scenario, StopTimeRow},
    store::{GameStore, JsonFileStore},
};

#[derive(Debug, Clone, Serialize, Deserialize, Subcommand)]
pub enum TramsOperation {
    /// generate the schedules of every route for one day and write them as CSV
    Generate {
        /// scenario file (.json or .toml) describing the company
        #[arg(long)]
        scenario_file: String,
        /// trams configuration file (.json or .toml)
        #[arg(long)]
        configuration_file: Option<String>,
        /// day to generate, defaults to the scenario start date
        #[arg(long, value_parser = value_parser!(NaiveDate))]
        date: Option<NaiveDate>,
        #[arg(long)]
        output_file: String,
    },
    /// print where a vehicle on a schedule would be at some time of day
    Position {
        #[arg(long)]
        scenario_file: String,
        #[arg(long)]
        configuration_file: Option<String>,
        #[arg(long)]
        route: String,
        #[arg(long)]
        schedule: u32,
        /// time of day as HH:mm
        #[arg(long)]
        time: String,
        /// minutes the vehicle is running behind
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        delay: i32,
    },
    /// run a fixed number of simulation steps and save the final game
    Simulate {
        #[arg(long)]
        scenario_file: String,
        #[arg(long)]
        configuration_file: Option<String>,
        #[arg(long)]
        steps: usize,
        /// game file (.json) to write
        #[arg(long)]
        output_file: String,
    },
    /// run the simulation in real time for a number of seconds and save the final game
    Run {
        #[arg(long)]
        scenario_file: String,
        #[arg(long)]
        configuration_file: Option<String>,
        #[arg(long)]
        seconds: u64,
        /// game file (.json) to write
        #[arg(long)]
        output_file: String,
    },
    /// apply an operator action to a saved game. with a stop range the
    /// service is shortened, otherwise it is taken out of service.
    Act {
        /// game file (.json) to update
        #[arg(long)]
        game_file: String,
        #[arg(long)]
        route: String,
        #[arg(long)]
        schedule: u32,
        #[arg(long)]
        service: u32,
        #[arg(long, requires = "end_pos")]
        start_pos: Option<usize>,
        #[arg(long, requires = "start_pos")]
        end_pos: Option<usize>,
    },
}

impl TramsOperation {
    pub fn run(&self) -> Result<(), TramsAppError> {
        match self {
            TramsOperation::Generate {
                scenario_file,
                configuration_file,
                date,
                output_file,
            } => {
                let conf = SimulationConfig::from_optional_file(configuration_file)?;
                let context = read_scenario(scenario_file, &conf, *date)?;
                write_schedules(&context, Path::new(output_file))
            }
            TramsOperation::Position {
                scenario_file,
                configuration_file,
                route,
                schedule,
                time,
                delay,
            } => {
                let conf = SimulationConfig::from_optional_file(configuration_file)?;
                let context = read_scenario(scenario_file, &conf, None)?;
                let key = ScheduleKey::new(route, *schedule);
                let schedule = context
                    .schedule(&key)
                    .ok_or_else(|| TramsAppError::ScenarioError(format!("no schedule {key}")))?;
                let time: ClockTime = time.parse()?;
                let now = context
                    .current_date_time
                    .date()
                    .and_hms_opt(time.hour(), time.minute(), 0)
                    .ok_or_else(|| TramsAppError::ScenarioError(format!("invalid time {time}")))?;
                let position = resolve_position(schedule, &now, *delay);
                println!("{key} at {time}: {position}");
                Ok(())
            }
            TramsOperation::Simulate {
                scenario_file,
                configuration_file,
                steps,
                output_file,
            } => {
                let conf = SimulationConfig::from_optional_file(configuration_file)?;
                let context = read_scenario(scenario_file, &conf, None)?;
                let runtime = tokio::runtime::Runtime::new()?;
                let result = runtime.block_on(simulate(context, &conf, *steps))?;
                JsonFileStore::new(output_file).save(&result)?;
                Ok(())
            }
            TramsOperation::Run {
                scenario_file,
                configuration_file,
                seconds,
                output_file,
            } => {
                let conf = SimulationConfig::from_optional_file(configuration_file)?;
                let context = read_scenario(scenario_file, &conf, None)?;
                let runtime = tokio::runtime::Runtime::new()?;
                let result = runtime.block_on(run_live(context, &conf, *seconds))?;
                JsonFileStore::new(output_file).save(&result)?;
                Ok(())
            }
            TramsOperation::Act {
                game_file,
                route,
                schedule,
                service,
                start_pos,
                end_pos,
            } => {
                let store = JsonFileStore::new(game_file);
                let mut context = store.load()?;
                let schedule = ScheduleKey::new(route, *schedule);
                let action = match (start_pos, end_pos) {
                    (Some(start_pos), Some(end_pos)) => OperatorAction::ShortenService {
                        schedule,
                        service_id: *service,
                        start_pos: *start_pos,
                        end_pos: *end_pos,
                    },
                    _ => OperatorAction::OutOfService {
                        schedule,
                        service_id: *service,
                    },
                };
                let outcome = apply_operator_action(&mut context, &action)?;
                println!(
                    "delay reduced by {} min, passenger satisfaction {:.1}%, vehicle at {}",
                    outcome.delay_reduction, outcome.passenger_satisfaction, outcome.position
                );
                store.save(&context)?;
                Ok(())
            }
        }
    }
}

fn read_scenario(
    scenario_file: &String,
    conf: &SimulationConfig,
    date: Option<NaiveDate>,
) -> Result<SimulationContext, TramsAppError> {
    log::info!("reading scenario from {scenario_file}");
    let scenario = Scenario::try_from(scenario_file)?;
    scenario.create_context(conf.policy.clone(), date)
}

fn write_schedules(context: &SimulationContext, output_file: &Path) -> Result<(), TramsAppError> {
    let mut writer = csv::Writer::from_path(output_file)?;
    let rows = context
        .routes
        .iter()
        .flat_map(|r| r.schedules.iter())
        .flat_map(StopTimeRow::from_schedule)
        .collect_vec();
    for row in rows.iter() {
        writer.serialize(row)?;
    }
    writer.flush()?;
    log::info!(
        "wrote {} stop times for {} on {} to {:?}",
        rows.len(),
        context.company_name,
        context.current_date_time.date(),
        output_file
    );
    Ok(())
}

/// runs `steps` explicit steps through the simulation task.
async fn simulate(
    context: SimulationContext,
    conf: &SimulationConfig,
    steps: usize,
) -> Result<SimulationContext, TramsAppError> {
    let handle = SimulationHandle::spawn(context, conf.build_rng());
    for _ in 0..steps {
        let report = handle.step().await?;
        if let Some(event) = report.disruption {
            println!("{} {event}", report.current_date_time);
        }
    }
    Ok(handle.dispose().await?)
}

/// ticks the simulation in real time for `seconds`, then cancels the ticker
/// before disposing of the simulation.
async fn run_live(
    context: SimulationContext,
    conf: &SimulationConfig,
    seconds: u64,
) -> Result<SimulationContext, TramsAppError> {
    let handle = SimulationHandle::spawn(context, conf.build_rng());
    let ticker = Ticker::start(handle.clone(), conf.tick_interval());
    tokio::time::sleep(std::time::Duration::from_secs(seconds)).await;
    let steps = ticker.stop().await;
    log::info!("simulation ran {steps} steps");
    Ok(handle.dispose().await?)
}
