use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{apply_random_disruption, DisruptionDice, DisruptionEvent, SimulationContext, SimulationError};

/// what happened during one simulation step.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StepReport {
    pub current_date_time: NaiveDateTime,
    /// true when a new day started and schedules were rebuilt
    pub regenerated: bool,
    pub disruption: Option<DisruptionEvent>,
}

/// advances the game by one tick: moves the clock, rebuilds schedules on a
/// new day, then disrupts once if more than the threshold of allocations
/// exist. when the new day's schedules cannot be built the clock is put back
/// and the game is left as it was.
pub fn simulation_step<D: DisruptionDice + ?Sized>(
    context: &mut SimulationContext,
    dice: &mut D,
) -> Result<StepReport, SimulationError> {
    let previous = context.current_date_time;
    let new_day = context.advance_clock(context.policy.minutes_per_tick);
    if new_day {
        match context.regenerate_schedules() {
            Ok(count) => log::info!(
                "new day {}, generated {count} schedules",
                context.current_date_time.date()
            ),
            Err(e) => {
                log::warn!(
                    "schedules for {} could not be generated, clock stays at {previous}: {e}",
                    context.current_date_time.date()
                );
                context.current_date_time = previous;
                return Err(e);
            }
        }
    }
    let disruption = if context.allocations.len() > context.policy.disruption_threshold {
        apply_random_disruption(context, dice)
    } else {
        None
    };
    Ok(StepReport {
        current_date_time: context.current_date_time,
        regenerated: new_day,
        disruption,
    })
}
