mod disruption;
mod operator_action;
mod simulation_context;
mod simulation_error;
mod simulation_policy;
mod simulation_step;

#[cfg(test)]
pub(crate) mod fixture;

pub use disruption::{apply_random_disruption, DisruptionDice, DisruptionEvent};
pub use operator_action::{apply_operator_action, ActionOutcome, OperatorAction};
pub use simulation_context::SimulationContext;
pub use simulation_error::SimulationError;
pub use simulation_policy::SimulationPolicy;
pub use simulation_step::{simulation_step, StepReport};
