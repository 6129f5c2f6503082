use tokio::sync::oneshot;
use trams_core::{
    model::{Allocation, ScheduleKey},
    position::VehiclePosition,
    simulation::{ActionOutcome, OperatorAction, SimulationContext, SimulationError, StepReport},
};

type Reply<T> = oneshot::Sender<T>;

/// requests handled by the task owning the simulation, each answered on its
/// own reply channel.
pub enum SimulationCommand {
    Step {
        reply: Reply<Result<StepReport, SimulationError>>,
    },
    Assign {
        key: ScheduleKey,
        fleet_number: String,
        reply: Reply<Result<(), SimulationError>>,
    },
    Unassign {
        key: ScheduleKey,
        reply: Reply<Option<Allocation>>,
    },
    Position {
        key: ScheduleKey,
        reply: Reply<VehiclePosition>,
    },
    Act {
        action: OperatorAction,
        reply: Reply<Result<ActionOutcome, SimulationError>>,
    },
    Snapshot {
        reply: Reply<SimulationContext>,
    },
    /// stops the simulation and hands back its final state.
    Dispose {
        reply: Reply<SimulationContext>,
    },
}
