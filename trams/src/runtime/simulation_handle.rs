use tokio::sync::{mpsc, oneshot};
use trams_core::{
    model::{Allocation, ScheduleKey},
    position::VehiclePosition,
    simulation::{
        apply_operator_action, simulation_step, ActionOutcome, DisruptionDice, OperatorAction,
        SimulationContext, StepReport,
    },
};

use super::{RuntimeError, SimulationCommand};

const COMMAND_BUFFER_SIZE: usize = 64;

/// cloneable access to a simulation owned by a single tokio task. every read
/// and write is serialized through that task.
#[derive(Clone)]
pub struct SimulationHandle {
    sender: mpsc::Sender<SimulationCommand>,
}

impl SimulationHandle {
    /// moves the game into a new task on the current tokio runtime.
    pub fn spawn<D>(context: SimulationContext, dice: D) -> SimulationHandle
    where
        D: DisruptionDice + Send + 'static,
    {
        let (sender, receiver) = mpsc::channel(COMMAND_BUFFER_SIZE);
        tokio::spawn(run_simulation(context, dice, receiver));
        SimulationHandle { sender }
    }

    pub async fn step(&self) -> Result<StepReport, RuntimeError> {
        let report = self
            .request(|reply| SimulationCommand::Step { reply })
            .await??;
        Ok(report)
    }

    pub async fn assign(&self, key: ScheduleKey, fleet_number: &str) -> Result<(), RuntimeError> {
        let fleet_number = fleet_number.to_string();
        self.request(|reply| SimulationCommand::Assign {
            key,
            fleet_number,
            reply,
        })
        .await??;
        Ok(())
    }

    pub async fn unassign(&self, key: ScheduleKey) -> Result<Option<Allocation>, RuntimeError> {
        self.request(|reply| SimulationCommand::Unassign { key, reply })
            .await
    }

    pub async fn position(&self, key: ScheduleKey) -> Result<VehiclePosition, RuntimeError> {
        self.request(|reply| SimulationCommand::Position { key, reply })
            .await
    }

    pub async fn act(&self, action: OperatorAction) -> Result<ActionOutcome, RuntimeError> {
        let outcome = self
            .request(|reply| SimulationCommand::Act { action, reply })
            .await??;
        Ok(outcome)
    }

    /// a copy of the current game state.
    pub async fn snapshot(&self) -> Result<SimulationContext, RuntimeError> {
        self.request(|reply| SimulationCommand::Snapshot { reply })
            .await
    }

    /// ends the simulation task. commands sent through other clones of this
    /// handle afterwards fail with [`RuntimeError::Disposed`].
    pub async fn dispose(self) -> Result<SimulationContext, RuntimeError> {
        self.request(|reply| SimulationCommand::Dispose { reply })
            .await
    }

    async fn request<T>(
        &self,
        command: impl FnOnce(oneshot::Sender<T>) -> SimulationCommand,
    ) -> Result<T, RuntimeError> {
        let (reply, response) = oneshot::channel();
        self.sender
            .send(command(reply))
            .await
            .map_err(|_| RuntimeError::Disposed)?;
        response.await.map_err(|_| RuntimeError::Disposed)
    }
}

async fn run_simulation<D: DisruptionDice>(
    mut context: SimulationContext,
    mut dice: D,
    mut receiver: mpsc::Receiver<SimulationCommand>,
) {
    log::debug!("simulation of '{}' started", context.company_name);
    while let Some(command) = receiver.recv().await {
        match command {
            SimulationCommand::Step { reply } => {
                let _ = reply.send(simulation_step(&mut context, &mut dice));
            }
            SimulationCommand::Assign {
                key,
                fleet_number,
                reply,
            } => {
                let _ = reply.send(context.assign(key, &fleet_number));
            }
            SimulationCommand::Unassign { key, reply } => {
                let _ = reply.send(context.unassign(&key));
            }
            SimulationCommand::Position { key, reply } => {
                let _ = reply.send(context.position_of(&key));
            }
            SimulationCommand::Act { action, reply } => {
                let _ = reply.send(apply_operator_action(&mut context, &action));
            }
            SimulationCommand::Snapshot { reply } => {
                let _ = reply.send(context.clone());
            }
            SimulationCommand::Dispose { reply } => {
                receiver.close();
                log::debug!("simulation of '{}' disposed", context.company_name);
                let _ = reply.send(context);
                return;
            }
        }
    }
    log::debug!("all simulation handles dropped, simulation stopped");
}
