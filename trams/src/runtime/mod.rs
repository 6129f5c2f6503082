mod runtime_error;
mod simulation_command;
mod simulation_handle;
mod ticker;

pub use runtime_error::RuntimeError;
pub use simulation_command::SimulationCommand;
pub use simulation_handle::SimulationHandle;
pub use ticker::Ticker;
