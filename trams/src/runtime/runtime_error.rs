use trams_core::simulation::SimulationError;

#[derive(thiserror::Error, Debug)]
pub enum RuntimeError {
    #[error("the simulation has already been disposed")]
    Disposed,
    #[error(transparent)]
    SimulationError(#[from] SimulationError),
}
