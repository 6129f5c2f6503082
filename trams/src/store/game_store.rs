use trams_core::simulation::SimulationContext;

use super::StoreError;

/// persistence of a game. a failed save or load leaves the in-memory game
/// untouched.
pub trait GameStore {
    fn save(&self, context: &SimulationContext) -> Result<(), StoreError>;
    fn load(&self) -> Result<SimulationContext, StoreError>;
}
