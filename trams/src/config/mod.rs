pub mod config_ops;
mod simulation_config;

pub use simulation_config::SimulationConfig;
