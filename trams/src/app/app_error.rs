use thiserror::Error;
use trams_core::{model::ModelError, simulation::SimulationError, time::TimeError};

use crate::{runtime::RuntimeError, store::StoreError};

#[derive(Error, Debug)]
pub enum TramsAppError {
    #[error("failure reading run configuration: {0}")]
    ConfigurationError(String),
    #[error("invalid scenario: {0}")]
    ScenarioError(String),
    #[error("invalid stop distances: {source}")]
    ModelError {
        #[from]
        source: ModelError,
    },
    #[error("invalid time argument: {source}")]
    TimeError {
        #[from]
        source: TimeError,
    },
    #[error(transparent)]
    SimulationError(#[from] SimulationError),
    #[error(transparent)]
    RuntimeError(#[from] RuntimeError),
    #[error(transparent)]
    StoreError(#[from] StoreError),
    #[error("failure writing CSV: {source}")]
    CsvError {
        #[from]
        source: csv::Error,
    },
    #[error("failure starting async runtime: {source}")]
    StdIoError {
        #[from]
        source: std::io::Error,
    },
}
