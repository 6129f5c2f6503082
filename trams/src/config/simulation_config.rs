use std::time::Duration;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use trams_core::simulation::SimulationPolicy;

use super::config_ops;
use crate::app::TramsAppError;

/// defines how a game is run by the command line tool
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    /// wall-clock seconds between simulation steps when running live
    pub tick_interval_secs: u64,
    /// seed for the disruption dice. a random seed is drawn when missing.
    pub seed: Option<u64>,
    pub policy: SimulationPolicy,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_interval_secs: 10,
            seed: None,
            policy: SimulationPolicy::default(),
        }
    }
}

impl SimulationConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(self.tick_interval_secs.max(1))
    }

    pub fn build_rng(&self) -> ChaCha8Rng {
        let seed = self.seed.unwrap_or_else(|| rand::rng().random());
        log::debug!("disruption dice seeded with {seed}");
        ChaCha8Rng::seed_from_u64(seed)
    }

    /// reads the configuration file if one was given.
    pub fn from_optional_file(f: &Option<String>) -> Result<Self, TramsAppError> {
        match f {
            None => Ok(SimulationConfig::default()),
            Some(f) => {
                log::info!("reading trams configuration from {f}");
                SimulationConfig::try_from(f)
            }
        }
    }
}

impl TryFrom<&String> for SimulationConfig {
    type Error = TramsAppError;

    fn try_from(f: &String) -> Result<Self, Self::Error> {
        config_ops::read_config_file(f)
    }
}
