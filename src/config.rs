//! Simulation settings.
//!
//! Settings can be built in code or loaded from JSON, e.g.
//! `{"sim_count": 50000, "n_threads": 4, "seed": 7}`. Missing fields take
//! their defaults.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::DEFAULT_SIM_COUNT;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("sim_count must be positive")]
    NoTrials,
    #[error("n_threads must be positive")]
    NoThreads,
}

/// Monte carlo settings for one equity calculation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulatorConfig {
    /// Number of games to simulate, valid or not
    #[serde(default = "default_sim_count")]
    pub sim_count: u64,
    /// Worker threads sharing the games
    #[serde(default = "default_n_threads")]
    pub n_threads: usize,
    /// Seed for reproducible runs, entropy when absent
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_sim_count() -> u64 {
    DEFAULT_SIM_COUNT
}

fn default_n_threads() -> usize {
    1
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        SimulatorConfig {
            sim_count: default_sim_count(),
            n_threads: default_n_threads(),
            seed: None,
        }
    }
}

impl SimulatorConfig {
    /// Parse and validate settings from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or a count is zero.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_sim_count(mut self, sim_count: u64) -> Self {
        self.sim_count = sim_count;
        self
    }

    pub fn with_threads(mut self, n_threads: usize) -> Self {
        self.n_threads = n_threads;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sim_count == 0 {
            return Err(ConfigError::NoTrials);
        }
        if self.n_threads == 0 {
            return Err(ConfigError::NoThreads);
        }
        Ok(())
    }
}
