//! Configuration parameters for the restart driver.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::distance::Precision;
use crate::error::{Error, Result};
use crate::local_search::SearchPolicy;

/// Configuration settings for a multi-round local search run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Random restarts per round
    pub iterations: usize,
    /// Number of independent rounds
    pub rounds: usize,
    /// Neighbor selection policy used by every restart
    pub policy: SearchPolicy,
    /// How distances are stored in the distance table
    pub precision: Precision,
    /// Seed for reproducible runs; drawn from entropy when absent
    pub seed: Option<u64>,
    /// Run the restarts of a round on the rayon thread pool
    pub parallel: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            iterations: 2000,
            rounds: 5,
            policy: SearchPolicy::default(),
            precision: Precision::default(),
            seed: None,
            parallel: false,
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Config::default()
    }

    /// Load a configuration from a JSON file. Missing fields keep their defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        let config: Config = serde_json::from_reader(BufReader::new(file))?;
        Ok(config)
    }

    /// Check that the run has work to do.
    pub fn validate(&self) -> Result<()> {
        if self.iterations == 0 {
            return Err(Error::invalid_config("iterations must be a positive integer"));
        }
        if self.rounds == 0 {
            return Err(Error::invalid_config("rounds must be a positive integer"));
        }
        Ok(())
    }

    /// Set the number of restarts per round.
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Set the number of rounds.
    pub fn with_rounds(mut self, rounds: usize) -> Self {
        self.rounds = rounds;
        self
    }

    /// Set the neighbor selection policy.
    pub fn with_policy(mut self, policy: SearchPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Set the distance precision policy.
    pub fn with_precision(mut self, precision: Precision) -> Self {
        self.precision = precision;
        self
    }

    /// Set the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enable or disable parallel restarts.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}
