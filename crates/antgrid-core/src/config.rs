//! Colony configuration: the `[colony]` table of a problem file.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Which feasible assignment a run reports once its iterations are done.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultSelection {
    /// The assignment with the fewest distinct nodes seen in any iteration.
    #[default]
    BestEver,
    /// The best candidate of the final iteration only.
    FinalIteration,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColonyConfig {
    /// Multiplier applied to every pheromone cell once per iteration, in `(0, 1)`.
    pub decay_ratio: f64,
    /// Multiplier applied to the elite assignment's cells, `> 1`.
    pub raise_ratio: f64,
    pub iterations: u32,
    /// Agents per iteration.
    pub ants: u32,
    /// Seed for the run's random source. `None` draws from the OS.
    pub seed: Option<u64>,
    pub selection: ResultSelection,
    /// Construct the agents of an iteration on the rayon pool.
    pub parallel: bool,
    /// Wall-clock budget, checked between iterations.
    pub max_duration_ms: Option<u64>,
}

impl Default for ColonyConfig {
    fn default() -> Self {
        Self {
            decay_ratio: 0.5,
            raise_ratio: 1.5,
            iterations: 100,
            ants: 20,
            seed: None,
            selection: ResultSelection::default(),
            parallel: true,
            max_duration_ms: None,
        }
    }
}

impl ColonyConfig {
    pub fn with_decay_ratio(mut self, decay: f64) -> Self {
        self.decay_ratio = decay;
        self
    }

    pub fn with_raise_ratio(mut self, raise: f64) -> Self {
        self.raise_ratio = raise;
        self
    }

    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_ants(mut self, ants: u32) -> Self {
        self.ants = ants;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_selection(mut self, selection: ResultSelection) -> Self {
        self.selection = selection;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_max_duration_ms(mut self, millis: u64) -> Self {
        self.max_duration_ms = Some(millis);
        self
    }

    /// Check every parameter against its valid range.
    ///
    /// Comparisons are written so that NaN ratios fail too.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.iterations == 0 {
            return Err(ConfigError::ZeroIterations);
        }
        if self.ants == 0 {
            return Err(ConfigError::ZeroAnts);
        }
        if !(self.decay_ratio > 0.0 && self.decay_ratio < 1.0) {
            return Err(ConfigError::InvalidDecayRatio(self.decay_ratio));
        }
        if !(self.raise_ratio > 1.0 && self.raise_ratio.is_finite()) {
            return Err(ConfigError::InvalidRaiseRatio(self.raise_ratio));
        }
        Ok(())
    }
}
