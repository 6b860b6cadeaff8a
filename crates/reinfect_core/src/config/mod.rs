//! Analysis configuration
//!
//! `AnalysisConfig` holds everything needed for one run: the seed, the
//! ensemble size, the priors, the trial counts and the reporting options.
//! Its `Default` reproduces the published analysis; every field can be
//! overridden from a serialized config because the struct is
//! `#[serde(default)]`.
//!
//! ```ignore
//! use reinfect_core::config::AnalysisConfig;
//! use reinfect_core::model::Prior;
//!
//! let config = AnalysisConfig::default()
//!     .with_seed(7)
//!     .with_samples(20_000)
//!     .with_beta(Prior::Fixed { value: 0.1 });
//! let results = reinfect_core::analysis::run_analysis(&config)?;
//! ```

use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;
use crate::model::Prior;
use crate::stats::DEFAULT_QUANTILES;
use crate::sweep::SweepGrid;

mod priors;
mod trial;

pub use priors::PriorConfig;
pub use trial::{ObservedCount, TrialData};

fn default_seed() -> u64 {
    20_120_301
}

fn default_samples() -> usize {
    100_000
}

/// Complete configuration for one analysis run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Seed for the single `StdRng` every parameter column is drawn from
    pub seed: u64,
    /// Ensemble size `l`
    pub samples: usize,
    /// Confidence level of the posterior acceptance windows
    pub confidence_level: f64,
    /// Quantile probabilities reported in every summary
    pub quantiles: Vec<f64>,
    /// Number of histogram bins for density summaries
    pub histogram_bins: usize,
    /// Change in `epsilon` used to scale the local slope (0.1 = ten points)
    pub slope_step: f64,
    /// Fixed `epsilon` values for the sensitivity sweep
    pub sweep: SweepGrid,
    pub priors: PriorConfig,
    pub trial: TrialData,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            samples: default_samples(),
            confidence_level: 0.95,
            quantiles: DEFAULT_QUANTILES.to_vec(),
            histogram_bins: 20,
            slope_step: 0.1,
            sweep: SweepGrid::default(),
            priors: PriorConfig::default(),
            trial: TrialData::default(),
        }
    }
}

impl AnalysisConfig {
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn with_samples(mut self, samples: usize) -> Self {
        self.samples = samples;
        self
    }

    /// Replace the per-act transmission prior, e.g. to pin it for a deterministic scenario
    #[must_use]
    pub fn with_beta(mut self, beta: Prior) -> Self {
        self.priors.beta = beta;
        self
    }

    #[must_use]
    pub fn with_confidence_level(mut self, level: f64) -> Self {
        self.confidence_level = level;
        self
    }

    /// Check every setting before any sampling happens
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.samples == 0 {
            return Err(AnalysisError::Config(
                "samples must be at least 1".to_string(),
            ));
        }
        if !(self.confidence_level > 0.0 && self.confidence_level < 1.0) {
            return Err(AnalysisError::Config(format!(
                "confidence_level {} must lie strictly between 0 and 1",
                self.confidence_level
            )));
        }
        if let Some(p) = self.quantiles.iter().find(|p| !(0.0..=1.0).contains(*p)) {
            return Err(AnalysisError::Config(format!(
                "quantile probability {p} is outside [0, 1]"
            )));
        }
        if self.histogram_bins == 0 {
            return Err(AnalysisError::Config(
                "histogram_bins must be at least 1".to_string(),
            ));
        }
        if !self.slope_step.is_finite() {
            return Err(AnalysisError::Config(format!(
                "slope_step {} must be finite",
                self.slope_step
            )));
        }
        self.sweep.validate()?;
        self.priors.validate()?;
        for (name, count) in self.trial.counts() {
            if count.trials == 0 || count.successes > count.trials {
                return Err(AnalysisError::Config(format!(
                    "{name}: {} successes in {} trials",
                    count.successes, count.trials
                )));
            }
        }
        Ok(())
    }
}
