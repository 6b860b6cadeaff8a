//! Rejection filtering of the ensemble against observed trial outcomes.
//!
//! Members whose modelled reinfection probability falls inside the exact
//! confidence interval of an observed count are accepted; their `epsilon`
//! values approximate the posterior of partner-treatment efficacy.

use serde::{Deserialize, Serialize};

use crate::config::ObservedCount;
use crate::error::{AnalysisError, EnsembleError, SummaryError};
use crate::interval::ConfidenceInterval;
use crate::model::SampleEnsemble;
use crate::stats::{Summary, summarize};

/// Indices of `values` lying inside `interval` (inclusive), in ascending order
#[must_use]
pub fn accepted_indices(values: &[f64], interval: &ConfidenceInterval) -> Vec<usize> {
    values
        .iter()
        .enumerate()
        .filter(|(_, v)| interval.contains(**v))
        .map(|(i, _)| i)
        .collect()
}

/// Ensemble members accepted by one acceptance window.
///
/// A derived view: it owns copies of the accepted indices and `epsilon` values
/// and never touches the ensemble itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PosteriorSubset {
    pub interval: ConfidenceInterval,
    ensemble_size: usize,
    indices: Vec<usize>,
    epsilon: Vec<f64>,
}

impl PosteriorSubset {
    /// Accept members whose `reinfection` value lies in `interval`.
    ///
    /// `reinfection` must hold one value per ensemble member.
    pub fn select(
        ensemble: &SampleEnsemble,
        reinfection: &[f64],
        interval: ConfidenceInterval,
    ) -> Result<Self, EnsembleError> {
        if reinfection.len() != ensemble.len() {
            return Err(EnsembleError::LengthMismatch {
                column: "reinfection",
                expected: ensemble.len(),
                actual: reinfection.len(),
            });
        }
        let indices = accepted_indices(reinfection, &interval);
        let epsilon = indices.iter().map(|&i| ensemble.epsilon()[i]).collect();
        Ok(Self {
            interval,
            ensemble_size: ensemble.len(),
            indices,
            epsilon,
        })
    }

    /// Accept members matching an observed count at the given confidence level
    pub fn condition_on(
        ensemble: &SampleEnsemble,
        reinfection: &[f64],
        observed: ObservedCount,
        level: f64,
    ) -> Result<Self, AnalysisError> {
        let interval = observed.confidence_interval(level)?;
        Ok(Self::select(ensemble, reinfection, interval)?)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Accepted ensemble indices, ascending
    #[must_use]
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Posterior sample of partner-treatment efficacy
    #[must_use]
    pub fn epsilon(&self) -> &[f64] {
        &self.epsilon
    }

    /// Fraction of the ensemble accepted
    #[must_use]
    pub fn acceptance_rate(&self) -> f64 {
        if self.ensemble_size == 0 {
            0.0
        } else {
            self.len() as f64 / self.ensemble_size as f64
        }
    }

    /// Restrict any ensemble-aligned column to the accepted members
    pub fn restrict(&self, column: &[f64]) -> Result<Vec<f64>, EnsembleError> {
        if column.len() != self.ensemble_size {
            return Err(EnsembleError::LengthMismatch {
                column: "restricted",
                expected: self.ensemble_size,
                actual: column.len(),
            });
        }
        Ok(self.indices.iter().map(|&i| column[i]).collect())
    }

    /// Summary of the posterior `epsilon` values; `SummaryError::Empty` when nothing was accepted
    pub fn summary(&self, quantiles: &[f64]) -> Result<Summary, SummaryError> {
        summarize(&self.epsilon, quantiles)
    }
}
