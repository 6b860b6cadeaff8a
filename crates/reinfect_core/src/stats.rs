//! Descriptive statistics for Monte Carlo output vectors.
//!
//! Every function rejects an empty sample with [`SummaryError::Empty`], so an
//! empty posterior subset produces an explicit "no data" result instead of a
//! NaN mean or an out-of-bounds index.

use serde::{Deserialize, Serialize};

use crate::error::SummaryError;

/// Quantile probabilities reported by default
pub const DEFAULT_QUANTILES: [f64; 5] = [0.025, 0.25, 0.5, 0.75, 0.975];

/// Mean and quantiles of a sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub count: usize,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    /// (probability, value) pairs
    pub quantiles: Vec<(f64, f64)>,
}

impl Summary {
    /// Value of the quantile computed for `probability`, if it was requested
    #[must_use]
    pub fn quantile(&self, probability: f64) -> Option<f64> {
        self.quantiles
            .iter()
            .find(|(p, _)| (*p - probability).abs() < 1e-9)
            .map(|(_, v)| *v)
    }

    #[must_use]
    pub fn median(&self) -> Option<f64> {
        self.quantile(0.5)
    }
}

fn check_finite(values: &[f64]) -> Result<(), SummaryError> {
    if values.is_empty() {
        return Err(SummaryError::Empty);
    }
    match values.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(SummaryError::NonFinite {
            index,
            value: values[index],
        }),
        None => Ok(()),
    }
}

fn sorted_copy(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted
}

/// Quantile of already sorted data, interpolating linearly between order
/// statistics at position `(n - 1) * p`.
fn interpolate(sorted: &[f64], probability: f64) -> f64 {
    let h = (sorted.len() - 1) as f64 * probability;
    let lower = h.floor() as usize;
    let upper = h.ceil() as usize;
    let weight = h - lower as f64;
    sorted[lower] + weight * (sorted[upper] - sorted[lower])
}

pub fn mean(values: &[f64]) -> Result<f64, SummaryError> {
    check_finite(values)?;
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// Quantiles at each of `probabilities`, returned as (probability, value) pairs
pub fn quantiles(values: &[f64], probabilities: &[f64]) -> Result<Vec<(f64, f64)>, SummaryError> {
    check_finite(values)?;
    if let Some(p) = probabilities.iter().find(|p| !(0.0..=1.0).contains(*p)) {
        return Err(SummaryError::InvalidProbability(*p));
    }
    let sorted = sorted_copy(values);
    Ok(probabilities
        .iter()
        .map(|&p| (p, interpolate(&sorted, p)))
        .collect())
}

pub fn summarize(values: &[f64], probabilities: &[f64]) -> Result<Summary, SummaryError> {
    let mean = mean(values)?;
    let quantiles = quantiles(values, probabilities)?;
    let (min, max) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    Ok(Summary {
        count: values.len(),
        mean,
        min,
        max,
        quantiles,
    })
}

/// Fixed-width histogram over `[low, high]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    /// `bins + 1` bin edges
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
    /// Values that fell outside `[low, high]`
    pub outside: usize,
}

impl Histogram {
    /// Bin `values` into `bins` equal-width bins. Bins are half-open except
    /// the last, which includes `high`.
    pub fn new(values: &[f64], low: f64, high: f64, bins: usize) -> Result<Self, SummaryError> {
        if bins == 0 || !low.is_finite() || !high.is_finite() || low >= high {
            return Err(SummaryError::InvalidHistogram { low, high, bins });
        }
        check_finite(values)?;

        let width = (high - low) / bins as f64;
        let edges = (0..=bins).map(|i| low + width * i as f64).collect();
        let mut counts = vec![0; bins];
        let mut outside = 0;

        for &v in values {
            if v < low || v > high {
                outside += 1;
                continue;
            }
            let bin = (((v - low) / width) as usize).min(bins - 1);
            counts[bin] += 1;
        }

        Ok(Self {
            edges,
            counts,
            outside,
        })
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Bin midpoints, for plotting
    #[must_use]
    pub fn centers(&self) -> Vec<f64> {
        self.edges.windows(2).map(|w| 0.5 * (w[0] + w[1])).collect()
    }
}
