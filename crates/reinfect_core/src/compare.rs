//! Difference between two posterior `epsilon` samples.
//!
//! The two samples come from independent filters and usually differ in size.
//! Both are truncated to the shorter length and paired by position before
//! subtracting. This is an index-alignment approximation of the distribution
//! of differences, not a matched-pair test.

use serde::{Deserialize, Serialize};

use crate::posterior::PosteriorSubset;
use crate::stats::{Histogram, Summary, summarize};

/// `first[i] - second[i]` for every position both slices share
#[must_use]
pub fn truncated_difference(first: &[f64], second: &[f64]) -> Vec<f64> {
    first.iter().zip(second).map(|(a, b)| a - b).collect()
}

/// Distribution of the positional difference between two posterior samples
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparativeStatistics {
    pub first_len: usize,
    pub second_len: usize,
    pub differences: Vec<f64>,
    /// `None` when either posterior was empty
    pub summary: Option<Summary>,
    /// Histogram over `[-1, 1]`; `None` when either posterior was empty
    pub histogram: Option<Histogram>,
}

impl ComparativeStatistics {
    /// Compare `first − second` for two slices of `epsilon` values
    #[must_use]
    pub fn from_samples(
        first: &[f64],
        second: &[f64],
        quantiles: &[f64],
        histogram_bins: usize,
    ) -> Self {
        let differences = truncated_difference(first, second);
        let summary = summarize(&differences, quantiles).ok();
        let histogram = Histogram::new(&differences, -1.0, 1.0, histogram_bins).ok();
        Self {
            first_len: first.len(),
            second_len: second.len(),
            differences,
            summary,
            histogram,
        }
    }

    #[must_use]
    pub fn between(
        first: &PosteriorSubset,
        second: &PosteriorSubset,
        quantiles: &[f64],
        histogram_bins: usize,
    ) -> Self {
        Self::from_samples(first.epsilon(), second.epsilon(), quantiles, histogram_bins)
    }

    /// Number of pairs compared
    #[must_use]
    pub fn len(&self) -> usize {
        self.differences.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.differences.is_empty()
    }

    /// Share of pairs where the first sample exceeds the second
    #[must_use]
    pub fn fraction_positive(&self) -> Option<f64> {
        if self.is_empty() {
            return None;
        }
        let positive = self.differences.iter().filter(|d| **d > 0.0).count();
        Some(positive as f64 / self.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::DEFAULT_QUANTILES;

    #[test]
    fn test_truncates_to_shorter() {
        let d = truncated_difference(&[0.9, 0.8, 0.7, 0.6], &[0.5, 0.5]);
        assert_eq!(d.len(), 2);
        assert!((d[0] - 0.4).abs() < 1e-12);
        assert!((d[1] - 0.3).abs() < 1e-12);
        assert_eq!(truncated_difference(&[0.1], &[0.3, 0.4]).len(), 1);
    }

    #[test]
    fn test_statistics() {
        let stats = ComparativeStatistics::from_samples(
            &[0.9, 0.8, 0.7, 0.6, 0.5],
            &[0.5, 0.5, 0.5],
            &DEFAULT_QUANTILES,
            8,
        );
        assert_eq!(stats.first_len, 5);
        assert_eq!(stats.second_len, 3);
        assert_eq!(stats.len(), 3);
        let summary = stats.summary.as_ref().unwrap();
        assert!((summary.mean - 0.3).abs() < 1e-12);
        assert_eq!(stats.histogram.as_ref().unwrap().total(), 3);
        assert_eq!(stats.fraction_positive(), Some(1.0));
    }

    #[test]
    fn test_empty_side_gives_no_statistics() {
        let stats = ComparativeStatistics::from_samples(&[], &[0.5, 0.4], &DEFAULT_QUANTILES, 8);
        assert!(stats.is_empty());
        assert!(stats.summary.is_none());
        assert!(stats.histogram.is_none());
        assert_eq!(stats.fraction_positive(), None);
    }
}
