//! Exact (Clopper–Pearson) binomial confidence intervals via `statrs`.
//!
//! Lower bound: `Beta(k, n - k + 1)` quantile at `(1 - level) / 2`, or 0 when k = 0.
//! Upper bound: `Beta(k + 1, n - k)` quantile at `(1 + level) / 2`, or 1 when k = n.

use serde::{Deserialize, Serialize};
use statrs::distribution::{Beta, ContinuousCDF};

use crate::error::IntervalError;

/// Closed sub-interval of `[0, 1]` used as an acceptance window
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    pub lower: f64,
    pub upper: f64,
}

impl ConfidenceInterval {
    /// `[0, 1]`: accepts every probability
    pub const UNIT: ConfidenceInterval = ConfidenceInterval {
        lower: 0.0,
        upper: 1.0,
    };

    pub fn new(lower: f64, upper: f64) -> Result<Self, IntervalError> {
        if !(0.0..=1.0).contains(&lower) || !(0.0..=1.0).contains(&upper) || lower > upper {
            return Err(IntervalError::InvalidBounds { lower, upper });
        }
        Ok(Self { lower, upper })
    }

    /// Inclusive membership test
    #[must_use]
    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        self.lower <= value && value <= self.upper
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }
}

fn beta_quantile(alpha: f64, beta: f64, probability: f64) -> Result<f64, IntervalError> {
    let dist = Beta::new(alpha, beta).map_err(|_| IntervalError::Distribution { alpha, beta })?;
    Ok(dist.inverse_cdf(probability).clamp(0.0, 1.0))
}

/// Two-sided exact interval for `successes` out of `trials` at `level` (e.g. 0.95)
pub fn clopper_pearson(
    successes: u64,
    trials: u64,
    level: f64,
) -> Result<ConfidenceInterval, IntervalError> {
    if trials == 0 || successes > trials {
        return Err(IntervalError::InvalidCounts { successes, trials });
    }
    if !(level > 0.0 && level < 1.0) {
        return Err(IntervalError::InvalidLevel(level));
    }

    let tail = (1.0 - level) / 2.0;
    let k = successes as f64;
    let n = trials as f64;

    let lower = if successes == 0 {
        0.0
    } else {
        beta_quantile(k, n - k + 1.0, tail)?
    };
    let upper = if successes == trials {
        1.0
    } else {
        beta_quantile(k + 1.0, n - k, 1.0 - tail)?
    };

    ConfidenceInterval::new(lower, upper)
}
