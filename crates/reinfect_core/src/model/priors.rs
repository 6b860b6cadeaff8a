use rand::Rng;
use rand::distr::{Distribution, Uniform};
use serde::{Deserialize, Serialize};

use crate::error::PriorError;

/// Prior distribution for one uncertain model parameter.
///
/// Duration-type inputs are drawn in days and inverted to a per-day rate
/// with `ReciprocalUniform`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Prior {
    /// Pinned value, no sampling
    Fixed { value: f64 },
    /// `Uniform[low, high]`
    Uniform { low: f64, high: f64 },
    /// `1 / Uniform[low, high]`, with `low > 0`
    ReciprocalUniform { low: f64, high: f64 },
    /// `Binomial(trials, probability) / trials`
    BinomialProportion { trials: u64, probability: f64 },
}

/// A validated prior, ready to draw from repeatedly
enum Sampler {
    Fixed(f64),
    Uniform(Uniform<f64>),
    Reciprocal(Uniform<f64>),
    Proportion(rand_distr::Binomial, f64),
}

impl Sampler {
    fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match self {
            Sampler::Fixed(value) => *value,
            Sampler::Uniform(dist) => dist.sample(rng),
            Sampler::Reciprocal(dist) => 1.0 / dist.sample(rng),
            Sampler::Proportion(dist, trials) => dist.sample(rng) as f64 / trials,
        }
    }
}

impl Prior {
    /// Binomial proportion prior built from observed `successes` out of `trials`
    #[must_use]
    pub fn observed_proportion(successes: u64, trials: u64) -> Self {
        let probability = if trials == 0 {
            0.0
        } else {
            successes as f64 / trials as f64
        };
        Prior::BinomialProportion {
            trials,
            probability,
        }
    }

    fn sampler(&self) -> Result<Sampler, PriorError> {
        match self {
            Prior::Fixed { value } => {
                if value.is_finite() {
                    Ok(Sampler::Fixed(*value))
                } else {
                    Err(PriorError::NonFiniteValue {
                        prior: "Fixed",
                        value: *value,
                    })
                }
            }
            Prior::Uniform { low, high } => Uniform::new_inclusive(*low, *high)
                .map(Sampler::Uniform)
                .map_err(|_| PriorError::InvalidParameters {
                    prior: "Uniform",
                    low: *low,
                    high: *high,
                    reason: "bounds must be finite with low <= high",
                }),
            Prior::ReciprocalUniform { low, high } => {
                if low.is_nan() || *low <= 0.0 {
                    return Err(PriorError::InvalidParameters {
                        prior: "ReciprocalUniform",
                        low: *low,
                        high: *high,
                        reason: "lower bound must be positive",
                    });
                }
                Uniform::new_inclusive(*low, *high)
                    .map(Sampler::Reciprocal)
                    .map_err(|_| PriorError::InvalidParameters {
                        prior: "ReciprocalUniform",
                        low: *low,
                        high: *high,
                        reason: "bounds must be finite with low <= high",
                    })
            }
            Prior::BinomialProportion {
                trials,
                probability,
            } => {
                if *trials == 0 {
                    return Err(PriorError::InvalidBinomial {
                        trials: *trials,
                        probability: *probability,
                    });
                }
                rand_distr::Binomial::new(*trials, *probability)
                    .map(|d| Sampler::Proportion(d, *trials as f64))
                    .map_err(|_| PriorError::InvalidBinomial {
                        trials: *trials,
                        probability: *probability,
                    })
            }
        }
    }

    /// Check the prior parameters without drawing anything
    pub fn validate(&self) -> Result<(), PriorError> {
        self.sampler().map(|_| ())
    }

    /// Draw a single value
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<f64, PriorError> {
        Ok(self.sampler()?.draw(rng))
    }

    /// Draw `n` independent values. Consumes the generator in order, so the
    /// same generator state always yields the same column.
    pub fn sample_column<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        n: usize,
    ) -> Result<Vec<f64>, PriorError> {
        let sampler = self.sampler()?;
        Ok((0..n).map(|_| sampler.draw(rng)).collect())
    }

    /// Smallest and largest value the prior can produce
    #[must_use]
    pub fn support(&self) -> (f64, f64) {
        match self {
            Prior::Fixed { value } => (*value, *value),
            Prior::Uniform { low, high } => (*low, *high),
            Prior::ReciprocalUniform { low, high } => (1.0 / high, 1.0 / low),
            Prior::BinomialProportion { .. } => (0.0, 1.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_uniform_within_bounds() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(42);
        let prior = Prior::Uniform {
            low: 0.06,
            high: 0.167,
        };
        let values = prior.sample_column(&mut rng, 10_000).unwrap();
        assert_eq!(values.len(), 10_000);
        assert!(values.iter().all(|v| (0.06..=0.167).contains(v)));
    }

    #[test]
    fn test_reciprocal_uniform_is_rate() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        let prior = Prior::ReciprocalUniform {
            low: 182.5,
            high: 365.0,
        };
        let (lo, hi) = prior.support();
        for v in prior.sample_column(&mut rng, 5_000).unwrap() {
            assert!(v >= lo && v <= hi, "{v} outside [{lo}, {hi}]");
        }
    }

    #[test]
    fn test_binomial_proportion_mean() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(123);
        let prior = Prior::observed_proportion(78, 120);
        let values = prior.sample_column(&mut rng, 20_000).unwrap();
        let mean = values.iter().sum::<f64>() / values.len() as f64;
        assert!((mean - 0.65).abs() < 0.005, "mean {mean}");
        // Proportions are multiples of 1/120
        assert!(
            values
                .iter()
                .all(|v| ((v * 120.0) - (v * 120.0).round()).abs() < 1e-9)
        );
    }

    #[test]
    fn test_fixed_prior_consumes_nothing() {
        let mut a = rand::rngs::StdRng::seed_from_u64(1);
        let mut b = rand::rngs::StdRng::seed_from_u64(1);
        let fixed = Prior::Fixed { value: 0.1 };
        assert_eq!(fixed.sample_column(&mut a, 3).unwrap(), vec![0.1; 3]);
        assert_eq!(a.random::<u64>(), b.random::<u64>());
    }

    #[test]
    fn test_invalid_priors_rejected() {
        assert!(
            Prior::ReciprocalUniform {
                low: 0.0,
                high: 1.0
            }
            .validate()
            .is_err()
        );
        assert!(
            Prior::Uniform {
                low: 2.0,
                high: 1.0
            }
            .validate()
            .is_err()
        );
        assert!(
            Prior::BinomialProportion {
                trials: 10,
                probability: 1.5
            }
            .validate()
            .is_err()
        );
        assert!(
            Prior::BinomialProportion {
                trials: 0,
                probability: 0.5
            }
            .validate()
            .is_err()
        );
        assert!(Prior::Fixed { value: f64::NAN }.validate().is_err());
    }
}
