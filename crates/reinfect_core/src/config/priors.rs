use serde::{Deserialize, Serialize};

use crate::error::PriorError;
use crate::model::{Prior, TREATMENT_DELAY_DAYS};

/// Priors for the parameters that are not derived from trial counts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriorConfig {
    /// Coital frequency: inverse of days between acts
    pub f: Prior,
    /// Per-act transmission probability
    pub beta: Prior,
    /// Clearance rate: inverse of infection duration in days
    pub gamma: Prior,
    /// Probability that partner treatment is effective (uninformative)
    pub epsilon: Prior,
    /// Dissolution rate: inverse of remaining partnership duration in days
    pub sigma: Prior,
    /// Inverse of the follow-up window in days
    pub study: Prior,
    /// Mean days until the partner is treated; `delta = 1 / treatment_delay_days`
    pub treatment_delay_days: f64,
}

impl Default for PriorConfig {
    fn default() -> Self {
        Self {
            f: Prior::ReciprocalUniform {
                low: 1.0,
                high: 7.0,
            },
            beta: Prior::Uniform {
                low: 0.06,
                high: 0.167,
            },
            gamma: Prior::ReciprocalUniform {
                low: 182.5,
                high: 365.0,
            },
            epsilon: Prior::Uniform {
                low: 0.0,
                high: 1.0,
            },
            sigma: Prior::ReciprocalUniform {
                low: 7.0,
                high: 182.5,
            },
            study: Prior::ReciprocalUniform {
                low: 84.0,
                high: 168.0,
            },
            treatment_delay_days: TREATMENT_DELAY_DAYS,
        }
    }
}

impl PriorConfig {
    /// Constant partner-treatment rate
    #[must_use]
    pub fn delta(&self) -> f64 {
        1.0 / self.treatment_delay_days
    }

    pub fn validate(&self) -> Result<(), PriorError> {
        for prior in [
            &self.f,
            &self.beta,
            &self.gamma,
            &self.epsilon,
            &self.sigma,
            &self.study,
        ] {
            prior.validate()?;
        }
        if !(self.treatment_delay_days.is_finite() && self.treatment_delay_days > 0.0) {
            return Err(PriorError::NonFiniteValue {
                prior: "treatment_delay_days",
                value: self.treatment_delay_days,
            });
        }
        Ok(())
    }
}
