//! Trial-derived counts that calibrate the priors and the posterior filter

use serde::{Deserialize, Serialize};

use crate::error::IntervalError;
use crate::interval::{ConfidenceInterval, clopper_pearson};
use crate::model::{Prior, Protocol};

/// An observed binomial count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservedCount {
    pub successes: u64,
    pub trials: u64,
}

impl ObservedCount {
    #[must_use]
    pub const fn new(successes: u64, trials: u64) -> Self {
        Self { successes, trials }
    }

    /// Observed proportion, `None` when there were no trials
    #[must_use]
    pub fn proportion(&self) -> Option<f64> {
        (self.trials > 0).then(|| self.successes as f64 / self.trials as f64)
    }

    /// Exact confidence interval for the underlying proportion
    pub fn confidence_interval(&self, level: f64) -> Result<ConfidenceInterval, IntervalError> {
        clopper_pearson(self.successes, self.trials, level)
    }

    /// Prior that resamples the proportion: `Binomial(trials, successes/trials) / trials`
    #[must_use]
    pub fn resampling_prior(&self) -> Prior {
        Prior::observed_proportion(self.successes, self.trials)
    }
}

/// Counts reported by the partner-therapy trial
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrialData {
    /// Partners reported as having future sex with the index, control phase
    pub control_future_sex: ObservedCount,
    /// Partners reported as having future sex with the index, intervention phase.
    ///
    /// The trial reports only the 2218 partners; the default numerator 1043 is a
    /// placeholder chosen near the control-phase proportion, not trial data.
    pub intervention_future_sex: ObservedCount,
    /// Chlamydia-positive partner self-tests
    pub partner_positivity: ObservedCount,
    /// Index patients positive at follow-up, control phase
    pub control_outcome: ObservedCount,
    /// Index patients positive at follow-up, intervention phase
    pub intervention_outcome: ObservedCount,
    /// Index patients positive at follow-up among those whose partners accepted APT
    pub apt_accepted_outcome: ObservedCount,
}

impl Default for TrialData {
    fn default() -> Self {
        Self {
            // 909 + 307 partners with ongoing or possible future sex
            control_future_sex: ObservedCount::new(1216, 2589),
            // placeholder numerator, see the field docs
            intervention_future_sex: ObservedCount::new(1043, 2218),
            partner_positivity: ObservedCount::new(78, 120),
            control_outcome: ObservedCount::new(116, 1724),
            intervention_outcome: ObservedCount::new(73, 1536),
            apt_accepted_outcome: ObservedCount::new(2, 106),
        }
    }
}

impl TrialData {
    #[must_use]
    pub fn future_sex(&self, protocol: Protocol) -> ObservedCount {
        match protocol {
            Protocol::Control => self.control_future_sex,
            Protocol::Intervention => self.intervention_future_sex,
        }
    }

    /// Reinfection outcome observed in the protocol's trial phase
    #[must_use]
    pub fn outcome(&self, protocol: Protocol) -> ObservedCount {
        match protocol {
            Protocol::Control => self.control_outcome,
            Protocol::Intervention => self.intervention_outcome,
        }
    }

    pub(crate) fn counts(&self) -> [(&'static str, ObservedCount); 6] {
        [
            ("control_future_sex", self.control_future_sex),
            ("intervention_future_sex", self.intervention_future_sex),
            ("partner_positivity", self.partner_positivity),
            ("control_outcome", self.control_outcome),
            ("intervention_outcome", self.intervention_outcome),
            ("apt_accepted_outcome", self.apt_accepted_outcome),
        ]
    }
}
