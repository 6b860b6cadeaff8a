//! Epidemiological parameters of the partner-transmission model

use serde::{Deserialize, Serialize};

/// Mean days from index diagnosis until the partner is treated
pub const TREATMENT_DELAY_DAYS: f64 = 3.2;

/// Admissible range for a sampled parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Domain {
    /// Probability in `[0, 1]`
    Probability,
    /// Non-negative finite rate (per day)
    Rate,
}

impl Domain {
    /// Clamp `value` into the domain. Returns `None` when the value was already valid.
    #[must_use]
    pub fn clamp(&self, value: f64) -> Option<f64> {
        let (low, high) = match self {
            Domain::Probability => (0.0, 1.0),
            Domain::Rate => (0.0, f64::MAX),
        };
        if value.is_nan() {
            Some(low)
        } else if value < low {
            Some(low)
        } else if value > high {
            Some(high)
        } else {
            None
        }
    }
}

/// Named model parameters, in sampling order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Parameter {
    /// `s`: probability the partnership has future sex
    FutureSex,
    /// `pos`: probability the partner is infected
    Positivity,
    /// `f`: coital frequency (acts per day)
    CoitalFrequency,
    /// `beta`: per-act transmission probability
    Transmissibility,
    /// `gamma`: natural clearance rate
    Clearance,
    /// `epsilon`: probability partner treatment is effective
    TreatmentEfficacy,
    /// `sigma`: partnership dissolution rate
    Dissolution,
    /// `study`: rate at which the observation window closes
    StudyWindow,
    /// `delta`: rate at which the partner is treated
    TreatmentDelay,
}

impl Parameter {
    /// Short symbol used in the model equations
    #[must_use]
    pub fn symbol(&self) -> &'static str {
        match self {
            Parameter::FutureSex => "s",
            Parameter::Positivity => "pos",
            Parameter::CoitalFrequency => "f",
            Parameter::Transmissibility => "beta",
            Parameter::Clearance => "gamma",
            Parameter::TreatmentEfficacy => "epsilon",
            Parameter::Dissolution => "sigma",
            Parameter::StudyWindow => "study",
            Parameter::TreatmentDelay => "delta",
        }
    }

    #[must_use]
    pub fn domain(&self) -> Domain {
        match self {
            Parameter::FutureSex
            | Parameter::Positivity
            | Parameter::Transmissibility
            | Parameter::TreatmentEfficacy => Domain::Probability,
            Parameter::CoitalFrequency
            | Parameter::Clearance
            | Parameter::Dissolution
            | Parameter::StudyWindow
            | Parameter::TreatmentDelay => Domain::Rate,
        }
    }
}

/// A single draw of every model parameter, describing one index patient and partner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParameterVector {
    pub s: f64,
    pub pos: f64,
    pub f: f64,
    pub beta: f64,
    pub gamma: f64,
    pub sigma: f64,
    pub epsilon: f64,
    pub delta: f64,
    pub study: f64,
}

impl ParameterVector {
    /// Copy of this vector with treatment efficacy replaced
    #[must_use]
    pub fn with_epsilon(self, epsilon: f64) -> Self {
        Self { epsilon, ..self }
    }

    /// Value of a named parameter
    #[must_use]
    pub fn get(&self, parameter: Parameter) -> f64 {
        match parameter {
            Parameter::FutureSex => self.s,
            Parameter::Positivity => self.pos,
            Parameter::CoitalFrequency => self.f,
            Parameter::Transmissibility => self.beta,
            Parameter::Clearance => self.gamma,
            Parameter::TreatmentEfficacy => self.epsilon,
            Parameter::Dissolution => self.sigma,
            Parameter::StudyWindow => self.study,
            Parameter::TreatmentDelay => self.delta,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_clamp() {
        assert_eq!(Domain::Probability.clamp(0.3), None);
        assert_eq!(Domain::Probability.clamp(1.0 + 1e-15), Some(1.0));
        assert_eq!(Domain::Probability.clamp(-1e-15), Some(0.0));
        assert_eq!(Domain::Rate.clamp(f64::NAN), Some(0.0));
        assert_eq!(Domain::Rate.clamp(12.5), None);
    }

    #[test]
    fn test_with_epsilon_keeps_other_fields() {
        let v = ParameterVector {
            s: 0.5,
            pos: 0.6,
            f: 0.3,
            beta: 0.1,
            gamma: 0.004,
            sigma: 0.01,
            epsilon: 0.2,
            delta: 1.0 / TREATMENT_DELAY_DAYS,
            study: 0.007,
        };
        let w = v.with_epsilon(0.9);
        assert_eq!(w.epsilon, 0.9);
        assert_eq!(w.get(Parameter::Transmissibility), 0.1);
        assert_eq!(w.get(Parameter::TreatmentDelay), v.delta);
    }
}
