//! The Monte Carlo population: aligned columns of sampled parameters.

use serde::{Deserialize, Serialize};

use super::parameters::{Parameter, ParameterVector};
use super::protocol::Protocol;
use crate::error::EnsembleError;

/// Raw sampled columns, before the alignment invariant is checked
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnsembleColumns {
    pub s_control: Vec<f64>,
    pub s_intervention: Vec<f64>,
    pub pos: Vec<f64>,
    pub f: Vec<f64>,
    pub beta: Vec<f64>,
    pub gamma: Vec<f64>,
    pub epsilon: Vec<f64>,
    pub sigma: Vec<f64>,
    pub study: Vec<f64>,
}

/// `l` independently drawn parameter vectors stored column-wise.
///
/// Index `i` of every column describes the same partnership. Immutable once
/// built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleEnsemble {
    s_control: Vec<f64>,
    s_intervention: Vec<f64>,
    pos: Vec<f64>,
    f: Vec<f64>,
    beta: Vec<f64>,
    gamma: Vec<f64>,
    epsilon: Vec<f64>,
    sigma: Vec<f64>,
    study: Vec<f64>,
    delta: f64,
}

impl SampleEnsemble {
    /// Build an ensemble, checking that every column has the same non-zero length
    pub fn from_columns(columns: EnsembleColumns, delta: f64) -> Result<Self, EnsembleError> {
        let expected = columns.s_control.len();
        if expected == 0 {
            return Err(EnsembleError::Empty);
        }

        let named: [(&'static str, usize); 8] = [
            ("s_intervention", columns.s_intervention.len()),
            (Parameter::Positivity.symbol(), columns.pos.len()),
            (Parameter::CoitalFrequency.symbol(), columns.f.len()),
            (Parameter::Transmissibility.symbol(), columns.beta.len()),
            (Parameter::Clearance.symbol(), columns.gamma.len()),
            (Parameter::TreatmentEfficacy.symbol(), columns.epsilon.len()),
            (Parameter::Dissolution.symbol(), columns.sigma.len()),
            (Parameter::StudyWindow.symbol(), columns.study.len()),
        ];
        for (column, actual) in named {
            if actual != expected {
                return Err(EnsembleError::LengthMismatch {
                    column,
                    expected,
                    actual,
                });
            }
        }

        let EnsembleColumns {
            s_control,
            s_intervention,
            pos,
            f,
            beta,
            gamma,
            epsilon,
            sigma,
            study,
        } = columns;

        Ok(Self {
            s_control,
            s_intervention,
            pos,
            f,
            beta,
            gamma,
            epsilon,
            sigma,
            study,
            delta,
        })
    }

    /// Number of ensemble members
    #[must_use]
    pub fn len(&self) -> usize {
        self.s_control.len()
    }

    /// Always false for a constructed ensemble
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.s_control.is_empty()
    }

    /// Future-sex probabilities for the given protocol
    #[must_use]
    pub fn s(&self, protocol: Protocol) -> &[f64] {
        match protocol {
            Protocol::Control => &self.s_control,
            Protocol::Intervention => &self.s_intervention,
        }
    }

    #[must_use]
    pub fn pos(&self) -> &[f64] {
        &self.pos
    }

    #[must_use]
    pub fn f(&self) -> &[f64] {
        &self.f
    }

    #[must_use]
    pub fn beta(&self) -> &[f64] {
        &self.beta
    }

    #[must_use]
    pub fn gamma(&self) -> &[f64] {
        &self.gamma
    }

    #[must_use]
    pub fn epsilon(&self) -> &[f64] {
        &self.epsilon
    }

    #[must_use]
    pub fn sigma(&self) -> &[f64] {
        &self.sigma
    }

    #[must_use]
    pub fn study(&self) -> &[f64] {
        &self.study
    }

    /// Constant partner-treatment rate shared by every member
    #[must_use]
    pub fn delta(&self) -> f64 {
        self.delta
    }

    /// Column for a named parameter. `delta` is not a column.
    #[must_use]
    pub fn column(&self, parameter: Parameter, protocol: Protocol) -> Option<&[f64]> {
        match parameter {
            Parameter::FutureSex => Some(self.s(protocol)),
            Parameter::Positivity => Some(&self.pos),
            Parameter::CoitalFrequency => Some(&self.f),
            Parameter::Transmissibility => Some(&self.beta),
            Parameter::Clearance => Some(&self.gamma),
            Parameter::TreatmentEfficacy => Some(&self.epsilon),
            Parameter::Dissolution => Some(&self.sigma),
            Parameter::StudyWindow => Some(&self.study),
            Parameter::TreatmentDelay => None,
        }
    }

    /// Parameter vector of member `index` under `protocol`
    #[must_use]
    pub fn get(&self, index: usize, protocol: Protocol) -> Option<ParameterVector> {
        if index >= self.len() {
            return None;
        }
        Some(ParameterVector {
            s: self.s(protocol)[index],
            pos: self.pos[index],
            f: self.f[index],
            beta: self.beta[index],
            gamma: self.gamma[index],
            sigma: self.sigma[index],
            epsilon: self.epsilon[index],
            delta: self.delta,
            study: self.study[index],
        })
    }

    /// Iterate over every member's parameter vector under `protocol`
    pub fn iter(&self, protocol: Protocol) -> impl Iterator<Item = ParameterVector> + '_ {
        (0..self.len()).filter_map(move |i| self.get(i, protocol))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns(n: usize) -> EnsembleColumns {
        EnsembleColumns {
            s_control: vec![0.5; n],
            s_intervention: vec![0.45; n],
            pos: vec![0.65; n],
            f: vec![0.3; n],
            beta: vec![0.1; n],
            gamma: vec![0.004; n],
            epsilon: (0..n).map(|i| i as f64 / n as f64).collect(),
            sigma: vec![0.02; n],
            study: vec![0.008; n],
        }
    }

    #[test]
    fn test_aligned_columns_accepted() {
        let ensemble = SampleEnsemble::from_columns(columns(4), 1.0 / 3.2).unwrap();
        assert_eq!(ensemble.len(), 4);
        let v = ensemble.get(2, Protocol::Intervention).unwrap();
        assert_eq!(v.s, 0.45);
        assert_eq!(v.epsilon, 0.5);
        assert_eq!(v.delta, 1.0 / 3.2);
        assert!(ensemble.get(4, Protocol::Control).is_none());
        assert_eq!(ensemble.iter(Protocol::Control).count(), 4);
    }

    #[test]
    fn test_length_mismatch_names_column() {
        let mut cols = columns(5);
        cols.sigma.pop();
        let err = SampleEnsemble::from_columns(cols, 0.3).unwrap_err();
        assert_eq!(
            err,
            EnsembleError::LengthMismatch {
                column: "sigma",
                expected: 5,
                actual: 4,
            }
        );
        assert!(err.to_string().contains("sigma"));
    }

    #[test]
    fn test_empty_rejected() {
        let err = SampleEnsemble::from_columns(EnsembleColumns::default(), 0.3).unwrap_err();
        assert_eq!(err, EnsembleError::Empty);
    }

    #[test]
    fn test_delta_is_not_a_column() {
        let ensemble = SampleEnsemble::from_columns(columns(3), 0.3).unwrap();
        assert!(
            ensemble
                .column(Parameter::TreatmentDelay, Protocol::Control)
                .is_none()
        );
        assert_eq!(
            ensemble
                .column(Parameter::FutureSex, Protocol::Control)
                .unwrap(),
            &[0.5; 3]
        );
    }
}
