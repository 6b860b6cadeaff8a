//! Closed-form competing-risks model of reinfection by an untreated partner.
//!
//! The partner stays a transmission risk until one of several exponential
//! events resolves it: transmission (`f·beta`), natural clearance (`gamma`),
//! partnership dissolution (`sigma`), partner treatment (`delta`) or the end of
//! the observation window (`study`). Reinfection happens either directly,
//! before any other event, or after a partner treatment that fails (probability
//! `1 − epsilon`), in which case the race restarts without `delta`.
//!
//! `f·beta` combines a per-act probability with an act rate and is used as a
//! hazard. This is the continuous-time approximation of the published model.

use crate::model::{ParameterVector, Protocol, SampleEnsemble};

/// Competing-risk fraction `numerator / hazard`, zero when nothing can happen
#[inline]
fn fraction(numerator: f64, hazard: f64) -> f64 {
    if hazard > 0.0 { numerator / hazard } else { 0.0 }
}

/// Transmission hazard, total hazard `H`, and post-treatment hazard `H'`
#[inline]
fn hazards(f: f64, beta: f64, gamma: f64, sigma: f64, delta: f64, study: f64) -> (f64, f64, f64) {
    let transmission = f * beta;
    let after_treatment = transmission + gamma + sigma + study;
    (transmission, after_treatment + delta, after_treatment)
}

/// Probability that the index patient is reinfected by the partner.
///
/// `s`, `pos` and `epsilon` are probabilities; the remaining inputs are
/// per-day rates. The result is not clipped: for valid inputs it lies in
/// `[0, 1]` by construction.
#[allow(clippy::too_many_arguments)]
#[must_use]
#[inline]
pub fn reinfection_probability(
    s: f64,
    pos: f64,
    f: f64,
    beta: f64,
    gamma: f64,
    sigma: f64,
    epsilon: f64,
    delta: f64,
    study: f64,
) -> f64 {
    let (transmission, total, after_treatment) = hazards(f, beta, gamma, sigma, delta, study);
    let direct = fraction(transmission, total);
    let failed_treatment =
        (1.0 - epsilon) * fraction(delta, total) * fraction(transmission, after_treatment);
    s * pos * (direct + failed_treatment)
}

/// Derivative of [`reinfection_probability`] with respect to `epsilon`.
///
/// The model is linear in `epsilon`, so the slope does not depend on it.
#[allow(clippy::too_many_arguments)]
#[must_use]
#[inline]
pub fn reinfection_probability_slope(
    s: f64,
    pos: f64,
    f: f64,
    beta: f64,
    gamma: f64,
    sigma: f64,
    delta: f64,
    study: f64,
) -> f64 {
    let (transmission, total, after_treatment) = hazards(f, beta, gamma, sigma, delta, study);
    -s * pos * fraction(delta, total) * fraction(transmission, after_treatment)
}

impl ParameterVector {
    #[must_use]
    pub fn reinfection_probability(&self) -> f64 {
        reinfection_probability(
            self.s,
            self.pos,
            self.f,
            self.beta,
            self.gamma,
            self.sigma,
            self.epsilon,
            self.delta,
            self.study,
        )
    }

    #[must_use]
    pub fn reinfection_probability_slope(&self) -> f64 {
        reinfection_probability_slope(
            self.s, self.pos, self.f, self.beta, self.gamma, self.sigma, self.delta, self.study,
        )
    }
}

/// Reinfection probability of every ensemble member under `protocol`
#[must_use]
pub fn evaluate(ensemble: &SampleEnsemble, protocol: Protocol) -> Vec<f64> {
    ensemble
        .iter(protocol)
        .map(|v| v.reinfection_probability())
        .collect()
}

/// Reinfection probability of every member with `epsilon` held at a fixed value
#[must_use]
pub fn evaluate_with_epsilon(
    ensemble: &SampleEnsemble,
    protocol: Protocol,
    epsilon: f64,
) -> Vec<f64> {
    ensemble
        .iter(protocol)
        .map(|v| v.with_epsilon(epsilon).reinfection_probability())
        .collect()
}

/// Slope with respect to `epsilon` for every member under `protocol`
#[must_use]
pub fn evaluate_slope(ensemble: &SampleEnsemble, protocol: Protocol) -> Vec<f64> {
    ensemble
        .iter(protocol)
        .map(|v| v.reinfection_probability_slope())
        .collect()
}
