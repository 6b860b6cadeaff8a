//! Properties of the transmission model
//!
//! These tests verify that:
//! - Reinfection probability stays in [0, 1] for valid parameters
//! - The analytic slope matches a finite difference in `epsilon`
//! - Fully effective partner treatment leaves only the direct transmission term
//! - A hand-computed scenario is reproduced

use proptest::prelude::*;
use rand::SeedableRng;

use crate::config::AnalysisConfig;
use crate::model::Protocol;
use crate::sampler::sample_seeded;
use crate::transmission::{reinfection_probability, reinfection_probability_slope};

fn probability() -> impl Strategy<Value = f64> {
    0.0..=1.0f64
}

/// Rates as produced by the default priors, widened on both sides
fn rate() -> impl Strategy<Value = f64> {
    1e-4..2.0f64
}

proptest! {
    #[test]
    fn probability_is_in_unit_interval(
        s in probability(),
        pos in probability(),
        f in rate(),
        beta in probability(),
        gamma in rate(),
        sigma in rate(),
        epsilon in probability(),
        delta in rate(),
        study in rate(),
    ) {
        let p = reinfection_probability(s, pos, f, beta, gamma, sigma, epsilon, delta, study);
        prop_assert!((0.0..=1.0).contains(&p), "p = {}", p);
    }

    #[test]
    fn boundary_inputs_give_zero_or_direct_term(
        f in rate(),
        beta in probability(),
        gamma in rate(),
        sigma in rate(),
        delta in rate(),
        study in rate(),
    ) {
        prop_assert_eq!(
            reinfection_probability(0.0, 1.0, f, beta, gamma, sigma, 0.3, delta, study),
            0.0
        );
        prop_assert_eq!(
            reinfection_probability(1.0, 0.0, f, beta, gamma, sigma, 0.3, delta, study),
            0.0
        );

        // epsilon = 1 keeps only direct transmission: s·pos·f·beta/H
        let s = 0.47;
        let pos = 0.65;
        let h = f * beta + gamma + sigma + study + delta;
        let direct_only = s * pos * (f * beta / h);
        prop_assert_eq!(
            reinfection_probability(s, pos, f, beta, gamma, sigma, 1.0, delta, study),
            direct_only
        );
        // and it is the minimum over epsilon
        prop_assert!(
            reinfection_probability(s, pos, f, beta, gamma, sigma, 0.0, delta, study)
                >= direct_only
        );
    }

    #[test]
    fn slope_is_non_positive(
        s in probability(),
        pos in probability(),
        f in rate(),
        beta in probability(),
        gamma in rate(),
        sigma in rate(),
        delta in rate(),
        study in rate(),
    ) {
        let slope = reinfection_probability_slope(s, pos, f, beta, gamma, sigma, delta, study);
        prop_assert!(slope <= 0.0);
        prop_assert!(slope >= -1.0);
    }
}

/// Central finite difference of the model in `epsilon`
fn numerical_slope(v: &crate::model::ParameterVector) -> f64 {
    let h = 1e-4;
    let eps = v.epsilon.clamp(h, 1.0 - h);
    let up = v.with_epsilon(eps + h).reinfection_probability();
    let down = v.with_epsilon(eps - h).reinfection_probability();
    (up - down) / (2.0 * h)
}

#[test]
fn test_slope_matches_finite_difference_on_sampled_vectors() {
    let config = AnalysisConfig::default().with_samples(500).with_seed(99);
    let ensemble = sample_seeded(&config).unwrap();

    for protocol in Protocol::ALL {
        for v in ensemble.iter(protocol) {
            let analytic = v.reinfection_probability_slope();
            let numeric = numerical_slope(&v);
            assert!(
                (analytic - numeric).abs() < 1e-8,
                "analytic {analytic} vs numeric {numeric} for {v:?}"
            );
        }
    }
}

#[test]
fn test_slope_matches_finite_difference_on_random_vectors() {
    use rand::Rng;

    let mut rng = rand::rngs::StdRng::seed_from_u64(2024);
    for _ in 0..200 {
        let v = crate::model::ParameterVector {
            s: rng.random_range(0.0..=1.0),
            pos: rng.random_range(0.0..=1.0),
            f: rng.random_range(0.01..=2.0),
            beta: rng.random_range(0.0..=1.0),
            gamma: rng.random_range(0.001..=0.5),
            sigma: rng.random_range(0.001..=0.5),
            epsilon: rng.random_range(0.0..=1.0),
            delta: rng.random_range(0.01..=1.0),
            study: rng.random_range(0.001..=0.5),
        };
        let analytic = v.reinfection_probability_slope();
        let numeric = numerical_slope(&v);
        assert!(
            (analytic - numeric).abs() < 1e-8,
            "analytic {analytic} vs numeric {numeric}"
        );
    }
}

/// Worked example with the mean control-phase future-sex and positivity proportions
#[test]
fn test_hand_computed_scenario() {
    let s = 1216.0 / 2589.0;
    let pos = 78.0 / 120.0;
    let f = 1.0 / 3.0;
    let beta = 0.1;
    let gamma = 1.0 / 200.0;
    let sigma = 1.0 / 100.0;
    let epsilon = 0.5;
    let delta = 1.0 / 3.2;
    let study = 1.0 / 140.0;

    // H = 1/30 + 1/200 + 1/100 + 1/3.2 + 1/140 ≈ 0.367976
    // H' = H - 1/3.2 ≈ 0.055476
    let h = f * beta + gamma + sigma + delta + study;
    let h_post = f * beta + gamma + sigma + study;
    let by_hand = s * pos * (f * beta / h + (1.0 - epsilon) * (delta / h) * (f * beta / h_post));

    let p = reinfection_probability(s, pos, f, beta, gamma, sigma, epsilon, delta, study);
    assert!((p - by_hand).abs() < 1e-9);
    assert!((p - 0.105_546_019_749_709).abs() < 1e-9, "p = {p}");

    let slope = reinfection_probability_slope(s, pos, f, beta, gamma, sigma, delta, study);
    assert!((slope + s * pos * (delta / h) * (f * beta / h_post)).abs() < 1e-12);
}
