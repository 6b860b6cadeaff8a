//! Acceptance filtering on sampled ensembles

use crate::config::{AnalysisConfig, ObservedCount};
use crate::error::SummaryError;
use crate::interval::ConfidenceInterval;
use crate::model::Protocol;
use crate::posterior::PosteriorSubset;
use crate::sampler::sample_seeded;
use crate::stats::{DEFAULT_QUANTILES, mean};
use crate::transmission::evaluate;

fn sampled(samples: usize) -> (crate::model::SampleEnsemble, Vec<f64>, Vec<f64>) {
    let config = AnalysisConfig::default().with_samples(samples).with_seed(7);
    let ensemble = sample_seeded(&config).unwrap();
    let control = evaluate(&ensemble, Protocol::Control);
    let intervention = evaluate(&ensemble, Protocol::Intervention);
    (ensemble, control, intervention)
}

#[test]
fn test_unit_interval_accepts_everything() {
    let (ensemble, control, _) = sampled(3_000);
    let subset = PosteriorSubset::select(&ensemble, &control, ConfidenceInterval::UNIT).unwrap();

    assert_eq!(subset.len(), ensemble.len());
    let all: Vec<usize> = (0..ensemble.len()).collect();
    assert_eq!(subset.indices(), all.as_slice());
    assert_eq!(subset.epsilon(), ensemble.epsilon());
    assert_eq!(subset.acceptance_rate(), 1.0);
}

#[test]
fn test_accepted_members_lie_in_interval() {
    let (ensemble, control, _) = sampled(10_000);
    let subset =
        PosteriorSubset::condition_on(&ensemble, &control, ObservedCount::new(116, 1724), 0.95)
            .unwrap();

    assert!(!subset.is_empty());
    assert!(subset.len() < ensemble.len());
    for &i in subset.indices() {
        assert!(subset.interval.contains(control[i]));
    }
    // rejected members lie outside
    let rejected = (0..ensemble.len()).filter(|i| subset.indices().binary_search(i).is_err());
    for i in rejected {
        assert!(!subset.interval.contains(control[i]));
    }
    assert_eq!(subset.restrict(&control).unwrap().len(), subset.len());
}

#[test]
fn test_observed_reinfection_favours_effective_treatment() {
    // The model overshoots the observed reinfection rates unless partner
    // treatment works, so accepted epsilon should sit above the prior mean.
    let (ensemble, control, intervention) = sampled(20_000);
    let prior_mean = mean(ensemble.epsilon()).unwrap();
    assert!((prior_mean - 0.5).abs() < 0.02);

    let control_post =
        PosteriorSubset::condition_on(&ensemble, &control, ObservedCount::new(116, 1724), 0.95)
            .unwrap();
    let apt_post =
        PosteriorSubset::condition_on(&ensemble, &intervention, ObservedCount::new(2, 106), 0.95)
            .unwrap();

    let control_mean = control_post.summary(&DEFAULT_QUANTILES).unwrap().mean;
    let apt_mean = apt_post.summary(&DEFAULT_QUANTILES).unwrap().mean;
    assert!(control_mean > prior_mean, "control posterior mean {control_mean}");
    assert!(apt_mean > prior_mean, "apt posterior mean {apt_mean}");
}

#[test]
fn test_unreachable_outcome_leaves_empty_posterior() {
    let (ensemble, control, _) = sampled(2_000);
    // Every modelled probability is below 0.5
    assert!(control.iter().all(|p| *p < 0.5));
    let subset =
        PosteriorSubset::condition_on(&ensemble, &control, ObservedCount::new(95, 100), 0.95)
            .unwrap();

    assert!(subset.is_empty());
    assert!(subset.epsilon().is_empty());
    assert_eq!(
        subset.summary(&DEFAULT_QUANTILES).unwrap_err(),
        SummaryError::Empty
    );
}
