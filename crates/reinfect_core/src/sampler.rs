//! Draws the sample ensemble from the configured priors.
//!
//! All columns come from one caller-owned generator, in a fixed order:
//! `s` (control), `s` (intervention), `pos`, `f`, `beta`, `gamma`, `epsilon`,
//! `sigma`, `study`. With [`sample_seeded`] the generator is
//! `StdRng::seed_from_u64(config.seed)`, so a given seed and ensemble size
//! always yield the same ensemble for a pinned `rand` version.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::{AnalysisConfig, PriorConfig, TrialData};
use crate::error::AnalysisError;
use crate::model::{EnsembleColumns, Parameter, Prior, Protocol, SampleEnsemble};

/// Draw one column and clamp any value that escaped the parameter's domain
fn draw_column<R: Rng + ?Sized>(
    rng: &mut R,
    prior: &Prior,
    parameter: Parameter,
    label: &str,
    samples: usize,
) -> Result<Vec<f64>, AnalysisError> {
    let mut values = prior.sample_column(rng, samples)?;
    let domain = parameter.domain();
    let mut clamped = 0usize;
    for v in &mut values {
        if let Some(fixed) = domain.clamp(*v) {
            *v = fixed;
            clamped += 1;
        }
    }
    if clamped > 0 {
        tracing::warn!(
            parameter = label,
            clamped,
            samples,
            "clamped out-of-domain draws"
        );
    }
    Ok(values)
}

/// Draw `samples` aligned parameter vectors
pub fn sample_ensemble<R: Rng + ?Sized>(
    priors: &PriorConfig,
    trial: &TrialData,
    samples: usize,
    rng: &mut R,
) -> Result<SampleEnsemble, AnalysisError> {
    if samples == 0 {
        return Err(AnalysisError::Config(
            "samples must be at least 1".to_string(),
        ));
    }
    priors.validate()?;

    let s_control = draw_column(
        rng,
        &trial.future_sex(Protocol::Control).resampling_prior(),
        Parameter::FutureSex,
        "s_control",
        samples,
    )?;
    let s_intervention = draw_column(
        rng,
        &trial.future_sex(Protocol::Intervention).resampling_prior(),
        Parameter::FutureSex,
        "s_intervention",
        samples,
    )?;
    let pos = draw_column(
        rng,
        &trial.partner_positivity.resampling_prior(),
        Parameter::Positivity,
        "pos",
        samples,
    )?;

    let mut continuous = |prior: &Prior, parameter: Parameter| {
        draw_column(&mut *rng, prior, parameter, parameter.symbol(), samples)
    };
    let f = continuous(&priors.f, Parameter::CoitalFrequency)?;
    let beta = continuous(&priors.beta, Parameter::Transmissibility)?;
    let gamma = continuous(&priors.gamma, Parameter::Clearance)?;
    let epsilon = continuous(&priors.epsilon, Parameter::TreatmentEfficacy)?;
    let sigma = continuous(&priors.sigma, Parameter::Dissolution)?;
    let study = continuous(&priors.study, Parameter::StudyWindow)?;

    let columns = EnsembleColumns {
        s_control,
        s_intervention,
        pos,
        f,
        beta,
        gamma,
        epsilon,
        sigma,
        study,
    };

    let ensemble = SampleEnsemble::from_columns(columns, priors.delta())?;
    tracing::debug!(samples = ensemble.len(), "sampled parameter ensemble");
    Ok(ensemble)
}

/// Draw the ensemble described by `config` from a generator seeded with `config.seed`
pub fn sample_seeded(config: &AnalysisConfig) -> Result<SampleEnsemble, AnalysisError> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    sample_ensemble(&config.priors, &config.trial, config.samples, &mut rng)
}
