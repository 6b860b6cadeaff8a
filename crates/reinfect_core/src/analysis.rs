//! End-to-end reinfection analysis.
//!
//! Sampler → transmission model → posterior filter → {sensitivity sweep,
//! comparative statistics}. Every intermediate array is kept in
//! [`AnalysisResults`] under a named field so a plotting or reporting layer can
//! consume it; [`AnalysisResults::report`] drops the per-member arrays and
//! keeps the summaries.

use serde::{Deserialize, Serialize};

use crate::compare::ComparativeStatistics;
use crate::config::{AnalysisConfig, ObservedCount, TrialData};
use crate::error::AnalysisError;
use crate::interval::ConfidenceInterval;
use crate::model::{Protocol, SampleEnsemble};
use crate::posterior::PosteriorSubset;
use crate::sampler::sample_seeded;
use crate::stats::{Histogram, Summary, summarize};
use crate::sweep::{SensitivitySweep, SweepMatrix};
use crate::transmission::{evaluate, evaluate_slope};

/// Observed outcome a posterior is conditioned on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PosteriorTarget {
    /// Control-phase reinfection, matched against the control model
    Control,
    /// Intervention-phase reinfection, matched against the intervention model
    Intervention,
    /// Reinfection where the partner accepted APT, matched against the intervention model
    AptAccepted,
}

impl PosteriorTarget {
    pub const ALL: [PosteriorTarget; 3] = [
        PosteriorTarget::Control,
        PosteriorTarget::Intervention,
        PosteriorTarget::AptAccepted,
    ];

    /// Protocol whose model output is filtered
    #[must_use]
    pub fn protocol(&self) -> Protocol {
        match self {
            PosteriorTarget::Control => Protocol::Control,
            PosteriorTarget::Intervention | PosteriorTarget::AptAccepted => Protocol::Intervention,
        }
    }

    #[must_use]
    pub fn observed(&self, trial: &TrialData) -> ObservedCount {
        match self {
            PosteriorTarget::Control => trial.control_outcome,
            PosteriorTarget::Intervention => trial.intervention_outcome,
            PosteriorTarget::AptAccepted => trial.apt_accepted_outcome,
        }
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            PosteriorTarget::Control => "control",
            PosteriorTarget::Intervention => "intervention",
            PosteriorTarget::AptAccepted => "apt_accepted",
        }
    }
}

/// Model output for one protocol
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProtocolOutcome {
    pub protocol: Protocol,
    /// Reinfection probability per ensemble member
    pub reinfection: Vec<f64>,
    pub summary: Summary,
    /// Change in reinfection probability per `slope_step` of `epsilon`, per member
    pub slope: Vec<f64>,
    pub slope_summary: Summary,
}

impl ProtocolOutcome {
    fn evaluate(
        ensemble: &SampleEnsemble,
        protocol: Protocol,
        config: &AnalysisConfig,
    ) -> Result<Self, AnalysisError> {
        let reinfection = evaluate(ensemble, protocol);
        let summary = summarize(&reinfection, &config.quantiles)?;
        let slope: Vec<f64> = evaluate_slope(ensemble, protocol)
            .into_iter()
            .map(|d| d * config.slope_step)
            .collect();
        let slope_summary = summarize(&slope, &config.quantiles)?;

        tracing::info!(
            protocol = %protocol,
            mean = summary.mean,
            slope_mean = slope_summary.mean,
            "evaluated transmission model"
        );

        Ok(Self {
            protocol,
            reinfection,
            summary,
            slope,
            slope_summary,
        })
    }
}

/// One posterior subset with its conditioning data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PosteriorReport {
    pub target: PosteriorTarget,
    pub observed: ObservedCount,
    pub subset: PosteriorSubset,
    /// Summary of posterior `epsilon`; `None` when the subset is empty
    pub summary: Option<Summary>,
}

impl PosteriorReport {
    fn condition(
        target: PosteriorTarget,
        ensemble: &SampleEnsemble,
        reinfection: &[f64],
        config: &AnalysisConfig,
    ) -> Result<Self, AnalysisError> {
        let observed = target.observed(&config.trial);
        let subset =
            PosteriorSubset::condition_on(ensemble, reinfection, observed, config.confidence_level)?;

        let summary = match subset.summary(&config.quantiles) {
            Ok(summary) => {
                tracing::info!(
                    posterior = target.label(),
                    accepted = subset.len(),
                    lower = subset.interval.lower,
                    upper = subset.interval.upper,
                    epsilon_mean = summary.mean,
                    "conditioned ensemble on observed outcome"
                );
                Some(summary)
            }
            Err(e) => {
                tracing::warn!(
                    posterior = target.label(),
                    lower = subset.interval.lower,
                    upper = subset.interval.upper,
                    error = %e,
                    "posterior subset has no data"
                );
                None
            }
        };

        Ok(Self {
            target,
            observed,
            subset,
            summary,
        })
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subset.is_empty()
    }
}

/// The three independently filtered posteriors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Posteriors {
    pub control: PosteriorReport,
    pub intervention: PosteriorReport,
    pub apt_accepted: PosteriorReport,
}

impl Posteriors {
    #[must_use]
    pub fn get(&self, target: PosteriorTarget) -> &PosteriorReport {
        match target {
            PosteriorTarget::Control => &self.control,
            PosteriorTarget::Intervention => &self.intervention,
            PosteriorTarget::AptAccepted => &self.apt_accepted,
        }
    }
}

/// Positional differences between posterior `epsilon` samples
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparisons {
    /// intervention − control
    pub intervention_vs_control: ComparativeStatistics,
    /// APT accepted − control
    pub apt_accepted_vs_control: ComparativeStatistics,
}

/// Every named output of one analysis run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResults {
    pub seed: u64,
    pub ensemble: SampleEnsemble,
    pub control: ProtocolOutcome,
    pub intervention: ProtocolOutcome,
    pub posteriors: Posteriors,
    pub sweep: SensitivitySweep,
    pub comparisons: Comparisons,
}

impl AnalysisResults {
    #[must_use]
    pub fn outcome(&self, protocol: Protocol) -> &ProtocolOutcome {
        match protocol {
            Protocol::Control => &self.control,
            Protocol::Intervention => &self.intervention,
        }
    }

    /// Summaries only, without per-member arrays
    #[must_use]
    pub fn report(&self) -> AnalysisReport {
        AnalysisReport {
            seed: self.seed,
            samples: self.ensemble.len(),
            outcomes: [&self.control, &self.intervention]
                .into_iter()
                .map(|o| OutcomeSummary {
                    protocol: o.protocol,
                    reinfection: o.summary.clone(),
                    slope: o.slope_summary.clone(),
                })
                .collect(),
            posteriors: PosteriorTarget::ALL
                .iter()
                .map(|&t| {
                    let p = self.posteriors.get(t);
                    PosteriorSummary {
                        target: t,
                        observed: p.observed,
                        interval: p.subset.interval,
                        accepted: p.subset.len(),
                        acceptance_rate: p.subset.acceptance_rate(),
                        epsilon: p.summary.clone(),
                    }
                })
                .collect(),
            sweep: SweepSummary {
                protocol: self.sweep.protocol,
                grid_values: self.sweep.matrix.grid_values().to_vec(),
                column_summaries: self.sweep.column_summaries.clone(),
                column_histograms: self.sweep.column_histograms.clone(),
            },
            comparisons: vec![
                ComparisonSummary::new(
                    "intervention_vs_control",
                    &self.comparisons.intervention_vs_control,
                ),
                ComparisonSummary::new(
                    "apt_accepted_vs_control",
                    &self.comparisons.apt_accepted_vs_control,
                ),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeSummary {
    pub protocol: Protocol,
    pub reinfection: Summary,
    pub slope: Summary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PosteriorSummary {
    pub target: PosteriorTarget,
    pub observed: ObservedCount,
    pub interval: ConfidenceInterval,
    pub accepted: usize,
    pub acceptance_rate: f64,
    /// `None` when no ensemble member was accepted
    pub epsilon: Option<Summary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepSummary {
    pub protocol: Protocol,
    pub grid_values: Vec<f64>,
    pub column_summaries: Vec<Summary>,
    pub column_histograms: Vec<Histogram>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonSummary {
    pub name: String,
    pub first_len: usize,
    pub second_len: usize,
    pub pairs: usize,
    pub fraction_positive: Option<f64>,
    pub difference: Option<Summary>,
    pub histogram: Option<Histogram>,
}

impl ComparisonSummary {
    fn new(name: &str, stats: &ComparativeStatistics) -> Self {
        Self {
            name: name.to_string(),
            first_len: stats.first_len,
            second_len: stats.second_len,
            pairs: stats.len(),
            fraction_positive: stats.fraction_positive(),
            difference: stats.summary.clone(),
            histogram: stats.histogram.clone(),
        }
    }
}

/// Compact, summary-only view of [`AnalysisResults`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub seed: u64,
    pub samples: usize,
    pub outcomes: Vec<OutcomeSummary>,
    pub posteriors: Vec<PosteriorSummary>,
    pub sweep: SweepSummary,
    pub comparisons: Vec<ComparisonSummary>,
}

/// Sample the ensemble described by `config` and run the full analysis on it
pub fn run_analysis(config: &AnalysisConfig) -> Result<AnalysisResults, AnalysisError> {
    config.validate()?;
    tracing::info!(
        seed = config.seed,
        samples = config.samples,
        "starting reinfection analysis"
    );
    let ensemble = sample_seeded(config)?;
    analyze_ensemble(config, ensemble)
}

/// Run the analysis on an ensemble that was already drawn
pub fn analyze_ensemble(
    config: &AnalysisConfig,
    ensemble: SampleEnsemble,
) -> Result<AnalysisResults, AnalysisError> {
    config.validate()?;

    let control = ProtocolOutcome::evaluate(&ensemble, Protocol::Control, config)?;
    let intervention = ProtocolOutcome::evaluate(&ensemble, Protocol::Intervention, config)?;

    let posteriors = Posteriors {
        control: PosteriorReport::condition(
            PosteriorTarget::Control,
            &ensemble,
            &control.reinfection,
            config,
        )?,
        intervention: PosteriorReport::condition(
            PosteriorTarget::Intervention,
            &ensemble,
            &intervention.reinfection,
            config,
        )?,
        apt_accepted: PosteriorReport::condition(
            PosteriorTarget::AptAccepted,
            &ensemble,
            &intervention.reinfection,
            config,
        )?,
    };

    let grid_len = config.sweep.values().len();
    tracing::info!(
        rows = ensemble.len(),
        columns = grid_len,
        bytes = SweepMatrix::memory_bytes(ensemble.len(), grid_len),
        "running sensitivity sweep"
    );
    let sweep = SensitivitySweep::run(
        &ensemble,
        Protocol::Control,
        &config.sweep,
        &config.quantiles,
        config.histogram_bins,
    )?;

    let comparisons = Comparisons {
        intervention_vs_control: ComparativeStatistics::between(
            &posteriors.intervention.subset,
            &posteriors.control.subset,
            &config.quantiles,
            config.histogram_bins,
        ),
        apt_accepted_vs_control: ComparativeStatistics::between(
            &posteriors.apt_accepted.subset,
            &posteriors.control.subset,
            &config.quantiles,
            config.histogram_bins,
        ),
    };

    tracing::info!("reinfection analysis complete");

    Ok(AnalysisResults {
        seed: config.seed,
        ensemble,
        control,
        intervention,
        posteriors,
        sweep,
        comparisons,
    })
}
