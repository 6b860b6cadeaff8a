//! Partner-reinfection Monte Carlo analysis library
//!
//! This crate estimates the probability that an index patient treated for
//! chlamydia is reinfected by an untreated sex partner, under standard partner
//! notification (control) and accelerated partner therapy (intervention).
//! It supports:
//! - A closed-form competing-risks transmission model and its slope in treatment efficacy
//! - Seeded Monte Carlo sampling of every uncertain parameter from configurable priors
//! - Rejection filtering against exact binomial intervals of observed trial outcomes
//! - A sensitivity sweep over fixed treatment-efficacy values
//! - Positional comparison of posterior treatment-efficacy samples
//!
//! ```ignore
//! use reinfect_core::{AnalysisConfig, run_analysis};
//!
//! let results = run_analysis(&AnalysisConfig::default())?;
//! println!("control mean: {}", results.control.summary.mean);
//! if results.posteriors.apt_accepted.is_empty() {
//!     println!("no ensemble member matches the APT-accepted outcome");
//! }
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod analysis;
pub mod compare;
pub mod error;
pub mod interval;
pub mod posterior;
pub mod sampler;
pub mod stats;
pub mod sweep;
pub mod transmission;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod config;
pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use analysis::{AnalysisReport, AnalysisResults, analyze_ensemble, run_analysis};
pub use config::AnalysisConfig;
pub use transmission::{reinfection_probability, reinfection_probability_slope};
