//! Command-line driver for the reinfection analysis
//!
//! Loads an [`AnalysisConfig`] from YAML, applies command-line overrides,
//! runs the pipeline and writes the results.

pub mod logging;
pub mod output;

pub use logging::init_logging;
pub use output::{OutputError, OutputFormat, load_config, render, write_output};

use reinfect_core::{AnalysisConfig, AnalysisResults};

/// Overrides taken from the command line
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub seed: Option<u64>,
    pub samples: Option<usize>,
}

impl Overrides {
    #[must_use]
    pub fn apply(&self, mut config: AnalysisConfig) -> AnalysisConfig {
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        if let Some(samples) = self.samples {
            config = config.with_samples(samples);
        }
        config
    }
}

/// Render either the summary report or every per-member array
pub fn render_results(
    results: &AnalysisResults,
    format: OutputFormat,
    include_vectors: bool,
) -> Result<String, OutputError> {
    if include_vectors {
        render(results, format)
    } else {
        render(&results.report(), format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_replace_only_given_fields() {
        let base = AnalysisConfig::default();
        let config = Overrides {
            seed: Some(5),
            samples: None,
        }
        .apply(base.clone());
        assert_eq!(config.seed, 5);
        assert_eq!(config.samples, base.samples);
    }

    #[test]
    fn test_vectors_only_on_request() {
        let config = AnalysisConfig::default().with_samples(300);
        let results = reinfect_core::run_analysis(&config).unwrap();

        let compact = render_results(&results, OutputFormat::Json, false).unwrap();
        let full = render_results(&results, OutputFormat::Json, true).unwrap();
        assert!(!compact.contains("\"reinfection\": ["));
        assert!(full.contains("\"reinfection\": ["));
        assert!(full.len() > compact.len());
    }
}
