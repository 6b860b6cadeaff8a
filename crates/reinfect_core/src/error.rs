use std::fmt;

/// Errors related to prior distribution parameters
#[derive(Debug, Clone, PartialEq)]
pub enum PriorError {
    InvalidParameters {
        prior: &'static str,
        low: f64,
        high: f64,
        reason: &'static str,
    },
    InvalidBinomial {
        trials: u64,
        probability: f64,
    },
    NonFiniteValue {
        prior: &'static str,
        value: f64,
    },
}

impl fmt::Display for PriorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriorError::InvalidParameters {
                prior,
                low,
                high,
                reason,
            } => write!(
                f,
                "invalid {prior} prior parameters (low={low}, high={high}): {reason}"
            ),
            PriorError::InvalidBinomial {
                trials,
                probability,
            } => write!(
                f,
                "invalid binomial prior (trials={trials}, probability={probability})"
            ),
            PriorError::NonFiniteValue { prior, value } => {
                write!(f, "{prior} prior has non-finite value {value}")
            }
        }
    }
}

impl std::error::Error for PriorError {}

/// Errors raised while assembling or reading a sample ensemble.
///
/// A length mismatch means the columns no longer describe the same
/// partnerships, so it is treated as a configuration bug by callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnsembleError {
    LengthMismatch {
        column: &'static str,
        expected: usize,
        actual: usize,
    },
    Empty,
}

impl fmt::Display for EnsembleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnsembleError::LengthMismatch {
                column,
                expected,
                actual,
            } => write!(
                f,
                "column `{column}` has {actual} values but the ensemble has {expected}"
            ),
            EnsembleError::Empty => write!(f, "ensemble must contain at least one sample"),
        }
    }
}

impl std::error::Error for EnsembleError {}

/// Errors from binomial confidence interval estimation
#[derive(Debug, Clone, PartialEq)]
pub enum IntervalError {
    InvalidCounts { successes: u64, trials: u64 },
    InvalidLevel(f64),
    InvalidBounds { lower: f64, upper: f64 },
    Distribution { alpha: f64, beta: f64 },
}

impl fmt::Display for IntervalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntervalError::InvalidCounts { successes, trials } => {
                write!(f, "invalid binomial counts: {successes} successes in {trials} trials")
            }
            IntervalError::InvalidLevel(level) => {
                write!(f, "confidence level {level} must lie strictly between 0 and 1")
            }
            IntervalError::InvalidBounds { lower, upper } => {
                write!(f, "interval [{lower}, {upper}] is not a sub-interval of [0, 1]")
            }
            IntervalError::Distribution { alpha, beta } => {
                write!(f, "could not build Beta({alpha}, {beta}) distribution")
            }
        }
    }
}

impl std::error::Error for IntervalError {}

/// Errors from descriptive statistics.
///
/// `Empty` is the explicit "no data" signal for summaries of an empty
/// posterior subset or comparison.
#[derive(Debug, Clone, PartialEq)]
pub enum SummaryError {
    Empty,
    NonFinite { index: usize, value: f64 },
    InvalidProbability(f64),
    InvalidHistogram { low: f64, high: f64, bins: usize },
}

impl fmt::Display for SummaryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SummaryError::Empty => write!(f, "no data: cannot summarize an empty sample"),
            SummaryError::NonFinite { index, value } => {
                write!(f, "non-finite value {value} at position {index}")
            }
            SummaryError::InvalidProbability(p) => {
                write!(f, "quantile probability {p} is outside [0, 1]")
            }
            SummaryError::InvalidHistogram { low, high, bins } => {
                write!(f, "invalid histogram range [{low}, {high}] with {bins} bins")
            }
        }
    }
}

impl std::error::Error for SummaryError {}

/// Top-level error for running the analysis pipeline
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisError {
    Prior(PriorError),
    Ensemble(EnsembleError),
    Interval(IntervalError),
    Summary(SummaryError),
    /// Configuration error
    Config(String),
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisError::Prior(e) => write!(f, "{e}"),
            AnalysisError::Ensemble(e) => write!(f, "{e}"),
            AnalysisError::Interval(e) => write!(f, "{e}"),
            AnalysisError::Summary(e) => write!(f, "{e}"),
            AnalysisError::Config(msg) => write!(f, "configuration error: {msg}"),
        }
    }
}

impl std::error::Error for AnalysisError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AnalysisError::Prior(e) => Some(e),
            AnalysisError::Ensemble(e) => Some(e),
            AnalysisError::Interval(e) => Some(e),
            AnalysisError::Summary(e) => Some(e),
            AnalysisError::Config(_) => None,
        }
    }
}

impl From<PriorError> for AnalysisError {
    fn from(err: PriorError) -> Self {
        AnalysisError::Prior(err)
    }
}

impl From<EnsembleError> for AnalysisError {
    fn from(err: EnsembleError) -> Self {
        AnalysisError::Ensemble(err)
    }
}

impl From<IntervalError> for AnalysisError {
    fn from(err: IntervalError) -> Self {
        AnalysisError::Interval(err)
    }
}

impl From<SummaryError> for AnalysisError {
    fn from(err: SummaryError) -> Self {
        AnalysisError::Summary(err)
    }
}
