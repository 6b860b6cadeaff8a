//! Sensitivity of reinfection to partner-treatment efficacy.
//!
//! Every sampled parameter except `epsilon` is reused; `epsilon` is held at each
//! grid value in turn and the full reinfection vector recomputed. The result is
//! an `ensemble × grid` table plus a per-column summary and density histogram.

#[cfg(feature = "parallel")]
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, SummaryError};
use crate::model::{Protocol, SampleEnsemble};
use crate::stats::{Histogram, Summary, summarize};
use crate::transmission::evaluate_with_epsilon;

/// Evenly spaced grid of fixed parameter values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepGrid {
    pub min_value: f64,
    pub max_value: f64,
    /// Number of points, endpoints included
    pub step_count: usize,
}

impl Default for SweepGrid {
    /// 0, 0.05, ..., 1.0
    fn default() -> Self {
        Self {
            min_value: 0.0,
            max_value: 1.0,
            step_count: 21,
        }
    }
}

impl SweepGrid {
    /// Generate the sweep values
    #[must_use]
    pub fn values(&self) -> Vec<f64> {
        if self.step_count <= 1 {
            return vec![self.min_value];
        }
        let span = self.max_value - self.min_value;
        let last = (self.step_count - 1) as f64;
        (0..self.step_count)
            .map(|i| self.min_value + span * i as f64 / last)
            .collect()
    }

    pub fn validate(&self) -> Result<(), AnalysisError> {
        let in_unit = |v: f64| (0.0..=1.0).contains(&v);
        if self.step_count == 0
            || !in_unit(self.min_value)
            || !in_unit(self.max_value)
            || self.min_value > self.max_value
            || (self.step_count == 1 && self.min_value != self.max_value)
        {
            return Err(AnalysisError::Config(format!(
                "sweep grid [{}, {}] with {} points must lie inside [0, 1] with min <= max, and a single point needs min == max",
                self.min_value, self.max_value, self.step_count
            )));
        }
        Ok(())
    }
}

/// Reinfection probabilities keyed by (ensemble index, grid index).
///
/// Columns are stored contiguously so each grid point can be summarized
/// without copying.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepMatrix {
    grid_values: Vec<f64>,
    rows: usize,
    data: Vec<f64>,
}

impl SweepMatrix {
    /// Evaluate `protocol` on every member for each grid value
    #[must_use]
    pub fn compute(ensemble: &SampleEnsemble, protocol: Protocol, grid_values: &[f64]) -> Self {
        #[cfg(feature = "parallel")]
        let columns: Vec<Vec<f64>> = grid_values
            .par_iter()
            .map(|&epsilon| evaluate_with_epsilon(ensemble, protocol, epsilon))
            .collect();

        #[cfg(not(feature = "parallel"))]
        let columns: Vec<Vec<f64>> = grid_values
            .iter()
            .map(|&epsilon| evaluate_with_epsilon(ensemble, protocol, epsilon))
            .collect();

        Self {
            grid_values: grid_values.to_vec(),
            rows: ensemble.len(),
            data: columns.concat(),
        }
    }

    /// Bytes needed for a matrix of this shape
    #[must_use]
    pub fn memory_bytes(rows: usize, columns: usize) -> usize {
        rows * columns * std::mem::size_of::<f64>()
    }

    /// (ensemble size, grid size)
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.grid_values.len())
    }

    #[must_use]
    pub fn grid_values(&self) -> &[f64] {
        &self.grid_values
    }

    #[must_use]
    pub fn get(&self, row: usize, column: usize) -> Option<f64> {
        if row >= self.rows || column >= self.grid_values.len() {
            return None;
        }
        Some(self.data[column * self.rows + row])
    }

    /// Reinfection vector for one grid value
    #[must_use]
    pub fn column(&self, column: usize) -> Option<&[f64]> {
        if column >= self.grid_values.len() {
            return None;
        }
        let start = column * self.rows;
        Some(&self.data[start..start + self.rows])
    }

    /// One member's reinfection probability across the grid
    #[must_use]
    pub fn row(&self, row: usize) -> Option<Vec<f64>> {
        if row >= self.rows {
            return None;
        }
        Some(
            (0..self.grid_values.len())
                .map(|c| self.data[c * self.rows + row])
                .collect(),
        )
    }

    /// Iterate over (grid value, column) pairs
    pub fn columns(&self) -> impl Iterator<Item = (f64, &[f64])> {
        self.grid_values
            .iter()
            .copied()
            .zip(self.data.chunks_exact(self.rows.max(1)))
    }
}

/// Sweep matrix with its per-grid-point distribution summaries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitivitySweep {
    pub protocol: Protocol,
    pub matrix: SweepMatrix,
    /// One summary per grid value, in grid order
    pub column_summaries: Vec<Summary>,
    /// One histogram over `[0, 1]` per grid value, in grid order
    pub column_histograms: Vec<Histogram>,
}

impl SensitivitySweep {
    pub fn run(
        ensemble: &SampleEnsemble,
        protocol: Protocol,
        grid: &SweepGrid,
        quantiles: &[f64],
        histogram_bins: usize,
    ) -> Result<Self, SummaryError> {
        let matrix = SweepMatrix::compute(ensemble, protocol, &grid.values());

        let column_summaries = matrix
            .columns()
            .map(|(_, column)| summarize(column, quantiles))
            .collect::<Result<Vec<_>, _>>()?;
        let column_histograms = matrix
            .columns()
            .map(|(_, column)| Histogram::new(column, 0.0, 1.0, histogram_bins))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            protocol,
            matrix,
            column_summaries,
            column_histograms,
        })
    }

    /// Median reinfection probability at each grid value
    #[must_use]
    pub fn median_curve(&self) -> Vec<(f64, Option<f64>)> {
        self.matrix
            .grid_values()
            .iter()
            .zip(&self.column_summaries)
            .map(|(&x, s)| (x, s.median()))
            .collect()
    }
}
