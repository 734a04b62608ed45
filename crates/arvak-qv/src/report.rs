//! Serializable summary of a Quantum Volume analysis.

use serde::{Deserialize, Serialize};

use crate::statistics::{DepthStatistics, QvSuccess};

/// Result of a QV fit, ready for export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QvReport {
    /// Qubit subset per depth.
    pub qubit_lists: Vec<Vec<u32>>,
    /// `2^d` per depth.
    pub quantum_volumes: Vec<u64>,
    /// Per-depth statistics.
    pub statistics: Vec<DepthStatistics>,
    /// Per-depth verdicts.
    pub success: Vec<QvSuccess>,
    /// Trials per depth used by the fit.
    pub num_trials: u32,
    /// Result batches merged into the fit.
    pub num_batches: usize,
    /// Largest quantum volume among passing depths, 1 if none passed.
    pub achieved_quantum_volume: u64,
}

impl QvReport {
    /// Assemble a report.
    pub fn new(
        qubit_lists: Vec<Vec<u32>>,
        quantum_volumes: Vec<u64>,
        statistics: Vec<DepthStatistics>,
        success: Vec<QvSuccess>,
        num_trials: u32,
        num_batches: usize,
    ) -> Self {
        let achieved_quantum_volume = success
            .iter()
            .filter(|s| s.success)
            .map(|s| crate::statistics::quantum_volume(s.depth))
            .max()
            .unwrap_or(1);
        Self {
            qubit_lists,
            quantum_volumes,
            statistics,
            success,
            num_trials,
            num_batches,
            achieved_quantum_volume,
        }
    }

    /// Depths that passed.
    pub fn passing_depths(&self) -> Vec<u32> {
        self.success
            .iter()
            .filter(|s| s.success)
            .map(|s| s.depth)
            .collect()
    }
}
