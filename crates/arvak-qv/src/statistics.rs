//! Per-depth statistics and the success test.
//!
//! Heavy-output probabilities are modelled as binomial: with `N` trials the
//! standard error of a mean `p` is `sqrt(p (1 - p) / N)`. A depth passes when
//! the measured mean exceeds the threshold with one-sided confidence above the
//! required level, using the normal approximation
//!
//! ```text
//! confidence = ½ · (1 + erf((p̂ − threshold) / (σ √2)))
//! ```

use serde::{Deserialize, Serialize};
use statrs::function::erf::erf;

/// Floor added to the standard error before dividing by it.
pub const SIGMA_FLOOR: f64 = 1e-10;

/// Heavy-output tallies for one circuit instance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrialData {
    /// Shots landing on heavy outputs, summed over all batches.
    pub heavy_counts: u64,
    /// Total shots, summed over all batches.
    pub shots: u64,
    /// Ideal heavy-output probability.
    pub ideal_heavy_probability: f64,
}

/// Aggregate heavy-output statistics for one depth.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DepthStatistics {
    /// Circuit depth (= width).
    pub depth: u32,
    /// Measured heavy-output probability, shot-weighted over trials.
    pub heavy_output_mean: f64,
    /// Binomial standard error of `heavy_output_mean`.
    pub heavy_output_stderr: f64,
    /// Ideal heavy-output probability, unweighted mean over trials.
    pub ideal_mean: f64,
    /// Binomial standard error of `ideal_mean`.
    pub ideal_stderr: f64,
}

impl DepthStatistics {
    /// Aggregate the trials of one depth.
    ///
    /// The measured mean pools all shots, while the ideal mean averages the
    /// per-trial values without weighting. Both errors divide by the trial
    /// count.
    #[allow(clippy::cast_precision_loss)]
    pub fn from_trials(depth: u32, trials: &[TrialData]) -> Self {
        let n = trials.len() as f64;
        let heavy: u64 = trials.iter().map(|t| t.heavy_counts).sum();
        let shots: u64 = trials.iter().map(|t| t.shots).sum();

        let heavy_output_mean = if shots == 0 {
            0.0
        } else {
            heavy as f64 / shots as f64
        };
        let ideal_mean = if trials.is_empty() {
            0.0
        } else {
            trials.iter().map(|t| t.ideal_heavy_probability).sum::<f64>() / n
        };

        Self {
            depth,
            heavy_output_mean,
            heavy_output_stderr: binomial_stderr(heavy_output_mean, n),
            ideal_mean,
            ideal_stderr: binomial_stderr(ideal_mean, n),
        }
    }

    /// Quantum volume for this depth, `2^depth`.
    pub fn quantum_volume(&self) -> u64 {
        quantum_volume(self.depth)
    }
}

/// Pass/fail verdict for one depth.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QvSuccess {
    /// Circuit depth.
    pub depth: u32,
    /// Whether the depth passed.
    pub success: bool,
    /// One-sided confidence that the true mean exceeds the threshold.
    pub confidence: f64,
}

impl QvSuccess {
    /// Evaluate the success test for a depth.
    ///
    /// Below or at the threshold the confidence is reported as 0 and `erf`
    /// is not evaluated.
    pub fn evaluate(stats: &DepthStatistics, threshold: f64, confidence_level: f64) -> Self {
        let mean = stats.heavy_output_mean;
        if mean <= threshold {
            return Self {
                depth: stats.depth,
                success: false,
                confidence: 0.0,
            };
        }

        let confidence = one_sided_confidence(mean, stats.heavy_output_stderr, threshold);
        Self {
            depth: stats.depth,
            success: confidence > confidence_level,
            confidence,
        }
    }

    /// `(success, confidence)` pair.
    pub fn as_pair(&self) -> (bool, f64) {
        (self.success, self.confidence)
    }
}

/// Normal-approximation confidence that the true mean exceeds `threshold`.
pub fn one_sided_confidence(mean: f64, stderr: f64, threshold: f64) -> f64 {
    let sigma = stderr + SIGMA_FLOOR;
    0.5 * (1.0 + erf((mean - threshold) / (sigma * std::f64::consts::SQRT_2)))
}

/// Binomial standard error `sqrt(p (1 - p) / n)`; 0 when `n` is 0.
pub fn binomial_stderr(p: f64, n: f64) -> f64 {
    if n <= 0.0 {
        return 0.0;
    }
    (p * (1.0 - p) / n).max(0.0).sqrt()
}

/// Quantum volume of a depth, `2^depth` (saturating).
pub fn quantum_volume(depth: u32) -> u64 {
    1u64.checked_shl(depth).unwrap_or(u64::MAX)
}
