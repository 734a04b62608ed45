//! Analysis parameters.

use serde::{Deserialize, Serialize};

use crate::error::{QvError, QvResult};
use crate::name::DEFAULT_PREFIX;

/// Heavy-output probability a depth must exceed to pass.
pub const DEFAULT_THRESHOLD: f64 = 2.0 / 3.0;

/// One-sided confidence required on top of the threshold.
pub const DEFAULT_CONFIDENCE_LEVEL: f64 = 0.975;

/// Parameters of a Quantum Volume analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Circuit-name prefix, as in `<prefix>_depth_<d>_trial_<t>`.
    #[serde(default = "default_prefix")]
    pub prefix: String,

    /// Heavy-output probability threshold (2/3).
    #[serde(default = "default_threshold")]
    pub threshold: f64,

    /// Required confidence that the mean exceeds the threshold (0.975).
    #[serde(default = "default_confidence_level")]
    pub confidence_level: f64,
}

fn default_prefix() -> String {
    DEFAULT_PREFIX.to_string()
}

fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}

fn default_confidence_level() -> f64 {
    DEFAULT_CONFIDENCE_LEVEL
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
            threshold: default_threshold(),
            confidence_level: default_confidence_level(),
        }
    }
}

impl AnalysisConfig {
    /// Check that every parameter is in range.
    pub fn validate(&self) -> QvResult<()> {
        if self.prefix.is_empty() {
            return Err(QvError::InvalidConfig("prefix must not be empty".into()));
        }
        if !(self.threshold > 0.0 && self.threshold < 1.0) {
            return Err(QvError::InvalidConfig(format!(
                "threshold must be in (0, 1), got {}",
                self.threshold
            )));
        }
        if !(self.confidence_level > 0.0 && self.confidence_level < 1.0) {
            return Err(QvError::InvalidConfig(format!(
                "confidence_level must be in (0, 1), got {}",
                self.confidence_level
            )));
        }
        Ok(())
    }
}
