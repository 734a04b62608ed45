//! Error types for the QV crate.

use thiserror::Error;

/// Errors produced while ingesting or analysing Quantum Volume data.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QvError {
    /// An ideal distribution was registered twice for the same circuit.
    #[error("Ideal distribution for circuit '{name}' was already added")]
    DuplicateRegistration {
        /// The circuit-instance name.
        name: String,
    },

    /// Counts arrived for a circuit whose ideal distribution is unknown.
    #[error("Ideal distribution for circuit '{name}' must be added before its counts")]
    MissingIdealDistribution {
        /// The circuit-instance name.
        name: String,
    },

    /// A circuit name does not follow `<prefix>_depth_<d>_trial_<t>`.
    #[error("Invalid circuit name '{name}': {reason}")]
    InvalidCircuitName {
        /// The offending name.
        name: String,
        /// What is wrong with it.
        reason: String,
    },

    /// An ideal vector does not have 2^depth entries.
    #[error("Ideal vector for circuit '{name}' has {got} entries, expected {expected}")]
    DimensionMismatch {
        /// The circuit-instance name.
        name: String,
        /// 2^depth.
        expected: usize,
        /// Actual vector length.
        got: usize,
    },

    /// Analysis configuration is out of range.
    #[error("Invalid analysis configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for QV operations.
pub type QvResult<T> = Result<T, QvError>;
