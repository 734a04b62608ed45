//! Error types for the tomography crate.

use thiserror::Error;

/// Errors produced when looking up basis elements.
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum TomographyError {
    /// The label names no element of the basis.
    #[error("Unknown {kind} label '{label}', expected one of: {expected}")]
    UnknownLabel {
        /// "measurement" or "preparation".
        kind: &'static str,
        /// The offending label.
        label: String,
        /// Comma-separated list of valid labels.
        expected: String,
    },

    /// A measurement outcome other than 0 or 1.
    #[error("Invalid measurement outcome '{0}', expected 0 or 1")]
    InvalidOutcome(String),
}

/// Result type for tomography operations.
pub type TomographyResult<T> = Result<T, TomographyError>;
