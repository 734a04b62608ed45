//! Circuit-instance naming.
//!
//! QV circuits are identified by a depth and a trial index, encoded in the
//! circuit name as `<prefix>_depth_<d>_trial_<t>`, or bare as
//! `depth_<d>_trial_<t>`. This naming convention is the only contract between
//! circuit generation and analysis.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{QvError, QvResult};

/// Default circuit-name prefix.
pub const DEFAULT_PREFIX: &str = "qv";

/// A (depth, trial) circuit instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CircuitName {
    /// Circuit depth (equal to width for QV circuits).
    pub depth: u32,
    /// Trial index, starting at 0.
    pub trial: u32,
}

impl CircuitName {
    /// Create a new circuit instance identifier.
    pub fn new(depth: u32, trial: u32) -> Self {
        Self { depth, trial }
    }

    /// Parse a name of the form `<prefix>_depth_<d>_trial_<t>`.
    ///
    /// The bare form `depth_<d>_trial_<t>` (the `Display` output) names the
    /// same instance.
    pub fn parse(name: &str, prefix: &str) -> QvResult<Self> {
        let invalid = |reason: &str| QvError::InvalidCircuitName {
            name: name.to_string(),
            reason: reason.to_string(),
        };

        let rest = name
            .strip_prefix(prefix)
            .and_then(|r| r.strip_prefix('_'))
            .unwrap_or(name)
            .strip_prefix("depth_")
            .ok_or_else(|| invalid(&format!("expected prefix '{prefix}_depth_' or 'depth_'")))?;
        let (depth, trial) = rest
            .split_once("_trial_")
            .ok_or_else(|| invalid("missing '_trial_' segment"))?;

        let depth: u32 = depth
            .parse()
            .map_err(|_| invalid(&format!("depth '{depth}' is not an integer")))?;
        let trial: u32 = trial
            .parse()
            .map_err(|_| invalid(&format!("trial '{trial}' is not an integer")))?;

        if depth == 0 {
            return Err(invalid("depth must be at least 1"));
        }

        Ok(Self { depth, trial })
    }

    /// Render the full name with the given prefix.
    pub fn to_name(&self, prefix: &str) -> String {
        format!("{prefix}_{self}")
    }

    /// Number of distinct output bitstrings, `2^depth`.
    pub fn num_outcomes(&self) -> usize {
        1usize.checked_shl(self.depth).unwrap_or(usize::MAX)
    }
}

impl fmt::Display for CircuitName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "depth_{}_trial_{}", self.depth, self.trial)
    }
}
