//! Quantum Volume analysis for Arvak.
//!
//! Implements the heavy-output test of Cross et al., "Validating quantum
//! computers using randomized model circuits" (arXiv:1811.12926):
//!
//! - Ideal output distributions of QV circuits are reduced to their
//!   **heavy outputs**, the bitstrings above the median probability.
//! - Measured counts, possibly from many backend jobs, are merged per circuit
//!   and scored by the fraction of shots landing on heavy outputs.
//! - A depth **passes** when the heavy-output probability exceeds 2/3 with
//!   more than 97.5 % one-sided confidence. Its quantum volume is `2^depth`.
//!
//! Circuits are named `qv_depth_<d>_trial_<t>`; see [`CircuitName`].
//!
//! # Quick start
//!
//! ```rust
//! use arvak_qv::{Counts, QvFitter, ResultBatch};
//!
//! let mut fitter = QvFitter::new(vec![vec![0, 1]]);
//! fitter.add_probabilities("qv_depth_2_trial_0", &[0.4, 0.3, 0.2, 0.1])?;
//! fitter.add_data(
//!     ResultBatch::new().with_counts("qv_depth_2_trial_0", Counts::from_pairs([("00", 9), ("01", 1)])),
//!     true,
//! )?;
//!
//! assert_eq!(fitter.quantum_volume(), vec![4]);
//! assert_eq!(fitter.statistics()[0].heavy_output_mean, 1.0);
//! # Ok::<(), arvak_qv::QvError>(())
//! ```

pub mod config;
pub mod counts;
pub mod error;
pub mod fitter;
pub mod ideal;
pub mod name;
pub mod report;
pub mod statistics;

pub use config::AnalysisConfig;
pub use counts::{Counts, ResultBatch};
pub use error::{QvError, QvResult};
pub use fitter::QvFitter;
pub use ideal::IdealDistribution;
pub use name::CircuitName;
pub use report::QvReport;
pub use statistics::{DepthStatistics, QvSuccess, quantum_volume};
