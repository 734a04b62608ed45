//! Heavy-output estimator.
//!
//! [`QvFitter`] accumulates ideal distributions and measured counts for QV
//! circuits and turns them into per-depth heavy-output statistics.
//!
//! The fitter keeps the merged counts of every circuit rather than every raw
//! batch; since merging is summation the result does not depend on batch
//! order and recomputation is idempotent.
//!
//! # Example
//!
//! ```rust
//! use arvak_qv::{Counts, QvFitter, ResultBatch};
//!
//! let mut fitter = QvFitter::with_depths([2]);
//! fitter.add_probabilities("qv_depth_2_trial_0", &[0.4, 0.3, 0.2, 0.1])?;
//!
//! let batch = ResultBatch::new().with_counts(
//!     "qv_depth_2_trial_0",
//!     Counts::from_pairs([("00", 40), ("01", 30), ("10", 20), ("11", 10)]),
//! );
//! fitter.add_data(batch, true)?;
//!
//! let stats = fitter.statistics()[0];
//! assert!((stats.heavy_output_mean - 0.7).abs() < 1e-12);
//! assert!(!fitter.qv_success()[0].success);
//! # Ok::<(), arvak_qv::QvError>(())
//! ```

use std::collections::BTreeMap;

use num_complex::Complex64;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, info, instrument};

use crate::config::AnalysisConfig;
use crate::counts::{Counts, ResultBatch};
use crate::error::{QvError, QvResult};
use crate::ideal::IdealDistribution;
use crate::name::CircuitName;
use crate::report::QvReport;
use crate::statistics::{DepthStatistics, QvSuccess, TrialData, quantum_volume};

/// Quantum Volume heavy-output fitter.
#[derive(Debug, Clone)]
pub struct QvFitter {
    config: AnalysisConfig,
    qubit_lists: Vec<Vec<u32>>,
    depths: Vec<u32>,
    /// Highest trial index seen in any batch, plus one.
    num_trials: u32,
    /// Trial count used by the last `calc_data`.
    fitted_trials: u32,
    num_batches: usize,
    ideal: FxHashMap<CircuitName, IdealDistribution>,
    counts: FxHashMap<CircuitName, Counts>,
    trial_data: BTreeMap<CircuitName, TrialData>,
    statistics: Vec<DepthStatistics>,
}

impl QvFitter {
    /// Create a fitter for the qubit subsets the circuits were generated on.
    ///
    /// Each subset's length is the depth (= width) of its circuits.
    pub fn new(qubit_lists: Vec<Vec<u32>>) -> Self {
        let depths = qubit_lists
            .iter()
            .map(|l| u32::try_from(l.len()).unwrap_or(u32::MAX))
            .collect();
        Self {
            config: AnalysisConfig::default(),
            qubit_lists,
            depths,
            num_trials: 0,
            fitted_trials: 0,
            num_batches: 0,
            ideal: FxHashMap::default(),
            counts: FxHashMap::default(),
            trial_data: BTreeMap::new(),
            statistics: Vec::new(),
        }
    }

    /// Create a fitter for depths on the qubits `0..depth`.
    pub fn with_depths(depths: impl IntoIterator<Item = u32>) -> Self {
        Self::new(depths.into_iter().map(|d| (0..d).collect()).collect())
    }

    /// Use a non-default analysis configuration.
    pub fn with_config(mut self, config: AnalysisConfig) -> QvResult<Self> {
        config.validate()?;
        self.config = config;
        Ok(self)
    }

    /// Analysis configuration.
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Depths under analysis, in configuration order.
    pub fn depths(&self) -> &[u32] {
        &self.depths
    }

    /// Qubit subsets, parallel to [`QvFitter::depths`].
    pub fn qubit_lists(&self) -> &[Vec<u32>] {
        &self.qubit_lists
    }

    /// Number of trials per depth seen so far.
    pub fn num_trials(&self) -> u32 {
        self.num_trials
    }

    /// Number of accepted result batches.
    pub fn num_batches(&self) -> usize {
        self.num_batches
    }

    /// Ideal distribution of a circuit, if registered.
    pub fn ideal_distribution(&self, circuit: CircuitName) -> Option<&IdealDistribution> {
        self.ideal.get(&circuit)
    }

    /// Heavy outputs of a circuit, if registered.
    pub fn heavy_outputs(&self, circuit: CircuitName) -> Option<&[String]> {
        self.ideal.get(&circuit).map(IdealDistribution::heavy_outputs)
    }

    /// Ideal heavy-output probability of a circuit, if registered.
    pub fn heavy_output_prob_ideal(&self, circuit: CircuitName) -> Option<f64> {
        self.ideal.get(&circuit).map(IdealDistribution::heavy_probability)
    }

    /// Counts of a circuit summed over all batches.
    pub fn merged_counts(&self, circuit: CircuitName) -> Option<&Counts> {
        self.counts.get(&circuit)
    }

    /// Measured heavy-output shot count of a circuit from the last fit.
    pub fn heavy_output_counts(&self, circuit: CircuitName) -> Option<u64> {
        self.trial_data.get(&circuit).map(|t| t.heavy_counts)
    }

    /// Total shots of a circuit from the last fit.
    pub fn circuit_shots(&self, circuit: CircuitName) -> Option<u64> {
        self.trial_data.get(&circuit).map(|t| t.shots)
    }

    // ---------------------------------------------------------------------
    // Ideal distributions
    // ---------------------------------------------------------------------

    /// Register the ideal statevector of one circuit.
    pub fn add_statevector(&mut self, name: &str, amplitudes: &[Complex64]) -> QvResult<()> {
        self.add_statevectors([(name, amplitudes)])
    }

    /// Register ideal statevectors for several circuits.
    ///
    /// The whole batch is checked before anything is registered.
    pub fn add_statevectors<'a>(
        &mut self,
        vectors: impl IntoIterator<Item = (&'a str, &'a [Complex64])>,
    ) -> QvResult<()> {
        let mut staged = Vec::new();
        let mut seen = FxHashSet::default();
        for (name, amplitudes) in vectors {
            let circuit = self.check_ideal(name, amplitudes.len(), &mut seen)?;
            staged.push(IdealDistribution::from_statevector(circuit, amplitudes));
        }
        self.register(staged);
        Ok(())
    }

    /// Register the ideal output probabilities of one circuit.
    pub fn add_probabilities(&mut self, name: &str, probabilities: &[f64]) -> QvResult<()> {
        self.add_probability_vectors([(name, probabilities)])
    }

    /// Register ideal output probabilities for several circuits.
    ///
    /// The whole batch is checked before anything is registered.
    pub fn add_probability_vectors<'a>(
        &mut self,
        vectors: impl IntoIterator<Item = (&'a str, &'a [f64])>,
    ) -> QvResult<()> {
        let mut staged = Vec::new();
        let mut seen = FxHashSet::default();
        for (name, probabilities) in vectors {
            let circuit = self.check_ideal(name, probabilities.len(), &mut seen)?;
            staged.push(IdealDistribution::from_probabilities(
                circuit,
                probabilities.to_vec(),
            ));
        }
        self.register(staged);
        Ok(())
    }

    fn check_ideal(
        &self,
        name: &str,
        len: usize,
        seen: &mut FxHashSet<CircuitName>,
    ) -> QvResult<CircuitName> {
        let circuit = CircuitName::parse(name, &self.config.prefix)?;
        if self.ideal.contains_key(&circuit) || !seen.insert(circuit) {
            return Err(QvError::DuplicateRegistration {
                name: name.to_string(),
            });
        }
        let expected = circuit.num_outcomes();
        if len != expected {
            return Err(QvError::DimensionMismatch {
                name: name.to_string(),
                expected,
                got: len,
            });
        }
        Ok(circuit)
    }

    fn register(&mut self, staged: Vec<IdealDistribution>) {
        for dist in staged {
            debug!(
                "Ideal distribution for {}: median {:.6}, {} heavy outputs, heavy probability {:.6}",
                dist.circuit(),
                dist.median(),
                dist.heavy_outputs().len(),
                dist.heavy_probability()
            );
            self.ideal.insert(dist.circuit(), dist);
        }
    }

    // ---------------------------------------------------------------------
    // Measured counts
    // ---------------------------------------------------------------------

    /// Add one batch of measured counts.
    ///
    /// Every circuit in the batch must already have an ideal distribution.
    /// With `rerun_fit` the statistics are recomputed afterwards, which also
    /// requires an ideal distribution for every (depth, trial) in the grid.
    /// A rejected batch leaves the fitter unchanged and can be retried.
    pub fn add_data(&mut self, batch: ResultBatch, rerun_fit: bool) -> QvResult<()> {
        self.add_batches([batch], rerun_fit)
    }

    /// Add several batches of measured counts.
    ///
    /// All batches are checked before any is merged, so an error leaves the
    /// fitter unchanged.
    pub fn add_batches(
        &mut self,
        batches: impl IntoIterator<Item = ResultBatch>,
        rerun_fit: bool,
    ) -> QvResult<()> {
        let batches: Vec<ResultBatch> = batches.into_iter().collect();

        let mut checked = Vec::with_capacity(batches.len());
        let mut num_trials = self.num_trials;
        for batch in &batches {
            let circuits = self.check_batch(batch)?;
            for (circuit, _) in &circuits {
                num_trials = num_trials.max(circuit.trial.saturating_add(1));
            }
            checked.push(circuits);
        }
        if rerun_fit {
            self.check_grid(num_trials)?;
        }

        for circuits in checked {
            self.merge_circuits(circuits);
        }
        if rerun_fit {
            self.recompute()?;
        }
        Ok(())
    }

    fn check_batch<'b>(
        &self,
        batch: &'b ResultBatch,
    ) -> QvResult<Vec<(CircuitName, &'b Counts)>> {
        batch
            .iter()
            .map(|(name, counts)| {
                let circuit = CircuitName::parse(name, &self.config.prefix)?;
                if !self.ideal.contains_key(&circuit) {
                    return Err(QvError::MissingIdealDistribution { name: name.clone() });
                }
                Ok((circuit, counts))
            })
            .collect()
    }

    /// Fails on the first (depth, trial) below `num_trials` without an ideal
    /// distribution.
    fn check_grid(&self, num_trials: u32) -> QvResult<()> {
        for trial in 0..num_trials {
            for &depth in &self.depths {
                let circuit = CircuitName::new(depth, trial);
                if !self.ideal.contains_key(&circuit) {
                    return Err(QvError::MissingIdealDistribution {
                        name: circuit.to_name(&self.config.prefix),
                    });
                }
            }
        }
        Ok(())
    }

    fn merge_circuits(&mut self, circuits: Vec<(CircuitName, &Counts)>) {
        let num_circuits = circuits.len();
        for (circuit, counts) in circuits {
            self.num_trials = self.num_trials.max(circuit.trial.saturating_add(1));
            self.counts.entry(circuit).or_default().merge(counts);
        }
        self.num_batches += 1;

        debug!(
            "Merged batch {} with {} circuits, trials now {}",
            self.num_batches, num_circuits, self.num_trials
        );
    }

    // ---------------------------------------------------------------------
    // Fitting
    // ---------------------------------------------------------------------

    /// Recompute per-circuit tallies and per-depth statistics.
    #[instrument(skip(self), fields(trials = self.num_trials, depths = self.depths.len()))]
    pub fn recompute(&mut self) -> QvResult<()> {
        self.calc_data()?;
        self.calc_statistics();
        info!(
            "Recomputed QV statistics for {} depths over {} trials",
            self.statistics.len(),
            self.fitted_trials
        );
        Ok(())
    }

    /// Tally heavy-output counts and shots for every (depth, trial) circuit.
    ///
    /// Fails if a circuit in the grid has no ideal distribution; the previous
    /// tallies are kept in that case.
    pub fn calc_data(&mut self) -> QvResult<()> {
        self.check_grid(self.num_trials)?;

        let mut trial_data = BTreeMap::new();
        for trial in 0..self.num_trials {
            for &depth in &self.depths {
                let circuit = CircuitName::new(depth, trial);
                let Some(ideal) = self.ideal.get(&circuit) else {
                    continue;
                };

                let (heavy_counts, shots) = match self.counts.get(&circuit) {
                    Some(counts) => (
                        counts.subset_total(ideal.heavy_outputs()),
                        counts.total_shots(),
                    ),
                    None => (0, 0),
                };

                trial_data.insert(
                    circuit,
                    TrialData {
                        heavy_counts,
                        shots,
                        ideal_heavy_probability: ideal.heavy_probability(),
                    },
                );
            }
        }

        self.trial_data = trial_data;
        self.fitted_trials = self.num_trials;
        Ok(())
    }

    /// Aggregate the tallies of the last [`QvFitter::calc_data`] per depth.
    ///
    /// Leaves the table empty when no trials have been tallied.
    pub fn calc_statistics(&mut self) {
        if self.fitted_trials == 0 {
            self.statistics.clear();
            return;
        }

        self.statistics = self
            .depths
            .iter()
            .map(|&depth| {
                let trials: Vec<TrialData> = (0..self.fitted_trials)
                    .filter_map(|trial| self.trial_data.get(&CircuitName::new(depth, trial)))
                    .copied()
                    .collect();
                let stats = DepthStatistics::from_trials(depth, &trials);
                debug!(
                    "Depth {}: heavy output {:.4} ± {:.4}, ideal {:.4} ± {:.4}",
                    depth,
                    stats.heavy_output_mean,
                    stats.heavy_output_stderr,
                    stats.ideal_mean,
                    stats.ideal_stderr
                );
                stats
            })
            .collect();
    }

    /// Per-depth statistics from the last fit, parallel to the depths.
    pub fn statistics(&self) -> &[DepthStatistics] {
        &self.statistics
    }

    /// The statistics as four series: measured mean, measured error, ideal
    /// mean, ideal error.
    pub fn ydata(&self) -> [Vec<f64>; 4] {
        let series = |f: fn(&DepthStatistics) -> f64| -> Vec<f64> {
            self.statistics.iter().map(f).collect()
        };
        [
            series(|s| s.heavy_output_mean),
            series(|s| s.heavy_output_stderr),
            series(|s| s.ideal_mean),
            series(|s| s.ideal_stderr),
        ]
    }

    /// Whether each depth passed, with its confidence.
    pub fn qv_success(&self) -> Vec<QvSuccess> {
        self.statistics
            .iter()
            .map(|s| QvSuccess::evaluate(s, self.config.threshold, self.config.confidence_level))
            .collect()
    }

    /// Quantum volume `2^d` for each depth.
    pub fn quantum_volume(&self) -> Vec<u64> {
        self.depths.iter().map(|&d| quantum_volume(d)).collect()
    }

    /// Summary of the last fit.
    pub fn report(&self) -> QvReport {
        QvReport::new(
            self.qubit_lists.clone(),
            self.quantum_volume(),
            self.statistics.clone(),
            self.qv_success(),
            self.fitted_trials,
            self.num_batches,
        )
    }
}
