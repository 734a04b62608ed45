//! Measurement counts and result batches.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Measured shot counts for one circuit instance.
///
/// Maps bitstrings to occurrence counts. Inserting an existing bitstring
/// accumulates, so merging batches is plain summation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Counts {
    counts: FxHashMap<String, u64>,
}

impl Counts {
    /// Create empty counts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create counts from (bitstring, count) pairs. Duplicates are summed.
    pub fn from_pairs(iter: impl IntoIterator<Item = (impl Into<String>, u64)>) -> Self {
        let mut counts = Self::new();
        for (k, v) in iter {
            counts.insert(k, v);
        }
        counts
    }

    /// Add `count` shots for a bitstring.
    pub fn insert(&mut self, bitstring: impl Into<String>, count: u64) {
        let entry = self.counts.entry(bitstring.into()).or_default();
        *entry = entry.saturating_add(count);
    }

    /// Sum another set of counts into this one.
    pub fn merge(&mut self, other: &Counts) {
        for (bitstring, &count) in &other.counts {
            let entry = self.counts.entry(bitstring.clone()).or_default();
            *entry = entry.saturating_add(count);
        }
    }

    /// Count for a bitstring, 0 if never observed.
    pub fn get(&self, bitstring: &str) -> u64 {
        self.counts.get(bitstring).copied().unwrap_or(0)
    }

    /// Iterate over (bitstring, count) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &u64)> {
        self.counts.iter()
    }

    /// Total number of shots, saturating at `u64::MAX`.
    pub fn total_shots(&self) -> u64 {
        self.counts
            .values()
            .fold(0u64, |total, &count| total.saturating_add(count))
    }

    /// Total shots landing on any of the given bitstrings, saturating at
    /// `u64::MAX`.
    pub fn subset_total<'a>(&self, bitstrings: impl IntoIterator<Item = &'a String>) -> u64 {
        bitstrings
            .into_iter()
            .fold(0u64, |total, b| total.saturating_add(self.get(b)))
    }

    /// Number of distinct bitstrings observed.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Check if no bitstring was observed.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

impl FromIterator<(String, u64)> for Counts {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}

/// One batch of executed circuits: circuit name to measured counts.
///
/// A batch corresponds to a single backend job. Batches are added to the
/// fitter one after another and their counts are summed per circuit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultBatch {
    circuits: FxHashMap<String, Counts>,
}

impl ResultBatch {
    /// Create an empty batch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add counts for a circuit. Repeated names are merged.
    pub fn insert(&mut self, name: impl Into<String>, counts: Counts) {
        self.circuits.entry(name.into()).or_default().merge(&counts);
    }

    /// Builder form of [`ResultBatch::insert`].
    pub fn with_counts(mut self, name: impl Into<String>, counts: Counts) -> Self {
        self.insert(name, counts);
        self
    }

    /// Counts for a circuit, if present in this batch.
    pub fn get(&self, name: &str) -> Option<&Counts> {
        self.circuits.get(name)
    }

    /// Iterate over (circuit name, counts) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Counts)> {
        self.circuits.iter()
    }

    /// Number of circuits in the batch.
    pub fn len(&self) -> usize {
        self.circuits.len()
    }

    /// Check if the batch holds no circuits.
    pub fn is_empty(&self) -> bool {
        self.circuits.is_empty()
    }
}

impl FromIterator<(String, Counts)> for ResultBatch {
    fn from_iter<I: IntoIterator<Item = (String, Counts)>>(iter: I) -> Self {
        let mut batch = Self::new();
        for (name, counts) in iter {
            batch.insert(name, counts);
        }
        batch
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_sums_per_bitstring() {
        let mut merged = Counts::from_pairs([("00", 3)]);
        merged.merge(&Counts::from_pairs([("00", 2), ("01", 1)]));

        assert_eq!(merged, Counts::from_pairs([("00", 5), ("01", 1)]));
        assert_eq!(merged.total_shots(), 6);
    }

    #[test]
    fn test_subset_total_ignores_missing() {
        let counts = Counts::from_pairs([("00", 40), ("01", 30)]);
        let heavy = vec!["00".to_string(), "11".to_string()];
        assert_eq!(counts.subset_total(&heavy), 40);
    }

    #[test]
    fn test_batch_merges_repeated_names() {
        let batch = ResultBatch::new()
            .with_counts("qv_depth_2_trial_0", Counts::from_pairs([("00", 1)]))
            .with_counts("qv_depth_2_trial_0", Counts::from_pairs([("00", 4)]));
        assert_eq!(batch.len(), 1);
        assert_eq!(batch.get("qv_depth_2_trial_0").unwrap().get("00"), 5);
    }

    #[test]
    fn test_huge_counts_saturate() {
        let mut counts = Counts::from_pairs([("0", u64::MAX - 1), ("1", 5)]);
        counts.merge(&Counts::from_pairs([("0", 10)]));
        assert_eq!(counts.get("0"), u64::MAX);
        assert_eq!(counts.total_shots(), u64::MAX);

        let all = vec!["0".to_string(), "1".to_string()];
        assert_eq!(counts.subset_total(&all), u64::MAX);
    }

    #[test]
    fn test_counts_json_shape() {
        let counts: Counts = serde_json::from_str(r#"{"00": 7, "11": 3}"#).unwrap();
        assert_eq!(counts.get("00"), 7);
        assert_eq!(counts.total_shots(), 10);
    }
}
