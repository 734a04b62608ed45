//! Ideal output distributions and heavy outputs.
//!
//! The heavy outputs of a circuit are the bitstrings whose ideal probability
//! is strictly above the median of its output distribution. For a random
//! model circuit about half the outcomes are heavy and an ideal device
//! samples them with probability ≈ (1 + ln 2) / 2.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::name::CircuitName;

/// Ideal output distribution of one circuit instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdealDistribution {
    circuit: CircuitName,
    /// Probability of bitstring `b`, indexed by `b`.
    probabilities: Vec<f64>,
    median: f64,
    heavy_outputs: Vec<String>,
    heavy_probability: f64,
}

impl IdealDistribution {
    /// Build from probabilities indexed by outcome.
    ///
    /// The caller guarantees `probabilities.len() == 2^depth`.
    pub fn from_probabilities(circuit: CircuitName, probabilities: Vec<f64>) -> Self {
        let median = median(&probabilities);
        let width = circuit.depth as usize;

        let heavy_outputs: Vec<String> = probabilities
            .iter()
            .enumerate()
            .filter(|&(_, &p)| p > median)
            .map(|(b, _)| format!("{b:0width$b}"))
            .collect();
        let heavy_probability: f64 = probabilities.iter().filter(|&&p| p > median).sum();

        Self {
            circuit,
            probabilities,
            median,
            heavy_outputs,
            heavy_probability,
        }
    }

    /// Build from statevector amplitudes; probabilities are |a|².
    pub fn from_statevector(circuit: CircuitName, amplitudes: &[Complex64]) -> Self {
        let probabilities = amplitudes.iter().map(Complex64::norm_sqr).collect();
        Self::from_probabilities(circuit, probabilities)
    }

    /// The circuit this distribution belongs to.
    pub fn circuit(&self) -> CircuitName {
        self.circuit
    }

    /// Median of the output probabilities.
    pub fn median(&self) -> f64 {
        self.median
    }

    /// Bitstrings with probability strictly above the median, in ascending order.
    pub fn heavy_outputs(&self) -> &[String] {
        &self.heavy_outputs
    }

    /// Ideal probability of sampling a heavy output.
    pub fn heavy_probability(&self) -> f64 {
        self.heavy_probability
    }

    /// Ideal probability of a bitstring, `None` if it is not a valid outcome.
    pub fn probability(&self, bitstring: &str) -> Option<f64> {
        if bitstring.len() != self.circuit.depth as usize {
            return None;
        }
        let index = usize::from_str_radix(bitstring, 2).ok()?;
        self.probabilities.get(index).copied()
    }

    /// Iterate over (bitstring, probability) pairs in outcome order.
    pub fn iter(&self) -> impl Iterator<Item = (String, f64)> + '_ {
        let width = self.circuit.depth as usize;
        self.probabilities
            .iter()
            .enumerate()
            .map(move |(b, &p)| (format!("{b:0width$b}"), p))
    }
}

/// Median of a list; the mean of the two middle values for even lengths.
pub(crate) fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_median_even_and_odd() {
        assert!((median(&[0.4, 0.3, 0.2, 0.1]) - 0.25).abs() < 1e-12);
        assert!((median(&[3.0, 1.0, 2.0]) - 2.0).abs() < 1e-12);
        assert_eq!(median(&[]), 0.0);
    }

    #[test]
    fn test_heavy_outputs_two_qubits() {
        let dist =
            IdealDistribution::from_probabilities(CircuitName::new(2, 0), vec![0.4, 0.3, 0.2, 0.1]);
        assert!((dist.median() - 0.25).abs() < 1e-12);
        assert_eq!(dist.heavy_outputs(), ["00", "01"]);
        assert!((dist.heavy_probability() - 0.7).abs() < 1e-9);
    }

    #[test]
    fn test_uniform_distribution_has_no_heavy_outputs() {
        let dist = IdealDistribution::from_probabilities(CircuitName::new(2, 0), vec![0.25; 4]);
        assert!(dist.heavy_outputs().is_empty());
        assert_eq!(dist.heavy_probability(), 0.0);
    }

    #[test]
    fn test_statevector_uses_squared_magnitude() {
        let amp = Complex64::new(0.5, 0.5); // |a|² = 0.5
        let amplitudes = [
            amp,
            Complex64::new(0.0, 0.0),
            Complex64::new(0.0, std::f64::consts::FRAC_1_SQRT_2),
            Complex64::new(0.0, 0.0),
        ];
        let dist = IdealDistribution::from_statevector(CircuitName::new(2, 1), &amplitudes);
        assert!((dist.probability("00").unwrap() - 0.5).abs() < 1e-12);
        assert!((dist.probability("10").unwrap() - 0.5).abs() < 1e-12);
        assert_eq!(dist.heavy_outputs(), ["00", "10"]);
    }

    #[test]
    fn test_bitstrings_are_zero_padded() {
        let dist = IdealDistribution::from_probabilities(
            CircuitName::new(3, 0),
            vec![0.0, 0.5, 0.0, 0.0, 0.0, 0.0, 0.0, 0.5],
        );
        assert_eq!(dist.heavy_outputs(), ["001", "111"]);
        assert_eq!(dist.probability("1"), None);
        assert_eq!(dist.iter().next().unwrap().0, "000");
    }
}
