//! Shared helpers for CLI commands.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use num_complex::Complex64;
use serde::de::DeserializeOwned;

use arvak_qv::{CircuitName, ResultBatch};

/// Ideal vectors keyed by circuit name, sorted by name.
pub enum IdealFile {
    /// Complex statevector amplitudes, `[re, im]` pairs.
    Statevectors(BTreeMap<String, Vec<Complex64>>),
    /// Real output probabilities.
    Probabilities(BTreeMap<String, Vec<f64>>),
}

impl IdealFile {
    /// Circuit names in the file.
    pub fn names(&self) -> Vec<&str> {
        match self {
            IdealFile::Statevectors(map) => map.keys().map(String::as_str).collect(),
            IdealFile::Probabilities(map) => map.keys().map(String::as_str).collect(),
        }
    }

    /// Number of circuits in the file.
    pub fn len(&self) -> usize {
        match self {
            IdealFile::Statevectors(map) => map.len(),
            IdealFile::Probabilities(map) => map.len(),
        }
    }
}

/// Read and deserialize a JSON file.
pub fn read_json<T: DeserializeOwned>(path: &str) -> Result<T> {
    if !Path::new(path).exists() {
        anyhow::bail!("File not found: {path}");
    }
    let source = fs::read_to_string(path).with_context(|| format!("Failed to read file: {path}"))?;
    serde_json::from_str(&source).with_context(|| format!("Failed to parse JSON in {path}"))
}

/// Load ideal distributions.
pub fn load_ideal(path: &str, probabilities: bool) -> Result<IdealFile> {
    if probabilities {
        Ok(IdealFile::Probabilities(read_json(path)?))
    } else {
        Ok(IdealFile::Statevectors(read_json(path)?))
    }
}

/// Load one batch of measured counts.
pub fn load_batch(path: &str) -> Result<ResultBatch> {
    read_json(path)
}

/// Distinct depths named in the ideal file, ascending.
pub fn infer_depths(ideal: &IdealFile, prefix: &str) -> Result<Vec<u32>> {
    let mut depths = Vec::new();
    for name in ideal.names() {
        let circuit = CircuitName::parse(name, prefix)?;
        depths.push(circuit.depth);
    }
    depths.sort_unstable();
    depths.dedup();
    Ok(depths)
}
