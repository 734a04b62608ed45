//! Analysis configuration loading.
//!
//! Sources, lowest to highest precedence:
//! 1. Built-in defaults
//! 2. `~/.arvak/qv.yaml`, or the file given with `--config`
//! 3. Environment variables `ARVAK_QV_PREFIX`, `ARVAK_QV_THRESHOLD`,
//!    `ARVAK_QV_CONFIDENCE`

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, warn};

use arvak_qv::AnalysisConfig;

/// Resolve the analysis configuration.
pub fn load(explicit: Option<&str>) -> Result<AnalysisConfig> {
    let mut config = match explicit {
        Some(path) => from_file(Path::new(path))?,
        None => match default_path().filter(|p| p.exists()) {
            Some(path) => from_file(&path)?,
            None => AnalysisConfig::default(),
        },
    };

    apply_env(&mut config, |key| std::env::var(key).ok());
    config
        .validate()
        .context("Invalid analysis configuration")?;
    debug!("Analysis configuration: {config:?}");
    Ok(config)
}

/// Default configuration file, `~/.arvak/qv.yaml`.
pub fn default_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".arvak").join("qv.yaml"))
}

/// Parse a YAML configuration file.
pub fn from_file(path: &Path) -> Result<AnalysisConfig> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    serde_yaml_ng::from_str(&contents)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Override fields from environment variables; unparsable numbers are ignored.
pub fn apply_env(config: &mut AnalysisConfig, var: impl Fn(&str) -> Option<String>) {
    if let Some(prefix) = var("ARVAK_QV_PREFIX") {
        config.prefix = prefix;
    }
    if let Some(raw) = var("ARVAK_QV_THRESHOLD") {
        match raw.parse() {
            Ok(val) => config.threshold = val,
            Err(_) => warn!("Ignoring ARVAK_QV_THRESHOLD={raw}: not a number"),
        }
    }
    if let Some(raw) = var("ARVAK_QV_CONFIDENCE") {
        match raw.parse() {
            Ok(val) => config.confidence_level = val,
            Err(_) => warn!("Ignoring ARVAK_QV_CONFIDENCE={raw}: not a number"),
        }
    }
}
