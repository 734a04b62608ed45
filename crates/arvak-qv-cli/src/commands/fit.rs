//! Fit command implementation.
//!
//! `arvak-qv fit --ideal <ideal.json> --counts <batch.json>... [--depths 2,3] [--format json]`

use anyhow::{Context, Result};
use console::style;
use tracing::info;

use arvak_qv::{QvFitter, QvReport};

use super::common::{IdealFile, infer_depths, load_batch, load_ideal};
use crate::config;

/// Arguments of the fit command.
pub struct FitArgs<'a> {
    pub ideal: &'a str,
    pub counts: &'a [String],
    pub probabilities: bool,
    pub depths: &'a [u32],
    pub config: Option<&'a str>,
    pub format: &'a str,
    pub output: Option<&'a str>,
}

/// Execute the fit command.
pub fn execute(args: &FitArgs<'_>) -> Result<()> {
    let config = config::load(args.config)?;
    let ideal = load_ideal(args.ideal, args.probabilities)?;

    let depths = if args.depths.is_empty() {
        infer_depths(&ideal, &config.prefix)?
    } else {
        args.depths.to_vec()
    };
    if depths.is_empty() {
        anyhow::bail!("No depths to analyse: {} holds no circuits", args.ideal);
    }

    let mut fitter = QvFitter::with_depths(depths).with_config(config)?;
    register_ideal(&mut fitter, &ideal)
        .with_context(|| format!("Failed to load ideal distributions from {}", args.ideal))?;
    info!("Registered {} ideal distributions", ideal.len());

    for path in args.counts {
        let batch = load_batch(path)?;
        fitter
            .add_data(batch, false)
            .with_context(|| format!("Failed to add counts from {path}"))?;
        info!("Added batch {path}");
    }
    fitter.recompute()?;

    let report = fitter.report();

    if let Some(output_path) = args.output {
        let json = serde_json::to_string_pretty(&report)?;
        std::fs::write(output_path, json)
            .with_context(|| format!("Failed to write report: {output_path}"))?;
        eprintln!(
            "{} Report written to {}",
            style("OK").green().bold(),
            output_path
        );
    }

    match args.format {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        "table" => print_table(&report),
        other => anyhow::bail!("Unknown format: '{other}'. Available: table, json"),
    }

    Ok(())
}

fn register_ideal(fitter: &mut QvFitter, ideal: &IdealFile) -> arvak_qv::QvResult<()> {
    match ideal {
        IdealFile::Statevectors(map) => {
            fitter.add_statevectors(map.iter().map(|(name, v)| (name.as_str(), v.as_slice())))
        }
        IdealFile::Probabilities(map) => fitter
            .add_probability_vectors(map.iter().map(|(name, v)| (name.as_str(), v.as_slice()))),
    }
}

/// Print the per-depth statistics table.
fn print_table(report: &QvReport) {
    println!(
        "\n{} Quantum Volume ({} trials, {} batches):\n",
        style("✓").green().bold(),
        report.num_trials,
        report.num_batches
    );
    println!(
        "  {:>5}  {:>6}  {:>16}  {:>16}  {:>10}  {}",
        "depth", "QV", "heavy output", "ideal", "confidence", "result"
    );

    for ((stats, verdict), qv) in report
        .statistics
        .iter()
        .zip(&report.success)
        .zip(&report.quantum_volumes)
    {
        let result = if verdict.success {
            style("PASS").green().bold()
        } else {
            style("FAIL").red()
        };
        println!(
            "  {:>5}  {:>6}  {:>7.4} ± {:<6.4}  {:>7.4} ± {:<6.4}  {:>10.4}  {}",
            stats.depth,
            qv,
            stats.heavy_output_mean,
            stats.heavy_output_stderr,
            stats.ideal_mean,
            stats.ideal_stderr,
            verdict.confidence,
            result
        );
    }

    if report.statistics.is_empty() {
        println!("  (no trials measured)");
    }

    println!(
        "\n  Achieved quantum volume: {}",
        style(report.achieved_quantum_volume).yellow().bold()
    );
}
