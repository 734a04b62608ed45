//! Arvak Quantum Volume command-line interface.
//!
//! ```text
//! arvak-qv fit --ideal ideal.json --counts job1.json --counts job2.json
//! arvak-qv basis --label Yp
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

use commands::{basis, fit, version};

/// Arvak QV - heavy-output analysis of Quantum Volume experiments
#[derive(Parser)]
#[command(name = "arvak-qv")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fit heavy-output statistics from ideal distributions and measured counts
    Fit {
        /// Ideal distributions (JSON: circuit name -> amplitudes or probabilities)
        #[arg(short, long)]
        ideal: String,

        /// Measured counts, one file per batch (JSON: circuit name -> counts)
        #[arg(short, long, required = true)]
        counts: Vec<String>,

        /// Ideal file holds real probabilities instead of complex amplitudes
        #[arg(long)]
        probabilities: bool,

        /// Depths to analyse (defaults to every depth in the ideal file)
        #[arg(short, long, value_delimiter = ',')]
        depths: Vec<u32>,

        /// Analysis configuration (YAML)
        #[arg(long)]
        config: Option<String>,

        /// Output format (table, json)
        #[arg(short, long, default_value = "table")]
        format: String,

        /// Write the JSON report to a file
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Show Pauli tomography basis circuits and matrices
    Basis {
        /// Single preparation (Xp..Zm) or measurement (X, Y, Z) label
        #[arg(short, long)]
        label: Option<String>,

        /// Emit circuits as OpenQASM 3
        #[arg(long)]
        qasm: bool,
    },

    /// Show version information
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Fit {
            ideal,
            counts,
            probabilities,
            depths,
            config,
            format,
            output,
        } => fit::execute(&fit::FitArgs {
            ideal: &ideal,
            counts: &counts,
            probabilities,
            depths: &depths,
            config: config.as_deref(),
            format: &format,
            output: output.as_deref(),
        }),

        Commands::Basis { label, qasm } => basis::execute(label.as_deref(), qasm),

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
