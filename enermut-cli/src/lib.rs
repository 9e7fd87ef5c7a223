#![warn(missing_docs)]
//! Enermut CLI Library
//!
//! Command-line front end for the mutation-significance pipeline:
//! `analyze` runs the full reference-vs-mutation analysis, `drift`
//! surveys a reference sequence for epoch-to-epoch shifts, and the two
//! `merge-*` commands combine measurement campaigns run in parts.

mod config;
mod loader;
mod merge;

pub use config::{AnalysisSection, EnermutConfig, OutputSection};
pub use loader::{load_mutation_file, load_reference_file, LoadError};
pub use merge::{merge_mutations, merge_references};

use clap::{Parser, Subcommand};
use enermut_core::{analyze, detect_drift, AnalysisConfig};
use enermut_report::{build_report, format_drift_output, format_human_output, generate_json_report};
use std::io::Write;
use std::path::PathBuf;

/// Enermut CLI arguments
#[derive(Parser, Debug)]
#[command(name = "enermut")]
#[command(author, version, about = "Enermut - energy mutation significance analysis")]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze mutation significance against a reference baseline
    Analyze {
        /// Reference file (array of reference records)
        reference: PathBuf,
        /// Mutation file (array of mutation records)
        mutation: PathBuf,
        /// Output format: human or json
        #[arg(long)]
        format: Option<String>,
        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Maximum tolerated coefficient of variation per group
        #[arg(long)]
        stability_threshold: Option<f64>,
        /// Fractional margin the mutation must beat the reference by
        #[arg(long)]
        tolerance: Option<f64>,
        /// Significance level for the one-sided test
        #[arg(long)]
        alpha: Option<f64>,
        /// Disable the reset-on-unstable compatibility policy
        #[arg(long)]
        no_reset_on_unstable: bool,
    },
    /// Survey a reference sequence for drift between adjacent epochs
    Drift {
        /// Reference file (array of reference records)
        reference: PathBuf,
        /// Output format: human or json
        #[arg(long)]
        format: Option<String>,
        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Significance level for the two-sided test
        #[arg(long)]
        alpha: Option<f64>,
    },
    /// Merge two reference files, re-indexing the second file's mileage
    MergeRef {
        /// First reference file
        first: PathBuf,
        /// Second reference file
        second: PathBuf,
        /// Combined output file
        output: PathBuf,
    },
    /// Merge two mutation files by concatenation
    MergeMut {
        /// First mutation file
        first: PathBuf,
        /// Second mutation file
        second: PathBuf,
        /// Combined output file
        output: PathBuf,
    },
    /// Print a default enermut.toml
    InitConfig,
}

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Human,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "human" | "text" => Ok(OutputFormat::Human),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}

/// Run the enermut CLI. Entry point for the binary.
pub fn run() -> anyhow::Result<()> {
    run_with_cli(Cli::parse())
}

/// Run the enermut CLI with pre-parsed arguments.
pub fn run_with_cli(cli: Cli) -> anyhow::Result<()> {
    let filter = if cli.verbose {
        "enermut=debug"
    } else {
        "enermut=info"
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Discover enermut.toml (CLI flags override)
    let file_config = EnermutConfig::discover().unwrap_or_default();

    match cli.command {
        Commands::Analyze {
            reference,
            mutation,
            format,
            output,
            stability_threshold,
            tolerance,
            alpha,
            no_reset_on_unstable,
        } => {
            let mut config = file_config.to_analysis_config();
            if let Some(value) = stability_threshold {
                config.stability_threshold = value;
            }
            if let Some(value) = tolerance {
                config.tolerance = value;
            }
            if let Some(value) = alpha {
                config.alpha = value;
            }
            if no_reset_on_unstable {
                config.reset_on_unstable = false;
            }
            let format = resolve_format(format.as_deref(), &file_config)?;
            run_analyze(&reference, &mutation, &config, format, output.as_deref())
        }
        Commands::Drift {
            reference,
            format,
            output,
            alpha,
        } => {
            let alpha = alpha.unwrap_or(file_config.analysis.alpha);
            let format = resolve_format(format.as_deref(), &file_config)?;
            run_drift(&reference, alpha, format, output.as_deref())
        }
        Commands::MergeRef {
            first,
            second,
            output,
        } => {
            let merged = merge_references(load_reference_file(&first)?, load_reference_file(&second)?);
            write_json_file(&output, &merged)?;
            println!("Merged {} reference records into {}", merged.len(), output.display());
            Ok(())
        }
        Commands::MergeMut {
            first,
            second,
            output,
        } => {
            let merged = merge_mutations(load_mutation_file(&first)?, load_mutation_file(&second)?);
            write_json_file(&output, &merged)?;
            println!("Merged {} mutation records into {}", merged.len(), output.display());
            Ok(())
        }
        Commands::InitConfig => {
            print!("{}", EnermutConfig::default_toml());
            Ok(())
        }
    }
}

fn resolve_format(
    cli_format: Option<&str>,
    config: &EnermutConfig,
) -> anyhow::Result<OutputFormat> {
    cli_format
        .unwrap_or(&config.output.format)
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))
}

fn run_analyze(
    reference: &std::path::Path,
    mutation: &std::path::Path,
    config: &AnalysisConfig,
    format: OutputFormat,
    output: Option<&std::path::Path>,
) -> anyhow::Result<()> {
    let references = load_reference_file(reference)?;
    let mutations = load_mutation_file(mutation)?;
    tracing::debug!(
        references = references.len(),
        mutations = mutations.len(),
        "loaded input files"
    );

    let analysis = analyze(&references, &mutations, config)?;
    let report = build_report(&analysis, config);

    let rendered = match format {
        OutputFormat::Json => generate_json_report(&report)?,
        OutputFormat::Human => format_human_output(&report),
    };
    emit(&rendered, output)
}

fn run_drift(
    reference: &std::path::Path,
    alpha: f64,
    format: OutputFormat,
    output: Option<&std::path::Path>,
) -> anyhow::Result<()> {
    let references = load_reference_file(reference)?;
    tracing::debug!(references = references.len(), alpha, "surveying for drift");
    let drift = detect_drift(&references, alpha)?;

    let rendered = match format {
        OutputFormat::Json => serde_json::to_string_pretty(&drift)?,
        OutputFormat::Human => format_drift_output(&drift),
    };
    emit(&rendered, output)
}

fn emit(rendered: &str, output: Option<&std::path::Path>) -> anyhow::Result<()> {
    if let Some(path) = output {
        let mut file = std::fs::File::create(path)?;
        file.write_all(rendered.as_bytes())?;
        println!("Report written to: {}", path.display());
    } else {
        print!("{}", rendered);
    }
    Ok(())
}

fn write_json_file<T: serde::Serialize>(
    path: &std::path::Path,
    value: &T,
) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    std::fs::write(path, json)?;
    Ok(())
}
