//! Algoscope CLI
//!
//! Analyze a JSON-encoded pseudocode `Program` and print its complexity.
//!
//! # Usage
//!
//! ```bash
//! # Human-readable report
//! cargo run --bin algoscope -- analyze program.json
//!
//! # JSON report with a custom configuration
//! cargo run --bin algoscope -- analyze program.json --config algoscope.yaml --format json
//!
//! # Shallow analysis, derivation steps included
//! cargo run --bin algoscope -- analyze program.json --preset fast --verbose
//! ```

use algoscope_core::{AnalysisConfig, AnalysisPipeline, Preset, Program, Validatable};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "algoscope")]
#[command(about = "Algoscope - asymptotic complexity of pseudocode programs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a JSON-encoded program
    Analyze {
        /// Program file (JSON)
        program: PathBuf,

        /// YAML configuration file (overrides --preset)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Configuration preset
        #[arg(short, long, default_value = "balanced", value_parser = Preset::from_str)]
        preset: Preset,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Skip pattern classification
        #[arg(long)]
        no_patterns: bool,

        /// Debug logging and derivation steps
        #[arg(short, long)]
        verbose: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Analyze {
            program,
            config,
            preset,
            format,
            no_patterns,
            verbose,
        } => {
            init_tracing(verbose);
            analyze(&program, config.as_deref(), preset, format, no_patterns, verbose)
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// RUST_LOG wins over the verbosity flag
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(
    path: Option<&Path>,
    preset: Preset,
    no_patterns: bool,
) -> Result<AnalysisConfig, Box<dyn std::error::Error>> {
    let mut config = match path {
        Some(path) => AnalysisConfig::from_yaml(path)?,
        None => AnalysisConfig::from_preset(preset),
    };
    if no_patterns {
        config = config.enable_patterns(false);
    }
    Ok(config.validated()?)
}

fn analyze(
    program_path: &Path,
    config_path: Option<&Path>,
    preset: Preset,
    format: OutputFormat,
    no_patterns: bool,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config_path, preset, no_patterns)?;

    let content = std::fs::read_to_string(program_path)
        .map_err(|e| format!("cannot read {}: {}", program_path.display(), e))?;
    let program: Program = serde_json::from_str(&content)?;

    let report = AnalysisPipeline::new(config).run(&program)?;

    match format {
        OutputFormat::Text => {
            print!("{}", report.render_text());
            if verbose && !report.complexity.steps.is_empty() {
                println!();
                println!("Derivation");
                print!("{}", report.render_steps());
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    Ok(())
}
