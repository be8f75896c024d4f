mod logging;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use fmcgen_core::{Error as CoreError, GenerationSettings, load_settings};
use fmcgen_generate::output::write_bytes_atomic;
use fmcgen_generate::{GenerateOptions, GenerationEngine, GenerationError, GenerationReport};
use thiserror::Error;

#[derive(Debug, Error)]
enum CliError {
    #[error("config error: {0}")]
    Config(#[from] CoreError),
    #[error("generation error: {0}")]
    Generate(#[from] GenerationError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("logging error: {0}")]
    Logging(String),
}

#[derive(Parser, Debug)]
#[command(
    name = "fmcgen",
    version,
    about = "Synthetic FMC object and policy generator"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate `*.nac.yaml` documents from a settings file.
    Generate(GenerateArgs),
    /// Print the JSON Schema of the generation settings.
    SettingsSchema,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Settings file with a `settings` list of single-key counts.
    #[arg(long, default_value = "gen/cfg.yaml")]
    config: PathBuf,
    /// Output directory; existing `*.yaml` files in it are removed first.
    #[arg(long, default_value = "data")]
    out_dir: PathBuf,
    /// Leave existing `*.yaml` files in the output directory.
    #[arg(long, default_value_t = false)]
    keep_existing: bool,
    /// Seed for reproducible output.
    #[arg(long)]
    seed: Option<u64>,
    /// Write a JSON run report to this path.
    #[arg(long)]
    report: Option<PathBuf>,
    /// Append JSON log lines to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Generate(args) => run_generate(args),
        Command::SettingsSchema => print_settings_schema(),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run_generate(args: GenerateArgs) -> Result<(), CliError> {
    logging::init_logging(args.log_file.as_deref())?;

    let settings = load_settings(&args.config)?;
    tracing::info!(event = "settings_loaded", path = %args.config.display());

    let result = GenerationEngine::new(generate_options(&args)).run(&settings)?;

    if let Some(path) = args.report.as_deref() {
        write_report(path, &result.report)?;
        tracing::info!(event = "report_written", path = %path.display());
    }

    Ok(())
}

fn generate_options(args: &GenerateArgs) -> GenerateOptions {
    GenerateOptions {
        out_dir: args.out_dir.clone(),
        seed: args.seed,
        clear_output: !args.keep_existing,
    }
}

fn write_report(path: &Path, report: &GenerationReport) -> Result<(), CliError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    let bytes = serde_json::to_vec_pretty(report)?;
    write_bytes_atomic(path, &bytes)?;
    Ok(())
}

fn print_settings_schema() -> Result<(), CliError> {
    let schema = schemars::schema_for!(GenerationSettings);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}
