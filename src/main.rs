//! Monark Processing - command line entry point.
//!
//! Reads a JSON table of test bouts, processes it and writes the resulting
//! time series as CSV or JSON.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueHint};
use monark_processing::export::{self, ExportFormat};
use monark_processing::storage::{self, config};
use monark_processing::{process_batch, TracingProgress};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(author, version, about = "Decode Monark ergometer flywheel logs", long_about = None)]
struct Cli {
    /// JSON input table of test bouts
    #[arg(required = true, value_hint = ValueHint::FilePath)]
    input: PathBuf,

    /// Output file; written to stdout when omitted
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    output: Option<PathBuf>,

    /// Output format (overrides the config file)
    #[arg(long)]
    format: Option<ExportFormat>,

    /// Configuration file (defaults to config.toml in the data directory)
    #[arg(long, value_hint = ValueHint::FilePath)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let app_config = match &cli.config {
        Some(path) => config::load_config_from(path),
        None => config::load_config(),
    }
    .context("failed to load configuration")?;

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&app_config.logging.filter)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting Monark Processing v{}", env!("CARGO_PKG_VERSION"));

    let records = storage::load_records(&cli.input)
        .with_context(|| format!("failed to load {}", cli.input.display()))?;

    let dataset = process_batch(&records, &mut TracingProgress).context("processing failed")?;

    let mut options = app_config.export;
    if let Some(format) = cli.format {
        options.format = format;
    }

    match &cli.output {
        Some(path) => {
            let path = if path.is_dir() {
                path.join(export::generate_filename(options.format, chrono::Utc::now()))
            } else {
                path.clone()
            };
            match options.format {
                ExportFormat::Csv => export::export_csv_to_file(&dataset, &options, &path),
                ExportFormat::Json => export::export_json_to_file(&dataset, &path),
            }
            .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!("Wrote {} rows to {}", dataset.len(), path.display());
        }
        None => {
            let content = match options.format {
                ExportFormat::Csv => export::export_csv(&dataset, &options),
                ExportFormat::Json => export::export_json(&dataset),
            }
            .context("export failed")?;
            print!("{}", content);
        }
    }

    Ok(())
}
