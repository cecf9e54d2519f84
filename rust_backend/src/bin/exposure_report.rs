use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use exposure_report::config::ReportConfig;
use exposure_report::core::table::SheetView;
use exposure_report::io::InputLoader;
use exposure_report::report::{PeriodSelection, ReportGenerator, ReportRequest};

#[derive(Parser, Debug)]
#[command(name = "exposure-report")]
#[command(about = "Build sponsorship exposure reports from game telemetry")]
struct Cli {
    /// Game JSON files, ZIP archives or directories
    #[arg(required = true)]
    inputs: Vec<PathBuf>,
    /// Alias/ordering configuration (TOML or JSON)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Comma-separated period columns; every observed period when omitted
    #[arg(long, value_delimiter = ',')]
    periods: Option<Vec<String>>,
    /// Add the cross-game "Aggregate" sheet
    #[arg(long, default_value_t = false)]
    aggregate: bool,
    /// Worker threads, 0 for one per CPU
    #[arg(long, default_value_t = 1)]
    jobs: usize,
    /// Directory the report is written to
    #[arg(long, default_value = ".")]
    output: PathBuf,
}

#[derive(Serialize)]
struct ReportFile<'a> {
    periods: &'a [String],
    sheets: Vec<SheetView>,
    warnings: &'a [String],
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ReportConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => ReportConfig::load_default().context("Failed to load default config")?,
    };

    let batch = InputLoader::load_paths(&cli.inputs);
    if !batch.is_empty() {
        for warning in &batch.warnings {
            eprintln!("warning: {}", warning.message());
        }
    }

    let request = ReportRequest {
        periods: cli
            .periods
            .map_or(PeriodSelection::Observed, PeriodSelection::Explicit),
        aggregate: cli.aggregate,
    };

    let bundle = ReportGenerator::new(config)
        .with_parallelism(cli.jobs)
        .generate_batch(&batch, &request)?;

    std::fs::create_dir_all(&cli.output)
        .with_context(|| format!("Failed to create {}", cli.output.display()))?;
    let path = cli.output.join(format!("{}.json", bundle.file_stem()));
    let file = File::create(&path)
        .with_context(|| format!("Failed to create {}", path.display()))?;

    let report = ReportFile {
        periods: &bundle.periods,
        sheets: bundle.sheets(),
        warnings: &bundle.warnings,
    };
    serde_json::to_writer_pretty(BufWriter::new(file), &report)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    println!(
        "Wrote {} sheet(s) to {}",
        report.sheets.len(),
        path.display()
    );
    Ok(())
}
