use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;

mod config;
mod dates;
mod error;
mod input;
mod models;
mod normalize;
mod output;
mod report;
mod telemetry;

use config::{FiscalYear, InputFormat, ReportConfig};
use dates::ReferenceDate;

#[derive(Parser, Debug)]
#[command(name = "training-report")]
#[command(about = "Summarize personnel training completions and expirations", long_about = None)]
struct Cli {
    /// Fiscal year for filtering training completions (2000-2100)
    #[arg(long, alias = "fiscal_year")]
    fiscal_year: FiscalYear,
    /// Trainings to check for fiscal year completion
    #[arg(long, required = true, num_args = 1..)]
    trainings: Vec<String>,
    /// Date to check for soon-to-expire trainings, e.g. "Oct 1st, 2023"
    #[arg(long, alias = "expiration_date")]
    expiration_date: ReferenceDate,
    /// Training roster to read
    #[arg(long, default_value = "trainings.txt")]
    input: PathBuf,
    /// Roster encoding; inferred from the file extension when omitted
    #[arg(long, value_enum)]
    format: Option<InputFormat>,
    /// Directory receiving the three report files
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,
    /// Log filter used when RUST_LOG is unset
    #[arg(long, env = "TRAINING_REPORT_LOG", default_value = "info")]
    log_level: String,
}

impl Cli {
    fn into_config(self) -> ReportConfig {
        ReportConfig::new(
            self.input,
            self.format,
            self.out_dir,
            self.fiscal_year,
            self.trainings,
            self.expiration_date,
        )
    }
}

/// Loads the roster, builds every report and writes them; nothing is written
/// unless all three reports were built.
fn run(config: &ReportConfig) -> anyhow::Result<Vec<PathBuf>> {
    let people = input::load_people(&config.input, config.format)
        .context("failed to load training roster")?;
    let reports =
        report::build_reports(&people, config).context("failed to build training reports")?;
    output::write_reports(&config.out_dir, &reports)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    telemetry::init(&cli.log_level)?;
    let config = cli.into_config();

    let written = run(&config)?;

    info!(files = written.len(), "all reports written");
    println!("JSON outputs generated for all tasks.");
    Ok(())
}
