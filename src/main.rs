use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use leak_ledger::logging::init_logging;
use leak_ledger::{
    load_roster, write_report, EngineConfig, ProfileBuilder, ProviderAResult, ProviderBResult,
    ReportEngine, SnapshotSource,
};

#[derive(Parser)]
#[command(name = "leak-ledger", version, about = "Consolidate breach evidence and score identity risk")]
struct Cli {
    /// Engine config (TOML); defaults apply when omitted
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build one report per client from saved provider responses
    Report {
        /// CSV with columns client,personal_emails,corporate_emails
        #[arg(long)]
        roster: PathBuf,

        /// Directory of <email>.leakcheck.json / <email>.hibp.json snapshots
        #[arg(long)]
        responses: PathBuf,

        #[arg(long, default_value = ".")]
        out: PathBuf,

        /// Date stamped into file names (default: today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Print one identity's consolidated profile as JSON
    Profile {
        email: String,

        #[arg(long)]
        leakcheck: Option<PathBuf>,

        #[arg(long)]
        hibp: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => EngineConfig::default(),
    };

    match cli.command {
        Command::Report { roster, responses, out, date } => run_report(&config, &roster, &responses, &out, date),
        Command::Profile { email, leakcheck, hibp } => run_profile(&config, &email, leakcheck, hibp),
    }
}

fn run_report(
    config: &EngineConfig,
    roster: &Path,
    responses: &Path,
    out: &Path,
    date: Option<NaiveDate>,
) -> Result<()> {
    let clients = load_roster(roster)
        .with_context(|| format!("Failed to read roster {}", roster.display()))?;
    let source = SnapshotSource::new(responses)
        .with_context(|| format!("Failed to open responses {}", responses.display()))?;

    let now = Utc::now();
    let stamp = date.unwrap_or_else(|| now.date_naive());
    let engine = ReportEngine::new(config);

    info!(clients = clients.len(), "processing roster");

    for client in &clients {
        info!(client = %client.name, "processing client");
        let report = engine.run_client(client, &source, now);

        let written = write_report(&report, out, &config.report_suffix, stamp)
            .with_context(|| format!("Failed to write report for {}", client.name))?;

        match written {
            Some(files) => info!(
                client = %client.name,
                file = %files.leaked_data.display(),
                "leaked credentials saved"
            ),
            None => warn!(client = %client.name, "no leaked credentials found"),
        }
    }

    info!("all reports generated");
    Ok(())
}

fn run_profile(
    config: &EngineConfig,
    email: &str,
    leakcheck: Option<PathBuf>,
    hibp: Option<PathBuf>,
) -> Result<()> {
    let provider_a = match leakcheck {
        Some(path) => ProviderAResult::from_json(
            &fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))?,
        ),
        None => ProviderAResult::NotFound,
    };
    let provider_b = match hibp {
        Some(path) => ProviderBResult::from_json(
            &fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))?,
        ),
        None => ProviderBResult::NoBreaches,
    };

    let outcome = ProfileBuilder::from_config(config).build(email, &provider_a, &provider_b, Utc::now());
    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}
