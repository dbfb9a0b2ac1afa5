//! `availability` CLI — replay caregiver events against a visit calendar.
//!
//! ## Usage
//!
//! ```sh
//! # Apply a permanent-unavailability event, print the updated visits
//! availability reconcile --visits visits.json --event event.json
//!
//! # Same, reading visits from stdin and writing to a file
//! cat visits.json | availability reconcile --event event.json -o updated.json
//!
//! # Override the horizon / exact-boundary policy
//! availability reconcile --visits visits.json --event event.json --config reconciler.toml
//!
//! # Show one caregiver's calendar for a window
//! availability calendar --visits visits.json \
//!     --from 2025-11-01T00:00:00Z --to 2025-12-01T00:00:00Z --caregiver caregiver-1
//! ```
//!
//! Logs go to stderr; set `RUST_LOG=availability_engine=debug` for per-visit detail.

use anyhow::{Context, Result};
use availability_engine::{
    CaregiverEvent, InMemoryVisitStore, ReconcilerConfig, UnavailabilityReconciler, Visit,
    VisitStore,
};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use std::io::{self, Read};
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "availability",
    version,
    about = "Reconcile caregiver availability events against visits"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply a caregiver event to a visit list and print the result
    Reconcile {
        /// JSON array of visits (reads from stdin if omitted)
        #[arg(short, long)]
        visits: Option<String>,
        /// JSON caregiver event
        #[arg(short, long)]
        event: String,
        /// TOML reconciler settings
        #[arg(short, long)]
        config: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Print the visits overlapping a time window
    Calendar {
        /// JSON array of visits (reads from stdin if omitted)
        #[arg(short, long)]
        visits: Option<String>,
        /// Window start (RFC 3339)
        #[arg(long)]
        from: DateTime<Utc>,
        /// Window end, exclusive (RFC 3339)
        #[arg(long)]
        to: DateTime<Utc>,
        /// Only visits assigned to this caregiver
        #[arg(long)]
        caregiver: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Reconcile {
            visits,
            event,
            config,
            output,
        } => {
            let store = load_store(visits.as_deref())?;
            let event = load_event(&event)?;
            let config = match config {
                Some(path) => ReconcilerConfig::from_file(&path)
                    .with_context(|| format!("Failed to load config: {}", path))?,
                None => ReconcilerConfig::default(),
            };

            match event {
                CaregiverEvent::PermanentUnavailability(event) => {
                    let reconciler = UnavailabilityReconciler::with_config(store.clone(), config);
                    reconciler
                        .handle(&event)
                        .await
                        .with_context(|| format!("Failed to reconcile event {}", event.id))?;
                }
                other @ CaregiverEvent::AbsenceBooked(_) => {
                    warn!(
                        event_id = %other.id(),
                        caregiver_id = %other.caregiver_id(),
                        "no handler for absence-booked events; visits left unchanged"
                    );
                }
            }

            let visits = store.snapshot()?;
            write_output(output.as_deref(), &to_json(&visits)?)?;
        }
        Commands::Calendar {
            visits,
            from,
            to,
            caregiver,
        } => {
            let store = load_store(visits.as_deref())?;
            let result = store.query(caregiver.as_deref(), from, to).await?;
            write_output(None, &to_json(&result)?)?;
        }
    }

    Ok(())
}

fn load_store(path: Option<&str>) -> Result<InMemoryVisitStore> {
    let raw = read_input(path)?;
    let visits: Vec<Visit> =
        serde_json::from_str(&raw).context("Failed to parse visits JSON")?;
    Ok(InMemoryVisitStore::new(visits))
}

fn load_event(path: &str) -> Result<CaregiverEvent> {
    let raw = read_input(Some(path))?;
    serde_json::from_str(&raw).context("Failed to parse event JSON")
}

fn to_json(visits: &[Visit]) -> Result<String> {
    let mut json = serde_json::to_string_pretty(visits)?;
    json.push('\n');
    Ok(json)
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
