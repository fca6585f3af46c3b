//! Bazos-Scout main entry point
//!
//! This is the command-line interface for the Bazos-Scout listing harvester.
//! Results go to stdout as JSON; logs and progress go to stderr.

use anyhow::Context;
use bazos_scout::config::{load_config_with_hash, Config};
use bazos_scout::crawler::{Coordinator, LogProgress};
use bazos_scout::output::ListingField;
use bazos_scout::search::{run_search, SearchRequest};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Bazos-Scout: a classified-ad search harvester
///
/// Runs one search against bazos.cz, follows its result pages and prints
/// every listing found as JSON.
#[derive(Parser, Debug)]
#[command(name = "bazos-scout")]
#[command(version)]
#[command(about = "A classified-ad search harvester", long_about = None)]
struct Cli {
    /// Free-text search query
    #[arg(value_name = "QUERY")]
    query: String,

    /// Location (town or postal code) to search around
    #[arg(short, long)]
    location: Option<String>,

    /// Search radius in kilometres
    #[arg(short, long, default_value_t = 25)]
    distance: u32,

    /// Minimum price
    #[arg(long)]
    min_price: Option<u64>,

    /// Maximum price
    #[arg(long)]
    max_price: Option<u64>,

    /// Site ordering code
    #[arg(long)]
    order: Option<u32>,

    /// Maximum number of listings to collect
    #[arg(long, value_name = "N")]
    limit: Option<u64>,

    /// Number of results to skip
    #[arg(long, value_name = "N")]
    start: Option<u64>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print a single listing field across all results (e.g. price, location)
    #[arg(long, value_name = "NAME")]
    field: Option<ListingField>,

    /// Print compact JSON instead of indented
    #[arg(long)]
    compact: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    let coordinator = Coordinator::new(&config)?;
    let request = SearchRequest {
        search: cli.query.clone(),
        location: cli.location.clone(),
        distance: cli.distance,
        min_price: cli.min_price,
        max_price: cli.max_price,
        order: cli.order,
        results_limit: cli.limit,
        start: cli.start,
    };

    let listings = match run_search(&coordinator, request, Arc::new(LogProgress::default())).await
    {
        Ok(listings) => listings,
        Err(e) => {
            tracing::error!("Search failed: {}", e);
            return Err(e.into());
        }
    };

    let output = match cli.field {
        Some(field) => {
            let column = listings.field(field);
            if cli.compact {
                serde_json::to_string(&column)?
            } else {
                serde_json::to_string_pretty(&column)?
            }
        }
        None => listings.to_json(!cli.compact)?,
    };
    println!("{}", output);

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("bazos_scout=info,warn"),
            1 => EnvFilter::new("bazos_scout=debug,info"),
            2 => EnvFilter::new("bazos_scout=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
