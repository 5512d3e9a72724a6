//! Catalogue Scraper main entry point
//!
//! This is the command-line interface for the catalogue scraper.

use anyhow::Context;
use catalogue_scraper::config::{load_config_with_hash, validate, Config};
use catalogue_scraper::crawler::Scraper;
use catalogue_scraper::output::print_report;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Catalogue Scraper: per-category CSV export of a catalogue website
///
/// Walks every category of the site, follows pagination, extracts one
/// record per item page and writes a CSV file plus item images per
/// category.
#[derive(Parser, Debug)]
#[command(name = "catalogue-scraper")]
#[command(version)]
#[command(about = "Scrapes a catalogue website into per-category CSV files", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults are used when omitted)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Output root directory
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<String>,

    /// Base URL of the catalogue site (discovery starts here unless --root-url is given)
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// Page holding the category navigation
    #[arg(long, value_name = "URL")]
    root_url: Option<String>,

    /// Only scrape this category (repeatable)
    #[arg(long = "category", value_name = "NAME")]
    categories: Vec<String>,

    /// Skip image downloads
    #[arg(long)]
    no_images: bool,

    /// Write `<category>.csv` instead of a date-stamped file name
    #[arg(long)]
    no_date_stamp: bool,

    /// List the discovered categories and exit
    #[arg(long)]
    list_categories: bool,

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

    let config = build_config(&cli)?;
    let scraper = Scraper::new(config).context("Failed to initialise scraper")?;

    if cli.list_categories {
        let categories = scraper
            .discover()
            .await
            .context("Category discovery failed")?;
        for category in categories {
            println!("{}\t{}", category.name, category.url);
        }
        return Ok(());
    }

    let report = scraper.run().await.context("Scrape failed")?;

    if !cli.quiet {
        print_report(&report);
    }
    if report.has_failures() {
        tracing::warn!("Run completed with failures; see the summary above");
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("catalogue_scraper=info,warn"),
            1 => EnvFilter::new("catalogue_scraper=debug,info"),
            2 => EnvFilter::new("catalogue_scraper=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the config file (if any) and applies command-line overrides
fn build_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => {
            tracing::info!("No configuration file given, using defaults");
            Config::default()
        }
    };

    if let Some(output_dir) = &cli.output_dir {
        config.output.root_dir = output_dir.clone();
    }
    if let Some(base_url) = &cli.base_url {
        config.site.set_base_url(base_url.clone());
    }
    if let Some(root_url) = &cli.root_url {
        config.site.root_url = Some(root_url.clone());
    }
    if !cli.categories.is_empty() {
        config.site.categories = cli.categories.clone();
    }
    if cli.no_images {
        config.output.download_images = false;
    }
    if cli.no_date_stamp {
        config.output.date_stamp = false;
    }

    validate(&config).context("Invalid configuration")?;
    Ok(config)
}
