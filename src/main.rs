//! ManoMano scraper main entry point
//!
//! This is the command-line interface for the manomano.fr category scraper.

use anyhow::{Context, Result};
use clap::Parser;
use manomano_scraper::config::{load_config_with_hash, Config};
use manomano_scraper::crawler::crawl;
use manomano_scraper::seeds::open_seed_source;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// ManoMano scraper: product records from manomano.fr categories
///
/// Reads category URLs from the seed source, crawls the `[START, END)`
/// slice of them through every listing page and extracts one record per
/// product page.
#[derive(Parser, Debug)]
#[command(name = "manomano-scraper")]
#[command(version = "1.0.0")]
#[command(about = "Scrapes product records from manomano.fr categories", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// First seed index to crawl (inclusive)
    #[arg(value_name = "START")]
    start: usize,

    /// Last seed index to crawl (exclusive)
    #[arg(value_name = "END")]
    end: usize,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show which seeds would be crawled without fetching
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    if cli.dry_run {
        return handle_dry_run(&config, cli.start, cli.end);
    }

    let stats = crawl(&config, &config_hash, cli.start, cli.end)
        .await
        .context("Crawl failed")?;
    tracing::info!(
        "Crawl completed successfully: {} records written to {}",
        stats.records,
        config.output.path
    );

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("manomano_scraper=info,warn"),
            1 => EnvFilter::new("manomano_scraper=debug,info"),
            2 => EnvFilter::new("manomano_scraper=trace,debug"),
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

/// Handles the --dry-run mode: validates config and lists the seed slice
fn handle_dry_run(config: &Config, start: usize, end: usize) -> Result<()> {
    println!("=== ManoMano Scraper Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Base URL: {}", config.crawler.base_url);
    println!("  Allowed domains: {}", config.crawler.allowed_domains.join(", "));
    println!("  Concurrent requests: {}", config.crawler.concurrent_requests);
    println!(
        "  Retry codes: {:?} (max {} retries)",
        config.crawler.retry_http_codes, config.crawler.max_retries
    );
    println!("  Request timeout: {}s", config.crawler.request_timeout);

    println!("\nProxy:");
    if config.proxy.enabled {
        println!("  Enabled via {}", config.proxy.url);
    } else {
        println!("  Disabled");
    }

    println!("\nOutput:");
    println!("  Format: {:?}", config.output.format);
    println!("  Path: {}", config.output.path);

    let seeds = open_seed_source(&config.seeds)?
        .load_seeds()
        .context("Failed to load seeds")?;
    let end = end.min(seeds.len());
    let start = start.min(end);

    println!("\nSeeds [{}, {}) of {}:", start, end, seeds.len());
    for (index, seed) in seeds[start..end].iter().enumerate() {
        println!("  {:>5}  {}", start + index, seed.url);
    }

    println!("\n✓ Configuration is valid");
    println!("✓ Would start crawling with {} category URLs", end - start);

    Ok(())
}
