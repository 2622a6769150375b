//! Crawler module hosting the spider
//!
//! This module contains the crawl runtime, including:
//! - HTTP fetching with retry logic and optional proxy
//! - Request scheduling with duplicate and offsite filtering
//! - Overall crawl coordination

mod coordinator;
mod fetcher;
mod scheduler;

pub use coordinator::Coordinator;
pub use fetcher::{build_http_client, fetch_page, FetchResult, RetryPolicy};
pub use scheduler::{Admission, Scheduler};

use crate::config::Config;
use crate::output::{open_sink, CrawlStats};
use crate::seeds::open_seed_source;
use crate::ScrapeError;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Load the full seed list
/// 2. Open the configured output sink
/// 3. Crawl the `[start, end)` slice of seeds
/// 4. Return the crawl statistics
///
/// # Arguments
///
/// * `config` - The validated configuration
/// * `config_hash` - Hash of the configuration file, stored with the run
/// * `start`, `end` - Seed slice bounds, clamped to the seed count
pub async fn crawl(
    config: &Config,
    config_hash: &str,
    start: usize,
    end: usize,
) -> Result<CrawlStats, ScrapeError> {
    let seeds = open_seed_source(&config.seeds)?.load_seeds()?;
    tracing::info!("Loaded {} seed categories", seeds.len());

    let sink = open_sink(&config.output)?;
    let mut coordinator = Coordinator::new(config, sink)?;
    coordinator.run(&seeds, start, end, config_hash).await
}
