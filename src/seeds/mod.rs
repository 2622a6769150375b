//! Seed sources supplying the category URLs to crawl
//!
//! Seeds are read once at startup; the crawl then works on the
//! `[start, end)` slice the operator asked for.

mod sqlite;

pub use sqlite::{SqliteSeedSource, TableName};

use crate::config::SeedConfig;
use crate::ScrapeError;
use std::path::Path;

/// One row of the category table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedEntry {
    pub url: String,
}

/// Anything that can produce the full, ordered list of category URLs
pub trait SeedSource {
    fn load_seeds(&self) -> Result<Vec<SeedEntry>, ScrapeError>;
}

/// Seeds held in memory (inline config list, tests)
#[derive(Debug, Clone, Default)]
pub struct StaticSeedSource {
    urls: Vec<String>,
}

impl StaticSeedSource {
    pub fn new(urls: Vec<String>) -> Self {
        Self { urls }
    }
}

impl SeedSource for StaticSeedSource {
    fn load_seeds(&self) -> Result<Vec<SeedEntry>, ScrapeError> {
        Ok(self
            .urls
            .iter()
            .map(|url| SeedEntry { url: url.clone() })
            .collect())
    }
}

/// Builds the seed source described by the configuration
///
/// An inline `urls` list takes precedence over the database table.
pub fn open_seed_source(config: &SeedConfig) -> Result<Box<dyn SeedSource>, ScrapeError> {
    if !config.urls.is_empty() {
        return Ok(Box::new(StaticSeedSource::new(config.urls.clone())));
    }

    let database_path = config
        .database_path
        .as_deref()
        .ok_or_else(|| ScrapeError::Seeds("no seed database configured".to_string()))?;
    let table = TableName::parse(&config.table)
        .ok_or_else(|| ScrapeError::Seeds(format!("invalid seed table '{}'", config.table)))?;

    Ok(Box::new(SqliteSeedSource::new(Path::new(database_path), table)))
}
