//! ManoMano category scraper
//!
//! This crate crawls category listings on manomano.fr, paginates through the
//! product lists and extracts structured product records (EAN, title,
//! breadcrumb, description, images, brand) from product detail pages.
//!
//! The extraction stages in [`spider`] are synchronous and stateless. The
//! [`crawler`] module hosts them: it schedules requests, fetches pages and
//! hands finished records to an [`output::ItemSink`].

pub mod config;
pub mod crawler;
pub mod output;
pub mod seeds;
pub mod spider;
pub mod storage;
pub mod url;

use thiserror::Error;

/// Main error type for scraper operations
///
/// Extraction itself never fails; these errors come from startup
/// (configuration, seed loading, client construction) and from the sinks.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("Seed source error: {0}")]
    Seeds(String),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid domain pattern: {0}")]
    InvalidPattern(String),
}

/// Result type alias for scraper operations
pub type Result<T> = std::result::Result<T, ScrapeError>;

// Re-export commonly used types
pub use config::Config;
pub use spider::{FetchRequest, FetchedPage, ManomanoSpider, ProductRecord, SpiderOutput, Stage};
pub use crate::url::category_slug;
