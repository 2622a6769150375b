//! Configuration module for the scraper
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use manomano_scraper::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("scraper.toml")).unwrap();
//! println!("Concurrent requests: {}", config.crawler.concurrent_requests);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlerConfig, OutputConfig, OutputFormat, ProxyConfig, SeedConfig,
    DEFAULT_BASE_URL, DEFAULT_CONCURRENT_REQUESTS, DEFAULT_RETRY_HTTP_CODES, DEFAULT_SEED_TABLE,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
