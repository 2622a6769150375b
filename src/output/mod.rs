//! Output module for scraped records
//!
//! This module handles:
//! - The [`ItemSink`] interface records are handed to
//! - JSON Lines output
//! - Crawl statistics
//!
//! The SQLite sink lives in [`crate::storage`].

mod jsonl;
pub mod stats;

pub use jsonl::JsonLinesSink;
pub use stats::CrawlStats;

use crate::config::{OutputConfig, OutputFormat};
use crate::spider::ProductRecord;
use crate::storage::{SqliteSink, StorageResult};
use std::path::Path;

/// Parameters of the run a sink is about to receive records for
#[derive(Debug, Clone)]
pub struct RunInfo {
    pub seed_start: usize,
    pub seed_end: usize,
    pub config_hash: String,
}

/// Destination for finished product records
///
/// Records arrive in completion order, which is not the crawl order.
pub trait ItemSink: Send {
    /// Starts a run and returns its ID
    fn open_run(&mut self, run: &RunInfo) -> StorageResult<i64>;

    /// Stores one record
    fn write_record(&mut self, run_id: i64, record: &ProductRecord) -> StorageResult<()>;

    /// Marks the run finished and flushes pending output
    fn close_run(&mut self, run_id: i64, stats: &CrawlStats) -> StorageResult<()>;
}

/// Builds the sink described by the configuration
pub fn open_sink(config: &OutputConfig) -> StorageResult<Box<dyn ItemSink>> {
    let path = Path::new(&config.path);
    match config.format {
        OutputFormat::Sqlite => Ok(Box::new(SqliteSink::new(path)?)),
        OutputFormat::Jsonl => Ok(Box::new(JsonLinesSink::new(path)?)),
    }
}
