//! Storage module for persisting scraped products
//!
//! This module handles the SQLite output database:
//! - Schema management
//! - Run tracking (seed slice, config hash, counters)
//! - Product records and their gallery images

mod schema;
mod sqlite;

pub use sqlite::SqliteSink;

use thiserror::Error;

/// Errors that can occur while writing or reading output
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Run not found: {0}")]
    RunNotFound(i64),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Represents a crawl run
#[derive(Debug, Clone)]
pub struct RunRecord {
    pub id: i64,
    pub started_at: String,
    pub finished_at: Option<String>,
    pub seed_start: usize,
    pub seed_end: usize,
    pub config_hash: String,
    pub status: RunStatus,
    pub requests: u64,
    pub records: u64,
}

/// Status of a crawl run
///
/// A run left in `Running` was interrupted before it could finish.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Running,
    Completed,
}

impl RunStatus {
    pub fn to_db_string(&self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Completed => "completed",
        }
    }

    pub fn from_db_string(s: &str) -> Option<Self> {
        match s {
            "running" => Some(Self::Running),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }
}
