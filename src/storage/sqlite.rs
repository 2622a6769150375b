//! SQLite output sink

use crate::output::{CrawlStats, ItemSink, RunInfo};
use crate::spider::ProductRecord;
use crate::storage::schema::initialize_schema;
use crate::storage::{RunRecord, RunStatus, StorageError, StorageResult};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

/// Writes product records into a SQLite database
pub struct SqliteSink {
    conn: Connection,
}

impl SqliteSink {
    /// Opens (or creates) the output database at `path`
    pub fn new(path: &Path) -> StorageResult<Self> {
        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA foreign_keys = ON;
        ",
        )?;

        initialize_schema(&conn)?;

        Ok(Self { conn })
    }

    /// Creates an in-memory database (for testing)
    #[cfg(test)]
    pub fn new_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Gets a run by ID
    pub fn get_run(&self, run_id: i64) -> StorageResult<RunRecord> {
        self.conn
            .query_row(
                "SELECT id, started_at, finished_at, seed_start, seed_end, config_hash, status,
                 requests, records FROM runs WHERE id = ?1",
                params![run_id],
                |row| {
                    Ok(RunRecord {
                        id: row.get(0)?,
                        started_at: row.get(1)?,
                        finished_at: row.get(2)?,
                        seed_start: row.get::<_, i64>(3)? as usize,
                        seed_end: row.get::<_, i64>(4)? as usize,
                        config_hash: row.get(5)?,
                        status: RunStatus::from_db_string(&row.get::<_, String>(6)?)
                            .unwrap_or(RunStatus::Running),
                        requests: row.get::<_, i64>(7)? as u64,
                        records: row.get::<_, i64>(8)? as u64,
                    })
                },
            )
            .optional()?
            .ok_or(StorageError::RunNotFound(run_id))
    }

    /// Loads every record written by a run, in insertion order
    pub fn load_records(&self, run_id: i64) -> StorageResult<Vec<ProductRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, category, ean, title, ariane, description, brand
             FROM products WHERE run_id = ?1 ORDER BY id",
        )?;
        let rows = stmt
            .query_map(params![run_id], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    ProductRecord {
                        category: row.get(1)?,
                        ean: row.get(2)?,
                        title: row.get(3)?,
                        breadcrumb: row.get(4)?,
                        description: row.get(5)?,
                        images: Vec::new(),
                        brand: row.get(6)?,
                    },
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let mut images_stmt = self
            .conn
            .prepare("SELECT url FROM product_images WHERE product_id = ?1 ORDER BY position")?;

        let mut records = Vec::with_capacity(rows.len());
        for (product_id, mut record) in rows {
            record.images = images_stmt
                .query_map(params![product_id], |row| row.get(0))?
                .collect::<Result<Vec<String>, _>>()?;
            records.push(record);
        }

        Ok(records)
    }

    /// Counts all stored products across runs
    pub fn count_products(&self) -> StorageResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM products", [], |row| row.get(0))?;
        Ok(count as u64)
    }
}

impl ItemSink for SqliteSink {
    fn open_run(&mut self, run: &RunInfo) -> StorageResult<i64> {
        let now = Utc::now().to_rfc3339();
        self.conn.execute(
            "INSERT INTO runs (started_at, seed_start, seed_end, config_hash, status)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                now,
                run.seed_start as i64,
                run.seed_end as i64,
                run.config_hash,
                RunStatus::Running.to_db_string()
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn write_record(&mut self, run_id: i64, record: &ProductRecord) -> StorageResult<()> {
        let now = Utc::now().to_rfc3339();
        let tx = self.conn.transaction()?;

        tx.execute(
            "INSERT INTO products (run_id, category, ean, title, ariane, description, brand, scraped_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                run_id,
                record.category,
                record.ean,
                record.title,
                record.breadcrumb,
                record.description,
                record.brand,
                now
            ],
        )?;
        let product_id = tx.last_insert_rowid();

        for (position, url) in record.images.iter().enumerate() {
            tx.execute(
                "INSERT INTO product_images (product_id, position, url) VALUES (?1, ?2, ?3)",
                params![product_id, position as i64, url],
            )?;
        }

        tx.commit()?;
        Ok(())
    }

    fn close_run(&mut self, run_id: i64, stats: &CrawlStats) -> StorageResult<()> {
        let now = Utc::now().to_rfc3339();
        let updated = self.conn.execute(
            "UPDATE runs SET status = ?1, finished_at = ?2, requests = ?3, records = ?4 WHERE id = ?5",
            params![
                RunStatus::Completed.to_db_string(),
                now,
                stats.total_requests() as i64,
                stats.records as i64,
                run_id
            ],
        )?;

        if updated == 0 {
            return Err(StorageError::RunNotFound(run_id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_info() -> RunInfo {
        RunInfo {
            seed_start: 0,
            seed_end: 10,
            config_hash: "abc123".to_string(),
        }
    }

    fn record(images: &[&str]) -> ProductRecord {
        ProductRecord {
            category: "garden-tools".to_string(),
            ean: Some("3165140512345".to_string()),
            title: Some("Sécateur".to_string()),
            breadcrumb: "Jardin > Outils".to_string(),
            description: None,
            images: images.iter().map(|s| s.to_string()).collect(),
            brand: None,
        }
    }

    #[test]
    fn test_open_run_is_running() {
        let mut sink = SqliteSink::new_in_memory().unwrap();
        let run_id = sink.open_run(&run_info()).unwrap();

        let run = sink.get_run(run_id).unwrap();
        assert_eq!(run.status, RunStatus::Running);
        assert_eq!(run.seed_end, 10);
        assert_eq!(run.config_hash, "abc123");
        assert!(run.finished_at.is_none());
    }

    #[test]
    fn test_records_round_trip_with_images_in_order() {
        let mut sink = SqliteSink::new_in_memory().unwrap();
        let run_id = sink.open_run(&run_info()).unwrap();

        let first = record(&["https://cdn/1.jpg", "https://cdn/2.jpg", "https://cdn/3.jpg"]);
        let second = record(&[]);
        sink.write_record(run_id, &first).unwrap();
        sink.write_record(run_id, &second).unwrap();

        let loaded = sink.load_records(run_id).unwrap();
        assert_eq!(loaded, vec![first, second]);
        assert_eq!(sink.count_products().unwrap(), 2);
    }

    #[test]
    fn test_close_run_stores_counters() {
        let mut sink = SqliteSink::new_in_memory().unwrap();
        let run_id = sink.open_run(&run_info()).unwrap();

        let mut stats = CrawlStats::default();
        stats.category_requests = 1;
        stats.page_requests = 2;
        stats.product_requests = 5;
        stats.records = 5;
        sink.close_run(run_id, &stats).unwrap();

        let run = sink.get_run(run_id).unwrap();
        assert_eq!(run.status, RunStatus::Completed);
        assert_eq!(run.requests, 8);
        assert_eq!(run.records, 5);
        assert!(run.finished_at.is_some());
    }

    #[test]
    fn test_unknown_run() {
        let mut sink = SqliteSink::new_in_memory().unwrap();
        assert!(matches!(sink.get_run(42), Err(StorageError::RunNotFound(42))));
        assert!(matches!(
            sink.close_run(42, &CrawlStats::default()),
            Err(StorageError::RunNotFound(42))
        ));
    }
}
