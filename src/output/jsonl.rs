//! JSON Lines output sink
//!
//! Each record becomes one JSON object on its own line, with gallery images
//! flattened into `image_url_N` fields. Lines are appended, so several runs
//! can share a file.

use crate::output::{CrawlStats, ItemSink, RunInfo};
use crate::spider::ProductRecord;
use crate::storage::StorageResult;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Appends records to a `.jsonl` file
pub struct JsonLinesSink {
    writer: BufWriter<File>,
}

impl JsonLinesSink {
    pub fn new(path: &Path) -> StorageResult<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new().create(true).append(true).open(path)?;
        tracing::info!("Writing records to {}", path.display());

        Ok(Self {
            writer: BufWriter::new(file),
        })
    }
}

impl ItemSink for JsonLinesSink {
    fn open_run(&mut self, run: &RunInfo) -> StorageResult<i64> {
        tracing::debug!(
            "JSON Lines run over seeds [{}, {}) (config {})",
            run.seed_start,
            run.seed_end,
            run.config_hash
        );
        Ok(0)
    }

    fn write_record(&mut self, _run_id: i64, record: &ProductRecord) -> StorageResult<()> {
        serde_json::to_writer(&mut self.writer, record)?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    fn close_run(&mut self, _run_id: i64, stats: &CrawlStats) -> StorageResult<()> {
        self.writer.flush()?;
        tracing::debug!("Flushed {} records", stats.records);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_writes_one_object_per_line() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out").join("products.jsonl");

        let mut sink = JsonLinesSink::new(&path).unwrap();
        let run_id = sink
            .open_run(&RunInfo {
                seed_start: 0,
                seed_end: 1,
                config_hash: String::new(),
            })
            .unwrap();

        let record = ProductRecord {
            category: "scie".to_string(),
            images: vec!["https://cdn/1.jpg".to_string()],
            ..ProductRecord::default()
        };
        sink.write_record(run_id, &record).unwrap();
        sink.write_record(run_id, &ProductRecord::default()).unwrap();
        sink.close_run(run_id, &CrawlStats::default()).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["category"], "scie");
        assert_eq!(first["image_url_0"], "https://cdn/1.jpg");
        assert!(first["ean"].is_null());
    }

    #[test]
    fn test_appends_across_sinks() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("products.jsonl");

        for _ in 0..2 {
            let mut sink = JsonLinesSink::new(&path).unwrap();
            sink.write_record(0, &ProductRecord::default()).unwrap();
            sink.close_run(0, &CrawlStats::default()).unwrap();
        }

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 2);
    }
}
