//! Counters collected while a crawl runs

use crate::spider::Stage;
use std::time::Duration;

/// Crawl statistics summary
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlStats {
    /// Category requests scheduled
    pub category_requests: u64,

    /// Listing page requests scheduled
    pub page_requests: u64,

    /// Product requests scheduled
    pub product_requests: u64,

    /// Requests dropped because their fingerprint was already seen
    pub duplicates_filtered: u64,

    /// Requests dropped because their host is not an allowed domain
    pub offsite_filtered: u64,

    /// Requests dropped because their URL does not parse
    pub invalid_urls: u64,

    /// Retry attempts scheduled
    pub retries: u64,

    /// Responses or failures discarded without reaching the spider
    pub responses_dropped: u64,

    /// Responses handed to the spider
    pub pages_parsed: u64,

    /// Records written to the sink
    pub records: u64,
}

impl CrawlStats {
    /// Counts a newly scheduled request (retries are counted separately)
    pub fn record_scheduled(&mut self, stage: Stage) {
        match stage {
            Stage::Category => self.category_requests += 1,
            Stage::Page => self.page_requests += 1,
            Stage::Product => self.product_requests += 1,
        }
    }

    /// Total requests scheduled across stages
    pub fn total_requests(&self) -> u64 {
        self.category_requests + self.page_requests + self.product_requests
    }

    /// Logs a summary of the run at info level
    pub fn log_summary(&self, elapsed: Duration) {
        let rate = if elapsed.as_secs_f64() > 0.0 {
            self.pages_parsed as f64 / elapsed.as_secs_f64()
        } else {
            0.0
        };

        tracing::info!(
            "Crawl finished in {:.1?}: {} records from {} pages ({:.2} pages/sec)",
            elapsed,
            self.records,
            self.pages_parsed,
            rate
        );
        tracing::info!(
            "Requests: {} category, {} page, {} product, {} retries",
            self.category_requests,
            self.page_requests,
            self.product_requests,
            self.retries
        );
        tracing::info!(
            "Filtered: {} duplicate, {} offsite, {} invalid; {} responses dropped",
            self.duplicates_filtered,
            self.offsite_filtered,
            self.invalid_urls,
            self.responses_dropped
        );
    }
}
