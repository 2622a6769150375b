//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the main crawl loop that coordinates:
//! - Feeding seed requests into the scheduler
//! - Keeping up to `concurrent-requests` fetches in flight
//! - Handing responses to the spider and routing what it yields
//! - Writing records to the sink and closing the run

use crate::config::Config;
use crate::crawler::fetcher::{build_http_client, fetch_page, FetchResult, RetryPolicy};
use crate::crawler::scheduler::{Admission, Scheduler};
use crate::output::{CrawlStats, ItemSink, RunInfo};
use crate::seeds::SeedEntry;
use crate::spider::{FetchRequest, ManomanoSpider, SpiderOutput};
use crate::ScrapeError;
use reqwest::Client;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use url::Url;

/// Main crawler coordinator structure
pub struct Coordinator {
    spider: ManomanoSpider,
    scheduler: Scheduler,
    client: Client,
    retry_policy: Arc<RetryPolicy>,
    semaphore: Arc<Semaphore>,
    sink: Box<dyn ItemSink>,
    stats: CrawlStats,
}

impl Coordinator {
    /// Creates a new coordinator instance
    ///
    /// # Arguments
    ///
    /// * `config` - The validated configuration
    /// * `sink` - Where finished records go
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Successfully created coordinator
    /// * `Err(ScrapeError)` - Bad base URL or HTTP client failure
    pub fn new(config: &Config, sink: Box<dyn ItemSink>) -> Result<Self, ScrapeError> {
        let base_url = Url::parse(&config.crawler.base_url)?;
        let client = build_http_client(&config.crawler, &config.proxy)?;

        Ok(Self {
            spider: ManomanoSpider::new(base_url),
            scheduler: Scheduler::new(config.crawler.allowed_domains.clone()),
            client,
            retry_policy: Arc::new(RetryPolicy::from_config(&config.crawler)),
            semaphore: Arc::new(Semaphore::new(config.crawler.concurrent_requests.max(1))),
            sink,
            stats: CrawlStats::default(),
        })
    }

    /// Runs the crawl over the `[start, end)` slice of `seeds`
    ///
    /// Returns once the frontier is empty and no fetch is in flight. Sink
    /// failures abort the run; fetch and parse problems only show up in the
    /// statistics.
    pub async fn run(
        &mut self,
        seeds: &[SeedEntry],
        start: usize,
        end: usize,
        config_hash: &str,
    ) -> Result<CrawlStats, ScrapeError> {
        let run_id = self.sink.open_run(&RunInfo {
            seed_start: start,
            seed_end: end,
            config_hash: config_hash.to_string(),
        })?;
        tracing::info!("Starting crawl run {} over seeds [{}, {})", run_id, start, end);

        for request in self.spider.start_requests(seeds, start, end) {
            self.schedule(request);
        }

        let start_time = Instant::now();
        let mut in_flight: JoinSet<FetchResult> = JoinSet::new();

        loop {
            self.dispatch(&mut in_flight);

            let Some(joined) = in_flight.join_next().await else {
                tracing::info!("Frontier is empty, crawl complete");
                break;
            };

            match joined {
                Ok(result) => self.handle_result(run_id, result, start_time)?,
                Err(e) => {
                    tracing::error!("Fetch task failed: {}", e);
                    self.stats.responses_dropped += 1;
                }
            }
        }

        self.sink.close_run(run_id, &self.stats)?;
        self.stats.log_summary(start_time.elapsed());

        Ok(self.stats.clone())
    }

    /// Starts fetches until the frontier is drained or all permits are taken
    fn dispatch(&mut self, in_flight: &mut JoinSet<FetchResult>) {
        while !self.scheduler.is_empty() {
            let Ok(permit) = Arc::clone(&self.semaphore).try_acquire_owned() else {
                break;
            };
            let Some(request) = self.scheduler.next_request() else {
                break;
            };

            tracing::debug!("Fetching {} [{}]", request.url, request.stage);
            let client = self.client.clone();
            let policy = Arc::clone(&self.retry_policy);

            in_flight.spawn(async move {
                let _permit = permit;
                fetch_page(&client, request, &policy).await
            });
        }
    }

    /// Routes one finished fetch
    fn handle_result(
        &mut self,
        run_id: i64,
        result: FetchResult,
        start_time: Instant,
    ) -> Result<(), ScrapeError> {
        match result {
            FetchResult::Success(page) => {
                if page.is_error_page() {
                    tracing::debug!(
                        "Out of retries for {} (HTTP {}), handing response to spider",
                        page.url,
                        page.status
                    );
                }
                self.stats.pages_parsed += 1;

                for output in self.spider.parse(&page) {
                    match output {
                        SpiderOutput::Request(request) => self.schedule(request),
                        SpiderOutput::Record(record) => {
                            self.sink.write_record(run_id, &record)?;
                            self.stats.records += 1;
                        }
                    }
                }

                if self.stats.pages_parsed % 100 == 0 {
                    self.log_progress(start_time);
                }
            }

            FetchResult::Retry { request, reason } => {
                tracing::debug!(
                    "Retrying {} (attempt {}): {}",
                    request.url,
                    request.retries + 1,
                    reason
                );
                self.stats.retries += 1;
                self.scheduler.requeue(request.retry());
            }

            FetchResult::Dropped { request, reason } => {
                tracing::warn!("Giving up on {} [{}]: {}", request.url, request.stage, reason);
                self.stats.responses_dropped += 1;
            }
        }

        Ok(())
    }

    fn log_progress(&self, start_time: Instant) {
        let rate = self.stats.pages_parsed as f64 / start_time.elapsed().as_secs_f64();
        tracing::info!(
            "Progress: {} pages parsed, {} records, {} in frontier, {:.2} pages/sec",
            self.stats.pages_parsed,
            self.stats.records,
            self.scheduler.frontier_size(),
            rate
        );
    }

    fn schedule(&mut self, request: FetchRequest) {
        let stage = request.stage;
        match self.scheduler.enqueue(request) {
            Admission::Queued => self.stats.record_scheduled(stage),
            Admission::Duplicate => self.stats.duplicates_filtered += 1,
            Admission::Offsite => self.stats.offsite_filtered += 1,
            Admission::Invalid => self.stats.invalid_urls += 1,
        }
    }
}
