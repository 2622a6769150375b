//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building HTTP clients with user agent, timeouts and optional proxy
//! - GET requests for spider work items
//! - Classifying responses against the retry policy

use crate::config::{CrawlerConfig, ProxyConfig};
use crate::spider::{FetchRequest, FetchedPage};
use reqwest::{Client, Proxy};
use std::time::Duration;

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchResult {
    /// A response for the spider to parse
    Success(FetchedPage),

    /// A retryable failure with attempts left
    Retry {
        request: FetchRequest,
        reason: String,
    },

    /// A failure that will not be retried and never reaches the spider
    Dropped {
        request: FetchRequest,
        reason: String,
    },
}

/// Which statuses are retried, and how often
///
/// Retryable statuses are also handled statuses: once a request is out of
/// attempts its last response is still handed to the spider.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    codes: Vec<u16>,
    max_retries: u32,
}

impl RetryPolicy {
    pub fn new(codes: Vec<u16>, max_retries: u32) -> Self {
        Self { codes, max_retries }
    }

    pub fn from_config(config: &CrawlerConfig) -> Self {
        Self::new(config.retry_http_codes.clone(), config.max_retries)
    }

    /// Returns true if the status is in the retry list
    pub fn is_retryable(&self, status: u16) -> bool {
        self.codes.contains(&status)
    }

    /// Returns true if the request may be attempted again
    pub fn can_retry(&self, request: &FetchRequest) -> bool {
        request.retries < self.max_retries
    }
}

/// Builds an HTTP client with proper configuration
///
/// When the proxy is enabled every request is routed through it, using the
/// API key as basic-auth user with an empty password.
pub fn build_http_client(
    crawler: &CrawlerConfig,
    proxy: &ProxyConfig,
) -> Result<Client, reqwest::Error> {
    let mut builder = Client::builder()
        .user_agent(crawler.user_agent.clone())
        .timeout(Duration::from_secs(crawler.request_timeout))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true);

    if proxy.enabled {
        tracing::info!("Routing requests through proxy {}", proxy.url);
        builder = builder.proxy(Proxy::all(&proxy.url)?.basic_auth(&proxy.api_key, ""));
    }

    builder.build()
}

/// Fetches a request and classifies the outcome
///
/// # Response Handling
///
/// | Condition | Attempts left | Outcome |
/// |-----------|---------------|---------|
/// | 2xx | - | Success |
/// | Retryable status | yes | Retry |
/// | Retryable status | no | Success (spider sees the error page) |
/// | Other status | - | Dropped |
/// | Network error, timeout | yes | Retry |
/// | Network error, timeout | no | Dropped |
pub async fn fetch_page(client: &Client, request: FetchRequest, policy: &RetryPolicy) -> FetchResult {
    let response = match client.get(&request.url).send().await {
        Ok(response) => response,
        Err(e) => return network_failure(request, describe_error(&e), policy),
    };

    let status = response.status();
    let code = status.as_u16();

    if policy.is_retryable(code) && policy.can_retry(&request) {
        return FetchResult::Retry {
            request,
            reason: format!("HTTP {}", code),
        };
    }

    if !status.is_success() && !policy.is_retryable(code) {
        return FetchResult::Dropped {
            request,
            reason: format!("HTTP {}", code),
        };
    }

    let final_url = response.url().to_string();
    match response.text().await {
        Ok(body) => FetchResult::Success(FetchedPage {
            request,
            url: final_url,
            status: code,
            body,
        }),
        Err(e) => network_failure(request, format!("Failed to read body: {}", e), policy),
    }
}

fn network_failure(request: FetchRequest, reason: String, policy: &RetryPolicy) -> FetchResult {
    if policy.can_retry(&request) {
        FetchResult::Retry { request, reason }
    } else {
        FetchResult::Dropped { request, reason }
    }
}

fn describe_error(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        "Request timeout".to_string()
    } else if e.is_connect() {
        format!("Connection failed: {}", e)
    } else {
        e.to_string()
    }
}
