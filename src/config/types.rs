use serde::Deserialize;

/// Origin that relative product links are resolved against
pub const DEFAULT_BASE_URL: &str = "https://www.manomano.fr";

/// Number of simultaneous in-flight requests
pub const DEFAULT_CONCURRENT_REQUESTS: usize = 12;

/// Statuses retried by the fetcher and still handed to the spider once retries run out
pub const DEFAULT_RETRY_HTTP_CODES: [u16; 6] = [403, 503, 429, 504, 502, 500];

/// Table holding the category URLs to crawl
pub const DEFAULT_SEED_TABLE: &str = "filtered.manomano_category";

const DEFAULT_PROXY_URL: &str = "http://proxy.crawlera.com:8010";

/// Main configuration structure for the scraper
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub proxy: ProxyConfig,
    pub seeds: SeedConfig,
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Origin used to resolve relative product links
    #[serde(rename = "base-url", default = "default_base_url")]
    pub base_url: String,

    /// Domains requests may target; subdomains are allowed too
    #[serde(rename = "allowed-domains", default = "default_allowed_domains")]
    pub allowed_domains: Vec<String>,

    /// Maximum number of concurrent fetches
    #[serde(rename = "concurrent-requests", default = "default_concurrent_requests")]
    pub concurrent_requests: usize,

    /// HTTP statuses that trigger a retry
    #[serde(rename = "retry-http-codes", default = "default_retry_http_codes")]
    pub retry_http_codes: Vec<u16>,

    /// Retries allowed per request before giving up
    #[serde(rename = "max-retries", default = "default_max_retries")]
    pub max_retries: u32,

    /// Request timeout (seconds)
    #[serde(rename = "request-timeout", default = "default_request_timeout")]
    pub request_timeout: u64,

    /// User-Agent header sent with every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            allowed_domains: default_allowed_domains(),
            concurrent_requests: default_concurrent_requests(),
            retry_http_codes: default_retry_http_codes(),
            max_retries: default_max_retries(),
            request_timeout: default_request_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

/// Proxy / anti-bot gateway configuration
///
/// When enabled, every request goes through `url` authenticated with
/// `api-key` as the basic-auth user and an empty password.
#[derive(Debug, Clone, Deserialize)]
pub struct ProxyConfig {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default = "default_proxy_url")]
    pub url: String,

    #[serde(rename = "api-key", default)]
    pub api_key: String,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            url: default_proxy_url(),
            api_key: String::new(),
        }
    }
}

/// Where category URLs come from
#[derive(Debug, Clone, Deserialize)]
pub struct SeedConfig {
    /// SQLite database holding the seed table
    #[serde(rename = "database-path", default)]
    pub database_path: Option<String>,

    /// Table name, optionally schema-qualified (`schema.table`)
    #[serde(default = "default_seed_table")]
    pub table: String,

    /// Inline category URLs; used instead of the database when non-empty
    #[serde(default)]
    pub urls: Vec<String>,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,

    /// SQLite database or JSON Lines file, depending on `format`
    pub path: String,
}

/// Supported item sinks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Sqlite,
    Jsonl,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_allowed_domains() -> Vec<String> {
    vec!["manomano.fr".to_string()]
}

fn default_concurrent_requests() -> usize {
    DEFAULT_CONCURRENT_REQUESTS
}

fn default_retry_http_codes() -> Vec<u16> {
    DEFAULT_RETRY_HTTP_CODES.to_vec()
}

fn default_max_retries() -> u32 {
    2
}

fn default_request_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("manomano-scraper/{}", env!("CARGO_PKG_VERSION"))
}

fn default_proxy_url() -> String {
    DEFAULT_PROXY_URL.to_string()
}

fn default_seed_table() -> String {
    DEFAULT_SEED_TABLE.to_string()
}
