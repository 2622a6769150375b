use crate::config::types::{Config, CrawlerConfig, OutputConfig, ProxyConfig, SeedConfig};
use crate::seeds::TableName;
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_proxy_config(&config.proxy)?;
    validate_seed_config(&config.seeds)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.concurrent_requests < 1 || config.concurrent_requests > 100 {
        return Err(ConfigError::Validation(format!(
            "concurrent_requests must be between 1 and 100, got {}",
            config.concurrent_requests
        )));
    }

    validate_http_url(&config.base_url, "base_url")?;

    if config.allowed_domains.is_empty() {
        return Err(ConfigError::Validation(
            "allowed_domains must list at least one domain".to_string(),
        ));
    }
    for domain in &config.allowed_domains {
        validate_domain_string(domain)?;
    }

    for code in &config.retry_http_codes {
        if !(100..=599).contains(code) {
            return Err(ConfigError::Validation(format!(
                "retry_http_codes contains an invalid HTTP status: {}",
                code
            )));
        }
    }

    if config.request_timeout == 0 {
        return Err(ConfigError::Validation(
            "request_timeout must be at least 1 second".to_string(),
        ));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates proxy configuration; only checked when the proxy is enabled
fn validate_proxy_config(config: &ProxyConfig) -> Result<(), ConfigError> {
    if !config.enabled {
        return Ok(());
    }

    validate_http_url(&config.url, "proxy url")?;

    if config.api_key.is_empty() {
        return Err(ConfigError::Validation(
            "proxy api_key is required when the proxy is enabled".to_string(),
        ));
    }

    Ok(())
}

/// Validates the seed source
fn validate_seed_config(config: &SeedConfig) -> Result<(), ConfigError> {
    if !config.urls.is_empty() {
        return Ok(());
    }

    match config.database_path.as_deref() {
        None | Some("") => Err(ConfigError::Validation(
            "seeds need either a database_path or an inline urls list".to_string(),
        )),
        Some(_) => {
            TableName::parse(&config.table).ok_or_else(|| {
                ConfigError::Validation(format!(
                    "seed table '{}' must be 'table' or 'schema.table' made of [A-Za-z0-9_]",
                    config.table
                ))
            })?;
            Ok(())
        }
    }
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.path.is_empty() {
        return Err(ConfigError::Validation(
            "output path cannot be empty".to_string(),
        ));
    }
    Ok(())
}

fn validate_http_url(value: &str, field: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {} '{}': {}", field, value, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "{} '{}' must use http or https",
            field, value
        )));
    }

    Ok(())
}

/// Validates a bare domain such as `manomano.fr`
fn validate_domain_string(domain: &str) -> Result<(), ConfigError> {
    if domain.is_empty() {
        return Err(ConfigError::InvalidPattern(
            "Domain cannot be empty".to_string(),
        ));
    }

    if !domain
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
    {
        return Err(ConfigError::InvalidPattern(format!(
            "Domain '{}' contains invalid characters",
            domain
        )));
    }

    if domain.starts_with('.')
        || domain.ends_with('.')
        || domain.starts_with('-')
        || domain.ends_with('-')
        || domain.contains("..")
    {
        return Err(ConfigError::InvalidPattern(format!(
            "Domain '{}' is malformed",
            domain
        )));
    }

    Ok(())
}
