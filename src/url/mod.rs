//! URL handling module
//!
//! This module provides category name derivation, listing page URLs,
//! link resolution, request fingerprints and allowed-domain matching.

mod category;
mod matcher;
mod normalize;

// Re-export main functions
pub use category::{category_slug, page_url};
pub use matcher::matches_allowed_domain;
pub use normalize::request_fingerprint;

use url::Url;

/// Extracts the lowercase host from a URL string
///
/// Returns `None` when the string does not parse or has no host.
pub fn extract_domain(url_str: &str) -> Option<String> {
    Url::parse(url_str)
        .ok()?
        .host_str()
        .map(|h| h.to_lowercase())
}

/// Returns true if the URL's host matches any of the allowed domains
pub fn is_allowed(url_str: &str, allowed_domains: &[String]) -> bool {
    match extract_domain(url_str) {
        Some(host) => allowed_domains
            .iter()
            .any(|allowed| matches_allowed_domain(allowed, &host)),
        None => false,
    }
}

/// Resolves a link href against a base URL
///
/// Returns None if the link should be excluded:
/// - empty hrefs and fragment-only anchors
/// - javascript:, mailto:, tel: and data: schemes
/// - hrefs that fail to resolve or resolve to a non-HTTP(S) URL
pub fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    let absolute_url = base_url.join(href).ok()?;
    if absolute_url.scheme() == "http" || absolute_url.scheme() == "https" {
        Some(absolute_url.into())
    } else {
        None
    }
}
