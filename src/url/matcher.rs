/// Checks if a host belongs to an allowed domain
///
/// A host matches when it equals the allowed domain or is one of its
/// subdomains, so `manomano.fr` admits `www.manomano.fr` but not
/// `notmanomano.fr`. Comparison is case-insensitive.
///
/// # Examples
///
/// ```
/// use manomano_scraper::url::matches_allowed_domain;
///
/// assert!(matches_allowed_domain("manomano.fr", "manomano.fr"));
/// assert!(matches_allowed_domain("manomano.fr", "www.manomano.fr"));
/// assert!(!matches_allowed_domain("manomano.fr", "notmanomano.fr"));
/// assert!(!matches_allowed_domain("www.manomano.fr", "manomano.fr"));
/// ```
pub fn matches_allowed_domain(allowed: &str, host: &str) -> bool {
    let allowed = allowed.to_ascii_lowercase();
    let host = host.to_ascii_lowercase();

    host == allowed || host.ends_with(&format!(".{}", allowed))
}
