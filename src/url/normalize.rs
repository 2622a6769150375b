use url::Url;

/// Computes the de-duplication fingerprint of a request URL
///
/// # Canonicalization Steps
///
/// 1. Parse the URL; reject if malformed or not HTTP(S)
/// 2. Lowercase the host (done by the parser) and resolve dot segments
/// 3. Remove the fragment
/// 4. Sort query parameters by key, then value (order of equal pairs kept)
/// 5. Remove an empty query string (trailing `?`)
///
/// Scheme, `www.` prefix and trailing slashes are kept: they address
/// different resources on the target site.
///
/// # Examples
///
/// ```
/// use manomano_scraper::url::request_fingerprint;
///
/// let a = request_fingerprint("https://www.manomano.fr/cat/scie?page=2&sort=asc#top");
/// let b = request_fingerprint("https://WWW.MANOMANO.FR/cat/scie?sort=asc&page=2");
/// assert_eq!(a, b);
/// ```
pub fn request_fingerprint(url_str: &str) -> Option<String> {
    let mut url = Url::parse(url_str.trim()).ok()?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return None;
    }
    url.host_str()?;

    url.set_fragment(None);

    if url.query().is_some() {
        let mut params: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        params.sort();

        if params.is_empty() {
            url.set_query(None);
        } else {
            url.query_pairs_mut().clear().extend_pairs(params);
        }
    }

    Some(url.into())
}
