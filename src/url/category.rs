/// Derives the short category name from a category URL
///
/// Takes the last `/`-delimited segment, keeps only ASCII letters and
/// hyphens, then strips trailing hyphens. The result never contains
/// anything else and never ends in a hyphen; it may be empty.
///
/// # Examples
///
/// ```
/// use manomano_scraper::url::category_slug;
///
/// assert_eq!(category_slug("https://www.manomano.fr/cat/garden-tools-"), "garden-tools");
/// assert_eq!(category_slug("https://www.manomano.fr/cat/scie-sauteuse-2093"), "scie-sauteuse");
/// ```
pub fn category_slug(category_url: &str) -> String {
    let segment = category_url.rsplit('/').next().unwrap_or_default();

    let mut slug: String = segment
        .chars()
        .filter(|c| c.is_ascii_alphabetic() || *c == '-')
        .collect();

    while slug.ends_with('-') {
        slug.pop();
    }

    slug
}

/// Builds the URL of one listing page of a category
pub fn page_url(category_url: &str, page: u32) -> String {
    format!("{}?page={}", category_url, page)
}
