use crate::spider::selectors::PageSelectors;
use crate::spider::{FetchRequest, FetchedPage, Stage};
use crate::url::resolve_link;
use scraper::Html;
use url::Url;

/// Emits one product request per link inside the listing's product cards
///
/// Every `href` on or under a product card counts, resolved against
/// `base_url`.
/// Links that cannot be resolved are skipped; a page without cards yields
/// nothing.
pub(crate) fn list_products(
    page: &FetchedPage,
    base_url: &Url,
    selectors: &PageSelectors,
) -> Vec<FetchRequest> {
    let document = Html::parse_document(&page.body);

    let mut requests = Vec::new();
    for element in document.select(&selectors.product_card_link) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };

        match resolve_link(href, base_url) {
            Some(url) => requests.push(FetchRequest::new(url, page.category(), Stage::Product)),
            None => tracing::debug!("Skipping unresolvable product link {:?} on {}", href, page.url),
        }
    }

    tracing::debug!("Found {} product links on {}", requests.len(), page.url);
    requests
}
