use crate::spider::selectors::{first_own_text, PageSelectors};
use crate::spider::{FetchRequest, FetchedPage, Stage};
use crate::url::page_url;
use scraper::Html;

/// Page count used when the pagination block cannot be read
pub const FALLBACK_PAGE_COUNT: u32 = 2;

/// Emits one listing request per page of a category
///
/// The page count is read from the second-to-last pagination link (the
/// last one is the "next" arrow). When it is missing or not a number the
/// category is assumed to have [`FALLBACK_PAGE_COUNT`] pages. A count of
/// zero or less is taken at face value and yields no requests.
///
/// Listing requests are exempt from de-duplication and keep the category
/// context of the page they came from.
pub(crate) fn paginate(page: &FetchedPage, selectors: &PageSelectors) -> Vec<FetchRequest> {
    let document = Html::parse_document(&page.body);
    let category = page.category();

    let max_page = match read_page_count(&document, selectors) {
        Some(count) => count.clamp(0, i64::from(u32::MAX)) as u32,
        None => {
            tracing::info!(
                "No readable page count on {}, assuming {} pages",
                page.url,
                FALLBACK_PAGE_COUNT
            );
            FALLBACK_PAGE_COUNT
        }
    };

    (1..=max_page)
        .map(|index| {
            FetchRequest::new(page_url(category, index), category, Stage::Page).dont_filter()
        })
        .collect()
}

fn read_page_count(document: &Html, selectors: &PageSelectors) -> Option<i64> {
    let links: Vec<_> = document.select(&selectors.pagination_link).collect();
    let second_to_last = links.len().checked_sub(2).map(|idx| links[idx])?;

    first_own_text(second_to_last)?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATEGORY: &str = "https://www.manomano.fr/cat/perceuse-visseuse-";

    fn category_page(body: &str) -> FetchedPage {
        FetchedPage::new(FetchRequest::new(CATEGORY, CATEGORY, Stage::Category), body)
    }

    fn pagination(labels: &[&str]) -> String {
        let links: String = labels
            .iter()
            .map(|label| {
                format!(
                    r#"<a class="pagination__link js-listing__trigger" href="?page={0}">{0}</a>"#,
                    label
                )
            })
            .collect();
        format!("<html><body><nav>{}</nav></body></html>", links)
    }

    fn page_numbers(requests: &[FetchRequest]) -> Vec<String> {
        requests.iter().map(|r| r.url.clone()).collect()
    }

    #[test]
    fn test_reads_second_to_last_link() {
        let page = category_page(&pagination(&["1", "2", "3", "…", "17", "›"]));
        let requests = paginate(&page, &PageSelectors::new());

        assert_eq!(requests.len(), 17);
        assert_eq!(requests[0].url, format!("{}?page=1", CATEGORY));
        assert_eq!(requests[16].url, format!("{}?page=17", CATEGORY));
    }

    #[test]
    fn test_trims_label_before_parsing() {
        let body = r#"<a class="pagination__link js-listing__trigger">
                  4
               </a><a class="pagination__link js-listing__trigger">›</a>"#;
        let requests = paginate(&category_page(body), &PageSelectors::new());
        assert_eq!(requests.len(), 4);
    }

    #[test]
    fn test_missing_pagination_falls_back_to_two_pages() {
        let requests = paginate(&category_page("<html><body></body></html>"), &PageSelectors::new());
        assert_eq!(
            page_numbers(&requests),
            vec![format!("{}?page=1", CATEGORY), format!("{}?page=2", CATEGORY)]
        );
    }

    #[test]
    fn test_non_numeric_label_falls_back_to_two_pages() {
        let page = category_page(&pagination(&["précédent", "suivant", "›"]));
        assert_eq!(paginate(&page, &PageSelectors::new()).len(), 2);
    }

    #[test]
    fn test_single_link_falls_back_to_two_pages() {
        let page = category_page(&pagination(&["5"]));
        assert_eq!(paginate(&page, &PageSelectors::new()).len(), 2);
    }

    #[test]
    fn test_zero_count_yields_no_pages() {
        let page = category_page(&pagination(&["0", "x"]));
        assert!(paginate(&page, &PageSelectors::new()).is_empty());
    }

    #[test]
    fn test_negative_count_yields_no_pages() {
        let page = category_page(&pagination(&["-3", "›"]));
        assert!(paginate(&page, &PageSelectors::new()).is_empty());
    }

    #[test]
    fn test_other_link_classes_are_ignored() {
        let body = r#"
            <a class="pagination__link js-listing__trigger">9</a>
            <a class="pagination__link">30</a>
            <a class="pagination__link js-listing__trigger">›</a>
        "#;
        assert_eq!(paginate(&category_page(body), &PageSelectors::new()).len(), 9);
    }

    #[test]
    fn test_requests_bypass_filter_and_keep_context() {
        let page = category_page(&pagination(&["1", "3", "›"]));
        for request in paginate(&page, &PageSelectors::new()) {
            assert_eq!(request.stage, Stage::Page);
            assert_eq!(request.category, CATEGORY);
            assert!(request.dont_filter);
        }
    }
}
