//! Compiled CSS selectors for manomano.fr markup
//!
//! Class selectors use attribute equality (`[class="..."]`) on purpose: the
//! site markup is matched on the exact class list, so an element carrying an
//! extra class does not match.

use scraper::node::Node;
use scraper::{ElementRef, Selector};

pub(crate) struct PageSelectors {
    pub pagination_link: Selector,
    pub product_card_link: Selector,
    pub ean: Selector,
    pub title: Selector,
    pub breadcrumb_label: Selector,
    pub description: Selector,
    pub gallery_image: Selector,
    pub brand: Selector,
}

impl PageSelectors {
    pub fn new() -> Self {
        Self {
            pagination_link: Selector::parse(
                r#"a[class="pagination__link js-listing__trigger"]"#,
            )
            .expect("pagination selector"),
            product_card_link: Selector::parse(concat!(
                r#"div[class="product-list__product product-card js-product-card"][href], "#,
                r#"div[class="product-list__product product-card js-product-card"] [href]"#,
            ))
            .expect("product card selector"),
            ean: Selector::parse("[data-flix-ean]").expect("ean selector"),
            title: Selector::parse(r#"h1[class="product-info__name"]"#).expect("title selector"),
            breadcrumb_label: Selector::parse(
                r#"ul[class="breadcrumbs product__breadcrumbs-top"] > li > a > span"#,
            )
            .expect("breadcrumb selector"),
            description: Selector::parse(
                r#"div[class="product-section__content product-section__content--padding"]"#,
            )
            .expect("description selector"),
            gallery_image: Selector::parse(concat!(
                r#"div[class="product__images"][data-image], "#,
                r#"div[class="product__images"] [data-image]"#,
            ))
            .expect("gallery selector"),
            brand: Selector::parse(r#"span[itemprop="brand"]"#).expect("brand selector"),
        }
    }
}

/// Text nodes that are direct children of `element`, in document order
pub(crate) fn own_text_nodes<'a>(element: ElementRef<'a>) -> impl Iterator<Item = &'a str> + 'a {
    element.children().filter_map(|child| match child.value() {
        Node::Text(text) => Some(&**text),
        _ => None,
    })
}

/// First direct text node of `element`, trimmed; None when missing or blank
pub(crate) fn first_own_text(element: ElementRef<'_>) -> Option<String> {
    first_text_across(std::iter::once(element))
}

/// First direct text node across all `elements`, in document order, trimmed
///
/// An element without text of its own is skipped, so the next match gets a
/// chance.
pub(crate) fn first_text_across<'a>(
    elements: impl Iterator<Item = ElementRef<'a>>,
) -> Option<String> {
    elements
        .flat_map(own_text_nodes)
        .next()
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

/// Space, tab, carriage return and line feed; no-break spaces are content
const XML_WHITESPACE: [char; 4] = [' ', '\t', '\r', '\n'];

/// All descendant text of `element` with whitespace runs collapsed to one space
pub(crate) fn normalized_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(|text| text.split(XML_WHITESPACE))
        .filter(|piece| !piece.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
