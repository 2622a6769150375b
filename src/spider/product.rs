//! Product detail page extraction
//!
//! Every field is best-effort: a missing node yields `None` (or an empty
//! breadcrumb / image list) and never fails the record.

use crate::spider::selectors::{first_text_across, normalized_text, own_text_nodes, PageSelectors};
use crate::spider::FetchedPage;
use crate::url::category_slug;
use scraper::Html;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Separator placed between breadcrumb labels
pub const BREADCRUMB_SEPARATOR: &str = " > ";

/// Structured attributes of one product page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductRecord {
    /// Short category name derived from the category URL
    pub category: String,
    pub ean: Option<String>,
    pub title: Option<String>,
    /// Hierarchy labels joined with " > "
    pub breadcrumb: String,
    pub description: Option<String>,
    /// Gallery image URLs in document order
    pub images: Vec<String>,
    pub brand: Option<String>,
}

impl ProductRecord {
    /// Numbered image fields (`image_url_0`, `image_url_1`, ...) in document order
    pub fn image_fields(&self) -> Vec<(String, &str)> {
        self.images
            .iter()
            .enumerate()
            .map(|(idx, url)| (format!("image_url_{}", idx), url.as_str()))
            .collect()
    }
}

impl Serialize for ProductRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(6 + self.images.len()))?;
        map.serialize_entry("category", &self.category)?;
        map.serialize_entry("ean", &self.ean)?;
        map.serialize_entry("title", &self.title)?;
        map.serialize_entry("ariane", &self.breadcrumb)?;
        map.serialize_entry("description", &self.description)?;
        for (field, url) in self.image_fields() {
            map.serialize_entry(&field, url)?;
        }
        map.serialize_entry("brand", &self.brand)?;
        map.end()
    }
}

/// Parses a product detail page into exactly one record
pub(crate) fn extract_product(page: &FetchedPage, selectors: &PageSelectors) -> ProductRecord {
    let document = Html::parse_document(&page.body);

    let ean = document
        .select(&selectors.ean)
        .next()
        .and_then(|element| element.value().attr("data-flix-ean"))
        .map(str::to_string);

    let title = first_text_across(document.select(&selectors.title));

    let breadcrumb = join_breadcrumb(
        document
            .select(&selectors.breadcrumb_label)
            .flat_map(own_text_nodes),
    );

    let description = document
        .select(&selectors.description)
        .next()
        .map(normalized_text)
        .filter(|text| !text.is_empty());

    let images = document
        .select(&selectors.gallery_image)
        .filter_map(|element| element.value().attr("data-image"))
        .map(str::to_string)
        .collect();

    let brand = first_text_across(document.select(&selectors.brand));

    ProductRecord {
        category: category_slug(page.category()),
        ean,
        title,
        breadcrumb,
        description,
        images,
        brand,
    }
}

/// Trims each label, drops empty ones and joins the rest with " > "
pub fn join_breadcrumb<'a>(labels: impl IntoIterator<Item = &'a str>) -> String {
    labels
        .into_iter()
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .collect::<Vec<_>>()
        .join(BREADCRUMB_SEPARATOR)
}
