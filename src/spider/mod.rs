//! Extraction pipeline for manomano.fr category crawls
//!
//! The pipeline has four stages:
//! - Seeder: category URLs → category requests
//! - Category paginator: category page → one request per listing page
//! - Product lister: listing page → one request per product card link
//! - Product extractor: product page → one [`ProductRecord`]
//!
//! Stages are synchronous and keep no state between calls. Whatever runs
//! them (see [`crate::crawler`]) owns scheduling, fetching and output.

mod lister;
mod paginator;
mod product;
mod request;
mod seeder;
mod selectors;

pub use paginator::FALLBACK_PAGE_COUNT;
pub use product::{join_breadcrumb, ProductRecord, BREADCRUMB_SEPARATOR};
pub use request::{FetchRequest, FetchedPage, Stage};
pub use seeder::seed_requests;

use crate::seeds::SeedEntry;
use selectors::PageSelectors;
use url::Url;

/// What a stage hands back to the crawl runner
#[derive(Debug, Clone)]
pub enum SpiderOutput {
    /// More work to schedule
    Request(FetchRequest),
    /// A finished product record
    Record(ProductRecord),
}

/// The manomano.fr category spider
pub struct ManomanoSpider {
    base_url: Url,
    selectors: PageSelectors,
}

impl ManomanoSpider {
    /// Creates a spider resolving product links against `base_url`
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            selectors: PageSelectors::new(),
        }
    }

    /// Initial requests for the `[start, end)` slice of the seed list
    pub fn start_requests(&self, seeds: &[SeedEntry], start: usize, end: usize) -> Vec<FetchRequest> {
        seed_requests(seeds, start, end)
    }

    /// Routes a fetched page to the stage named by its request
    ///
    /// # Example
    ///
    /// ```
    /// use manomano_scraper::spider::{FetchRequest, FetchedPage, ManomanoSpider, SpiderOutput, Stage};
    /// use url::Url;
    ///
    /// let spider = ManomanoSpider::new(Url::parse("https://www.manomano.fr").unwrap());
    /// let category = "https://www.manomano.fr/cat/garden-tools-";
    /// let request = FetchRequest::new("https://www.manomano.fr/p/1", category, Stage::Product);
    /// let outputs = spider.parse(&FetchedPage::new(request, "<html></html>"));
    ///
    /// match &outputs[..] {
    ///     [SpiderOutput::Record(record)] => assert_eq!(record.category, "garden-tools"),
    ///     other => panic!("unexpected outputs: {:?}", other),
    /// }
    /// ```
    pub fn parse(&self, page: &FetchedPage) -> Vec<SpiderOutput> {
        match page.request.stage {
            Stage::Category => paginator::paginate(page, &self.selectors)
                .into_iter()
                .map(SpiderOutput::Request)
                .collect(),
            Stage::Page => lister::list_products(page, &self.base_url, &self.selectors)
                .into_iter()
                .map(SpiderOutput::Request)
                .collect(),
            Stage::Product => vec![SpiderOutput::Record(product::extract_product(
                page,
                &self.selectors,
            ))],
        }
    }
}
