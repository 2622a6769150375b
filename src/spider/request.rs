//! Work items passed between the spider stages and the crawl runner

use std::fmt;

/// Which spider stage handles the response to a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// A category landing page; yields one request per listing page
    Category,
    /// A listing page; yields one request per product card
    Page,
    /// A product detail page; yields one record
    Product,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::Page => "page",
            Self::Product => "product",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A URL to fetch, tagged with its category context and handling stage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    /// The URL to fetch
    pub url: String,

    /// The originating category URL
    pub category: String,

    /// The stage that parses the response
    pub stage: Stage,

    /// Skip request de-duplication
    pub dont_filter: bool,

    /// Number of times this request has been retried
    pub retries: u32,
}

impl FetchRequest {
    pub fn new(url: impl Into<String>, category: impl Into<String>, stage: Stage) -> Self {
        Self {
            url: url.into(),
            category: category.into(),
            stage,
            dont_filter: false,
            retries: 0,
        }
    }

    /// Marks the request as exempt from de-duplication
    pub fn dont_filter(mut self) -> Self {
        self.dont_filter = true;
        self
    }

    /// Returns a copy scheduled for another attempt
    ///
    /// Retries bypass de-duplication since the URL has been seen already.
    pub fn retry(&self) -> Self {
        Self {
            retries: self.retries + 1,
            dont_filter: true,
            ..self.clone()
        }
    }
}

/// A fetched response together with the request that produced it
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// The originating request
    pub request: FetchRequest,

    /// Final URL after redirects
    pub url: String,

    /// HTTP status code
    pub status: u16,

    /// Response body
    pub body: String,
}

impl FetchedPage {
    /// Builds a 200 response for `request`, mostly useful for parsing fixtures
    pub fn new(request: FetchRequest, body: impl Into<String>) -> Self {
        Self {
            url: request.url.clone(),
            request,
            status: 200,
            body: body.into(),
        }
    }

    /// The category context carried by the request
    pub fn category(&self) -> &str {
        &self.request.category
    }

    /// True for a non-2xx response handed over after retries ran out
    pub fn is_error_page(&self) -> bool {
        !(200..300).contains(&self.status)
    }
}
