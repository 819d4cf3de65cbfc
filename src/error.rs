//! Error taxonomy for the scraping engine.

use thiserror::Error;

/// Boxed underlying cause of a transport failure.
pub type Cause = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors returned by a single (item, source) scrape.
#[derive(Error, Debug)]
pub enum ScrapeError {
    /// No extractor is registered under the requested name.
    #[error("unsupported source: {name}")]
    UnsupportedSource { name: String },

    /// The search page could not be fetched.
    #[error("failed to fetch {source_name} search page: {cause}")]
    Fetch {
        source_name: String,
        #[source]
        cause: Cause,
    },

    /// The page was fetched but no candidate survived parsing and the price floor.
    #[error("no products found on {source_name}")]
    NoProductsFound { source_name: String },

    /// The storefront base URL does not parse, so no search URL can be built.
    #[error("invalid base URL for {source_name}: {url}")]
    InvalidBaseUrl {
        source_name: String,
        url: String,
        #[source]
        cause: url::ParseError,
    },

    /// The proxy pool is empty.
    #[error("no proxy URLs configured")]
    NoProxyConfigured,
}

impl ScrapeError {
    pub fn unsupported(name: impl Into<String>) -> Self {
        Self::UnsupportedSource { name: name.into() }
    }

    pub fn fetch(source_name: impl Into<String>, cause: impl Into<Cause>) -> Self {
        Self::Fetch { source_name: source_name.into(), cause: cause.into() }
    }

    pub fn no_products(source_name: impl Into<String>) -> Self {
        Self::NoProductsFound { source_name: source_name.into() }
    }

    pub fn invalid_base_url(source_name: impl Into<String>, url: impl Into<String>, cause: url::ParseError) -> Self {
        Self::InvalidBaseUrl { source_name: source_name.into(), url: url.into(), cause }
    }

    /// Returns true for failures that happened on the network.
    pub fn is_fetch(&self) -> bool {
        matches!(self, Self::Fetch { .. })
    }
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
