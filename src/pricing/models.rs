//! Data models for wishlist items and scrape results.

use serde::{Deserialize, Serialize};

/// A tracked wishlist item.
///
/// Only `name` and `min_price` matter to the scraper; the rest is carried
/// along for the caller.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Item {
    /// Unique item name, also used as the search query
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub producer: String,
    /// Highest price the owner is willing to pay
    #[serde(default)]
    pub max_price: f64,
    /// Price floor: listings below it are ignored
    #[serde(default)]
    pub min_price: f64,
    /// Source names to check, in order
    #[serde(default)]
    pub scraping_sources: Vec<String>,
}

impl Item {
    /// Creates an item with a name and price floor.
    pub fn new(name: impl Into<String>, min_price: f64) -> Self {
        Self { name: name.into(), min_price, ..Default::default() }
    }

    /// Sets the sources to scrape.
    pub fn with_sources<I, S>(mut self, sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scraping_sources = sources.into_iter().map(Into::into).collect();
        self
    }
}

/// One (price, url) pair pulled from a listing element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceCandidate {
    pub price: f64,
    pub url: String,
}

impl PriceCandidate {
    pub fn new(price: f64, url: impl Into<String>) -> Self {
        Self { price, url: url.into() }
    }
}

/// The cheapest acceptable listing for an item on one source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrapeResult {
    pub price: f64,
    pub url: String,
}

impl From<PriceCandidate> for ScrapeResult {
    fn from(candidate: PriceCandidate) -> Self {
        Self { price: candidate.price, url: candidate.url }
    }
}
