//! Public entry point: dispatches a scrape to the named source.

use crate::config::Config;
use crate::error::{Result, ScrapeError};
use crate::pricing::client::HttpFetcher;
use crate::pricing::models::{Item, ScrapeResult};
use crate::pricing::proxy::ProxySelector;
use crate::pricing::registry::SourceRegistry;
use std::sync::Arc;
use tracing::debug;

/// Resolves source names to extractors and runs them.
///
/// Holds no mutable state, so one instance can serve any number of calls.
#[derive(Clone)]
pub struct PriceScraper {
    registry: SourceRegistry,
}

impl PriceScraper {
    pub fn new(registry: SourceRegistry) -> Self {
        Self { registry }
    }

    /// Builds the production scraper: HTTP fetcher plus the configured proxy pool.
    pub fn from_config(config: &Config) -> Self {
        let fetcher = Arc::new(HttpFetcher::new(config));
        let proxies = Arc::new(ProxySelector::new(config.proxy_pool()));
        debug!("Proxy pool size: {}", proxies.len());

        Self::new(SourceRegistry::with_defaults(fetcher, proxies))
    }

    pub fn registry(&self) -> &SourceRegistry {
        &self.registry
    }

    /// Returns the cheapest listing for `item` on `source_name`.
    ///
    /// Unknown sources fail with [`ScrapeError::UnsupportedSource`] before any
    /// network activity. Everything else comes straight from the extractor.
    pub async fn scrape_price(&self, item: &Item, source_name: &str) -> Result<ScrapeResult> {
        let extractor =
            self.registry.get(source_name).ok_or_else(|| ScrapeError::unsupported(source_name.trim()))?;

        extractor.extract(item).await
    }
}
