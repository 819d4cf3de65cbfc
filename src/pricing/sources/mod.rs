//! Storefront extractors.
//!
//! Every source follows the same pipeline: build a search URL, pick a proxy,
//! fetch the page once, collect up to ten `(price, url)` candidates, drop the
//! ones under the item's price floor, and return the cheapest. Storefronts
//! only differ in URL template and markup, which is what [`Storefront`]
//! describes.

pub mod mercado_livre;
pub mod zoom;

pub use mercado_livre::MercadoLivre;
pub use zoom::Zoom;

use crate::error::{Result, ScrapeError};
use crate::pricing::client::{host_of, FetchSession, PageFetcher};
use crate::pricing::models::{Item, PriceCandidate, ScrapeResult};
use crate::pricing::parser::{collect_candidates, select_cheapest};
use crate::pricing::proxy::ProxyProvider;
use async_trait::async_trait;
use scraper::{ElementRef, Html, Selector};
use std::sync::Arc;
use tracing::{debug, info, trace, warn};
use url::Url;

/// Looks up the cheapest acceptable price for an item on one source.
#[async_trait]
pub trait SourceExtractor: Send + Sync {
    /// Display name of the source.
    fn name(&self) -> &str;

    /// Scrapes the source for `item`.
    async fn extract(&self, item: &Item) -> Result<ScrapeResult>;
}

/// Site-specific knowledge: where to search and how to read a result card.
pub trait Storefront: Send + Sync {
    fn name(&self) -> &'static str;

    /// Scheme and host results are served from, without trailing slash.
    fn base_url(&self) -> &'static str;

    /// Hosts the fetch session may talk to.
    fn allowed_hosts(&self) -> &'static [&'static str];

    /// Builds the search URL for an item name under `base_url`.
    fn search_url(&self, base_url: &str, item_name: &str) -> String;

    /// Selector matching one result card.
    fn listing_selector(&self) -> &Selector;

    /// Reads a result card. `None` means the card is malformed and is skipped.
    fn parse_listing(&self, listing: ElementRef<'_>, base: &Url) -> Option<PriceCandidate>;
}

/// Runs the shared scrape pipeline for a [`Storefront`].
pub struct SiteExtractor<S> {
    site: S,
    fetcher: Arc<dyn PageFetcher>,
    proxies: Arc<dyn ProxyProvider>,
    base_url: Option<String>,
}

impl<S: Storefront> SiteExtractor<S> {
    pub fn new(site: S, fetcher: Arc<dyn PageFetcher>, proxies: Arc<dyn ProxyProvider>) -> Self {
        Self::with_base_url(site, fetcher, proxies, None)
    }

    /// Creates an extractor with an optional custom base URL (for testing).
    pub fn with_base_url(
        site: S,
        fetcher: Arc<dyn PageFetcher>,
        proxies: Arc<dyn ProxyProvider>,
        base_url: Option<String>,
    ) -> Self {
        Self { site, fetcher, proxies, base_url }
    }

    /// Returns the base URL (custom for testing, or the storefront's own).
    fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or_else(|| self.site.base_url())
    }

    /// Returns the search URL for an item name.
    pub fn search_url(&self, item_name: &str) -> String {
        self.site.search_url(self.base_url(), item_name)
    }

    /// Builds the fetch session. A missing proxy downgrades to a direct request.
    fn session(&self) -> FetchSession {
        let mut hosts: Vec<String> = self.site.allowed_hosts().iter().map(|h| h.to_string()).collect();
        if let Some(host) = self.base_url.as_deref().and_then(host_of) {
            hosts.push(host);
        }

        let proxy = match self.proxies.pick() {
            Ok(proxy) => Some(proxy),
            Err(e) => {
                warn!("{}: {}. Fetching without proxy.", self.site.name(), e);
                None
            }
        };

        FetchSession::new(hosts).with_proxy(proxy)
    }

    /// Parses the base URL that relative listing links resolve against.
    fn base(&self) -> Result<Url> {
        let base_url = self.base_url();
        Url::parse(base_url).map_err(|e| ScrapeError::invalid_base_url(self.site.name(), base_url, e))
    }

    /// Parses a search page into at most ten candidates.
    pub fn parse_candidates(&self, html: &str) -> Result<Vec<PriceCandidate>> {
        Ok(self.candidates_in(html, &self.base()?))
    }

    fn candidates_in(&self, html: &str, base: &Url) -> Vec<PriceCandidate> {
        let document = Html::parse_document(html);

        collect_candidates(document.select(self.site.listing_selector()), |listing| {
            let candidate = self.site.parse_listing(listing, base);
            match &candidate {
                Some(c) => trace!("Candidate: {:.2} {}", c.price, c.url),
                None => debug!("{}: skipping malformed listing", self.site.name()),
            }
            candidate
        })
    }
}

#[async_trait]
impl<S: Storefront> SourceExtractor for SiteExtractor<S> {
    fn name(&self) -> &str {
        self.site.name()
    }

    async fn extract(&self, item: &Item) -> Result<ScrapeResult> {
        let base = self.base()?;
        let url = self.search_url(&item.name);
        let session = self.session();

        info!("Searching {} for: {}", self.site.name(), item.name);

        let html = self
            .fetcher
            .fetch(&url, &session)
            .await
            .map_err(|e| ScrapeError::fetch(self.site.name(), e))?;

        let candidates = self.candidates_in(&html, &base);
        debug!("{}: {} candidates parsed", self.site.name(), candidates.len());

        select_cheapest(candidates, item.min_price)
            .map(ScrapeResult::from)
            .ok_or_else(|| ScrapeError::no_products(self.site.name()))
    }
}
