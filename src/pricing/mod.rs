//! Price scraping engine: HTTP fetching, per-source parsing and selection.

pub mod client;
pub mod engine;
pub mod models;
pub mod parser;
pub mod proxy;
pub mod registry;
pub mod selectors;
pub mod sources;

#[cfg(test)]
pub(crate) mod testing;

pub use client::{FetchSession, HttpFetcher, PageFetcher};
pub use engine::PriceScraper;
pub use models::{Item, PriceCandidate, ScrapeResult};
pub use proxy::{ProxyConfig, ProxyProvider, ProxySelector};
pub use registry::SourceRegistry;
pub use sources::SourceExtractor;
