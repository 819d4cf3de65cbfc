//! Scrape command: checks one item against each of its sources in turn.

use crate::config::Config;
use crate::error::ScrapeError;
use crate::format::Formatter;
use crate::pricing::{Item, PriceScraper, ScrapeResult};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Result of scraping one source for one item, ready for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceOutcome {
    pub item: String,
    pub source: String,
    pub price: Option<f64>,
    pub url: Option<String>,
    pub error: Option<String>,
}

impl SourceOutcome {
    pub fn new(
        item: impl Into<String>,
        source: impl Into<String>,
        result: std::result::Result<ScrapeResult, ScrapeError>,
    ) -> Self {
        let (price, url, error) = match result {
            Ok(found) => (Some(found.price), Some(found.url), None),
            Err(e) => (None, None, Some(e.to_string())),
        };
        Self { item: item.into(), source: source.into(), price, url, error }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Executes a price check.
pub struct ScrapeCommand {
    config: Config,
}

impl ScrapeCommand {
    /// Creates a new scrape command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Scrapes every source of the item and returns formatted output.
    pub async fn execute(&self, item: &Item) -> Result<String> {
        let scraper = PriceScraper::from_config(&self.config);
        self.execute_with_scraper(&scraper, item).await
    }

    /// Executes with a provided scraper (for testing).
    pub async fn execute_with_scraper(&self, scraper: &PriceScraper, item: &Item) -> Result<String> {
        let outcomes = self.collect(scraper, item).await;
        let found = outcomes.iter().filter(|o| o.is_success()).count();
        info!("{}: price found on {}/{} sources", item.name, found, outcomes.len());

        let formatter = Formatter::new(self.config.format);
        Ok(formatter.format_outcomes(&outcomes))
    }

    /// Scrapes the item's sources one after another. A failing source does
    /// not stop the rest.
    pub async fn collect(&self, scraper: &PriceScraper, item: &Item) -> Vec<SourceOutcome> {
        let mut outcomes = Vec::with_capacity(item.scraping_sources.len());

        for source in &item.scraping_sources {
            let result = scraper.scrape_price(item, source).await;
            if let Err(e) = &result {
                warn!("{} on {}: {}", item.name, source.trim(), e);
            }
            outcomes.push(SourceOutcome::new(&item.name, source.trim(), result));
        }

        outcomes
    }
}
