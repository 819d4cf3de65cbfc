//! wishlist-scraper - price checks for wishlist items
//!
//! Looks an item up on a retail search page, keeps the listings at or above
//! the item's price floor and reports the cheapest one.

pub mod commands;
pub mod config;
pub mod error;
pub mod format;
pub mod pricing;

pub use config::Config;
pub use error::ScrapeError;
pub use pricing::{Item, PriceScraper, ScrapeResult};
