//! wishlist-scraper - price checks for wishlist items
//!
//! Looks each item up on the configured retail sources and reports the
//! cheapest listing at or above its price floor.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;
use wishlist_scraper::commands::ScrapeCommand;
use wishlist_scraper::config::{Config, OutputFormat};
use wishlist_scraper::{Item, PriceScraper};

#[derive(Parser)]
#[command(
    name = "wishlist-scraper",
    version,
    about = "Finds the cheapest listing for a wishlist item",
    long_about = "Scrapes retail search pages (Mercado Livre, Amazon via Zoom) and reports the cheapest listing at or above the item's minimum price."
)]
struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "table", global = true)]
    format: OutputFormat,

    /// Proxy endpoint (host:port); repeat to build a pool. Replaces configured proxies
    #[arg(long = "proxy", global = true)]
    proxies: Vec<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check the current price of an item
    #[command(alias = "s")]
    Scrape {
        /// Item name, used as the search query
        name: String,

        /// Source to check (e.g. "mercado livre", "amazon"); repeat for several
        #[arg(short, long = "source", required = true)]
        sources: Vec<String>,

        /// Ignore listings cheaper than this
        #[arg(long, default_value = "0")]
        min_price: f64,

        /// Highest price you are willing to pay
        #[arg(long)]
        max_price: Option<f64>,

        /// Item category
        #[arg(long)]
        category: Option<String>,

        /// Item producer
        #[arg(long)]
        producer: Option<String>,
    },

    /// List supported sources
    Sources,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    // Load config with layered overrides
    let mut config = Config::load(cli.config.as_deref())?.with_env();

    // Apply CLI overrides
    config.format = cli.format;
    if !cli.proxies.is_empty() {
        config.proxy_urls = cli.proxies;
    }

    match cli.command {
        Commands::Scrape { name, sources, min_price, max_price, category, producer } => {
            let mut item = Item::new(name, min_price).with_sources(sources);
            item.max_price = max_price.unwrap_or_default();
            item.category = category.unwrap_or_default();
            item.producer = producer.unwrap_or_default();

            let cmd = ScrapeCommand::new(config);
            let output = cmd.execute(&item).await?;
            println!("{}", output);
        }

        Commands::Sources => {
            let scraper = PriceScraper::from_config(&config);
            let registry = scraper.registry();

            println!("Supported sources:\n");
            for name in registry.names() {
                let display = registry.get(name).map(|e| e.name().to_string()).unwrap_or_default();
                println!("{:<16} {}", name, display);
            }
        }
    }

    Ok(())
}
