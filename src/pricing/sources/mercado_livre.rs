//! Mercado Livre (Brazil) search results.

use super::Storefront;
use crate::pricing::models::PriceCandidate;
use crate::pricing::parser::{parse_price, resolve_link};
use crate::pricing::selectors::mercado_livre as sel;
use scraper::{ElementRef, Selector};
use url::Url;

const BASE_URL: &str = "https://lista.mercadolivre.com.br";
const ALLOWED_HOSTS: &[&str] = &["www.mercadolivre.com.br", "lista.mercadolivre.com.br"];

/// Mercado Livre storefront.
#[derive(Debug, Clone, Copy, Default)]
pub struct MercadoLivre;

impl MercadoLivre {
    /// Reads the current price as "fraction,cents".
    fn price_text(listing: ElementRef<'_>) -> Option<String> {
        let current = listing.select(&sel::PRICE_CURRENT).next()?;
        let fraction = current.select(&sel::PRICE_FRACTION).next()?.text().collect::<String>();
        let cents = current.select(&sel::PRICE_CENTS).next().map(|e| e.text().collect::<String>());

        Some(match cents {
            Some(cents) if !cents.trim().is_empty() => format!("{},{}", fraction.trim(), cents.trim()),
            _ => fraction,
        })
    }

    fn link(listing: ElementRef<'_>) -> Option<&str> {
        [&*sel::LINK, &*sel::LINK_TITLE_CARD, &*sel::LINK_POLY]
            .into_iter()
            .filter_map(|selector| listing.select(selector).next())
            .find_map(|a| a.value().attr("href").filter(|href| !href.trim().is_empty()))
    }
}

impl Storefront for MercadoLivre {
    fn name(&self) -> &'static str {
        "Mercado Livre"
    }

    fn base_url(&self) -> &'static str {
        BASE_URL
    }

    fn allowed_hosts(&self) -> &'static [&'static str] {
        ALLOWED_HOSTS
    }

    /// Mercado Livre takes the query as a path slug: `ps5 slim` -> `/ps5-slim`.
    fn search_url(&self, base_url: &str, item_name: &str) -> String {
        let slug = item_name.split_whitespace().collect::<Vec<_>>().join("-");
        format!("{}/{}", base_url.trim_end_matches('/'), urlencoding::encode(&slug))
    }

    fn listing_selector(&self) -> &Selector {
        &sel::LISTING
    }

    fn parse_listing(&self, listing: ElementRef<'_>, base: &Url) -> Option<PriceCandidate> {
        let price = parse_price(&Self::price_text(listing)?)?;
        let url = resolve_link(base, Self::link(listing)?)?;
        Some(PriceCandidate::new(price, url))
    }
}
