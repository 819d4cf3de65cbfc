//! Zoom price comparison, restricted to offers sold by Amazon.

use super::Storefront;
use crate::pricing::models::PriceCandidate;
use crate::pricing::parser::{parse_price, resolve_link};
use crate::pricing::selectors::zoom as sel;
use scraper::{ElementRef, Selector};
use url::Url;

const BASE_URL: &str = "https://www.zoom.com.br";
const ALLOWED_HOSTS: &[&str] = &["www.zoom.com.br"];

/// Query suffix that keeps only offers whose best-selling merchant is Amazon.
const AMAZON_REFINEMENT: &str = "refinements%5B0%5D%5Bid%5D=bestSellingMerchantName\
     &refinements%5B0%5D%5Bvalues%5D%5B0%5D=Amazon\
     &sortBy=default&enableRefinementsSuggestions=true&isDealsPage=false";

/// Zoom storefront (the "Amazon" source).
#[derive(Debug, Clone, Copy, Default)]
pub struct Zoom;

impl Storefront for Zoom {
    fn name(&self) -> &'static str {
        "Zoom"
    }

    fn base_url(&self) -> &'static str {
        BASE_URL
    }

    fn allowed_hosts(&self) -> &'static [&'static str] {
        ALLOWED_HOSTS
    }

    fn search_url(&self, base_url: &str, item_name: &str) -> String {
        format!(
            "{}/search?q={}&{}",
            base_url.trim_end_matches('/'),
            urlencoding::encode(item_name.trim()),
            AMAZON_REFINEMENT
        )
    }

    fn listing_selector(&self) -> &Selector {
        &sel::LISTING
    }

    fn parse_listing(&self, listing: ElementRef<'_>, base: &Url) -> Option<PriceCandidate> {
        let price_text = listing.select(&sel::PRICE).next()?.text().collect::<String>();
        let price = parse_price(&price_text)?;

        let href = listing
            .select(&sel::LINK)
            .next()
            .or_else(|| listing.select(&sel::LINK_ANY).next())?
            .value()
            .attr("href")?;

        Some(PriceCandidate::new(price, resolve_link(base, href)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::testing::zoom_html;
    use scraper::Html;

    fn parse_all(html: &str) -> Vec<PriceCandidate> {
        let base = Url::parse(BASE_URL).unwrap();
        let document = Html::parse_document(html);
        document.select(Zoom.listing_selector()).filter_map(|l| Zoom.parse_listing(l, &base)).collect()
    }

    #[test]
    fn test_search_url() {
        let url = Zoom.search_url(BASE_URL, "ps5 slim");
        assert!(url.starts_with("https://www.zoom.com.br/search?q=ps5%20slim&"));
        assert!(url.contains("refinements%5B0%5D%5Bvalues%5D%5B0%5D=Amazon"));
        assert!(url.ends_with("isDealsPage=false"));
        assert!(!url.contains(' '));
    }

    #[test]
    fn test_parse_listings_resolves_relative_links() {
        let candidates = parse_all(&zoom_html(&["R$ 3.799,00", "R$ 4.100,50"]));
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0], PriceCandidate::new(3799.0, "https://www.zoom.com.br/oferta/0"));
        assert_eq!(candidates[1].price, 4100.5);
    }

    #[test]
    fn test_malformed_price_is_skipped() {
        let candidates = parse_all(&zoom_html(&["R$ 3.799,00", "Indisponível", ""]));
        assert_eq!(candidates.len(), 1);
    }

    #[test]
    fn test_link_fallback_to_any_anchor() {
        let html = r#"<div data-testid="product-card">
            <a href="https://www.zoom.com.br/console/ps5">PS5</a>
            <p data-testid="product-card::price">R$ 3.500,00</p>
        </div>"#;

        assert_eq!(parse_all(html), vec![PriceCandidate::new(3500.0, "https://www.zoom.com.br/console/ps5")]);
    }

    #[test]
    fn test_card_without_link_is_skipped() {
        let html = r#"<div data-testid="product-card">
            <p data-testid="product-card::price">R$ 3.500,00</p>
        </div>"#;

        assert!(parse_all(html).is_empty());
    }
}
