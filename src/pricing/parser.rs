//! Shared parsing helpers: price normalization, candidate collection and selection.

use crate::pricing::models::PriceCandidate;
use url::Url;

/// At most this many candidates are collected from one page.
pub const MAX_CANDIDATES: usize = 10;

const CURRENCY_SYMBOL: &str = "R$";

/// Parses a displayed Brazilian price (`R$ 1.234,56`) into a positive number.
///
/// Strips the currency symbol and all whitespace, drops the `.` thousands
/// separators and converts the `,` decimal separator to `.`. Anything else
/// left in the text makes the price malformed and yields `None`.
pub fn parse_price(text: &str) -> Option<f64> {
    let s = text.trim();
    let s = s.strip_prefix(CURRENCY_SYMBOL).unwrap_or(s);

    let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.is_empty() || !compact.chars().all(|c| c.is_ascii_digit() || c == '.' || c == ',') {
        return None;
    }

    let normalized = compact.replace('.', "").replace(',', ".");

    let value: f64 = normalized.parse().ok()?;
    (value.is_finite() && value > 0.0).then_some(value)
}

/// Resolves a listing link against the storefront base URL.
pub fn resolve_link(base: &Url, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }
    base.join(href).ok().map(String::from)
}

/// Runs `parse` over listing elements until [`MAX_CANDIDATES`] candidates are collected.
///
/// Elements for which `parse` returns `None` are skipped and do not count
/// towards the cap. Elements past the cap are never visited.
pub fn collect_candidates<I, F>(listings: I, parse: F) -> Vec<PriceCandidate>
where
    I: IntoIterator,
    F: FnMut(I::Item) -> Option<PriceCandidate>,
{
    listings.into_iter().filter_map(parse).take(MAX_CANDIDATES).collect()
}

/// Picks the cheapest candidate priced at or above `min_price`.
///
/// Ties go to the earliest candidate.
pub fn select_cheapest(candidates: Vec<PriceCandidate>, min_price: f64) -> Option<PriceCandidate> {
    candidates.into_iter().filter(|c| c.price >= min_price).fold(None, |best, candidate| match best {
        Some(best) if best.price <= candidate.price => Some(best),
        _ => Some(candidate),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidates(prices: &[f64]) -> Vec<PriceCandidate> {
        prices.iter().enumerate().map(|(i, p)| PriceCandidate::new(*p, format!("/item/{}", i))).collect()
    }

    // Price parsing tests

    #[test]
    fn test_parse_price_brazilian() {
        assert_eq!(parse_price("R$ 2.500,50"), Some(2500.5));
        assert_eq!(parse_price("R$2.500,50"), Some(2500.5));
        assert_eq!(parse_price("1.999"), Some(1999.0));
        assert_eq!(parse_price("  3.899  "), Some(3899.0));
        assert_eq!(parse_price("49,90"), Some(49.9));
        assert_eq!(parse_price("1.234.567,89"), Some(1234567.89));
    }

    #[test]
    fn test_parse_price_non_breaking_space() {
        assert_eq!(parse_price("R$\u{a0}4.199,00"), Some(4199.0));
    }

    #[test]
    fn test_parse_price_foreign_currency_is_malformed() {
        assert_eq!(parse_price("US$ 29,99"), None);
        assert_eq!(parse_price("29,99 €"), None);
    }

    #[test]
    fn test_parse_price_malformed() {
        assert_eq!(parse_price(""), None);
        assert_eq!(parse_price("   "), None);
        assert_eq!(parse_price("R$"), None);
        assert_eq!(parse_price("Consulte"), None);
        assert_eq!(parse_price("12x R$ 100"), None);
        assert_eq!(parse_price("1,2,3"), None);
        assert_eq!(parse_price("10-20"), None);
    }

    #[test]
    fn test_parse_price_rejects_zero() {
        assert_eq!(parse_price("0"), None);
        assert_eq!(parse_price("R$ 0,00"), None);
    }

    #[test]
    fn test_parse_price_deterministic() {
        let first = parse_price("R$ 12.345,67");
        for _ in 0..5 {
            assert_eq!(parse_price("R$ 12.345,67"), first);
        }
    }

    // Link resolution

    #[test]
    fn test_resolve_link() {
        let base = Url::parse("https://www.zoom.com.br").unwrap();
        assert_eq!(
            resolve_link(&base, "/console-ps5/oferta"),
            Some("https://www.zoom.com.br/console-ps5/oferta".to_string())
        );
        assert_eq!(
            resolve_link(&base, "https://produto.mercadolivre.com.br/MLB-1"),
            Some("https://produto.mercadolivre.com.br/MLB-1".to_string())
        );
        assert_eq!(resolve_link(&base, "  "), None);
    }

    // Collection cap

    #[test]
    fn test_collect_caps_at_ten() {
        let listings: Vec<f64> = (1..=25).map(f64::from).collect();
        let collected = collect_candidates(listings, |p| Some(PriceCandidate::new(p, "u")));
        assert_eq!(collected.len(), MAX_CANDIDATES);
        assert_eq!(collected.last().unwrap().price, 10.0);
    }

    #[test]
    fn test_collect_stops_visiting_after_cap() {
        let mut visited = 0;
        let collected = collect_candidates(0..50, |i| {
            visited += 1;
            Some(PriceCandidate::new(f64::from(i + 1), "u"))
        });
        assert_eq!(collected.len(), 10);
        assert_eq!(visited, 10);
    }

    #[test]
    fn test_collect_skipped_do_not_count() {
        // Every odd listing is malformed
        let collected = collect_candidates(0..30, |i: i32| {
            (i % 2 == 0).then(|| PriceCandidate::new(f64::from(i + 1), "u"))
        });
        assert_eq!(collected.len(), 10);
        assert_eq!(collected[9].price, 19.0);
    }

    // Selection

    #[test]
    fn test_select_cheapest_above_floor() {
        let best = select_cheapest(candidates(&[1999.0, 2500.5, 2200.0]), 2000.0).unwrap();
        assert_eq!(best.price, 2200.0);
        assert_eq!(best.url, "/item/2");
    }

    #[test]
    fn test_select_floor_is_inclusive() {
        let best = select_cheapest(candidates(&[150.0, 100.0, 99.99]), 100.0).unwrap();
        assert_eq!(best.price, 100.0);
        assert_eq!(best.url, "/item/1");
    }

    #[test]
    fn test_select_tie_first_wins() {
        let best = select_cheapest(candidates(&[300.0, 200.0, 250.0, 200.0]), 0.0).unwrap();
        assert_eq!(best.url, "/item/1");
    }

    #[test]
    fn test_select_all_below_floor() {
        assert!(select_cheapest(candidates(&[10.0, 20.0, 30.0]), 31.0).is_none());
    }

    #[test]
    fn test_select_empty() {
        assert!(select_cheapest(Vec::new(), 0.0).is_none());
    }
}
