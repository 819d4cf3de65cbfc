//! CSS selectors for storefront search pages.
//!
//! This file contains all CSS selectors used for parsing search results.
//! Update this file when a storefront changes its HTML structure.
//!
//! **Update process**: When parsing fails, capture HTML sample,
//! update selectors, and add test fixture.

use scraper::Selector;
use std::sync::LazyLock;

/// Selectors for Mercado Livre search results (`lista.mercadolivre.com.br`).
pub mod mercado_livre {
    use super::*;

    /// Result card.
    pub static LISTING: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("li.ui-search-layout__item").unwrap());

    /// Product link, classic layout.
    pub static LINK: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("a.ui-search-link").unwrap());

    /// Product link on title cards.
    pub static LINK_TITLE_CARD: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("a.ui-search-link__title-card").unwrap());

    /// Product link, poly-card layout.
    pub static LINK_POLY: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("a.poly-component__title").unwrap());

    /// Current price block (the struck-through old price lives on the first line).
    pub static PRICE_CURRENT: LazyLock<Selector> = LazyLock::new(|| {
        Selector::parse(
            "div.ui-search-price__second-line span.ui-search-price__part--medium, \
             div.poly-price__current span.andes-money-amount",
        )
        .unwrap()
    });

    /// Integer part of a price, with `.` thousands separators.
    pub static PRICE_FRACTION: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("span.andes-money-amount__fraction").unwrap());

    /// Cents part of a price, when shown.
    pub static PRICE_CENTS: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("span.andes-money-amount__cents").unwrap());
}

/// Selectors for Zoom search results (`www.zoom.com.br`).
pub mod zoom {
    use super::*;

    /// Result card.
    pub static LISTING: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("div[data-testid='product-card']").unwrap());

    /// Displayed price, e.g. "R$ 3.799,00".
    pub static PRICE: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("p[data-testid='product-card::price']").unwrap());

    /// Card link. The class carries a build hash suffix.
    pub static LINK: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("a[class*='ProductCard_ProductCard_Inner']").unwrap());

    /// Any link in the card.
    pub static LINK_ANY: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a[href]").unwrap());
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    #[test]
    fn test_selectors_compile() {
        // Force evaluation of all lazy selectors to ensure they compile
        let _ = &*mercado_livre::LISTING;
        let _ = &*mercado_livre::LINK;
        let _ = &*mercado_livre::LINK_TITLE_CARD;
        let _ = &*mercado_livre::LINK_POLY;
        let _ = &*mercado_livre::PRICE_CURRENT;
        let _ = &*mercado_livre::PRICE_FRACTION;
        let _ = &*mercado_livre::PRICE_CENTS;
        let _ = &*zoom::LISTING;
        let _ = &*zoom::PRICE;
        let _ = &*zoom::LINK;
        let _ = &*zoom::LINK_ANY;
    }

    #[test]
    fn test_zoom_card_matching() {
        let html = Html::parse_document(
            r#"<div data-testid="product-card">
                <a class="ProductCard_ProductCard_Inner__gapsh" href="/p/1">
                    <p data-testid="product-card::price">R$ 10,00</p>
                </a>
            </div>"#,
        );

        let cards: Vec<_> = html.select(&zoom::LISTING).collect();
        assert_eq!(cards.len(), 1);
        assert!(cards[0].select(&zoom::LINK).next().is_some());
        assert!(cards[0].select(&zoom::PRICE).next().is_some());
    }

    #[test]
    fn test_mercado_livre_skips_old_price() {
        let html = Html::parse_document(
            r#"<ul><li class="ui-search-layout__item">
                <s class="andes-money-amount--previous"><span class="andes-money-amount__fraction">5.000</span></s>
                <div class="ui-search-price__second-line">
                    <span class="ui-search-price__part--medium"><span class="andes-money-amount__fraction">4.199</span></span>
                </div>
            </li></ul>"#,
        );

        let card = html.select(&mercado_livre::LISTING).next().unwrap();
        let current = card.select(&mercado_livre::PRICE_CURRENT).next().unwrap();
        let fraction = current.select(&mercado_livre::PRICE_FRACTION).next().unwrap();
        assert_eq!(fraction.text().collect::<String>(), "4.199");
    }
}
