//! Test doubles and page builders shared by the unit tests.

use crate::pricing::client::{FetchSession, PageFetcher};
use anyhow::Result;
use async_trait::async_trait;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

/// Fetcher that returns a canned body (or error) and records every request.
pub struct MockFetcher {
    response: std::result::Result<String, String>,
    call_count: AtomicU32,
    requests: Mutex<Vec<(String, FetchSession)>>,
}

impl MockFetcher {
    pub fn ok(body: impl Into<String>) -> Self {
        Self::with_response(Ok(body.into()))
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self::with_response(Err(message.into()))
    }

    fn with_response(response: std::result::Result<String, String>) -> Self {
        Self { response, call_count: AtomicU32::new(0), requests: Mutex::new(Vec::new()) }
    }

    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<(String, FetchSession)> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl PageFetcher for MockFetcher {
    async fn fetch(&self, url: &str, session: &FetchSession) -> Result<String> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push((url.to_string(), session.clone()));
        self.response.clone().map_err(anyhow::Error::msg)
    }
}

/// Builds a Mercado Livre results page. Prices are written as displayed,
/// e.g. "2.500,50"; the part after the comma goes into the cents span.
/// Listing `i` links to `https://produto.mercadolivre.com.br/MLB-{i}`.
pub fn mercado_livre_html(prices: &[&str]) -> String {
    let mut html = String::from(r#"<html><body><ol class="ui-search-layout">"#);
    for (i, price) in prices.iter().enumerate() {
        let (fraction, cents) = match price.split_once(',') {
            Some((fraction, cents)) => {
                (fraction, format!(r#"<span class="andes-money-amount__cents">{}</span>"#, cents))
            }
            None => (*price, String::new()),
        };
        html.push_str(&format!(
            r#"<li class="ui-search-layout__item">
                <a class="ui-search-link" href="https://produto.mercadolivre.com.br/MLB-{i}">Item {i}</a>
                <s class="andes-money-amount--previous"><span class="andes-money-amount__fraction">99.999</span></s>
                <div class="ui-search-price__second-line">
                    <span class="ui-search-price__part--medium">
                        <span class="andes-money-amount__currency-symbol">R$</span>
                        <span class="andes-money-amount__fraction">{fraction}</span>{cents}
                    </span>
                </div>
            </li>"#
        ));
    }
    html.push_str("</ol></body></html>");
    html
}

/// Builds a Zoom results page. Listing `i` links to `/oferta/{i}`.
pub fn zoom_html(prices: &[&str]) -> String {
    let mut html = String::from("<html><body>");
    for (i, price) in prices.iter().enumerate() {
        html.push_str(&format!(
            r#"<div data-testid="product-card">
                <a class="ProductCard_ProductCard_Inner__gapsh" href="/oferta/{i}">
                    <h2>Item {i}</h2>
                    <p data-testid="product-card::price">{price}</p>
                </a>
            </div>"#
        ));
    }
    html.push_str("</body></html>");
    html
}
