//! HTTP fetch layer using wreq for TLS fingerprint emulation.

use crate::config::Config;
use crate::pricing::proxy::ProxyConfig;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;
use wreq::Client;
use wreq_util::Emulation;

/// Redirect hops followed before a fetch gives up.
pub const MAX_REDIRECTS: usize = 5;

/// Browser user agent sent with every search request.
pub const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

/// Per-request settings: who we claim to be, where we may go, which proxy to use.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchSession {
    pub user_agent: String,
    pub allowed_hosts: Vec<String>,
    pub proxy: Option<ProxyConfig>,
}

impl FetchSession {
    /// Creates an unproxied session restricted to the given hosts.
    pub fn new<I, S>(allowed_hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            user_agent: USER_AGENT.to_string(),
            allowed_hosts: allowed_hosts.into_iter().map(Into::into).collect(),
            proxy: None,
        }
    }

    pub fn with_proxy(mut self, proxy: Option<ProxyConfig>) -> Self {
        self.proxy = proxy;
        self
    }

    /// Returns true if the URL's host is on the allow-list.
    pub fn allows(&self, url: &str) -> bool {
        host_of(url).is_some_and(|host| {
            self.allowed_hosts.iter().any(|allowed| allowed.eq_ignore_ascii_case(&host))
        })
    }
}

/// Extracts the host from a URL, if it parses.
pub fn host_of(url: &str) -> Option<String> {
    Url::parse(url).ok()?.host_str().map(str::to_string)
}

/// Trait for fetching search pages - enables mocking for tests.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Performs a single GET and returns the response body.
    async fn fetch(&self, url: &str, session: &FetchSession) -> Result<String>;
}

/// Real HTTP fetcher with browser impersonation.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    timeout: Duration,
    connect_timeout: Duration,
}

impl HttpFetcher {
    /// Creates a fetcher using the configured timeouts.
    pub fn new(config: &Config) -> Self {
        Self {
            timeout: Duration::from_secs(config.timeout_secs),
            connect_timeout: Duration::from_secs(config.connect_timeout_secs),
        }
    }

    // The proxy can change on every call, so each fetch gets its own client.
    // Redirects are followed by hand in `fetch` so every hop is checked
    // against the allow-list before it is requested.
    fn build_client(&self, session: &FetchSession) -> Result<Client> {
        let mut builder = Client::builder()
            .cookie_store(true)
            .gzip(true)
            .brotli(true)
            .timeout(self.timeout)
            .connect_timeout(self.connect_timeout)
            .redirect(wreq::redirect::Policy::none());

        if let Some(proxy) = &session.proxy {
            let proxy_url = proxy.url();
            match wreq::Proxy::all(&proxy_url) {
                Ok(p) => {
                    debug!("Using proxy: {}", proxy.endpoint);
                    builder = builder.proxy(p);
                }
                Err(e) => warn!("Error setting proxy {}: {}. Continuing without proxy.", proxy.endpoint, e),
            }
        }

        builder.build().context("Failed to build HTTP client")
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str, session: &FetchSession) -> Result<String> {
        if !session.allows(url) {
            anyhow::bail!("Host of {} is not in the allow-list {:?}", url, session.allowed_hosts);
        }

        let client = self.build_client(session)?;
        let mut current = url.to_string();

        for _ in 0..=MAX_REDIRECTS {
            debug!("GET {}", current);

            let response = client
                .get(&current)
                .emulation(Emulation::Chrome131)
                .header("User-Agent", session.user_agent.as_str())
                .header("Accept", "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8")
                .header("Accept-Language", "pt-BR,pt;q=0.9,en;q=0.8")
                .header("Cache-Control", "no-cache")
                .header("Upgrade-Insecure-Requests", "1")
                .send()
                .await
                .context("Failed to send request")?;

            let status = response.status();
            debug!("Response status: {}", status);

            if status.is_redirection() {
                let location = response
                    .headers()
                    .get("location")
                    .and_then(|value| value.to_str().ok())
                    .with_context(|| format!("Redirect from {} without a usable Location header", current))?;
                let next = Url::parse(&current)?.join(location)?.to_string();

                if !session.allows(&next) {
                    anyhow::bail!("Redirected outside the allow-list: {}", next);
                }

                debug!("Redirect {} -> {}", current, next);
                current = next;
                continue;
            }

            if status == 503 {
                warn!("Rate limited (503). Consider configuring proxies.");
                anyhow::bail!("Rate limited by {}: 503 Service Unavailable", host_of(&current).unwrap_or_default());
            }

            if !status.is_success() {
                anyhow::bail!("Request failed with status: {}", status);
            }

            return response.text().await.context("Failed to read response body");
        }

        anyhow::bail!("Too many redirects fetching {}", url)
    }
}
