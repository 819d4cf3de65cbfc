//! Lookup table from source name to extractor.

use crate::pricing::client::PageFetcher;
use crate::pricing::proxy::ProxyProvider;
use crate::pricing::sources::{MercadoLivre, SiteExtractor, SourceExtractor, Zoom};
use std::collections::HashMap;
use std::sync::Arc;

/// Canonical form of a source name: trimmed and lowercased.
pub fn normalize_source_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Maps normalized source names to extractors.
///
/// Filled once at startup, then only read.
#[derive(Clone, Default)]
pub struct SourceRegistry {
    extractors: HashMap<String, Arc<dyn SourceExtractor>>,
}

impl SourceRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in storefront sharing one fetcher and proxy pool.
    pub fn with_defaults(fetcher: Arc<dyn PageFetcher>, proxies: Arc<dyn ProxyProvider>) -> Self {
        let mercado_livre: Arc<dyn SourceExtractor> =
            Arc::new(SiteExtractor::new(MercadoLivre, fetcher.clone(), proxies.clone()));
        let zoom: Arc<dyn SourceExtractor> = Arc::new(SiteExtractor::new(Zoom, fetcher, proxies));

        let mut registry = Self::new();
        registry.register("mercado livre", mercado_livre);
        registry.register("amazon", zoom.clone());
        registry.register("zoom", zoom);
        registry
    }

    /// Registers an extractor under `name`, replacing any previous one.
    pub fn register(&mut self, name: &str, extractor: Arc<dyn SourceExtractor>) -> &mut Self {
        self.extractors.insert(normalize_source_name(name), extractor);
        self
    }

    /// Looks up an extractor; `name` is normalized first.
    pub fn get(&self, name: &str) -> Option<&Arc<dyn SourceExtractor>> {
        self.extractors.get(&normalize_source_name(name))
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.extractors.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.extractors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extractors.is_empty()
    }
}
