//! Relay fetching and the fallback chain
//!
//! [`FallbackFetcher`] wraps a prioritized list of [`Fetcher`] strategies
//! (normally the direct fetcher followed by configured relays). Each attempt
//! must return something shaped like HTML to count as a success. The strategy
//! that last worked for a site is remembered and tried first next time.

use super::fetcher::{looks_like_html, FetchOptions, Fetcher, HttpFetcher};
use crate::config::{FetcherConfig, UserAgentConfig};
use crate::url::base_domain;
use crate::FetchError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use url::form_urlencoded;

/// Fetches pages through a relay service described by a URL template
///
/// The template's `{url}` placeholder is replaced with the percent-encoded
/// target URL, e.g. `https://relay.example.net/raw?url={url}`.
#[derive(Debug, Clone)]
pub struct ProxyFetcher {
    name: String,
    template: String,
    http: HttpFetcher,
}

impl ProxyFetcher {
    pub fn new(name: impl Into<String>, template: impl Into<String>, http: HttpFetcher) -> Self {
        Self {
            name: name.into(),
            template: template.into(),
            http,
        }
    }

    /// The relay URL that fetches `target`
    pub fn relay_url(&self, target: &str) -> String {
        let encoded: String = form_urlencoded::byte_serialize(target.as_bytes()).collect();
        self.template.replace("{url}", &encoded)
    }
}

#[async_trait]
impl Fetcher for ProxyFetcher {
    async fn fetch(&self, url: &str, options: &FetchOptions) -> Result<String, FetchError> {
        let relay = self.relay_url(url);
        tracing::trace!("Fetching {} via {} ({})", url, self.name, relay);
        self.http.fetch(&relay, options).await
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Tries strategies in priority order until one returns HTML
pub struct FallbackFetcher {
    strategies: Vec<Arc<dyn Fetcher>>,
    /// Site key to index of the strategy that last succeeded there
    preferred: Mutex<HashMap<String, usize>>,
}

impl FallbackFetcher {
    /// Creates a fallback chain; earlier strategies have higher priority
    pub fn new(strategies: Vec<Arc<dyn Fetcher>>) -> Self {
        Self {
            strategies,
            preferred: Mutex::new(HashMap::new()),
        }
    }

    /// Builds the direct fetcher followed by every configured relay
    pub fn from_config(
        user_agent: &UserAgentConfig,
        config: &FetcherConfig,
    ) -> Result<Self, reqwest::Error> {
        let direct = HttpFetcher::new(user_agent, config)?;

        let mut strategies: Vec<Arc<dyn Fetcher>> = Vec::with_capacity(config.proxies.len() + 1);
        strategies.push(Arc::new(direct.clone()));
        for proxy in &config.proxies {
            strategies.push(Arc::new(ProxyFetcher::new(
                proxy.name.clone(),
                proxy.template.clone(),
                direct.clone(),
            )));
        }

        Ok(Self::new(strategies))
    }

    /// Number of strategies in the chain
    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    /// Index of the strategy remembered for a site, if any
    pub fn preferred_strategy(&self, site: &str) -> Option<usize> {
        self.preferred
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(site)
            .copied()
    }

    fn remember(&self, site: &str, index: usize) {
        let mut preferred = self
            .preferred
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        preferred.insert(site.to_string(), index);
    }

    fn forget(&self, site: &str) {
        let mut preferred = self
            .preferred
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        preferred.remove(site);
    }

    /// Strategy indices in the order they should be tried for `site`
    fn attempt_order(&self, site: &str) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.strategies.len()).collect();
        if let Some(first) = self.preferred_strategy(site) {
            if first < order.len() {
                order.retain(|&index| index != first);
                order.insert(0, first);
            }
        }
        order
    }
}

#[async_trait]
impl Fetcher for FallbackFetcher {
    async fn fetch(&self, url: &str, options: &FetchOptions) -> Result<String, FetchError> {
        let site = base_domain(url);
        let order = self.attempt_order(&site);
        let cached = self.preferred_strategy(&site);
        let mut last_error = FetchError::InvalidResponse {
            url: url.to_string(),
            reason: "no fetch strategies configured".to_string(),
        };

        for &index in &order {
            let strategy = &self.strategies[index];
            match strategy.fetch(url, options).await {
                Ok(body) if looks_like_html(&body) => {
                    if cached != Some(index) {
                        tracing::debug!("Using strategy '{}' for {}", strategy.name(), site);
                        self.remember(&site, index);
                    }
                    return Ok(body);
                }
                Ok(_) => {
                    tracing::debug!(
                        "Strategy '{}' returned a non-HTML body for {}",
                        strategy.name(),
                        url
                    );
                    last_error = FetchError::InvalidResponse {
                        url: url.to_string(),
                        reason: format!("'{}' returned a body that is not HTML", strategy.name()),
                    };
                }
                Err(e) => {
                    tracing::debug!("Strategy '{}' failed for {}: {}", strategy.name(), url, e);
                    last_error = e;
                }
            }

            if cached == Some(index) {
                self.forget(&site);
            }
        }

        Err(FetchError::AllStrategiesFailed {
            url: url.to_string(),
            attempts: order.len(),
            last_error: Box::new(last_error),
        })
    }

    fn name(&self) -> &str {
        "fallback"
    }
}
