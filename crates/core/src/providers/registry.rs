use tracing::warn;

use crate::errors::CoreError;
use crate::models::quote::PriceQuote;
use crate::models::settings::Settings;

use super::coincap::CoinCapProvider;
use super::coingecko::CoinGeckoProvider;
use super::traits::QuoteProvider;

/// Ordered list of quote providers.
///
/// The first provider is the primary source; the rest are fallbacks tried
/// in registration order when the one before them fails.
pub struct ProviderRegistry {
    providers: Vec<Box<dyn QuoteProvider>>,
}

impl ProviderRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
        }
    }

    /// Create a registry with CoinGecko as primary and CoinCap as fallback,
    /// both configured from `settings`.
    pub fn new_with_defaults(settings: &Settings) -> Self {
        let mut registry = Self::new();

        // CoinGecko — primary, no API key needed
        registry.register(Box::new(CoinGeckoProvider::with_base_url(
            settings.coingecko_base_url.clone(),
            settings.request_timeout,
        )));

        // CoinCap — fallback, no API key needed
        registry.register(Box::new(CoinCapProvider::with_base_url(
            settings.coincap_base_url.clone(),
            settings.request_timeout,
        )));

        registry
    }

    /// Register a new provider at the lowest priority.
    pub fn register(&mut self, provider: Box<dyn QuoteProvider>) {
        self.providers.push(provider);
    }

    /// Names of the registered providers, in priority order.
    pub fn provider_names(&self) -> Vec<String> {
        self.providers.iter().map(|p| p.name().to_string()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Fetch quotes from the first provider that succeeds.
    ///
    /// If every provider fails, the first retryable error is returned so the
    /// caller still retries; otherwise the last provider's error.
    pub async fn fetch_quotes(&self, ids: &[String]) -> Result<Vec<PriceQuote>, CoreError> {
        let mut first_retryable = None;
        let mut last_error = None;
        for provider in &self.providers {
            match provider.fetch_quotes(ids).await {
                Ok(quotes) => return Ok(quotes),
                Err(e) => {
                    warn!(provider = provider.name(), error = %e, "quote provider failed");
                    if e.is_retryable() && first_retryable.is_none() {
                        first_retryable = Some(e);
                    } else {
                        last_error = Some(e);
                    }
                }
            }
        }
        Err(first_retryable
            .or(last_error)
            .unwrap_or(CoreError::NoProvider))
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}
