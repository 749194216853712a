use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

use crate::errors::CoreError;
use crate::models::quote::PriceQuote;
use crate::models::settings::DEFAULT_COINGECKO_URL;
use super::traits::QuoteProvider;

/// CoinGecko API provider for cryptocurrency quotes.
///
/// - **Free**: No API key required.
/// - **Endpoint**: `/simple/price?ids=…&vs_currencies=usd&include_24hr_change=true`
///
/// CoinGecko keys assets by lowercase ids like "bitcoin", "ethereum".
pub struct CoinGeckoProvider {
    client: Client,
    base_url: String,
}

impl CoinGeckoProvider {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_COINGECKO_URL, Duration::from_secs(10))
    }

    /// Point the provider at another host (mirrors, test servers) with a
    /// per-request timeout.
    pub fn with_base_url(base_url: impl Into<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Build the `/simple/price` request URL for `ids`.
    pub fn price_url(&self, ids: &[String]) -> Result<Url, CoreError> {
        let mut url = Url::parse(&format!("{}/simple/price", self.base_url))
            .map_err(|e| CoreError::InvalidConfiguration(format!("bad CoinGecko URL: {e}")))?;
        url.query_pairs_mut()
            .append_pair("ids", &ids.join(","))
            .append_pair("vs_currencies", "usd")
            .append_pair("include_24hr_change", "true");
        Ok(url)
    }
}

impl Default for CoinGeckoProvider {
    fn default() -> Self {
        Self::new()
    }
}

// ── CoinGecko API response types ────────────────────────────────────

/// `{ "bitcoin": { "usd": 50000.0, "usd_24h_change": 2.0 }, ... }`
type SimplePriceResponse = HashMap<String, SimplePrice>;

#[derive(Deserialize)]
struct SimplePrice {
    usd: f64,
    #[serde(default)]
    usd_24h_change: Option<f64>,
}

/// Decode a `/simple/price` body into quotes.
///
/// The whole body is rejected if any entry lacks a `usd` price.
/// Ids missing from the body are simply absent from the result.
pub fn decode_simple_price(body: &[u8]) -> Result<Vec<PriceQuote>, CoreError> {
    let parsed: SimplePriceResponse = serde_json::from_slice(body)?;
    Ok(parsed
        .into_iter()
        .map(|(id, p)| PriceQuote::new(id, p.usd, p.usd_24h_change.unwrap_or(0.0)))
        .collect())
}

#[async_trait]
impl QuoteProvider for CoinGeckoProvider {
    fn name(&self) -> &str {
        "CoinGecko"
    }

    async fn fetch_quotes(&self, ids: &[String]) -> Result<Vec<PriceQuote>, CoreError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let url = self.price_url(ids)?;

        let resp = self
            .client
            .get(url)
            .header("accept", "application/json")
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(CoreError::Api {
                provider: "CoinGecko".into(),
                message: format!("HTTP {status}"),
            });
        }

        let body = resp.bytes().await?;
        let quotes = decode_simple_price(&body)?;
        debug!(provider = "CoinGecko", requested = ids.len(), received = quotes.len(), "decoded quotes");
        Ok(quotes)
    }
}
