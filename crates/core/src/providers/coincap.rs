use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::errors::CoreError;
use crate::models::quote::PriceQuote;
use crate::models::settings::DEFAULT_COINCAP_URL;
use super::traits::QuoteProvider;

/// CoinCap API provider, used as a fallback behind CoinGecko.
///
/// - **Free**: No API key required.
/// - **Endpoint**: `/assets?ids={id,id,...}`
///
/// CoinCap returns numbers as strings (`"priceUsd": "50000.12"`).
/// Ids that differ between the two APIs (e.g. "ripple" vs "xrp") are
/// translated on the way in and back on the way out, so quotes always
/// carry the configured id.
pub struct CoinCapProvider {
    client: Client,
    base_url: String,
}

/// Configured id → CoinCap id, for the ids the two APIs disagree on.
const ID_ALIASES: [(&str, &str); 3] = [
    ("ripple", "xrp"),
    ("binancecoin", "binance-coin"),
    ("avalanche-2", "avalanche"),
];

impl CoinCapProvider {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_COINCAP_URL, Duration::from_secs(10))
    }

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

    /// Translate a configured id into CoinCap's id.
    pub fn to_coincap_id(id: &str) -> &str {
        ID_ALIASES
            .iter()
            .find(|(ours, _)| *ours == id)
            .map(|(_, theirs)| *theirs)
            .unwrap_or(id)
    }

    /// Translate a CoinCap id back into the configured id.
    pub fn from_coincap_id(id: &str) -> &str {
        ID_ALIASES
            .iter()
            .find(|(_, theirs)| *theirs == id)
            .map(|(ours, _)| *ours)
            .unwrap_or(id)
    }

    fn assets_url(&self, ids: &[String]) -> Result<Url, CoreError> {
        let mapped: Vec<&str> = ids.iter().map(|id| Self::to_coincap_id(id)).collect();
        let mut url = Url::parse(&format!("{}/assets", self.base_url))
            .map_err(|e| CoreError::InvalidConfiguration(format!("bad CoinCap URL: {e}")))?;
        url.query_pairs_mut().append_pair("ids", &mapped.join(","));
        Ok(url)
    }
}

impl Default for CoinCapProvider {
    fn default() -> Self {
        Self::new()
    }
}

// ── CoinCap API response types ──────────────────────────────────────

#[derive(Deserialize)]
struct AssetsResponse {
    data: Vec<AssetData>,
}

#[derive(Deserialize)]
struct AssetData {
    id: String,
    #[serde(rename = "priceUsd")]
    price_usd: Option<String>,
    #[serde(rename = "changePercent24Hr")]
    change_percent_24hr: Option<String>,
}

/// Decode an `/assets` body. Rows without a parsable price are skipped.
pub fn decode_assets(body: &[u8]) -> Result<Vec<PriceQuote>, CoreError> {
    let resp: AssetsResponse = serde_json::from_slice(body)?;
    Ok(resp
        .data
        .into_iter()
        .filter_map(|a| {
            let price: f64 = a.price_usd.as_deref()?.parse().ok()?;
            let change: f64 = a
                .change_percent_24hr
                .as_deref()
                .and_then(|c| c.parse().ok())
                .unwrap_or(0.0);
            let id = CoinCapProvider::from_coincap_id(&a.id).to_string();
            Some(PriceQuote::new(id, price, change))
        })
        .collect())
}

#[async_trait]
impl QuoteProvider for CoinCapProvider {
    fn name(&self) -> &str {
        "CoinCap"
    }

    async fn fetch_quotes(&self, ids: &[String]) -> Result<Vec<PriceQuote>, CoreError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let url = self.assets_url(ids)?;

        let resp = self.client.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(CoreError::Api {
                provider: "CoinCap".into(),
                message: format!("HTTP {status}"),
            });
        }

        let body = resp.bytes().await?;
        let quotes = decode_assets(&body)?;
        debug!(provider = "CoinCap", requested = ids.len(), received = quotes.len(), "decoded quotes");
        Ok(quotes)
    }
}
