use serde::{Deserialize, Serialize};

/// Market cap placeholder. Not fetched from any API.
pub const PLACEHOLDER_MARKET_CAP: f64 = 0.0;

/// Trading volume placeholder. Not fetched from any API.
pub const PLACEHOLDER_VOLUME: f64 = 0.0;

/// Circulating supply placeholder. Not fetched from any API.
pub const PLACEHOLDER_CIRCULATING_SUPPLY: f64 = 0.0;

/// Current market snapshot of one tracked asset.
///
/// Quotes are built fresh on every successful fetch and never mutated;
/// the next fetch replaces the whole list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
    /// API asset key, lowercase (e.g., "bitcoin", "usd-coin")
    pub id: String,

    /// Display name derived from the id (e.g., "Bitcoin")
    pub name: String,

    /// Price in USD
    pub price: f64,

    /// Price change over the last 24 hours, in percent
    pub price_change_24h: f64,

    pub market_cap: f64,
    pub volume: f64,
    pub circulating_supply: f64,
}

impl PriceQuote {
    /// Build a quote for `id`, deriving the display name and filling the
    /// placeholder metrics.
    pub fn new(id: impl Into<String>, price: f64, price_change_24h: f64) -> Self {
        let id = id.into();
        Self {
            name: display_name(&id),
            id,
            price,
            price_change_24h,
            market_cap: PLACEHOLDER_MARKET_CAP,
            volume: PLACEHOLDER_VOLUME,
            circulating_supply: PLACEHOLDER_CIRCULATING_SUPPLY,
        }
    }

    /// `true` when the price rose (or stayed flat) over the last 24 hours.
    #[must_use]
    pub fn is_up(&self) -> bool {
        self.price_change_24h >= 0.0
    }
}

/// Capitalize the first letter of every `-`-separated word of an asset id.
///
/// `"bitcoin"` → `"Bitcoin"`, `"usd-coin"` → `"Usd-Coin"`.
pub fn display_name(id: &str) -> String {
    id.split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join("-")
}
