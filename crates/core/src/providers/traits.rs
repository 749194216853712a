use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::quote::PriceQuote;

/// Trait abstraction for all quote data providers.
///
/// Each price API (CoinGecko, CoinCap) implements this trait. If an API
/// stops working or changes, we replace only that one implementation.
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    /// Fetch the current USD quote of every id in `ids` with one request.
    ///
    /// Ids the API does not know are omitted from the result rather than
    /// reported as errors. The order of the result is unspecified.
    async fn fetch_quotes(&self, ids: &[String]) -> Result<Vec<PriceQuote>, CoreError>;
}
