use tracing::{debug, warn};

use crate::errors::CoreError;
use crate::models::quote::PriceQuote;
use crate::models::settings::RetryPolicy;
use crate::providers::registry::ProviderRegistry;

/// Fetches the quote list for a set of asset ids.
///
/// Strategy:
/// - Providers are tried in registry order (primary first, then fallbacks).
/// - **Network failures** are retried with exponential backoff, bounded by
///   `RetryPolicy::max_attempts`.
/// - **Decode / API / configuration failures** are returned immediately:
///   the same request would fail the same way.
///
/// The service never holds quotes itself. Callers apply the result to a
/// `Snapshot`, which keeps the previous list when the fetch fails.
pub struct PriceService {
    registry: ProviderRegistry,
    retry: RetryPolicy,
}

impl PriceService {
    pub fn new(registry: ProviderRegistry, retry: RetryPolicy) -> Self {
        Self { registry, retry }
    }

    /// Get the names of all registered providers, in priority order.
    pub fn provider_names(&self) -> Vec<String> {
        self.registry.provider_names()
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    /// Fetch a full quote list for `ids`.
    ///
    /// Ids absent from the provider response are omitted. The order of the
    /// returned list is unspecified.
    pub async fn fetch_snapshot(&self, ids: &[String]) -> Result<Vec<PriceQuote>, CoreError> {
        if self.registry.is_empty() {
            return Err(CoreError::NoProvider);
        }

        let max_attempts = self.retry.max_attempts.max(1);
        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.registry.fetch_quotes(ids).await {
                Ok(quotes) => {
                    debug!(attempt, quotes = quotes.len(), "fetched quote list");
                    return Ok(quotes);
                }
                Err(e) if e.is_retryable() && attempt < max_attempts => {
                    let delay = self.retry.backoff(attempt - 1);
                    warn!(attempt, max_attempts, ?delay, error = %e, "quote fetch failed, retrying");
                    tokio::time::sleep(delay).await;
                }
                Err(e) => {
                    warn!(attempt, error = %e, "quote fetch failed");
                    return Err(e);
                }
            }
        }
    }
}
