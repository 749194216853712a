use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::errors::CoreError;

pub const DEFAULT_COINGECKO_URL: &str = "https://api.coingecko.com/api/v3";
pub const DEFAULT_COINCAP_URL: &str = "https://api.coincap.io/v2";

/// The fixed set of tracked asset ids.
pub const DEFAULT_ASSET_IDS: [&str; 8] = [
    "bitcoin", "ethereum", "litecoin", "ripple", "cardano", "polkadot", "dogecoin", "solana",
];

/// Bounded retry with exponential backoff, applied to network failures only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Total attempts per fetch, including the first one
    pub max_attempts: u32,
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
}

impl RetryPolicy {
    /// A policy that never retries.
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            initial_backoff: Duration::ZERO,
            max_backoff: Duration::ZERO,
        }
    }

    /// Delay before retry number `retry` (0-based): `initial * 2^retry`, capped.
    pub fn backoff(&self, retry: u32) -> Duration {
        let factor = 2u32.saturating_pow(retry);
        self.initial_backoff
            .saturating_mul(factor)
            .min(self.max_backoff)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff: Duration::from_millis(250),
            max_backoff: Duration::from_secs(2),
        }
    }
}

/// Runtime configuration of the price watcher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Asset ids requested on every fetch (e.g., "bitcoin").
    pub asset_ids: Vec<String>,

    /// Time between scheduled refreshes.
    pub refresh_interval: Duration,

    /// Timeout applied to each HTTP request.
    pub request_timeout: Duration,

    /// Quotes older than this are flagged stale.
    pub stale_after: Duration,

    pub retry: RetryPolicy,

    pub coingecko_base_url: String,
    pub coincap_base_url: String,
}

impl Settings {
    /// Reject configurations the pipeline cannot run with.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.asset_ids.is_empty() || self.asset_ids.iter().any(|id| id.trim().is_empty()) {
            return Err(CoreError::InvalidConfiguration(
                "asset id list must contain at least one non-empty id".into(),
            ));
        }
        if self.refresh_interval.is_zero() {
            return Err(CoreError::InvalidConfiguration(
                "refresh interval must be greater than zero".into(),
            ));
        }
        if self.request_timeout.is_zero() {
            return Err(CoreError::InvalidConfiguration(
                "request timeout must be greater than zero".into(),
            ));
        }
        if self.retry.max_attempts == 0 {
            return Err(CoreError::InvalidConfiguration(
                "retry policy needs at least one attempt".into(),
            ));
        }
        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            asset_ids: DEFAULT_ASSET_IDS.iter().map(|s| s.to_string()).collect(),
            refresh_interval: Duration::from_secs(2),
            request_timeout: Duration::from_secs(10),
            stale_after: Duration::from_secs(10),
            retry: RetryPolicy::default(),
            coingecko_base_url: DEFAULT_COINGECKO_URL.to_string(),
            coincap_base_url: DEFAULT_COINCAP_URL.to_string(),
        }
    }
}
