use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::errors::CoreError;

use super::quote::PriceQuote;

/// What happened when a fetch outcome was applied to a [`Snapshot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyResult {
    /// The quote list was replaced wholesale.
    Replaced,
    /// The fetch failed; quotes were kept and the error recorded.
    Failed,
    /// The outcome belonged to an older request than the data already held
    /// and was dropped.
    Discarded,
}

/// The snapshot list plus the bookkeeping needed for a stale-data indicator.
///
/// Every fetch is stamped with a monotonically increasing generation.
/// [`Snapshot::apply`] is the only way quotes change: a successful outcome
/// replaces the whole list, a failed one leaves it untouched, and any
/// outcome older than the quotes already held is discarded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Current quotes, in provider order (unspecified)
    pub quotes: Vec<PriceQuote>,

    /// Generation of the fetch that produced `quotes` (0 = never fetched)
    pub generation: u64,

    /// When `quotes` were fetched
    pub fetched_at: Option<DateTime<Utc>>,

    /// Error of the newest failed fetch, if it is newer than `quotes`
    pub last_error: Option<String>,

    /// Generation of the newest failed fetch
    #[serde(default)]
    pub failed_generation: u64,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply the outcome of the fetch stamped `generation`.
    pub fn apply(
        &mut self,
        generation: u64,
        outcome: Result<Vec<PriceQuote>, CoreError>,
        now: DateTime<Utc>,
    ) -> ApplyResult {
        if generation <= self.generation {
            return ApplyResult::Discarded;
        }

        match outcome {
            Ok(quotes) => {
                self.quotes = quotes;
                self.generation = generation;
                self.fetched_at = Some(now);
                if self.failed_generation < generation {
                    self.last_error = None;
                }
                ApplyResult::Replaced
            }
            Err(e) => {
                if generation > self.failed_generation {
                    self.failed_generation = generation;
                    self.last_error = Some(e.to_string());
                }
                ApplyResult::Failed
            }
        }
    }

    /// `true` if the quotes should be shown with a stale marker:
    /// never fetched, the newest attempt failed, or older than `max_age`.
    #[must_use]
    pub fn is_stale(&self, now: DateTime<Utc>, max_age: Duration) -> bool {
        let Some(fetched_at) = self.fetched_at else {
            return true;
        };
        if self.last_error.is_some() {
            return true;
        }
        let age = now.signed_duration_since(fetched_at);
        age.to_std().map(|a| a > max_age).unwrap_or(false)
    }

    /// Look up a quote by its asset id.
    #[must_use]
    pub fn quote(&self, id: &str) -> Option<&PriceQuote> {
        self.quotes.iter().find(|q| q.id == id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }
}
