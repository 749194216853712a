// ═══════════════════════════════════════════════════════════════════
// Model Tests — PriceQuote, Snapshot, Settings, RetryPolicy, Tone,
// HoldingEntry, SortCriterion
// ═══════════════════════════════════════════════════════════════════

use chrono::{Duration as ChronoDuration, TimeZone, Utc};
use std::time::Duration;

use coin_watch_core::errors::CoreError;
use coin_watch_core::models::holding::HoldingEntry;
use coin_watch_core::models::listing::SortCriterion;
use coin_watch_core::models::quote::{display_name, PriceQuote};
use coin_watch_core::models::series::Tone;
use coin_watch_core::models::settings::{RetryPolicy, Settings, DEFAULT_ASSET_IDS};
use coin_watch_core::models::snapshot::{ApplyResult, Snapshot};

fn t0() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 15, 12, 0, 0).unwrap()
}

fn quotes(prices: &[(&str, f64)]) -> Vec<PriceQuote> {
    prices
        .iter()
        .map(|(id, p)| PriceQuote::new(*id, *p, 0.0))
        .collect()
}

// ═══════════════════════════════════════════════════════════════════
// PriceQuote
// ═══════════════════════════════════════════════════════════════════

mod price_quote {
    use super::*;

    #[test]
    fn name_is_capitalized_id() {
        let q = PriceQuote::new("bitcoin", 50000.0, 2.0);
        assert_eq!(q.id, "bitcoin");
        assert_eq!(q.name, "Bitcoin");
    }

    #[test]
    fn hyphenated_ids_capitalize_each_word() {
        assert_eq!(display_name("usd-coin"), "Usd-Coin");
        assert_eq!(display_name("shiba-inu"), "Shiba-Inu");
    }

    #[test]
    fn empty_id_gives_empty_name() {
        assert_eq!(display_name(""), "");
    }

    #[test]
    fn placeholder_metrics_are_zero() {
        let q = PriceQuote::new("ethereum", 3000.0, -1.5);
        assert_eq!(q.market_cap, 0.0);
        assert_eq!(q.volume, 0.0);
        assert_eq!(q.circulating_supply, 0.0);
    }

    #[test]
    fn is_up_includes_flat() {
        assert!(PriceQuote::new("a", 1.0, 0.0).is_up());
        assert!(PriceQuote::new("a", 1.0, 0.1).is_up());
        assert!(!PriceQuote::new("a", 1.0, -0.1).is_up());
    }

    #[test]
    fn serde_roundtrip_json() {
        let q = PriceQuote::new("solana", 150.25, 4.5);
        let json = serde_json::to_string(&q).unwrap();
        let back: PriceQuote = serde_json::from_str(&json).unwrap();
        assert_eq!(q, back);
    }
}

// ═══════════════════════════════════════════════════════════════════
// Snapshot — apply & staleness
// ═══════════════════════════════════════════════════════════════════

mod snapshot_apply {
    use super::*;

    #[test]
    fn new_snapshot_is_empty_and_unfetched() {
        let s = Snapshot::new();
        assert!(s.is_empty());
        assert_eq!(s.generation, 0);
        assert!(s.fetched_at.is_none());
    }

    #[test]
    fn success_replaces_whole_list() {
        let mut s = Snapshot::new();
        s.apply(1, Ok(quotes(&[("bitcoin", 1.0), ("ethereum", 2.0)])), t0());
        let result = s.apply(2, Ok(quotes(&[("litecoin", 3.0)])), t0());

        assert_eq!(result, ApplyResult::Replaced);
        assert_eq!(s.quotes.len(), 1);
        assert_eq!(s.quotes[0].id, "litecoin");
        assert_eq!(s.generation, 2);
        assert_eq!(s.fetched_at, Some(t0()));
    }

    #[test]
    fn failure_keeps_previous_list() {
        let mut s = Snapshot::new();
        s.apply(1, Ok(quotes(&[("bitcoin", 1.0)])), t0());
        let before = s.quotes.clone();

        let result = s.apply(2, Err(CoreError::Decode("bad body".into())), t0());

        assert_eq!(result, ApplyResult::Failed);
        assert_eq!(s.quotes, before);
        assert_eq!(s.generation, 1);
        assert_eq!(s.last_error.as_deref(), Some("Decode error: bad body"));
    }

    #[test]
    fn older_success_is_discarded() {
        let mut s = Snapshot::new();
        s.apply(3, Ok(quotes(&[("bitcoin", 3.0)])), t0());
        let result = s.apply(2, Ok(quotes(&[("bitcoin", 2.0)])), t0());

        assert_eq!(result, ApplyResult::Discarded);
        assert_eq!(s.quotes[0].price, 3.0);
    }

    #[test]
    fn same_generation_twice_is_discarded() {
        let mut s = Snapshot::new();
        s.apply(1, Ok(quotes(&[("bitcoin", 1.0)])), t0());
        assert_eq!(
            s.apply(1, Ok(quotes(&[("bitcoin", 9.0)])), t0()),
            ApplyResult::Discarded
        );
        assert_eq!(s.quotes[0].price, 1.0);
    }

    #[test]
    fn failure_older_than_held_quotes_is_discarded() {
        let mut s = Snapshot::new();
        s.apply(5, Ok(quotes(&[("bitcoin", 1.0)])), t0());
        let result = s.apply(4, Err(CoreError::Network("timeout".into())), t0());
        assert_eq!(result, ApplyResult::Discarded);
        assert!(s.last_error.is_none());
    }

    #[test]
    fn newer_success_clears_error() {
        let mut s = Snapshot::new();
        s.apply(1, Err(CoreError::Network("down".into())), t0());
        assert!(s.last_error.is_some());
        s.apply(2, Ok(quotes(&[("bitcoin", 1.0)])), t0());
        assert!(s.last_error.is_none());
    }

    #[test]
    fn older_success_after_newer_failure_keeps_error() {
        let mut s = Snapshot::new();
        s.apply(2, Err(CoreError::Network("down".into())), t0());
        let result = s.apply(1, Ok(quotes(&[("bitcoin", 1.0)])), t0());

        assert_eq!(result, ApplyResult::Replaced);
        assert_eq!(s.quotes.len(), 1);
        assert!(s.last_error.is_some());
    }

    #[test]
    fn quote_lookup_by_id() {
        let mut s = Snapshot::new();
        s.apply(1, Ok(quotes(&[("bitcoin", 1.0), ("ethereum", 2.0)])), t0());
        assert_eq!(s.quote("ethereum").unwrap().price, 2.0);
        assert!(s.quote("dogecoin").is_none());
    }
}

mod snapshot_staleness {
    use super::*;

    const MAX_AGE: Duration = Duration::from_secs(10);

    #[test]
    fn never_fetched_is_stale() {
        assert!(Snapshot::new().is_stale(t0(), MAX_AGE));
    }

    #[test]
    fn fresh_success_is_not_stale() {
        let mut s = Snapshot::new();
        s.apply(1, Ok(quotes(&[("bitcoin", 1.0)])), t0());
        assert!(!s.is_stale(t0() + ChronoDuration::seconds(5), MAX_AGE));
    }

    #[test]
    fn old_success_is_stale() {
        let mut s = Snapshot::new();
        s.apply(1, Ok(quotes(&[("bitcoin", 1.0)])), t0());
        assert!(s.is_stale(t0() + ChronoDuration::seconds(11), MAX_AGE));
    }

    #[test]
    fn latest_failure_is_stale_even_if_recent() {
        let mut s = Snapshot::new();
        s.apply(1, Ok(quotes(&[("bitcoin", 1.0)])), t0());
        s.apply(2, Err(CoreError::Network("down".into())), t0());
        assert!(s.is_stale(t0(), MAX_AGE));
    }

    #[test]
    fn clock_behind_fetch_time_is_not_stale() {
        let mut s = Snapshot::new();
        s.apply(1, Ok(quotes(&[("bitcoin", 1.0)])), t0());
        assert!(!s.is_stale(t0() - ChronoDuration::seconds(30), MAX_AGE));
    }
}

// ═══════════════════════════════════════════════════════════════════
// Settings & RetryPolicy
// ═══════════════════════════════════════════════════════════════════

mod settings {
    use super::*;

    #[test]
    fn defaults() {
        let s = Settings::default();
        assert_eq!(s.asset_ids.len(), DEFAULT_ASSET_IDS.len());
        assert_eq!(s.asset_ids[0], "bitcoin");
        assert_eq!(s.refresh_interval, Duration::from_secs(2));
        assert!(s.request_timeout > Duration::ZERO);
        assert!(s.validate().is_ok());
    }

    #[test]
    fn empty_ids_rejected() {
        let s = Settings {
            asset_ids: vec![],
            ..Settings::default()
        };
        assert!(matches!(s.validate(), Err(CoreError::InvalidConfiguration(_))));
    }

    #[test]
    fn blank_id_rejected() {
        let s = Settings {
            asset_ids: vec!["bitcoin".into(), "  ".into()],
            ..Settings::default()
        };
        assert!(matches!(s.validate(), Err(CoreError::InvalidConfiguration(_))));
    }

    #[test]
    fn zero_interval_rejected() {
        let s = Settings {
            refresh_interval: Duration::ZERO,
            ..Settings::default()
        };
        assert!(matches!(s.validate(), Err(CoreError::InvalidConfiguration(_))));
    }

    #[test]
    fn zero_timeout_rejected() {
        let s = Settings {
            request_timeout: Duration::ZERO,
            ..Settings::default()
        };
        assert!(matches!(s.validate(), Err(CoreError::InvalidConfiguration(_))));
    }

    #[test]
    fn zero_attempts_rejected() {
        let mut s = Settings::default();
        s.retry.max_attempts = 0;
        assert!(matches!(s.validate(), Err(CoreError::InvalidConfiguration(_))));
    }

    #[test]
    fn serde_roundtrip_json() {
        let s = Settings::default();
        let json = serde_json::to_string(&s).unwrap();
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(s, back);
    }
}

mod retry_policy {
    use super::*;

    #[test]
    fn backoff_doubles() {
        let p = RetryPolicy {
            max_attempts: 5,
            initial_backoff: Duration::from_millis(100),
            max_backoff: Duration::from_secs(10),
        };
        assert_eq!(p.backoff(0), Duration::from_millis(100));
        assert_eq!(p.backoff(1), Duration::from_millis(200));
        assert_eq!(p.backoff(2), Duration::from_millis(400));
    }

    #[test]
    fn backoff_is_capped() {
        let p = RetryPolicy {
            max_attempts: 5,
            initial_backoff: Duration::from_millis(500),
            max_backoff: Duration::from_secs(1),
        };
        assert_eq!(p.backoff(3), Duration::from_secs(1));
        assert_eq!(p.backoff(40), Duration::from_secs(1));
    }

    #[test]
    fn none_has_single_attempt() {
        assert_eq!(RetryPolicy::none().max_attempts, 1);
    }
}

// ═══════════════════════════════════════════════════════════════════
// Tone, HoldingEntry, SortCriterion
// ═══════════════════════════════════════════════════════════════════

mod tone {
    use super::*;

    #[test]
    fn at_or_above_opening_is_positive() {
        assert_eq!(Tone::classify(20000.0, 20000.0), Tone::Positive);
        assert_eq!(Tone::classify(20001.0, 20000.0), Tone::Positive);
    }

    #[test]
    fn below_opening_is_negative() {
        assert_eq!(Tone::classify(19999.0, 20000.0), Tone::Negative);
    }
}

mod holding_entry {
    use super::*;

    #[test]
    fn new_has_zero_value() {
        let h = HoldingEntry::new("BTC", 1.5);
        assert_eq!(h.name, "BTC");
        assert_eq!(h.amount, 1.5);
        assert_eq!(h.value, 0.0);
    }

    #[test]
    fn new_generates_unique_ids() {
        assert_ne!(HoldingEntry::new("BTC", 1.0).id, HoldingEntry::new("BTC", 1.0).id);
    }
}

mod sort_criterion {
    use super::*;

    #[test]
    fn default_is_price() {
        assert_eq!(SortCriterion::default(), SortCriterion::Price);
    }

    #[test]
    fn display() {
        assert_eq!(SortCriterion::Price.to_string(), "Price");
        assert_eq!(SortCriterion::PercentageChange.to_string(), "Percentage Change");
    }
}
