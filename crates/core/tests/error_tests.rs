// ═══════════════════════════════════════════════════════════════════
// Error Tests — CoreError variants, Display formatting, From impls,
// retry classification
// ═══════════════════════════════════════════════════════════════════

use coin_watch_core::errors::CoreError;

// ── Display formatting ──────────────────────────────────────────────

mod display {
    use super::*;

    #[test]
    fn invalid_configuration() {
        let err = CoreError::InvalidConfiguration("bad url".into());
        assert_eq!(err.to_string(), "Invalid configuration: bad url");
    }

    #[test]
    fn network() {
        let err = CoreError::Network("connection refused".into());
        assert_eq!(err.to_string(), "Network error: connection refused");
    }

    #[test]
    fn decode() {
        let err = CoreError::Decode("missing field `usd`".into());
        assert_eq!(err.to_string(), "Decode error: missing field `usd`");
    }

    #[test]
    fn api_error() {
        let err = CoreError::Api {
            provider: "CoinGecko".into(),
            message: "HTTP 429 Too Many Requests".into(),
        };
        assert_eq!(
            err.to_string(),
            "API error (CoinGecko): HTTP 429 Too Many Requests"
        );
    }

    #[test]
    fn no_provider() {
        assert_eq!(CoreError::NoProvider.to_string(), "No quote provider registered");
    }

    #[test]
    fn refresh_stopped() {
        assert_eq!(CoreError::RefreshStopped.to_string(), "Quote refresh has stopped");
    }

    #[test]
    fn validation() {
        let err = CoreError::ValidationError("Name must not be empty".into());
        assert_eq!(err.to_string(), "Validation failed: Name must not be empty");
    }

    #[test]
    fn holding_not_found() {
        let err = CoreError::HoldingNotFound("abc".into());
        assert_eq!(err.to_string(), "Holding not found: abc");
    }

    #[test]
    fn quote_not_found() {
        let err = CoreError::QuoteNotFound("dogecoin".into());
        assert_eq!(err.to_string(), "Quote not found: dogecoin");
    }

    #[test]
    fn authentication() {
        let err = CoreError::Authentication("username and password are required".into());
        assert_eq!(
            err.to_string(),
            "Authentication failed: username and password are required"
        );
    }
}

// ── Retry classification ────────────────────────────────────────────

mod retryable {
    use super::*;

    #[test]
    fn only_network_is_retryable() {
        assert!(CoreError::Network("x".into()).is_retryable());
        assert!(!CoreError::Decode("x".into()).is_retryable());
        assert!(!CoreError::InvalidConfiguration("x".into()).is_retryable());
        assert!(!CoreError::NoProvider.is_retryable());
        assert!(!CoreError::Api {
            provider: "p".into(),
            message: "m".into()
        }
        .is_retryable());
    }
}

// ── From impls ──────────────────────────────────────────────────────

mod conversions {
    use super::*;

    #[test]
    fn serde_json_error_becomes_decode() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: CoreError = json_err.into();
        assert!(matches!(err, CoreError::Decode(_)));
    }

    #[test]
    fn question_mark_converts_serde_error() {
        fn parse() -> Result<serde_json::Value, CoreError> {
            Ok(serde_json::from_str("[1, 2")?)
        }
        assert!(matches!(parse(), Err(CoreError::Decode(_))));
    }

    #[test]
    fn is_std_error_and_send_sync() {
        fn assert_bounds<T: std::error::Error + Send + Sync + 'static>() {}
        assert_bounds::<CoreError>();
    }
}
