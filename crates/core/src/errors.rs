use thiserror::Error;

/// Unified error type for the entire coin-watch-core library.
/// Every public function returns `Result<T, CoreError>`.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Configuration ───────────────────────────────────────────────
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    // ── API / Network ───────────────────────────────────────────────
    #[error("Network error: {0}")]
    Network(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("API error ({provider}): {message}")]
    Api {
        provider: String,
        message: String,
    },

    #[error("No quote provider registered")]
    NoProvider,

    #[error("Quote refresh has stopped")]
    RefreshStopped,

    // ── Business Logic ──────────────────────────────────────────────
    #[error("Validation failed: {0}")]
    ValidationError(String),

    #[error("Holding not found: {0}")]
    HoldingNotFound(String),

    #[error("Quote not found: {0}")]
    QuoteNotFound(String),

    #[error("Authentication failed: {0}")]
    Authentication(String),
}

impl CoreError {
    /// Only transport-level failures are worth another attempt.
    /// A body that failed to decode will fail the same way again.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, CoreError::Network(_))
    }
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Decode(e.to_string())
    }
}

impl From<reqwest::Error> for CoreError {
    fn from(e: reqwest::Error) -> Self {
        // Strip query parameters from URLs embedded in reqwest messages.
        let msg = e.to_string();
        let sanitized = if let Some(idx) = msg.find('?') {
            format!("{}?<query redacted>", &msg[..idx])
        } else {
            msg
        };
        if e.is_decode() {
            CoreError::Decode(sanitized)
        } else {
            CoreError::Network(sanitized)
        }
    }
}
