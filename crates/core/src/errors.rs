use thiserror::Error;

/// Unified error type for the entire fund-tracker-core library.
/// Every fallible public function returns `Result<T, CoreError>`.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Ledger / Business Logic ─────────────────────────────────────
    #[error("Insufficient funds: purchase needs ${needed:.2} but only ${available:.2} is available")]
    InsufficientFunds { needed: f64, available: f64 },

    #[error("No position held for ticker: {0}")]
    PositionNotFound(String),

    #[error("No actions to undo")]
    NoHistory,

    #[error("Validation failed: {0}")]
    ValidationError(String),

    // ── Price Feed ──────────────────────────────────────────────────
    #[error("Price fetch failed for {ticker}: {message}")]
    PriceFetchFailed { ticker: String, message: String },

    #[error("API error ({provider}): {message}")]
    Api {
        provider: String,
        message: String,
    },

    #[error("Network error: {0}")]
    Network(String),

    #[error("No quote provider configured")]
    NoProvider,

    // ── Persistence ─────────────────────────────────────────────────
    #[error("File I/O error: {0}")]
    FileIO(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::FileIO(e.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}

impl From<reqwest::Error> for CoreError {
    fn from(e: reqwest::Error) -> Self {
        // Sanitize error message: strip query parameters from URLs to prevent
        // API key leakage. reqwest errors often contain full URLs with secrets.
        let msg = e.to_string();
        let sanitized = if let Some(idx) = msg.find('?') {
            format!("{}?<query redacted>", &msg[..idx])
        } else {
            msg
        };
        CoreError::Network(sanitized)
    }
}
