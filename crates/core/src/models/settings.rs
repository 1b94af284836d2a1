use serde::{Deserialize, Serialize};

/// User-configurable settings, persisted inside the ledger file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// API key for the Finnhub quote provider. When absent, only the
    /// keyless Yahoo Finance fallback is registered.
    pub finnhub_api_key: Option<String>,
}
