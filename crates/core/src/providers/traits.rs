use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::report::PriceSelector;

/// Trait abstraction for live quote sources.
///
/// Each upstream API (Finnhub, Yahoo Finance) implements this trait. If an
/// API stops working or changes, only that one implementation is replaced —
/// the rest of the codebase is untouched.
///
/// Implementations must be idempotent and side-effect-free, and every
/// request carries a timeout so no fetch blocks indefinitely.
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    /// Fetch the price of a ticker for the given selector
    /// (market open / most recent / previous close).
    async fn get_price(
        &self,
        ticker: &str,
        selector: PriceSelector,
    ) -> Result<f64, CoreError>;

    /// Whether the market is currently open. Providers without a market
    /// clock endpoint return an `Api` error and the registry falls through
    /// to the next provider.
    async fn is_market_open(&self) -> Result<bool, CoreError>;
}
