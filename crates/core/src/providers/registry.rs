use super::finnhub::FinnhubProvider;
use super::traits::QuoteProvider;
use super::yahoo::YahooFinanceProvider;
use crate::errors::CoreError;
use crate::models::report::PriceSelector;

/// Registry of available quote providers, tried in registration order.
///
/// If the primary provider fails (API down, rate limited, etc.), the
/// registry automatically falls back to the next one. New providers can be
/// added without modifying existing code.
///
/// **Note on precision**: all prices flow through as `f64`, which has
/// ~15-17 significant decimal digits. Sufficient for this use case, but
/// repeated arithmetic may accumulate small floating-point errors.
pub struct QuoteRegistry {
    providers: Vec<Box<dyn QuoteProvider>>,
}

impl QuoteRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
        }
    }

    /// Create a registry with the default providers pre-configured:
    /// Finnhub first when an API key is available, Yahoo Finance as the
    /// keyless fallback.
    pub fn new_with_defaults(finnhub_api_key: Option<&str>) -> Self {
        let mut registry = Self::new();

        if let Some(key) = finnhub_api_key {
            registry.register(Box::new(FinnhubProvider::new(key.to_string())));
        }

        if let Ok(yahoo) = YahooFinanceProvider::new() {
            registry.register(Box::new(yahoo));
        }

        registry
    }

    pub fn register(&mut self, provider: Box<dyn QuoteProvider>) {
        self.providers.push(provider);
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Names of the registered providers, in fallback order.
    pub fn provider_names(&self) -> Vec<String> {
        self.providers.iter().map(|p| p.name().to_string()).collect()
    }

    /// Fetch a price with automatic provider fallback.
    ///
    /// Validates that returned prices are finite and non-negative; an
    /// invalid price counts as a failure and the next provider is tried.
    /// When every provider fails, the last error is surfaced as
    /// `PriceFetchFailed` for the ticker.
    pub async fn get_price(
        &self,
        ticker: &str,
        selector: PriceSelector,
    ) -> Result<f64, CoreError> {
        if self.providers.is_empty() {
            return Err(CoreError::NoProvider);
        }

        let mut last_error: Option<CoreError> = None;
        for provider in &self.providers {
            match provider.get_price(ticker, selector).await {
                Ok(price) => {
                    if !price.is_finite() || price < 0.0 {
                        last_error = Some(CoreError::Api {
                            provider: provider.name().to_string(),
                            message: format!(
                                "Invalid price returned for {ticker}: {price} (must be finite and non-negative)"
                            ),
                        });
                        continue;
                    }
                    return Ok(price);
                }
                Err(e) => {
                    log::debug!(
                        "provider {} failed for {ticker} ({selector}): {e}; trying next",
                        provider.name()
                    );
                    last_error = Some(e);
                }
            }
        }

        Err(CoreError::PriceFetchFailed {
            ticker: ticker.to_uppercase(),
            message: last_error
                .map(|e| e.to_string())
                .unwrap_or_else(|| "no provider produced a price".into()),
        })
    }

    /// Whether the market is currently open, from the first provider that
    /// can answer.
    pub async fn is_market_open(&self) -> Result<bool, CoreError> {
        if self.providers.is_empty() {
            return Err(CoreError::NoProvider);
        }

        let mut last_error: Option<CoreError> = None;
        for provider in &self.providers {
            match provider.is_market_open().await {
                Ok(open) => return Ok(open),
                Err(e) => last_error = Some(e),
            }
        }

        Err(last_error.unwrap_or(CoreError::NoProvider))
    }
}

impl Default for QuoteRegistry {
    fn default() -> Self {
        Self::new()
    }
}
