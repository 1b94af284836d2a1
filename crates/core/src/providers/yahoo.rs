use async_trait::async_trait;

use super::traits::QuoteProvider;
use crate::errors::CoreError;
use crate::models::report::PriceSelector;

/// Yahoo Finance provider for stock quotes (keyless fallback).
///
/// - **Free**: No API key required (unofficial public API).
/// - **Coverage**: Global equities, ETFs, indices.
///
/// Uses the `yahoo_finance_api` crate. Open and current prices come from
/// the latest daily quote; the previous close is read from a short daily
/// history. Yahoo exposes no market clock, so `is_market_open` is
/// unsupported here and the registry falls through to another provider.
pub struct YahooFinanceProvider {
    connector: yahoo_finance_api::YahooConnector,
}

impl YahooFinanceProvider {
    pub fn new() -> Result<Self, CoreError> {
        let connector = yahoo_finance_api::YahooConnector::new().map_err(|e| {
            CoreError::Api {
                provider: "Yahoo Finance".into(),
                message: format!("Failed to create connector: {e}"),
            }
        })?;
        Ok(Self { connector })
    }

    fn api_error(ticker: &str, what: &str, e: impl std::fmt::Display) -> CoreError {
        CoreError::Api {
            provider: "Yahoo Finance".into(),
            message: format!("{what} for {ticker}: {e}"),
        }
    }
}

#[async_trait]
impl QuoteProvider for YahooFinanceProvider {
    fn name(&self) -> &str {
        "Yahoo Finance"
    }

    async fn get_price(
        &self,
        ticker: &str,
        selector: PriceSelector,
    ) -> Result<f64, CoreError> {
        match selector {
            PriceSelector::Open | PriceSelector::Current => {
                let resp = self
                    .connector
                    .get_latest_quotes(ticker, "1d")
                    .await
                    .map_err(|e| Self::api_error(ticker, "Failed to fetch latest quote", e))?;

                let quote = resp
                    .last_quote()
                    .map_err(|e| Self::api_error(ticker, "No quote data", e))?;

                Ok(match selector {
                    PriceSelector::Open => quote.open,
                    _ => quote.close,
                })
            }
            PriceSelector::Close => {
                // Previous close: the second-to-last daily bar over a short
                // range. The interval argument must stay "1d" — a wider
                // interval aggregates multiple days into one bar and the
                // lookback lands on last week's close.
                let resp = self
                    .connector
                    .get_quote_range(ticker, "1d", "5d")
                    .await
                    .map_err(|e| Self::api_error(ticker, "Failed to fetch history", e))?;

                let quotes = resp
                    .quotes()
                    .map_err(|e| Self::api_error(ticker, "Failed to parse quotes", e))?;

                match quotes.len() {
                    0 => Err(Self::api_error(ticker, "No quote data", "empty history")),
                    1 => Ok(quotes[0].close),
                    n => Ok(quotes[n - 2].close),
                }
            }
        }
    }

    async fn is_market_open(&self) -> Result<bool, CoreError> {
        Err(CoreError::Api {
            provider: "Yahoo Finance".into(),
            message: "Market status is not supported by this provider".into(),
        })
    }
}
