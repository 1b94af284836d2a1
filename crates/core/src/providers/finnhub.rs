use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use super::traits::QuoteProvider;
use crate::errors::CoreError;
use crate::models::report::PriceSelector;

const BASE_URL: &str = "https://finnhub.io/api/v1";

/// Finnhub API provider for stock quotes (primary source).
///
/// - **Requires**: API key (set via settings as `finnhub_api_key`).
/// - **Quote endpoint**: one `/quote` call carries all three selector
///   fields — `o` (open), `c` (current), `pc` (previous close).
/// - **Market clock**: `/stock/market-status` for the US exchange.
pub struct FinnhubProvider {
    client: Client,
    api_key: String,
}

impl FinnhubProvider {
    pub fn new(api_key: String) -> Self {
        let builder = Client::builder().timeout(Duration::from_secs(30));
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            api_key,
        }
    }

    async fn fetch_quote(&self, ticker: &str) -> Result<QuoteResponse, CoreError> {
        self.client
            .get(format!("{BASE_URL}/quote"))
            .query(&[
                ("symbol", ticker.to_uppercase().as_str()),
                ("token", self.api_key.as_str()),
            ])
            .send()
            .await?
            .json()
            .await
            .map_err(|e| CoreError::Api {
                provider: "Finnhub".into(),
                message: format!("Failed to parse quote for {ticker}: {e}"),
            })
    }
}

// ── Finnhub API response types ──────────────────────────────────────

/// Raw `/quote` response body. One call carries all three selector fields;
/// Finnhub leaves fields null (or omits them) for unknown symbols and
/// exceeded quotas.
#[derive(Debug, Deserialize)]
pub struct QuoteResponse {
    /// Open price of the day.
    pub o: Option<f64>,
    /// Current price.
    pub c: Option<f64>,
    /// Previous close price.
    pub pc: Option<f64>,
}

impl QuoteResponse {
    /// The field carrying the requested selector's price, when present.
    pub fn price_for(&self, selector: PriceSelector) -> Option<f64> {
        match selector {
            PriceSelector::Open => self.o,
            PriceSelector::Current => self.c,
            PriceSelector::Close => self.pc,
        }
    }
}

#[derive(Deserialize)]
struct MarketStatusResponse {
    #[serde(rename = "isOpen")]
    is_open: Option<bool>,
}

#[async_trait]
impl QuoteProvider for FinnhubProvider {
    fn name(&self) -> &str {
        "Finnhub"
    }

    async fn get_price(
        &self,
        ticker: &str,
        selector: PriceSelector,
    ) -> Result<f64, CoreError> {
        let quote = self.fetch_quote(ticker).await?;

        quote.price_for(selector).ok_or_else(|| CoreError::Api {
            provider: "Finnhub".into(),
            message: format!(
                "No {selector} price for {ticker}. API limit may be exceeded."
            ),
        })
    }

    async fn is_market_open(&self) -> Result<bool, CoreError> {
        let resp: MarketStatusResponse = self
            .client
            .get(format!("{BASE_URL}/stock/market-status"))
            .query(&[("exchange", "US"), ("token", self.api_key.as_str())])
            .send()
            .await?
            .json()
            .await
            .map_err(|e| CoreError::Api {
                provider: "Finnhub".into(),
                message: format!("Failed to parse market status: {e}"),
            })?;

        resp.is_open.ok_or_else(|| CoreError::Api {
            provider: "Finnhub".into(),
            message: "No market status in response".into(),
        })
    }
}
