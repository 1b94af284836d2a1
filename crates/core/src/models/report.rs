use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Which upstream quote field a price fetch should read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriceSelector {
    /// Today's market open price.
    Open,
    /// The most recent traded price.
    Current,
    /// The previous market close price.
    Close,
}

impl std::fmt::Display for PriceSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PriceSelector::Open => write!(f, "open"),
            PriceSelector::Current => write!(f, "current"),
            PriceSelector::Close => write!(f, "close"),
        }
    }
}

/// Per-position row of a point-in-time performance report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockReportRow {
    pub ticker: String,
    pub quantity: f64,
    pub entry_price: f64,
    /// Fetched price for the requested selector.
    pub price: f64,
    pub gain_per_share: f64,
    pub total_gain: f64,
    /// Percentage gain over the entry price; 0.0 when the entry price is 0.
    pub gain_pct: f64,
}

/// Point-in-time performance of the whole fund against fetched prices.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FundReport {
    pub selector: PriceSelector,
    /// Remaining cash (0.0 when no balance exists yet).
    pub funds: f64,
    pub rows: Vec<StockReportRow>,
    /// Σ(price × qty) − Σ(entry × qty) over the rows that priced.
    pub total_fund_gain: f64,
    /// Fund-level gain normalized against (cash + total cost basis).
    pub total_fund_gain_pct: f64,
}

/// Per-position row of a day-over-day report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyGainRow {
    pub ticker: String,
    pub quantity: f64,
    pub yesterday_price: f64,
    pub today_price: f64,
    pub gain_per_share: f64,
    pub total_gain: f64,
    pub gain_pct: f64,
}

/// Day-over-day performance, rows sorted descending by percentage gain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyGainsReport {
    pub funds: f64,
    pub rows: Vec<DailyGainRow>,
    pub total_gain: f64,
    /// Normalized against (cash + Σ yesterday_price × qty).
    pub total_gain_pct: f64,
}

/// Detail view of a single held position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockInfo {
    pub ticker: String,
    pub entry_price: f64,
    pub quantity: f64,
    pub current_price: f64,
    /// entry_price × quantity.
    pub original_worth: f64,
    /// current_price × quantity.
    pub current_worth: f64,
    pub gain: f64,
    pub gain_pct: f64,
    pub pitchers: Vec<String>,
    pub date_bought: NaiveDate,
}
