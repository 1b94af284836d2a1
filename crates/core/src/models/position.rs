use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An open holding in a single ticker.
///
/// A position only exists while its quantity is positive; selling (or
/// undoing a buy) down to zero removes the row entirely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Ticker symbol, always stored upper-cased (unique key in the ledger).
    pub ticker: String,

    /// Number of shares held (> 0).
    pub quantity: f64,

    /// Average entry price per share. Top-up buys do NOT recompute a
    /// weighted average — the first purchase price sticks.
    pub entry_price: f64,

    /// Pre-planned target sale price. Sell revenue is computed from this,
    /// not from the live market price.
    pub exit_price: Option<f64>,

    /// Date of the first buy; preserved across top-ups.
    pub original_date: NaiveDate,

    /// Date of the most recent transaction touching this position.
    pub last_date: NaiveDate,

    /// People credited with pitching this position (attribution only).
    #[serde(default)]
    pub pitchers: Vec<String>,
}

impl Position {
    pub fn new(
        ticker: impl Into<String>,
        quantity: f64,
        entry_price: f64,
        exit_price: Option<f64>,
        date: NaiveDate,
        pitchers: Vec<String>,
    ) -> Self {
        Self {
            ticker: ticker.into().to_uppercase(),
            quantity,
            entry_price,
            exit_price,
            original_date: date,
            last_date: date,
            pitchers,
        }
    }

    /// Total cost basis of the position (entry price × quantity).
    pub fn cost_basis(&self) -> f64 {
        self.entry_price * self.quantity
    }

    /// Merge new pitcher names into the attribution list, skipping duplicates
    /// while preserving insertion order.
    pub fn merge_pitchers(&mut self, new: &[String]) {
        for name in new {
            if !self.pitchers.iter().any(|p| p == name) {
                self.pitchers.push(name.clone());
            }
        }
    }
}
