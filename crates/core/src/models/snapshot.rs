use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single recorded (date → price) observation for one ticker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSnapshot {
    pub date: NaiveDate,
    pub price: f64,
}

/// Historical price snapshots, keyed by ticker.
///
/// Populated by buys, by report generation, and by the daily close-price
/// snapshot job; entries are never destroyed by normal operation. The
/// day-over-day report reads "yesterday's price" from here instead of
/// keeping a hidden in-process map, so the computation is a pure function
/// of persisted state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SnapshotBook {
    /// Ticker (upper-cased) → date-sorted snapshots.
    pub entries: HashMap<String, Vec<PriceSnapshot>>,
}

impl SnapshotBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a price observation for a ticker on a date.
    /// Maintains sorted order by date using binary search; a second
    /// observation on the same day overwrites the first, so the most
    /// recent one wins.
    pub fn record(&mut self, ticker: &str, date: NaiveDate, price: f64) {
        let entries = self.entries.entry(ticker.to_uppercase()).or_default();
        match entries.binary_search_by_key(&date, |s| s.date) {
            Ok(idx) => entries[idx].price = price,
            Err(idx) => entries.insert(idx, PriceSnapshot { date, price }),
        }
    }

    /// Get the recorded price for a ticker on an exact date.
    pub fn price_on(&self, ticker: &str, date: NaiveDate) -> Option<f64> {
        let entries = self.entries.get(&ticker.to_uppercase())?;
        entries
            .binary_search_by_key(&date, |s| s.date)
            .ok()
            .map(|idx| entries[idx].price)
    }

    /// Get the most recent recorded price strictly before `date`
    /// (the "yesterday" lookup for day-over-day reports).
    pub fn latest_before(&self, ticker: &str, date: NaiveDate) -> Option<f64> {
        let entries = self.entries.get(&ticker.to_uppercase())?;
        let idx = entries.partition_point(|s| s.date < date);
        if idx == 0 {
            None
        } else {
            Some(entries[idx - 1].price)
        }
    }

    /// Total number of snapshots across all tickers.
    pub fn total_entries(&self) -> usize {
        self.entries.values().map(|v| v.len()).sum()
    }

    /// Number of distinct tickers with at least one snapshot.
    pub fn ticker_count(&self) -> usize {
        self.entries.len()
    }
}
