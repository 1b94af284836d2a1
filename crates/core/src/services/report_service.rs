use crate::errors::CoreError;
use crate::models::ledger::Ledger;
use crate::models::position::Position;
use crate::models::report::{
    DailyGainRow, DailyGainsReport, FundReport, PriceSelector, StockInfo, StockReportRow,
};
use crate::providers::registry::QuoteRegistry;

/// The report engine: joins current positions with fetched and stored
/// prices into point-in-time and day-over-day performance summaries.
///
/// Stateless between calls. Per-ticker fetch failures are logged and that
/// row is skipped — a partial report is better than none. Every price that
/// is fetched gets recorded into the ledger's snapshot book, which is what
/// the day-over-day "yesterday" lookup reads.
pub struct ReportService;

impl ReportService {
    pub fn new() -> Self {
        Self
    }

    /// Performance of every position against prices fetched for `selector`,
    /// plus fund-level aggregates. An empty fund yields an empty row list
    /// and zero gains, not an error.
    pub async fn point_in_time(
        &self,
        ledger: &mut Ledger,
        quotes: &QuoteRegistry,
        selector: PriceSelector,
    ) -> Result<FundReport, CoreError> {
        let positions: Vec<Position> = ledger.positions.values().cloned().collect();
        let today = chrono::Utc::now().date_naive();

        let mut rows = Vec::with_capacity(positions.len());
        let mut total_worth = 0.0;
        let mut total_basis = 0.0;

        for position in &positions {
            let price = match quotes.get_price(&position.ticker, selector).await {
                Ok(p) => p,
                Err(e) => {
                    log::warn!("skipping {} in report: {e}", position.ticker);
                    continue;
                }
            };
            ledger.snapshots.record(&position.ticker, today, price);

            let gain_per_share = price - position.entry_price;
            let total_gain = gain_per_share * position.quantity;
            total_worth += price * position.quantity;
            total_basis += position.cost_basis();

            rows.push(StockReportRow {
                ticker: position.ticker.clone(),
                quantity: position.quantity,
                entry_price: position.entry_price,
                price,
                gain_per_share,
                total_gain,
                gain_pct: pct_gain(gain_per_share, position.entry_price),
            });
        }

        let funds = ledger.funds().unwrap_or(0.0);
        let total_fund_gain = total_worth - total_basis;

        Ok(FundReport {
            selector,
            funds,
            rows,
            total_fund_gain,
            total_fund_gain_pct: pct_of(total_fund_gain, funds + total_basis),
        })
    }

    /// Day-over-day performance: yesterday's price comes from the most
    /// recent stored snapshot before today, today's from a live `Current`
    /// fetch. A ticker with no prior snapshot falls back to today's price
    /// (zero delta) — degraded, not an error. Rows are sorted descending by
    /// percentage gain.
    pub async fn day_over_day(
        &self,
        ledger: &mut Ledger,
        quotes: &QuoteRegistry,
    ) -> Result<DailyGainsReport, CoreError> {
        let positions: Vec<Position> = ledger.positions.values().cloned().collect();
        let today = chrono::Utc::now().date_naive();

        let mut rows = Vec::with_capacity(positions.len());
        let mut total_gain = 0.0;
        let mut yesterday_basis = 0.0;

        for position in &positions {
            let today_price = match quotes.get_price(&position.ticker, PriceSelector::Current).await
            {
                Ok(p) => p,
                Err(e) => {
                    log::warn!("skipping {} in daily report: {e}", position.ticker);
                    continue;
                }
            };

            let yesterday_price = ledger
                .snapshots
                .latest_before(&position.ticker, today)
                .unwrap_or(today_price);

            ledger.snapshots.record(&position.ticker, today, today_price);

            let gain_per_share = today_price - yesterday_price;
            let row_gain = gain_per_share * position.quantity;
            total_gain += row_gain;
            yesterday_basis += yesterday_price * position.quantity;

            rows.push(DailyGainRow {
                ticker: position.ticker.clone(),
                quantity: position.quantity,
                yesterday_price,
                today_price,
                gain_per_share,
                total_gain: row_gain,
                gain_pct: pct_gain(gain_per_share, yesterday_price),
            });
        }

        rows.sort_by(|a, b| {
            b.gain_pct
                .partial_cmp(&a.gain_pct)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let funds = ledger.funds().unwrap_or(0.0);
        Ok(DailyGainsReport {
            funds,
            rows,
            total_gain,
            total_gain_pct: pct_of(total_gain, funds + yesterday_basis),
        })
    }

    /// Detail view of one position against its live price. `Ok(None)` for a
    /// ticker with no position; a failed fetch for this single requested
    /// ticker IS an error, unlike in the multi-row reports.
    pub async fn stock_info(
        &self,
        ledger: &mut Ledger,
        quotes: &QuoteRegistry,
        ticker: &str,
    ) -> Result<Option<StockInfo>, CoreError> {
        let position = match ledger.position(ticker) {
            Some(p) => p.clone(),
            None => return Ok(None),
        };

        let current_price = quotes
            .get_price(&position.ticker, PriceSelector::Current)
            .await?;
        let today = chrono::Utc::now().date_naive();
        ledger.snapshots.record(&position.ticker, today, current_price);

        let original_worth = position.cost_basis();
        let current_worth = current_price * position.quantity;
        let gain = current_worth - original_worth;

        Ok(Some(StockInfo {
            ticker: position.ticker.clone(),
            entry_price: position.entry_price,
            quantity: position.quantity,
            current_price,
            original_worth,
            current_worth,
            gain,
            gain_pct: pct_of(gain, original_worth),
            pitchers: position.pitchers.clone(),
            date_bought: position.original_date,
        }))
    }

    /// Record today's close price for every held ticker, seeding tomorrow's
    /// "yesterday" lookup. Intended to run once per trading day. Returns the
    /// number of tickers snapshotted; failed fetches are logged and skipped.
    pub async fn snapshot_daily(
        &self,
        ledger: &mut Ledger,
        quotes: &QuoteRegistry,
    ) -> Result<usize, CoreError> {
        let tickers: Vec<String> = ledger.positions.keys().cloned().collect();
        let today = chrono::Utc::now().date_naive();

        let mut recorded = 0;
        for ticker in &tickers {
            match quotes.get_price(ticker, PriceSelector::Close).await {
                Ok(price) => {
                    ledger.snapshots.record(ticker, today, price);
                    recorded += 1;
                }
                Err(e) => log::warn!("daily snapshot skipped {ticker}: {e}"),
            }
        }

        Ok(recorded)
    }
}

impl Default for ReportService {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-share gain as a percentage of the base price; 0.0 when the base is 0
/// (a zero entry price must not divide).
fn pct_gain(gain_per_share: f64, base: f64) -> f64 {
    if base == 0.0 {
        0.0
    } else {
        gain_per_share / base * 100.0
    }
}

/// A gain as a percentage of an arbitrary denominator; 0.0 when the
/// denominator is 0.
fn pct_of(gain: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        gain / denominator * 100.0
    }
}
