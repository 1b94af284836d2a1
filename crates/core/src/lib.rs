pub mod errors;
pub mod models;
pub mod notifier;
pub mod providers;
pub mod services;
pub mod storage;

use models::{
    action::{Action, ActionRecord},
    dates,
    ledger::Ledger,
    position::Position,
    report::{DailyGainsReport, FundReport, PriceSelector, StockInfo},
    settings::Settings,
};
use providers::registry::QuoteRegistry;
use services::ledger_service::{LedgerService, SellOutcome};
use services::report_service::ReportService;
use storage::manager::StorageManager;

use errors::CoreError;

/// Main entry point for the fund tracker core library.
/// Holds the ledger state and the services that operate on it.
///
/// All mutating calls take `&mut self` and are expected to arrive one at a
/// time (one chat command at a time). The tracker provides no mutual
/// exclusion of its own — callers running it behind an async chat handler
/// must serialize access to the fund.
///
/// Dates cross this boundary as `MM-DD-YYYY` strings (the chat command
/// format) and are normalized before anything is stored.
#[must_use]
pub struct FundTracker {
    ledger: Ledger,
    ledger_service: LedgerService,
    report_service: ReportService,
    quotes: QuoteRegistry,
    /// Tracks whether any mutation has occurred since the last save/load.
    dirty: bool,
}

impl std::fmt::Debug for FundTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FundTracker")
            .field("funds", &self.ledger.funds())
            .field("positions", &self.ledger.positions.len())
            .field("history", &self.ledger.history.len())
            .field("snapshots", &self.ledger.snapshots.total_entries())
            .field("dirty", &self.dirty)
            .finish()
    }
}

impl FundTracker {
    /// Create a brand new empty fund with default settings.
    pub fn create_new() -> Self {
        Self::build(Ledger::new())
    }

    /// Load an existing ledger from JSON bytes.
    pub fn load_from_bytes(data: &[u8]) -> Result<Self, CoreError> {
        let ledger = StorageManager::load_from_bytes(data)?;
        Ok(Self::build(ledger))
    }

    /// Serialize the current ledger to JSON bytes.
    /// Clears the unsaved-changes flag on success.
    pub fn save_to_bytes(&mut self) -> Result<Vec<u8>, CoreError> {
        let bytes = StorageManager::save_to_bytes(&self.ledger)?;
        self.dirty = false;
        Ok(bytes)
    }

    /// Load the ledger from a file on disk.
    pub fn load_from_file(path: &str) -> Result<Self, CoreError> {
        let ledger = StorageManager::load_from_file(path)?;
        Ok(Self::build(ledger))
    }

    /// Save the ledger to a file on disk.
    /// Clears the unsaved-changes flag on success.
    pub fn save_to_file(&mut self, path: &str) -> Result<(), CoreError> {
        StorageManager::save_to_file(&self.ledger, path)?;
        self.dirty = false;
        Ok(())
    }

    // ── Actions ─────────────────────────────────────────────────────

    /// Deposit cash into the fund (negative amount = withdrawal).
    pub fn deposit(&mut self, amount: f64, date: &str) -> Result<(), CoreError> {
        let date = dates::parse_input_date(date)?;
        self.ledger_service.deposit(&mut self.ledger, amount, date)?;
        self.dirty = true;
        Ok(())
    }

    /// Buy shares. Rejected with `InsufficientFunds` when the cost would
    /// overdraw the balance; nothing is written in that case.
    #[allow(clippy::too_many_arguments)]
    pub fn buy(
        &mut self,
        ticker: &str,
        quantity: f64,
        price: f64,
        exit_price: Option<f64>,
        date: &str,
        pitchers: Vec<String>,
    ) -> Result<(), CoreError> {
        let date = dates::parse_input_date(date)?;
        self.ledger_service.buy(
            &mut self.ledger,
            ticker,
            quantity,
            price,
            exit_price,
            date,
            &pitchers,
        )?;
        self.dirty = true;
        Ok(())
    }

    /// Sell shares at the position's stored exit price. `None` quantity
    /// sells everything; over-selling is clamped to the held amount.
    pub fn sell(
        &mut self,
        ticker: &str,
        quantity: Option<f64>,
        date: &str,
    ) -> Result<SellOutcome, CoreError> {
        let date = dates::parse_input_date(date)?;
        let outcome = self.ledger_service.sell(&mut self.ledger, ticker, quantity, date)?;
        self.dirty = true;
        Ok(outcome)
    }

    /// Undo the most recent action (LIFO). Returns the undone action.
    pub fn undo_last(&mut self) -> Result<Action, CoreError> {
        let action = self.ledger_service.undo_last(&mut self.ledger)?;
        self.dirty = true;
        Ok(action)
    }

    /// Undo every recorded action, newest first. Returns how many actions
    /// were undone (0 for an empty log).
    pub fn undo_all(&mut self) -> Result<usize, CoreError> {
        let undone = self.ledger_service.undo_all(&mut self.ledger)?;
        if undone > 0 {
            self.dirty = true;
        }
        Ok(undone)
    }

    // ── Reports ─────────────────────────────────────────────────────

    /// Point-in-time performance report for the whole fund.
    pub async fn report(&mut self, selector: PriceSelector) -> Result<FundReport, CoreError> {
        let report = self
            .report_service
            .point_in_time(&mut self.ledger, &self.quotes, selector)
            .await?;
        // Fetched prices were recorded as snapshots.
        self.dirty = true;
        Ok(report)
    }

    /// Day-over-day performance report against stored snapshots.
    pub async fn day_over_day_report(&mut self) -> Result<DailyGainsReport, CoreError> {
        let report = self
            .report_service
            .day_over_day(&mut self.ledger, &self.quotes)
            .await?;
        self.dirty = true;
        Ok(report)
    }

    /// Detail view of a single position; `Ok(None)` for an unknown ticker.
    pub async fn stock_info(&mut self, ticker: &str) -> Result<Option<StockInfo>, CoreError> {
        let info = self
            .report_service
            .stock_info(&mut self.ledger, &self.quotes, ticker)
            .await?;
        if info.is_some() {
            self.dirty = true;
        }
        Ok(info)
    }

    /// Record today's close price for every held ticker (the once-per-day
    /// snapshot job). Returns the number of tickers snapshotted.
    pub async fn snapshot_daily(&mut self) -> Result<usize, CoreError> {
        let recorded = self
            .report_service
            .snapshot_daily(&mut self.ledger, &self.quotes)
            .await?;
        if recorded > 0 {
            self.dirty = true;
        }
        Ok(recorded)
    }

    /// Whether the market is currently open, per the quote providers.
    pub async fn is_market_open(&self) -> Result<bool, CoreError> {
        self.quotes.is_market_open().await
    }

    // ── Accessors ───────────────────────────────────────────────────

    /// Current cash balance, or `None` before the first deposit.
    #[must_use]
    pub fn funds(&self) -> Option<f64> {
        self.ledger.funds()
    }

    /// Look up a position by ticker (case-insensitive).
    #[must_use]
    pub fn position(&self, ticker: &str) -> Option<&Position> {
        self.ledger.position(ticker)
    }

    /// All open positions, ordered by ticker.
    #[must_use]
    pub fn positions(&self) -> Vec<&Position> {
        self.ledger.positions.values().collect()
    }

    /// Number of open positions.
    #[must_use]
    pub fn position_count(&self) -> usize {
        self.ledger.positions.len()
    }

    /// The action history, oldest first.
    #[must_use]
    pub fn history(&self) -> &[ActionRecord] {
        &self.ledger.history
    }

    /// Direct read access to the ledger (for glue that formats output).
    #[must_use]
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Returns `true` if the ledger has been modified since the last save
    /// or load.
    #[must_use]
    pub fn has_unsaved_changes(&self) -> bool {
        self.dirty
    }

    // ── Settings ────────────────────────────────────────────────────

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.ledger.settings
    }

    /// Set the Finnhub API key. Rebuilds the provider registry so the new
    /// key takes effect immediately.
    pub fn set_finnhub_api_key(&mut self, key: String) {
        self.ledger.settings.finnhub_api_key = Some(key);
        self.quotes = QuoteRegistry::new_with_defaults(
            self.ledger.settings.finnhub_api_key.as_deref(),
        );
        self.dirty = true;
    }

    /// Remove the Finnhub API key, falling back to keyless providers only.
    pub fn clear_finnhub_api_key(&mut self) -> bool {
        let removed = self.ledger.settings.finnhub_api_key.take().is_some();
        if removed {
            self.quotes = QuoteRegistry::new_with_defaults(None);
            self.dirty = true;
        }
        removed
    }

    /// Replace the whole provider registry (tests inject mock providers
    /// this way; glue can use it for custom provider stacks).
    pub fn set_quote_registry(&mut self, quotes: QuoteRegistry) {
        self.quotes = quotes;
    }

    // ── Internal ────────────────────────────────────────────────────

    fn build(ledger: Ledger) -> Self {
        let quotes = QuoteRegistry::new_with_defaults(ledger.settings.finnhub_api_key.as_deref());
        Self {
            ledger,
            ledger_service: LedgerService::new(),
            report_service: ReportService::new(),
            quotes,
            dirty: false,
        }
    }
}
