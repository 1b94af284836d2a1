use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::action::ActionRecord;
use super::balance::FundBalance;
use super::position::Position;
use super::settings::Settings;
use super::snapshot::SnapshotBook;

/// The main data container: the four durable relations plus settings.
/// Everything in here gets serialized and saved as one JSON document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    /// Current cash balance; `None` until the first deposit.
    pub balance: Option<FundBalance>,

    /// Open positions keyed by upper-cased ticker. A BTreeMap keeps
    /// iteration (and therefore report row order before sorting)
    /// deterministic.
    pub positions: BTreeMap<String, Position>,

    /// Append-only action history in creation order; the tail is the
    /// next undo candidate.
    pub history: Vec<ActionRecord>,

    /// Historical price snapshots used for day-over-day comparisons.
    pub snapshots: SnapshotBook,

    #[serde(default)]
    pub settings: Settings,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current cash amount, or `None` when no balance exists yet.
    pub fn funds(&self) -> Option<f64> {
        self.balance.as_ref().map(|b| b.amount)
    }

    /// Look up a position by ticker (case-insensitive).
    pub fn position(&self, ticker: &str) -> Option<&Position> {
        self.positions.get(&ticker.to_uppercase())
    }
}
