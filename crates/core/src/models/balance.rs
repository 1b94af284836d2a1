use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The fund's current cash balance.
///
/// Exactly one logical balance exists at any time; the ledger holds it as
/// `Option<FundBalance>` — `None` until the first deposit, mirroring the
/// "no balance row yet" state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundBalance {
    /// Current cash amount. Signed: withdrawals may drive it negative,
    /// but a buy is never allowed to.
    pub amount: f64,

    /// Date of the last change to the balance.
    pub date: NaiveDate,
}

impl FundBalance {
    pub fn new(amount: f64, date: NaiveDate) -> Self {
        Self { amount, date }
    }
}
