use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One reversible ledger action, with the exact parameters that were used
/// to perform it. Undo replays these stored parameters to compute the
/// algebraic inverse — it never recomputes from current state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Action {
    /// Cash deposit (negative amount = withdrawal).
    Fund { amount: f64, date: NaiveDate },

    /// Stock purchase.
    Add {
        ticker: String,
        quantity: f64,
        price: f64,
        exit_price: Option<f64>,
        date: NaiveDate,
        /// Pitcher names this buy actually introduced to the position
        /// (already-attributed names are not repeated here), so that undo
        /// can restore the prior attribution list exactly.
        pitchers: Vec<String>,
    },

    /// Stock sale. Carries a snapshot of the position fields at sell time:
    /// undoing a full close must re-create the row, and the stored record is
    /// the only place those fields survive.
    Delete {
        ticker: String,
        /// Quantity actually sold (already clamped to the held amount).
        quantity: f64,
        entry_price: f64,
        exit_price: Option<f64>,
        original_date: NaiveDate,
        /// The position's most-recent-transaction date before this sell.
        last_date: NaiveDate,
        pitchers: Vec<String>,
        date: NaiveDate,
    },
}

impl Action {
    /// Short name of the action kind, for logs and messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Action::Fund { .. } => "fund",
            Action::Add { .. } => "add",
            Action::Delete { .. } => "delete",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Fund { amount, date } => {
                write!(f, "fund ${amount:.2} on {date}")
            }
            Action::Add {
                ticker,
                quantity,
                price,
                ..
            } => write!(f, "add {quantity} {ticker} @ ${price:.2}"),
            Action::Delete {
                ticker, quantity, ..
            } => write!(f, "delete {quantity} {ticker}"),
        }
    }
}

/// Append-only log entry wrapping an [`Action`], in creation order.
/// The newest record is popped (and destroyed) by a successful undo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// Unique identifier, for logs and external references.
    pub id: Uuid,

    pub action: Action,
}

impl ActionRecord {
    pub fn new(action: Action) -> Self {
        Self {
            id: Uuid::new_v4(),
            action,
        }
    }
}
