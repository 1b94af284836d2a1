use chrono::NaiveDate;

use crate::errors::CoreError;
use crate::models::action::{Action, ActionRecord};
use crate::models::balance::FundBalance;
use crate::models::ledger::Ledger;
use crate::models::position::Position;

/// Result of a sell, reported back to the caller (chat glue formats it).
#[derive(Debug, Clone, PartialEq)]
pub struct SellOutcome {
    pub ticker: String,
    /// Quantity actually sold (clamped to the held amount).
    pub quantity_sold: f64,
    /// Revenue credited to the fund: quantity_sold × stored exit price.
    pub revenue: f64,
    /// Whether the position was fully closed and removed.
    pub closed: bool,
}

/// The action engine: applies and reverses the reversible ledger actions
/// (deposit, buy, sell, undo), enforcing the money-conservation invariants.
///
/// Pure business logic — no I/O, no API calls. Each mutator sequences its
/// sub-steps (balance, position, history) in order within one call and
/// rejects invalid operations before any write.
pub struct LedgerService;

impl LedgerService {
    pub fn new() -> Self {
        Self
    }

    /// Add `amount` to the fund balance (negative = withdrawal), inserting
    /// the balance if none exists yet. Deposits are trusted: the resulting
    /// balance is not validated.
    pub fn deposit(&self, ledger: &mut Ledger, amount: f64, date: NaiveDate) -> Result<(), CoreError> {
        if !amount.is_finite() {
            return Err(CoreError::ValidationError(
                "Deposit amount must be a finite number".into(),
            ));
        }

        match &mut ledger.balance {
            Some(balance) => {
                balance.amount += amount;
                balance.date = date;
            }
            None => ledger.balance = Some(FundBalance::new(amount, date)),
        }

        ledger
            .history
            .push(ActionRecord::new(Action::Fund { amount, date }));
        Ok(())
    }

    /// Buy `quantity` shares of `ticker` at `price` per share.
    ///
    /// Rejected with `InsufficientFunds` before any write when the cost
    /// would overdraw the balance (or no balance exists). On success the
    /// balance is debited, the position upserted (top-ups keep the original
    /// entry price and first-buy date, and merge pitcher attributions), a
    /// price snapshot is recorded, and the action is appended to history.
    pub fn buy(
        &self,
        ledger: &mut Ledger,
        ticker: &str,
        quantity: f64,
        price: f64,
        exit_price: Option<f64>,
        date: NaiveDate,
        pitchers: &[String],
    ) -> Result<(), CoreError> {
        if !quantity.is_finite() || quantity <= 0.0 {
            return Err(CoreError::ValidationError(
                "Buy quantity must be positive".into(),
            ));
        }
        if !price.is_finite() || price < 0.0 {
            return Err(CoreError::ValidationError(
                "Buy price must be finite and non-negative".into(),
            ));
        }

        let ticker = ticker.to_uppercase();
        let cost = quantity * price;
        let available = ledger.funds().unwrap_or(0.0);
        if ledger.balance.is_none() || available - cost < 0.0 {
            return Err(CoreError::InsufficientFunds {
                needed: cost,
                available,
            });
        }

        // Debit the balance. Checked above, so this never goes negative.
        if let Some(balance) = &mut ledger.balance {
            balance.amount -= cost;
            balance.date = date;
        }

        // Upsert the position. The pitcher names this buy actually
        // introduces are what the undo record must remove again.
        let added = match ledger.positions.get_mut(&ticker) {
            Some(position) => {
                let added = dedup_new_names(&position.pitchers, pitchers);
                position.quantity += quantity;
                position.last_date = date;
                position.merge_pitchers(&added);
                added
            }
            None => {
                let added = dedup_new_names(&[], pitchers);
                ledger.positions.insert(
                    ticker.clone(),
                    Position::new(ticker.as_str(), quantity, price, exit_price, date, added.clone()),
                );
                added
            }
        };

        ledger.snapshots.record(&ticker, date, price);

        ledger.history.push(ActionRecord::new(Action::Add {
            ticker,
            quantity,
            price,
            exit_price,
            date,
            pitchers: added,
        }));
        Ok(())
    }

    /// Sell shares of `ticker`. `None` quantity means sell everything held;
    /// a quantity greater than held is clamped to the held amount, not an
    /// error. Revenue is `quantity × stored exit price` (the pre-planned
    /// target, not the live market price; 0 when no exit price was set).
    pub fn sell(
        &self,
        ledger: &mut Ledger,
        ticker: &str,
        quantity: Option<f64>,
        date: NaiveDate,
    ) -> Result<SellOutcome, CoreError> {
        if let Some(q) = quantity {
            if !q.is_finite() || q <= 0.0 {
                return Err(CoreError::ValidationError(
                    "Sell quantity must be positive".into(),
                ));
            }
        }

        let ticker = ticker.to_uppercase();
        let position = ledger
            .positions
            .get_mut(&ticker)
            .ok_or_else(|| CoreError::PositionNotFound(ticker.clone()))?;

        let held = position.quantity;
        let sold = quantity.unwrap_or(held).min(held);
        let revenue = sold * position.exit_price.unwrap_or(0.0);

        // Snapshot the row before mutating it; a full-close undo has to
        // re-create it from the stored record alone.
        let record = Action::Delete {
            ticker: ticker.clone(),
            quantity: sold,
            entry_price: position.entry_price,
            exit_price: position.exit_price,
            original_date: position.original_date,
            last_date: position.last_date,
            pitchers: position.pitchers.clone(),
            date,
        };

        let remaining = held - sold;
        let closed = remaining <= f64::EPSILON;
        if closed {
            ledger.positions.remove(&ticker);
        } else {
            position.quantity = remaining;
            position.last_date = date;
        }

        match &mut ledger.balance {
            Some(balance) => {
                balance.amount += revenue;
                balance.date = date;
            }
            // No balance row should not swallow the credit.
            None => ledger.balance = Some(FundBalance::new(revenue, date)),
        }

        ledger.history.push(ActionRecord::new(record));
        Ok(SellOutcome {
            ticker,
            quantity_sold: sold,
            revenue,
            closed,
        })
    }

    /// Pop the most recent action and apply its exact inverse from the
    /// stored parameters. Returns the undone action.
    ///
    /// The popped record is always removed, even when a sub-step finds
    /// nothing left to reverse. The reversal is NOT atomic across the
    /// balance and position updates: a crash mid-undo can leave state
    /// partially reversed.
    pub fn undo_last(&self, ledger: &mut Ledger) -> Result<Action, CoreError> {
        let record = ledger.history.pop().ok_or(CoreError::NoHistory)?;

        match &record.action {
            Action::Fund { amount, .. } => {
                if let Some(balance) = &mut ledger.balance {
                    let remaining = balance.amount - amount;
                    // Known sharp edge: reversing a deposit after later
                    // spending can leave <= 0 here, and the balance row is
                    // dropped rather than clamped. Keeps "undo everything"
                    // land exactly on the pristine empty state.
                    if remaining <= 0.0 {
                        ledger.balance = None;
                    } else {
                        balance.amount = remaining;
                    }
                }
            }
            Action::Add {
                ticker,
                quantity,
                price,
                date,
                pitchers,
                ..
            } => {
                let cost = quantity * price;
                match &mut ledger.balance {
                    Some(balance) => {
                        balance.amount += cost;
                        balance.date = *date;
                    }
                    None => ledger.balance = Some(FundBalance::new(cost, *date)),
                }

                if let Some(position) = ledger.positions.get_mut(ticker) {
                    let remaining = position.quantity - quantity;
                    if remaining <= f64::EPSILON {
                        ledger.positions.remove(ticker);
                    } else {
                        position.quantity = remaining;
                        position.pitchers.retain(|p| !pitchers.contains(p));
                    }
                }
            }
            Action::Delete {
                ticker,
                quantity,
                entry_price,
                exit_price,
                original_date,
                last_date,
                pitchers,
                date,
            } => {
                let revenue = quantity * exit_price.unwrap_or(0.0);
                if let Some(balance) = &mut ledger.balance {
                    balance.amount -= revenue;
                    balance.date = *date;
                }

                match ledger.positions.get_mut(ticker) {
                    Some(position) => {
                        position.quantity += quantity;
                        position.last_date = *last_date;
                    }
                    None => {
                        ledger.positions.insert(
                            ticker.clone(),
                            Position {
                                ticker: ticker.clone(),
                                quantity: *quantity,
                                entry_price: *entry_price,
                                exit_price: *exit_price,
                                original_date: *original_date,
                                last_date: *last_date,
                                pitchers: pitchers.clone(),
                            },
                        );
                    }
                }
            }
        }

        log::debug!("undid action: {}", record.action);
        Ok(record.action)
    }

    /// Undo every recorded action, newest first, until the log is empty.
    /// Returns how many actions were undone (0 for an empty log).
    pub fn undo_all(&self, ledger: &mut Ledger) -> Result<usize, CoreError> {
        let mut undone = 0;
        while !ledger.history.is_empty() {
            self.undo_last(ledger)?;
            undone += 1;
        }
        Ok(undone)
    }
}

impl Default for LedgerService {
    fn default() -> Self {
        Self::new()
    }
}

/// Names from `requested` that are not already in `existing`, deduplicated
/// among themselves, in input order.
fn dedup_new_names(existing: &[String], requested: &[String]) -> Vec<String> {
    let mut added: Vec<String> = Vec::new();
    for name in requested {
        let name = name.trim();
        if name.is_empty() {
            continue;
        }
        if existing.iter().any(|p| p == name) || added.iter().any(|p| p == name) {
            continue;
        }
        added.push(name.to_string());
    }
    added
}
