pub mod action;
pub mod balance;
pub mod dates;
pub mod ledger;
pub mod position;
pub mod report;
pub mod settings;
pub mod snapshot;
