pub mod finnhub;
pub mod registry;
pub mod traits;
pub mod yahoo;
