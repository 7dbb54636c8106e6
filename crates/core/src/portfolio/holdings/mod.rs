//! Holdings aggregation - folds the transaction ledger into current positions.

mod holdings_aggregator;
mod holdings_model;


pub use holdings_aggregator::aggregate_holdings;
pub use holdings_model::Holding;
