//! Stockverse Core - ledger, holdings aggregation, and performance engine.
//!
//! The transaction ledger is the single source of truth; holdings and
//! performance snapshots are pure projections recomputed from it. Storage
//! and price providers are collaborators behind traits.

pub mod errors;
pub mod export;
pub mod ledger;
pub mod portfolio;

// Re-export common types
pub use errors::Error;
pub use errors::Result;
pub use portfolio::*;
