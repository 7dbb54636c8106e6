//! Core error types for the Stockverse engine.
//!
//! Propagation policy: authentication and validation failures surface to the
//! initiating caller. Price lookup failures and aggregation inconsistencies
//! are recovered locally (fallback pricing, oversell clamping) and never
//! escape the aggregator or calculator.

use rust_decimal::Decimal;
use thiserror::Error;

use stockverse_market_data::MarketDataError;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the portfolio engine.
#[derive(Error, Debug)]
pub enum Error {
    /// A ledger mutation was attempted without an authenticated session.
    #[error("Authentication required: {0}")]
    AuthRequired(String),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Market data failure that reached the caller. Within the performance
    /// calculator these are recovered via the average-cost fallback instead.
    #[error("Market data operation failed: {0}")]
    MarketData(#[from] MarketDataError),

    #[error("CSV export failed: {0}")]
    Export(String),
}

/// Validation errors for transaction intake.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Symbol must not be empty")]
    EmptySymbol,

    #[error("Quantity must be a positive whole number of shares, got {0}")]
    InvalidQuantity(Decimal),

    #[error("Price must be positive, got {0}")]
    InvalidPrice(Decimal),

    /// Oversell rejected at the intake boundary. The aggregator's internal
    /// clamp only covers inconsistent data that bypassed this check.
    #[error("Cannot sell {requested} shares of {symbol}: only {held} held")]
    InsufficientShares {
        symbol: String,
        requested: Decimal,
        held: Decimal,
    },

    #[error("Failed to parse decimal number: {0}")]
    DecimalParse(#[from] rust_decimal::Error),
}

// === From implementations for common error types ===

impl From<rust_decimal::Error> for Error {
    fn from(err: rust_decimal::Error) -> Self {
        Error::Validation(ValidationError::DecimalParse(err))
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::Export(err.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Export(err.to_string())
    }
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}
