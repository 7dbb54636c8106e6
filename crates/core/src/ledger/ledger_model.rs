//! Transaction domain models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Direction of a trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    Buy,
    Sell,
}

/// Immutable record of one trade event.
///
/// Appended to the ledger by a user action and never mutated or deleted.
/// The engine only reads transactions in ascending timestamp order, ties
/// broken by insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    /// Ticker, uppercase canonical form.
    pub symbol: String,
    /// Display name, best-effort.
    pub company_name: Option<String>,
    pub transaction_type: TransactionType,
    /// Positive whole number of shares.
    pub quantity: Decimal,
    /// Positive price per share at execution.
    pub price: Decimal,
    pub timestamp: DateTime<Utc>,
}

impl Transaction {
    /// Build a validated transaction with a fresh id and the current time.
    /// Callers go through `LedgerService`, which performs intake validation
    /// before constructing one of these.
    pub(crate) fn record(
        symbol: String,
        company_name: Option<String>,
        transaction_type: TransactionType,
        quantity: Decimal,
        price: Decimal,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            symbol,
            company_name,
            transaction_type,
            quantity,
            price,
            timestamp: Utc::now(),
        }
    }
}

/// Caller-supplied input for recording a trade. The direction comes from the
/// service operation invoked (`record_buy`/`record_sell`), and the symbol is
/// always an explicit parameter, never inferred from any selection state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    pub symbol: String,
    pub company_name: Option<String>,
    pub quantity: Decimal,
    pub price: Decimal,
}
