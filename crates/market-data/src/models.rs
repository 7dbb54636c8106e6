use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A point-in-time price for a single symbol.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuote {
    /// Ticker symbol, uppercase canonical form.
    pub symbol: String,

    /// Current price per share. Always positive.
    pub price: Decimal,

    /// Timestamp of the quote.
    pub timestamp: DateTime<Utc>,

    /// Source of the quote (FINNHUB, MOCK, etc.).
    pub source: String,
}

impl PriceQuote {
    pub fn new(symbol: String, price: Decimal, timestamp: DateTime<Utc>, source: String) -> Self {
        Self {
            symbol,
            price,
            timestamp,
            source,
        }
    }
}
