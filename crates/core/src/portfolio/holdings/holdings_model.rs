use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Aggregated position for one symbol.
///
/// Derived data: recomputed from scratch on every ledger change, never
/// persisted. `total_cost` is the basis attributed to the shares currently
/// held, not cumulative lifetime spend.
///
/// Invariants maintained by the aggregator: `quantity >= 0`, and
/// `quantity == 0` implies `total_cost == 0` (such positions are dropped
/// from the exposed set anyway).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    /// Ticker, uppercase canonical form.
    pub symbol: String,
    /// Last non-empty display name seen in the transaction stream.
    pub company_name: Option<String>,
    /// Net shares currently held.
    pub quantity: Decimal,
    /// Cost basis of the current quantity.
    pub total_cost: Decimal,
}

impl Holding {
    /// Blended weighted-average cost per share; zero for an empty position.
    pub fn average_cost(&self) -> Decimal {
        if self.quantity > Decimal::ZERO {
            self.total_cost / self.quantity
        } else {
            Decimal::ZERO
        }
    }
}
