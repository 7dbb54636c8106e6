use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One holding marked to market.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoldingPerformance {
    pub symbol: String,
    pub company_name: Option<String>,
    pub quantity: Decimal,
    pub average_cost: Decimal,
    /// Cost basis of the current quantity.
    pub total_cost: Decimal,
    /// Price used for the mark. Falls back to `average_cost` when the price
    /// lookup failed, which makes `profit_loss` zero for this symbol.
    pub current_price: Decimal,
    pub market_value: Decimal,
    pub profit_loss: Decimal,
}

/// Ephemeral portfolio-wide view, recomputed on demand. Not persisted.
///
/// The aggregate fields are exact sums of the per-symbol values. No rounding
/// happens here; presentation layers round for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceSnapshot {
    pub positions: Vec<HoldingPerformance>,
    pub total_purchase_cost: Decimal,
    pub total_market_value: Decimal,
    pub total_profit_loss: Decimal,
}

impl PerformanceSnapshot {
    pub fn empty() -> Self {
        Self {
            positions: Vec::new(),
            total_purchase_cost: Decimal::ZERO,
            total_market_value: Decimal::ZERO,
            total_profit_loss: Decimal::ZERO,
        }
    }
}

impl Default for PerformanceSnapshot {
    fn default() -> Self {
        Self::empty()
    }
}
