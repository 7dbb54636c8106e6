//! Marks holdings to market using an injected price source.

use std::sync::Arc;

use async_trait::async_trait;
use futures::future::join_all;
use log::{debug, warn};

use stockverse_market_data::PriceSource;

use crate::portfolio::holdings::Holding;
use crate::portfolio::performance::{HoldingPerformance, PerformanceSnapshot};

#[async_trait]
pub trait PerformanceServiceTrait: Send + Sync {
    async fn calculate_performance(&self, holdings: &[Holding]) -> PerformanceSnapshot;
}

/// Computes market value and profit/loss for a set of holdings.
///
/// Price lookups run concurrently per symbol. A failed lookup never fails the
/// snapshot: the symbol falls back to its own average cost as the mark, so
/// its profit/loss degrades to zero while every other symbol is unaffected.
pub struct PerformanceService {
    price_source: Arc<dyn PriceSource>,
}

impl PerformanceService {
    pub fn new(price_source: Arc<dyn PriceSource>) -> Self {
        Self { price_source }
    }
}

#[async_trait]
impl PerformanceServiceTrait for PerformanceService {
    async fn calculate_performance(&self, holdings: &[Holding]) -> PerformanceSnapshot {
        if holdings.is_empty() {
            return PerformanceSnapshot::empty();
        }
        debug!("Calculating performance for {} holdings", holdings.len());

        let lookups = holdings.iter().map(|holding| {
            let price_source = self.price_source.clone();
            let symbol = holding.symbol.clone();
            async move { price_source.get_price(&symbol).await }
        });
        let results = join_all(lookups).await;

        let mut snapshot = PerformanceSnapshot::empty();
        for (holding, result) in holdings.iter().zip(results) {
            let current_price = match result {
                Ok(quote) => quote.price,
                Err(e) => {
                    warn!(
                        "Price unavailable for {}: {}. Falling back to average cost.",
                        holding.symbol, e
                    );
                    holding.average_cost()
                }
            };

            let market_value = holding.quantity * current_price;
            let profit_loss = market_value - holding.total_cost;

            snapshot.total_purchase_cost += holding.total_cost;
            snapshot.total_market_value += market_value;
            snapshot.positions.push(HoldingPerformance {
                symbol: holding.symbol.clone(),
                company_name: holding.company_name.clone(),
                quantity: holding.quantity,
                average_cost: holding.average_cost(),
                total_cost: holding.total_cost,
                current_price,
                market_value,
                profit_loss,
            });
        }
        snapshot.total_profit_loss = snapshot.total_market_value - snapshot.total_purchase_cost;
        snapshot
    }
}
