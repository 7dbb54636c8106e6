//! The aggregation fold: ordered transactions in, current positions out.

use std::collections::HashMap;

use log::warn;
use rust_decimal::Decimal;

use crate::ledger::{Transaction, TransactionType};
use crate::portfolio::holdings::Holding;

/// Running accumulator for one symbol during an aggregation pass.
#[derive(Debug, Clone)]
struct PositionAccumulator {
    symbol: String,
    company_name: Option<String>,
    quantity: Decimal,
    total_cost: Decimal,
}

impl PositionAccumulator {
    fn new(symbol: String) -> Self {
        Self {
            symbol,
            company_name: None,
            quantity: Decimal::ZERO,
            total_cost: Decimal::ZERO,
        }
    }

    fn average_cost(&self) -> Decimal {
        if self.quantity > Decimal::ZERO {
            self.total_cost / self.quantity
        } else {
            Decimal::ZERO
        }
    }

    /// Weighted-average basis: buying shifts the average toward the new
    /// trade's price.
    fn apply_buy(&mut self, quantity: Decimal, price: Decimal) {
        self.total_cost += quantity * price;
        self.quantity += quantity;
    }

    /// Reduce the basis by the average cost of the shares sold. The sale
    /// price never touches the remaining basis; it only matters for
    /// mark-to-market P/L downstream.
    fn apply_sell(&mut self, quantity: Decimal) {
        if self.quantity > Decimal::ZERO {
            let average = self.average_cost();
            self.total_cost -= quantity * average;
        }
        self.quantity -= quantity;

        // Oversell (out-of-order or inconsistent data): clamp to a flat
        // position instead of propagating negative state. Intake validation
        // rejects oversells before they reach the ledger; this is the
        // last-resort path.
        if self.quantity < Decimal::ZERO {
            warn!(
                "Aggregation inconsistency for {}: sell exceeds held quantity, clamping to zero",
                self.symbol
            );
            self.quantity = Decimal::ZERO;
            self.total_cost = Decimal::ZERO;
        }
        // Rounding residue on a fully liquidated position.
        if self.quantity.is_zero() && self.total_cost < Decimal::ZERO {
            self.total_cost = Decimal::ZERO;
        }
    }
}

/// Fold an ordered transaction sequence into current holdings.
///
/// Pure and deterministic: same input, same output. The result is ordered by
/// first appearance of each symbol in the sequence; fully liquidated symbols
/// are omitted. An empty sequence yields an empty result.
pub fn aggregate_holdings(transactions: &[Transaction]) -> Vec<Holding> {
    let mut order: Vec<String> = Vec::new();
    let mut accumulators: HashMap<String, PositionAccumulator> = HashMap::new();

    for transaction in transactions {
        let symbol = transaction.symbol.to_uppercase();
        let accumulator = accumulators.entry(symbol.clone()).or_insert_with(|| {
            order.push(symbol.clone());
            PositionAccumulator::new(symbol)
        });

        if let Some(name) = transaction
            .company_name
            .as_deref()
            .filter(|name| !name.is_empty())
        {
            accumulator.company_name = Some(name.to_string());
        }

        match transaction.transaction_type {
            TransactionType::Buy => {
                accumulator.apply_buy(transaction.quantity, transaction.price)
            }
            TransactionType::Sell => accumulator.apply_sell(transaction.quantity),
        }
    }

    order
        .into_iter()
        .filter_map(|symbol| accumulators.remove(&symbol))
        .filter(|accumulator| accumulator.quantity > Decimal::ZERO)
        .map(|accumulator| Holding {
            symbol: accumulator.symbol,
            company_name: accumulator.company_name,
            quantity: accumulator.quantity,
            total_cost: accumulator.total_cost,
        })
        .collect()
}
