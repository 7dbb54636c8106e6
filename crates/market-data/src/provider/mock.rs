//! Mock price source producing a bounded random walk.
//!
//! Used when no API key is configured and in tests/demos. Each call moves the
//! symbol's price by at most `max_step_pct` relative to the previously
//! returned value, clamped to a positive minimum.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use rand::Rng;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use tracing::warn;

use crate::errors::MarketDataError;
use crate::models::PriceQuote;
use crate::provider::PriceSource;

const PROVIDER_ID: &str = "MOCK";

/// Default step bound: +/- 2% per call.
const DEFAULT_MAX_STEP_PCT: f64 = 0.02;

/// Floor applied to every returned price.
const MIN_PRICE: Decimal = Decimal::from_parts(1, 0, 0, false, 2); // 0.01

/// Starting price for symbols without a seeded base.
const DEFAULT_BASE_PRICE: Decimal = Decimal::from_parts(10000, 0, 0, false, 2); // 100.00

/// Mock price source.
///
/// Prices walk from the last returned value, so repeated lookups for the same
/// symbol simulate market movement rather than jumping around independently.
pub struct MockPriceSource {
    last_prices: Mutex<HashMap<String, Decimal>>,
    max_step_pct: f64,
}

impl MockPriceSource {
    /// Create a mock source seeded with a handful of well-known tickers.
    pub fn new() -> Self {
        let mut seeds = HashMap::new();
        for (symbol, cents) in [
            ("AAPL", 17543i64),
            ("GOOGL", 14256),
            ("MSFT", 41230),
            ("AMZN", 17822),
            ("TSLA", 19357),
            ("NVDA", 87528),
            ("AMD", 18049),
            ("META", 49624),
            ("NFLX", 60588),
        ] {
            seeds.insert(symbol.to_string(), Decimal::new(cents, 2));
        }

        Self {
            last_prices: Mutex::new(seeds),
            max_step_pct: DEFAULT_MAX_STEP_PCT,
        }
    }

    /// Create a mock source with a custom step bound (fraction, e.g. 0.05).
    pub fn with_max_step_pct(max_step_pct: f64) -> Self {
        Self {
            max_step_pct,
            ..Self::new()
        }
    }

    fn lock_prices(&self) -> MutexGuard<'_, HashMap<String, Decimal>> {
        self.last_prices.lock().unwrap_or_else(|poisoned| {
            warn!("Mock price table mutex was poisoned, recovering");
            poisoned.into_inner()
        })
    }
}

impl Default for MockPriceSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PriceSource for MockPriceSource {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn get_price(&self, symbol: &str) -> Result<PriceQuote, MarketDataError> {
        let symbol = symbol.to_uppercase();

        let mut prices = self.lock_prices();
        let previous = *prices.entry(symbol.clone()).or_insert(DEFAULT_BASE_PRICE);

        let step = rand::thread_rng().gen_range(-self.max_step_pct..=self.max_step_pct);
        let factor =
            Decimal::ONE + Decimal::from_f64(step).unwrap_or(Decimal::ZERO);
        let next = (previous * factor).max(MIN_PRICE);
        prices.insert(symbol.clone(), next);
        drop(prices);

        Ok(PriceQuote::new(
            symbol,
            next,
            Utc::now(),
            PROVIDER_ID.to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_price_always_positive() {
        let source = MockPriceSource::with_max_step_pct(0.05);
        for _ in 0..200 {
            let quote = source.get_price("AAPL").await.unwrap();
            assert!(quote.price >= MIN_PRICE);
        }
    }

    #[tokio::test]
    async fn test_walk_is_bounded_per_call() {
        let source = MockPriceSource::new();
        let mut previous = source.get_price("MSFT").await.unwrap().price;
        for _ in 0..50 {
            let next = source.get_price("MSFT").await.unwrap().price;
            let bound = previous * dec!(0.0201); // 2% plus float conversion slack
            assert!((next - previous).abs() <= bound);
            previous = next;
        }
    }

    #[tokio::test]
    async fn test_unknown_symbol_starts_from_default_base() {
        let source = MockPriceSource::new();
        let quote = source.get_price("zzzz").await.unwrap();
        assert_eq!(quote.symbol, "ZZZZ");
        // First step away from the 100.00 base stays within the walk bound.
        assert!(quote.price >= dec!(98.00) && quote.price <= dec!(102.00));
    }

    #[tokio::test]
    async fn test_symbol_canonicalized_uppercase() {
        let source = MockPriceSource::new();
        let a = source.get_price("aapl").await.unwrap();
        assert_eq!(a.symbol, "AAPL");
        assert_eq!(a.source, "MOCK");
    }
}
