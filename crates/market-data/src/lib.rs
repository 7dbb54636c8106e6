//! Market data access for the Stockverse portfolio engine.
//!
//! This crate defines the price-source contract consumed by the performance
//! calculator, plus the concrete sources:
//! - [`FinnhubProvider`]: live quotes from the Finnhub API
//! - [`MockPriceSource`]: a bounded random walk for offline/demo use
//! - [`CachedPriceSource`]: a TTL cache wrapper over any source

pub mod cache;
pub mod errors;
pub mod models;
pub mod provider;

pub use cache::CachedPriceSource;
pub use errors::MarketDataError;
pub use models::PriceQuote;
pub use provider::{FinnhubProvider, MockPriceSource, PriceSource};
