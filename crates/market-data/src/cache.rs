//! TTL cache wrapper for price sources.
//!
//! Process-wide, keyed by symbol. Lookups within the TTL window are served
//! from cache so repeated refreshes do not hammer the upstream provider.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::debug;

use crate::errors::MarketDataError;
use crate::models::PriceQuote;
use crate::provider::PriceSource;

/// Default time-to-live for cached quotes.
pub const DEFAULT_TTL: Duration = Duration::from_secs(60);

#[derive(Clone)]
struct CachedQuote {
    quote: PriceQuote,
    fetched_at: Instant,
}

/// A [`PriceSource`] decorator that caches quotes per symbol for a bounded
/// time. Failed lookups are not cached; the next call retries the upstream.
pub struct CachedPriceSource {
    inner: Arc<dyn PriceSource>,
    entries: DashMap<String, CachedQuote>,
    ttl: Duration,
}

impl CachedPriceSource {
    /// Wrap `inner` with the default 60-second TTL.
    pub fn new(inner: Arc<dyn PriceSource>) -> Self {
        Self::with_ttl(inner, DEFAULT_TTL)
    }

    pub fn with_ttl(inner: Arc<dyn PriceSource>, ttl: Duration) -> Self {
        Self {
            inner,
            entries: DashMap::new(),
            ttl,
        }
    }

    /// Drop all cached quotes.
    pub fn clear(&self) {
        self.entries.clear();
    }

    /// Age a cached entry, as if it had been fetched `age` ago.
    #[cfg(test)]
    fn backdate(&self, symbol: &str, age: Duration) {
        if let Some(mut entry) = self.entries.get_mut(symbol) {
            entry.fetched_at = Instant::now() - age;
        }
    }
}

#[async_trait]
impl PriceSource for CachedPriceSource {
    fn id(&self) -> &'static str {
        self.inner.id()
    }

    async fn get_price(&self, symbol: &str) -> Result<PriceQuote, MarketDataError> {
        let symbol = symbol.to_uppercase();

        // The map guard must not be held across the await below.
        let cached = self
            .entries
            .get(&symbol)
            .filter(|entry| entry.fetched_at.elapsed() < self.ttl)
            .map(|entry| entry.quote.clone());

        if let Some(quote) = cached {
            debug!("Serving {} from quote cache", symbol);
            return Ok(quote);
        }

        let quote = self.inner.get_price(&symbol).await?;
        self.entries.insert(
            symbol,
            CachedQuote {
                quote: quote.clone(),
                fetched_at: Instant::now(),
            },
        );
        Ok(quote)
    }
}
