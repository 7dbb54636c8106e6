//! Price source trait definition and concrete providers.

mod finnhub;
mod mock;

pub use finnhub::FinnhubProvider;
pub use mock::MockPriceSource;

use async_trait::async_trait;

use crate::errors::MarketDataError;
use crate::models::PriceQuote;

/// Trait for current-price lookup.
///
/// Implement this trait to add support for a new price source. Sources must
/// fail (or time out) rather than return a non-positive price; consumers rely
/// on every returned quote carrying a positive price.
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Unique identifier for this source, e.g. "FINNHUB" or "MOCK".
    /// Used for logging and as the `source` field of returned quotes.
    fn id(&self) -> &'static str;

    /// Fetch the current price for a symbol.
    ///
    /// The symbol is matched case-insensitively; the returned quote carries
    /// the uppercase canonical form.
    async fn get_price(&self, symbol: &str) -> Result<PriceQuote, MarketDataError>;
}
