//! Error types for market data operations.

use thiserror::Error;

/// Errors that can occur while fetching a price.
///
/// A price source fails rather than returning invalid data: a quote that
/// would carry a non-positive price surfaces as [`MarketDataError::InvalidPrice`].
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// The provider does not know the requested symbol.
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    /// The provider returned a price that failed validation (zero, negative,
    /// or unrepresentable).
    #[error("Provider {provider} returned an invalid price for {symbol}")]
    InvalidPrice { provider: String, symbol: String },

    /// The provider rate limited the request (HTTP 429).
    #[error("Rate limited: {provider}")]
    RateLimited { provider: String },

    /// The request to the provider timed out.
    #[error("Timeout: {provider}")]
    Timeout { provider: String },

    /// A provider-specific error occurred.
    #[error("Provider error: {provider} - {message}")]
    ProviderError { provider: String, message: String },

    /// A network error occurred while communicating with a provider.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}
