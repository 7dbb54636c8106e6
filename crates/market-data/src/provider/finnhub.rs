//! Finnhub price provider.
//!
//! Fetches current prices from the Finnhub `/quote` endpoint.
//! Finnhub free tier is limited to 60 API calls per minute.
//! API documentation: https://finnhub.io/docs/api

use std::time::Duration;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use reqwest::Client;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::debug;

use crate::errors::MarketDataError;
use crate::models::PriceQuote;
use crate::provider::PriceSource;

const BASE_URL: &str = "https://finnhub.io/api/v1";
const PROVIDER_ID: &str = "FINNHUB";

/// Response from the /quote endpoint.
#[derive(Debug, Deserialize)]
struct QuoteResponse {
    /// Current price. Finnhub returns 0 for unknown symbols.
    c: Option<f64>,
    /// Quote timestamp (Unix seconds).
    t: Option<i64>,
}

/// Finnhub market data provider.
pub struct FinnhubProvider {
    client: Client,
    api_key: String,
}

impl FinnhubProvider {
    /// Create a new Finnhub provider with the given API key.
    pub fn new(api_key: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client, api_key }
    }

    /// Parse a /quote response body into a quote for `symbol`.
    fn parse_quote(symbol: &str, body: &str) -> Result<PriceQuote, MarketDataError> {
        let response: QuoteResponse =
            serde_json::from_str(body).map_err(|e| MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("malformed quote response: {}", e),
            })?;

        let price = response.c.ok_or_else(|| MarketDataError::ProviderError {
            provider: PROVIDER_ID.to_string(),
            message: "quote response missing current price".to_string(),
        })?;

        // Finnhub signals an unknown symbol with c == 0 rather than an error.
        if price == 0.0 {
            return Err(MarketDataError::SymbolNotFound(symbol.to_string()));
        }
        if price < 0.0 {
            return Err(MarketDataError::InvalidPrice {
                provider: PROVIDER_ID.to_string(),
                symbol: symbol.to_string(),
            });
        }

        let price = Decimal::from_f64(price).ok_or_else(|| MarketDataError::InvalidPrice {
            provider: PROVIDER_ID.to_string(),
            symbol: symbol.to_string(),
        })?;

        let timestamp = response
            .t
            .and_then(|t| Utc.timestamp_opt(t, 0).single())
            .unwrap_or_else(Utc::now);

        Ok(PriceQuote::new(
            symbol.to_string(),
            price,
            timestamp,
            PROVIDER_ID.to_string(),
        ))
    }
}

#[async_trait]
impl PriceSource for FinnhubProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn get_price(&self, symbol: &str) -> Result<PriceQuote, MarketDataError> {
        let symbol = symbol.to_uppercase();
        debug!("Fetching Finnhub quote for {}", symbol);

        let response = self
            .client
            .get(format!("{}/quote", BASE_URL))
            .header("X-Finnhub-Token", &self.api_key)
            .query(&[("symbol", symbol.as_str())])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    MarketDataError::Timeout {
                        provider: PROVIDER_ID.to_string(),
                    }
                } else {
                    MarketDataError::Network(e)
                }
            })?;

        let status = response.status();
        if status.as_u16() == 429 {
            return Err(MarketDataError::RateLimited {
                provider: PROVIDER_ID.to_string(),
            });
        }
        if !status.is_success() {
            return Err(MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("HTTP {}", status),
            });
        }

        let body = response.text().await?;
        Self::parse_quote(&symbol, &body)
    }
}
