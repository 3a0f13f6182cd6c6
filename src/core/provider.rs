//! Rate provider abstraction

use crate::core::currency::CurrencyCode;
use async_trait::async_trait;
use std::collections::HashMap;
use thiserror::Error;

/// Rates exactly as the provider reported them: 1 unit of the base currency
/// equals `rate` units of the keyed currency.
pub type RawRates = HashMap<String, f64>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ProviderError {
    #[error("Network error: {0}")]
    NetworkFailure(String),

    #[error("Invalid response from API: {0}")]
    MalformedResponse(String),

    #[error("Unexpected API response format: {0}")]
    UnexpectedShape(String),
}

#[async_trait]
pub trait RateProvider: Send + Sync {
    async fn fetch_rates(&self, base: &CurrencyCode) -> Result<RawRates, ProviderError>;
}
