use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

use crate::core::currency::CurrencyCode;
use crate::core::provider::{ProviderError, RateProvider, RawRates};

/// Latest rates from an ExchangeRate-API style endpoint
/// (`GET {base_url}/{BASE}`), e.g. `https://open.er-api.com/v6/latest`.
pub struct OpenErApiProvider {
    base_url: String,
    timeout: Duration,
    client: reqwest::Client,
}

impl OpenErApiProvider {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("fxconv/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        Ok(OpenErApiProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
            client,
        })
    }
}

#[derive(Debug, Deserialize)]
struct LatestRatesResponse {
    rates: Option<HashMap<String, serde_json::Value>>,
    #[serde(rename = "error-type")]
    error_type: Option<String>,
}

#[async_trait]
impl RateProvider for OpenErApiProvider {
    async fn fetch_rates(&self, base: &CurrencyCode) -> Result<RawRates, ProviderError> {
        let url = format!("{}/{}", self.base_url, base);

        let response = self.client.get(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                ProviderError::NetworkFailure(format!(
                    "Request timed out after {}s for URL: {}",
                    self.timeout.as_secs_f64(),
                    url
                ))
            } else {
                ProviderError::NetworkFailure(format!("Request error: {e} for URL: {url}"))
            }
        })?;

        if !response.status().is_success() {
            return Err(ProviderError::NetworkFailure(format!(
                "HTTP error: {} for URL: {}",
                response.status(),
                url
            )));
        }

        let text = response
            .text()
            .await
            .map_err(|e| ProviderError::NetworkFailure(format!("Failed to read response: {e}")))?;

        let value: serde_json::Value = serde_json::from_str(&text)
            .map_err(|e| ProviderError::MalformedResponse(format!("{e}")))?;

        let data: LatestRatesResponse = serde_json::from_value(value)
            .map_err(|e| ProviderError::UnexpectedShape(format!("{e}")))?;

        match data.rates {
            // Entries that are not numbers are skipped like any unknown code
            Some(rates) => Ok(rates
                .into_iter()
                .filter_map(|(code, rate)| rate.as_f64().map(|rate| (code, rate)))
                .collect()),
            None => Err(ProviderError::UnexpectedShape(match data.error_type {
                Some(error_type) => format!("missing 'rates' (provider error: {error_type})"),
                None => "missing 'rates'".to_string(),
            })),
        }
    }
}
