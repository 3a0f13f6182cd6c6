//! Fetch, validate and convert in one call.

use crate::core::currency::{CurrencyCode, SupportedCurrencies};
use crate::core::engine::{self, ConversionError, ConversionResult};
use crate::core::provider::{ProviderError, RateProvider};
use crate::core::table::{RateTable, TableError};
use chrono::{DateTime, Local};
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

/// Anything that prevents a usable rate table from being obtained.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RatesError {
    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Table(#[from] TableError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConversionRequest {
    pub amount: f64,
    pub from: CurrencyCode,
    pub to: CurrencyCode,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConversionOutcome {
    Converted {
        result: ConversionResult,
        /// When the rates behind `result` were obtained.
        updated_at: DateTime<Local>,
    },
    RatesUnavailable {
        detail: String,
    },
    CurrencyUnavailable {
        code: CurrencyCode,
    },
}

pub struct Converter<P: RateProvider> {
    provider: P,
    base: CurrencyCode,
    currencies: SupportedCurrencies,
}

impl<P: RateProvider> Converter<P> {
    pub fn new(provider: P, base: CurrencyCode, currencies: SupportedCurrencies) -> Self {
        Converter {
            provider,
            base,
            currencies,
        }
    }

    pub fn base(&self) -> &CurrencyCode {
        &self.base
    }

    pub fn currencies(&self) -> &SupportedCurrencies {
        &self.currencies
    }

    /// Fetches a fresh table from the provider. Nothing is cached; every call
    /// goes to the network.
    pub async fn fetch_table(&self) -> Result<RateTable, RatesError> {
        let raw = self.provider.fetch_rates(&self.base).await?;
        debug!(count = raw.len(), "Provider returned rates");
        let table = RateTable::build(self.base.clone(), &raw, &self.currencies)?;
        debug!(count = table.len(), "Built rate table");
        Ok(table)
    }

    #[instrument(
        name = "PerformConversion",
        skip(self, request),
        fields(amount = request.amount, from = %request.from, to = %request.to)
    )]
    pub async fn perform_conversion(&self, request: &ConversionRequest) -> ConversionOutcome {
        let table = match self.fetch_table().await {
            Ok(table) => table,
            Err(e) => {
                warn!(error = %e, "Rates unavailable");
                return ConversionOutcome::RatesUnavailable {
                    detail: e.to_string(),
                };
            }
        };
        let updated_at = Local::now();

        for code in [&request.from, &request.to] {
            if !table.covers(code) {
                warn!(%code, "Currency missing from rate table");
                return ConversionOutcome::CurrencyUnavailable { code: code.clone() };
            }
        }

        match engine::convert(request.amount, &request.from, &request.to, &table) {
            Ok(result) => {
                info!(
                    converted = result.converted_amount,
                    pair_rate = result.pair_rate,
                    "Conversion complete"
                );
                ConversionOutcome::Converted { result, updated_at }
            }
            Err(ConversionError::RateUnavailable(code)) => {
                warn!(%code, "Rate unusable for currency");
                ConversionOutcome::CurrencyUnavailable { code }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::engine::Route;
    use crate::core::provider::RawRates;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct MockProvider {
        response: Result<RawRates, ProviderError>,
        call_count: AtomicUsize,
    }

    impl MockProvider {
        fn with_rates(entries: &[(&str, f64)]) -> Self {
            Self {
                response: Ok(entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()),
                call_count: AtomicUsize::new(0),
            }
        }

        fn failing(error: ProviderError) -> Self {
            Self {
                response: Err(error),
                call_count: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl RateProvider for MockProvider {
        async fn fetch_rates(&self, base: &CurrencyCode) -> Result<RawRates, ProviderError> {
            assert_eq!(base.as_str(), "USD");
            self.call_count.fetch_add(1, Ordering::SeqCst);
            self.response.clone()
        }
    }

    fn code(s: &str) -> CurrencyCode {
        s.parse().unwrap()
    }

    fn converter(provider: MockProvider) -> Converter<MockProvider> {
        Converter::new(provider, code("USD"), SupportedCurrencies::default())
    }

    fn request(amount: f64, from: &str, to: &str) -> ConversionRequest {
        ConversionRequest {
            amount,
            from: code(from),
            to: code(to),
        }
    }

    #[tokio::test]
    async fn test_successful_conversion() {
        let converter = converter(MockProvider::with_rates(&[
            ("USD", 1.0),
            ("INR", 83.50),
            ("EUR", 0.92),
        ]));

        match converter.perform_conversion(&request(100.0, "EUR", "INR")).await {
            ConversionOutcome::Converted { result, .. } => {
                assert!((result.converted_amount - 9076.09).abs() < 0.01);
                assert!(matches!(result.route, Route::Cross { .. }));
            }
            other => panic!("Expected a conversion, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_each_request_fetches_fresh_rates() {
        let converter = converter(MockProvider::with_rates(&[("INR", 83.50)]));
        let req = request(1.0, "USD", "INR");

        converter.perform_conversion(&req).await;
        converter.perform_conversion(&req).await;
        assert_eq!(converter.provider.call_count.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_base_currency_needs_no_table_entry() {
        let converter = converter(MockProvider::with_rates(&[("INR", 80.0)]));
        let outcome = converter
            .perform_conversion(&request(160.0, "INR", "USD"))
            .await;
        match outcome {
            ConversionOutcome::Converted { result, .. } => {
                assert_eq!(result.converted_amount, 2.0);
                assert_eq!(result.pair_rate, 1.0 / 80.0);
            }
            other => panic!("Expected a conversion, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_provider_failure_keeps_detail() {
        let converter = converter(MockProvider::failing(ProviderError::NetworkFailure(
            "connection refused".to_string(),
        )));
        let outcome = converter
            .perform_conversion(&request(100.0, "USD", "INR"))
            .await;
        assert_eq!(
            outcome,
            ConversionOutcome::RatesUnavailable {
                detail: "Network error: connection refused".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_table_failure_is_rates_unavailable() {
        let converter = converter(MockProvider::with_rates(&[("XYZ", 2.0)]));
        let outcome = converter
            .perform_conversion(&request(100.0, "USD", "INR"))
            .await;
        assert_eq!(
            outcome,
            ConversionOutcome::RatesUnavailable {
                detail: "No supported currencies found in API response".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_missing_currency_checks_source_first() {
        let converter = converter(MockProvider::with_rates(&[("INR", 83.50)]));

        let outcome = converter
            .perform_conversion(&request(100.0, "EUR", "GBP"))
            .await;
        assert_eq!(
            outcome,
            ConversionOutcome::CurrencyUnavailable { code: code("EUR") }
        );

        let outcome = converter
            .perform_conversion(&request(100.0, "INR", "GBP"))
            .await;
        assert_eq!(
            outcome,
            ConversionOutcome::CurrencyUnavailable { code: code("GBP") }
        );
    }

    #[tokio::test]
    async fn test_unsupported_currency_is_unavailable() {
        // Reported by the provider but not part of the supported set
        let converter = converter(MockProvider::with_rates(&[("INR", 83.50), ("XYZ", 2.0)]));
        let outcome = converter
            .perform_conversion(&request(100.0, "XYZ", "INR"))
            .await;
        assert_eq!(
            outcome,
            ConversionOutcome::CurrencyUnavailable { code: code("XYZ") }
        );
    }

    #[tokio::test]
    async fn test_zero_rate_is_currency_unavailable() {
        let converter = converter(MockProvider::with_rates(&[("INR", 0.0), ("EUR", 0.92)]));
        let outcome = converter
            .perform_conversion(&request(100.0, "USD", "INR"))
            .await;
        assert_eq!(
            outcome,
            ConversionOutcome::CurrencyUnavailable { code: code("INR") }
        );
    }

    #[tokio::test]
    async fn test_same_currency_still_requires_rates() {
        let converter = converter(MockProvider::with_rates(&[("EUR", 0.92)]));
        let outcome = converter
            .perform_conversion(&request(55.0, "EUR", "EUR"))
            .await;
        match outcome {
            ConversionOutcome::Converted { result, .. } => {
                assert_eq!(result.converted_amount, 55.0);
                assert_eq!(result.route, Route::Identity);
            }
            other => panic!("Expected a conversion, got {other:?}"),
        }
    }
}
