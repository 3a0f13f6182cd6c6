//! Validated rate snapshot for a single conversion request

use crate::core::currency::{CurrencyCode, SupportedCurrencies};
use crate::core::provider::RawRates;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TableError {
    #[error("No supported currencies found in API response")]
    NoSupportedCurrencies,
}

/// Rates quoted against `base`, restricted to supported currencies.
///
/// The base currency is implicitly 1.0 and may or may not appear as a key,
/// depending on what the provider sent. Values are stored as reported; the
/// engine rejects non-positive entries at lookup time.
#[derive(Debug, Clone, PartialEq)]
pub struct RateTable {
    base: CurrencyCode,
    rates: HashMap<CurrencyCode, f64>,
}

impl RateTable {
    /// Filters `raw` down to the supported set, dropping unknown codes.
    pub fn build(
        base: CurrencyCode,
        raw: &RawRates,
        supported: &SupportedCurrencies,
    ) -> Result<Self, TableError> {
        let rates: HashMap<CurrencyCode, f64> = supported
            .iter()
            .filter_map(|info| {
                raw.get(info.code.as_str())
                    .map(|rate| (info.code.clone(), *rate))
            })
            .collect();

        if rates.is_empty() {
            return Err(TableError::NoSupportedCurrencies);
        }
        Ok(Self { base, rates })
    }

    /// Builds a table directly from already-trusted entries.
    pub fn from_rates(
        base: CurrencyCode,
        rates: impl IntoIterator<Item = (CurrencyCode, f64)>,
    ) -> Self {
        Self {
            base,
            rates: rates.into_iter().collect(),
        }
    }

    pub fn base(&self) -> &CurrencyCode {
        &self.base
    }

    /// The stored value for `code`, without any positivity check.
    pub fn get(&self, code: &CurrencyCode) -> Option<f64> {
        self.rates.get(code).copied()
    }

    pub fn contains(&self, code: &CurrencyCode) -> bool {
        self.rates.contains_key(code)
    }

    /// True when `code` is the base or has an entry in the table.
    pub fn covers(&self, code: &CurrencyCode) -> bool {
        code == &self.base || self.contains(code)
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// Codes present in the table, sorted.
    pub fn codes(&self) -> Vec<&CurrencyCode> {
        let mut codes: Vec<_> = self.rates.keys().collect();
        codes.sort();
        codes
    }
}
