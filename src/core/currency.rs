//! Currency codes and the supported currency set

use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CurrencyCodeError {
    #[error("Invalid currency code: '{0}' (expected three letters, e.g. USD)")]
    Invalid(String),

    #[error("Duplicate currency code: {0}")]
    Duplicate(CurrencyCode),

    #[error("No currencies configured")]
    Empty,
}

/// An uppercase ISO-4217 style code such as `USD`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// For codes fixed in source, which are known to be well formed.
    pub(crate) fn known(code: &'static str) -> Self {
        debug_assert!(code.len() == 3 && code.chars().all(|c| c.is_ascii_uppercase()));
        CurrencyCode(code.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for CurrencyCode {
    type Err = CurrencyCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_uppercase();
        if code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic()) {
            Ok(CurrencyCode(code))
        } else {
            Err(CurrencyCodeError::Invalid(s.to_string()))
        }
    }
}

impl TryFrom<String> for CurrencyCode {
    type Error = CurrencyCodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> String {
        code.0
    }
}

impl Display for CurrencyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyInfo {
    pub code: CurrencyCode,
    pub name: String,
    pub symbol: String,
}

/// (code, name, symbol) for the currencies offered out of the box.
pub const DEFAULT_CURRENCIES: &[(&str, &str, &str)] = &[
    ("USD", "US Dollar", "$"),
    ("INR", "Indian Rupee", "₹"),
    ("EUR", "Euro", "€"),
    ("GBP", "British Pound", "£"),
    ("JPY", "Japanese Yen", "¥"),
    ("AUD", "Australian Dollar", "A$"),
    ("CAD", "Canadian Dollar", "C$"),
    ("CHF", "Swiss Franc", "CHF"),
    ("CNY", "Chinese Yuan", "¥"),
    ("SGD", "Singapore Dollar", "S$"),
];

/// The fixed set of currencies the application converts between.
///
/// Built once at startup and never mutated. Entries keep the order they were
/// configured in, which is also the display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupportedCurrencies {
    entries: Vec<CurrencyInfo>,
}

impl SupportedCurrencies {
    pub fn new(entries: Vec<CurrencyInfo>) -> Result<Self, CurrencyCodeError> {
        if entries.is_empty() {
            return Err(CurrencyCodeError::Empty);
        }
        for (i, entry) in entries.iter().enumerate() {
            if entries[..i].iter().any(|e| e.code == entry.code) {
                return Err(CurrencyCodeError::Duplicate(entry.code.clone()));
            }
        }
        Ok(Self { entries })
    }

    pub fn contains(&self, code: &CurrencyCode) -> bool {
        self.get(code).is_some()
    }

    pub fn get(&self, code: &CurrencyCode) -> Option<&CurrencyInfo> {
        self.entries.iter().find(|e| &e.code == code)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CurrencyInfo> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Display symbol, or the code itself for unknown currencies.
    pub fn symbol<'a>(&'a self, code: &'a CurrencyCode) -> &'a str {
        self.get(code).map_or(code.as_str(), |e| e.symbol.as_str())
    }

    /// Full display name, or the code itself for unknown currencies.
    pub fn name<'a>(&'a self, code: &'a CurrencyCode) -> &'a str {
        self.get(code).map_or(code.as_str(), |e| e.name.as_str())
    }

    /// Renders `"$ USD - US Dollar"`.
    pub fn label(&self, code: &CurrencyCode) -> String {
        format!("{} {} - {}", self.symbol(code), code, self.name(code))
    }
}

impl Default for SupportedCurrencies {
    fn default() -> Self {
        let entries = DEFAULT_CURRENCIES
            .iter()
            .map(|&(code, name, symbol)| CurrencyInfo {
                code: CurrencyCode::known(code),
                name: name.to_string(),
                symbol: symbol.to_string(),
            })
            .collect();
        Self { entries }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(s: &str) -> CurrencyCode {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_normalizes_case_and_whitespace() {
        assert_eq!(code(" eur ").as_str(), "EUR");
        assert_eq!(code("Inr").to_string(), "INR");
    }

    #[test]
    fn test_parse_rejects_malformed_codes() {
        for bad in ["", "US", "EURO", "U$D", "12A"] {
            assert_eq!(
                bad.parse::<CurrencyCode>(),
                Err(CurrencyCodeError::Invalid(bad.to_string())),
                "expected {bad:?} to be rejected"
            );
        }
    }

    #[test]
    fn test_default_set_lookups() {
        let currencies = SupportedCurrencies::default();
        assert_eq!(currencies.len(), 10);
        assert!(currencies.contains(&code("SGD")));
        assert!(!currencies.contains(&code("XYZ")));
        assert_eq!(currencies.symbol(&code("INR")), "₹");
        assert_eq!(currencies.name(&code("GBP")), "British Pound");
        assert_eq!(currencies.label(&code("USD")), "$ USD - US Dollar");
        // Display order follows the configured order
        let first: Vec<_> = currencies.iter().take(3).map(|c| c.code.as_str()).collect();
        assert_eq!(first, vec!["USD", "INR", "EUR"]);
    }

    #[test]
    fn test_unknown_code_falls_back_to_code() {
        let currencies = SupportedCurrencies::default();
        let xyz = code("XYZ");
        assert_eq!(currencies.symbol(&xyz), "XYZ");
        assert_eq!(currencies.label(&xyz), "XYZ XYZ - XYZ");
    }

    #[test]
    fn test_new_rejects_duplicates_and_empty() {
        let usd = CurrencyInfo {
            code: code("USD"),
            name: "US Dollar".to_string(),
            symbol: "$".to_string(),
        };
        assert_eq!(
            SupportedCurrencies::new(vec![usd.clone(), usd]),
            Err(CurrencyCodeError::Duplicate(code("USD")))
        );
        assert_eq!(
            SupportedCurrencies::new(vec![]),
            Err(CurrencyCodeError::Empty)
        );
    }
}
