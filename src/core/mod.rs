//! Core business logic: currencies, rate tables and conversion

pub mod config;
pub mod currency;
pub mod engine;
pub mod facade;
pub mod log;
pub mod provider;
pub mod table;

// Re-export main types for cleaner imports
pub use currency::{CurrencyCode, SupportedCurrencies};
pub use engine::{ConversionError, ConversionResult, LegacyConversion, Route};
pub use facade::{ConversionOutcome, ConversionRequest, Converter, RatesError};
pub use provider::{ProviderError, RateProvider, RawRates};
pub use table::{RateTable, TableError};
