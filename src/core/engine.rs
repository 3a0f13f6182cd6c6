//! Pure conversion between any two currencies of a [`RateTable`].
//!
//! All rates are quoted against the table's base currency. Conversions that
//! touch the base use a single rate; conversions between two non-base
//! currencies go through the base (a cross rate).

use crate::core::currency::CurrencyCode;
use crate::core::table::RateTable;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConversionError {
    #[error("Exchange rate not available for {0}")]
    RateUnavailable(CurrencyCode),
}

/// How a conversion was carried out, with the table values it used.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Route {
    Identity,
    /// amount × rate
    FromBase { rate: f64 },
    /// amount ÷ rate
    ToBase { rate: f64 },
    /// amount ÷ from_rate = base_amount, then base_amount × to_rate
    Cross {
        from_rate: f64,
        base_amount: f64,
        to_rate: f64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConversionResult {
    pub converted_amount: f64,
    /// Units of the target currency for one unit of the source currency.
    pub pair_rate: f64,
    pub route: Route,
}

/// Converts `amount` of `from` into `to` using `table`.
///
/// The reported pair rate is computed with the same case logic applied to a
/// single unit, so it always agrees with the converted amount.
pub fn convert(
    amount: f64,
    from: &CurrencyCode,
    to: &CurrencyCode,
    table: &RateTable,
) -> Result<ConversionResult, ConversionError> {
    let (converted_amount, route) = apply(amount, from, to, table)?;
    let pair_rate = pair_rate(from, to, table)?;
    Ok(ConversionResult {
        converted_amount,
        pair_rate,
        route,
    })
}

/// Units of `to` for one unit of `from`.
pub fn pair_rate(
    from: &CurrencyCode,
    to: &CurrencyCode,
    table: &RateTable,
) -> Result<f64, ConversionError> {
    apply(1.0, from, to, table).map(|(rate, _)| rate)
}

fn apply(
    amount: f64,
    from: &CurrencyCode,
    to: &CurrencyCode,
    table: &RateTable,
) -> Result<(f64, Route), ConversionError> {
    let base = table.base();

    if from == to {
        return Ok((amount, Route::Identity));
    }

    if from == base {
        let rate = usable_rate(table, to)?;
        return Ok((amount * rate, Route::FromBase { rate }));
    }

    if to == base {
        let rate = usable_rate(table, from)?;
        return Ok((amount / rate, Route::ToBase { rate }));
    }

    let from_rate = usable_rate(table, from)?;
    let to_rate = usable_rate(table, to)?;
    let base_amount = amount / from_rate;
    Ok((
        base_amount * to_rate,
        Route::Cross {
            from_rate,
            base_amount,
            to_rate,
        },
    ))
}

/// A zero, negative or non-finite rate is treated the same as a missing one.
fn usable_rate(table: &RateTable, code: &CurrencyCode) -> Result<f64, ConversionError> {
    match table.get(code) {
        Some(rate) if rate.is_finite() && rate > 0.0 => Ok(rate),
        _ => Err(ConversionError::RateUnavailable(code.clone())),
    }
}

/// Fixed single-pair conversions between US dollars and Indian rupees, driven
/// by one USD→INR rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegacyConversion {
    InrToUsd,
    UsdToInr,
}

impl LegacyConversion {
    /// (from, to) for this direction.
    pub fn currencies(self) -> (CurrencyCode, CurrencyCode) {
        let (usd, inr) = (CurrencyCode::known("USD"), CurrencyCode::known("INR"));
        match self {
            LegacyConversion::InrToUsd => (inr, usd),
            LegacyConversion::UsdToInr => (usd, inr),
        }
    }

    /// Converts with a single USD→INR rate by running the general engine on a
    /// one-entry USD-based table.
    pub fn convert(self, amount: f64, usd_inr_rate: f64) -> Result<f64, ConversionError> {
        let (from, to) = self.currencies();
        let table = RateTable::from_rates(
            CurrencyCode::known("USD"),
            [(CurrencyCode::known("INR"), usd_inr_rate)],
        );
        convert(amount, &from, &to, &table).map(|r| r.converted_amount)
    }
}
