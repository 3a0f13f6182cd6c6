//! Walkthrough of the converter against one live rate table.

use super::ui;
use crate::core::{
    Converter, CurrencyCode, LegacyConversion, RateProvider, RateTable, Route, engine,
};
use anyhow::{Result, anyhow};

pub const LEGACY_AMOUNTS: [f64; 5] = [100.0, 500.0, 1000.0, 5000.0, 10000.0];

const FORMULA_AMOUNT: f64 = 1000.0;

pub const CROSS_PAIRS: [(&str, &str); 6] = [
    ("EUR", "GBP"),
    ("JPY", "AUD"),
    ("CAD", "CHF"),
    ("CNY", "SGD"),
    ("INR", "EUR"),
    ("USD", "JPY"),
];

fn legacy_section(table: &RateTable) -> String {
    let (usd, inr) = LegacyConversion::UsdToInr.currencies();
    let rate = match engine::pair_rate(&usd, &inr, table) {
        Ok(rate) => rate,
        Err(e) => return format!("{e}\n"),
    };

    let mut output = format!("Current Exchange Rate: 1 USD = {rate:.4} INR\n");
    for (title, direction) in [
        ("INR to USD Conversions:", LegacyConversion::InrToUsd),
        ("USD to INR Conversions:", LegacyConversion::UsdToInr),
    ] {
        let (from, to) = direction.currencies();
        output.push_str(&format!("\n{}\n", ui::style_text(title, ui::StyleType::Title)));
        for amount in LEGACY_AMOUNTS {
            let line = match direction.convert(amount, rate) {
                Ok(converted) => format!(
                    "{:>12} {from} = {:>12} {to}",
                    ui::format_amount(amount, 2),
                    ui::format_amount(converted, 2)
                ),
                Err(e) => e.to_string(),
            };
            output.push_str(&line);
            output.push('\n');
        }
    }

    let examples = (
        LegacyConversion::InrToUsd.convert(FORMULA_AMOUNT, rate),
        LegacyConversion::UsdToInr.convert(FORMULA_AMOUNT, rate),
    );
    if let (Ok(usd_amount), Ok(inr_amount)) = examples {
        let amount = ui::format_amount(FORMULA_AMOUNT, 2);
        output.push_str(&format!(
            "\n{}\n",
            ui::style_text("Conversion Formulas:", ui::StyleType::Title)
        ));
        output.push_str(&format!(
            "INR to USD: ₹{amount} ÷ {rate:.4} = ${}\n",
            ui::format_amount(usd_amount, 2)
        ));
        output.push_str(&format!(
            "USD to INR: ${amount} × {rate:.4} = ₹{}\n",
            ui::format_amount(inr_amount, 2)
        ));
    }
    output
}

fn cross_section(table: &RateTable) -> String {
    let mut output = format!(
        "\n{}\n",
        ui::style_text("Multi-Currency Conversions:", ui::StyleType::Title)
    );
    for (from, to) in CROSS_PAIRS {
        let (from, to) = (CurrencyCode::known(from), CurrencyCode::known(to));
        let line = match engine::convert(100.0, &from, &to, table) {
            Ok(result) => format!(
                "{:>6} {from} → {:>10} {to}",
                100,
                format!("{:.2}", result.converted_amount)
            ),
            Err(_) => format!("{:>6} {from} → {to} (rates not available)", ""),
        };
        output.push_str(&line);
        output.push('\n');
    }

    let (from, to) = (CurrencyCode::known("EUR"), CurrencyCode::known("GBP"));
    let example = engine::convert(1000.0, &from, &to, table)
        .ok()
        .and_then(|result| match result.route {
            Route::Cross {
                from_rate,
                base_amount,
                to_rate,
            } => Some((result, from_rate, base_amount, to_rate)),
            _ => None,
        });
    if let Some((result, from_rate, base_amount, to_rate)) = example {
        let base = table.base();
        output.push_str(&format!(
            "\n{}\n",
            ui::style_text("Cross-Currency Formula Example:", ui::StyleType::Title)
        ));
        output.push_str(&format!(
            "Formula: 1000 {from} ÷ {from_rate:.4} = {base_amount:.4} {base}\n"
        ));
        output.push_str(&format!(
            "         {base_amount:.4} {base} × {to_rate:.4} = {:.2} {to}\n",
            result.converted_amount
        ));
        output.push_str(&format!(
            "Cross rate: 1 {from} = {:.4} {to}\n",
            result.pair_rate
        ));
    }
    output
}

/// Renders the whole walkthrough for an already fetched table.
pub fn render_demo(table: &RateTable) -> String {
    let codes: Vec<&str> = table.codes().into_iter().map(CurrencyCode::as_str).collect();
    let mut output = format!(
        "Available currencies: {}\nTotal currencies: {}\n\n",
        codes.join(", "),
        codes.len()
    );
    output.push_str(&legacy_section(table));
    output.push_str(&cross_section(table));
    output
}

pub async fn run<P: RateProvider>(converter: &Converter<P>) -> Result<()> {
    let spinner = ui::new_spinner("Fetching live exchange rates...");
    let table = converter.fetch_table().await;
    spinner.finish_and_clear();

    let table = table.map_err(|e| anyhow!("Failed to get exchange rates: {e}"))?;
    println!("{}", render_demo(&table));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(s: &str) -> CurrencyCode {
        s.parse().unwrap()
    }

    fn full_table() -> RateTable {
        RateTable::from_rates(
            code("USD"),
            [
                ("INR", 83.5),
                ("EUR", 0.92),
                ("GBP", 0.8),
                ("JPY", 150.0),
                ("AUD", 1.5),
                ("CAD", 1.35),
                ("CHF", 0.9),
                ("CNY", 7.2),
                ("SGD", 1.35),
            ]
            .map(|(c, r)| (code(c), r)),
        )
    }

    #[test]
    fn test_demo_with_full_table() {
        let output = render_demo(&full_table());

        assert!(output.contains("Total currencies: 9"));
        assert!(output.contains("1 USD = 83.5000 INR"));
        assert!(output.contains("100.00 USD =     8,350.00 INR"));
        assert!(output.contains("10,000.00 INR =       119.76 USD"));
        // Formulas come after both amount lists
        let formulas = output.find("Conversion Formulas:").unwrap();
        assert!(formulas > output.find("USD to INR Conversions:").unwrap());
        assert!(output.contains("INR to USD: ₹1,000.00 ÷ 83.5000 = $11.98"));
        assert!(output.contains("USD to INR: $1,000.00 × 83.5000 = ₹83,500.00"));
        // 100 EUR → GBP = 100 / 0.92 * 0.8
        assert!(output.contains("EUR →      86.96 GBP"));
        assert!(output.contains("USD →   15000.00 JPY"));
        assert!(!output.contains("rates not available"));
        assert!(output.contains("Cross rate: 1 EUR = 0.8696 GBP"));
    }

    #[test]
    fn test_demo_with_partial_table() {
        let table = RateTable::from_rates(code("USD"), [(code("EUR"), 0.92), (code("GBP"), 0.8)]);
        let output = render_demo(&table);

        assert!(output.contains("Exchange rate not available for INR"));
        assert!(!output.contains("Conversion Formulas:"));
        assert!(output.contains("EUR →      86.96 GBP"));
        assert!(output.contains("JPY → AUD (rates not available)"));
        assert_eq!(output.matches("rates not available").count(), 5);
    }
}
