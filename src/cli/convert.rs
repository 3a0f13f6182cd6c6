use super::ui;
use crate::core::{
    ConversionOutcome, ConversionRequest, ConversionResult, Converter, CurrencyCode, RateProvider,
    Route, SupportedCurrencies,
};
use anyhow::{Result, bail};
use chrono::{DateTime, Local};
use comfy_table::Cell;

pub const MIN_AMOUNT: f64 = 0.01;

/// Parses a command line amount; must be a finite number of at least 0.01.
pub fn parse_amount(s: &str) -> Result<f64, String> {
    let amount: f64 = s
        .trim()
        .parse()
        .map_err(|_| format!("'{s}' is not a number"))?;
    if !amount.is_finite() || amount < MIN_AMOUNT {
        return Err(format!("amount must be at least {MIN_AMOUNT}"));
    }
    Ok(amount)
}

/// Formats the conversion steps, e.g. `100.00 USD × 83.5000 = 8350.00 INR`.
pub fn formula(
    request: &ConversionRequest,
    result: &ConversionResult,
    base: &CurrencyCode,
) -> String {
    let ConversionRequest { amount, from, to } = request;
    let converted = result.converted_amount;
    match result.route {
        Route::Identity => format!("{amount:.2} {from} = {converted:.2} {to}"),
        Route::FromBase { rate } => {
            format!("{amount:.2} {from} × {rate:.4} = {converted:.2} {to}")
        }
        Route::ToBase { rate } => {
            format!("{amount:.2} {from} ÷ {rate:.4} = {converted:.2} {to}")
        }
        Route::Cross {
            from_rate,
            base_amount,
            to_rate,
        } => format!(
            "{amount:.2} {from} ÷ {from_rate:.4} = {base_amount:.4} {base} × {to_rate:.4} = {converted:.2} {to}"
        ),
    }
}

/// Renders a successful conversion.
pub fn render_conversion(
    currencies: &SupportedCurrencies,
    base: &CurrencyCode,
    request: &ConversionRequest,
    result: &ConversionResult,
    updated_at: &DateTime<Local>,
) -> String {
    let from = &request.from;
    let to = &request.to;

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Original Amount"),
        ui::header_cell("Converted Amount"),
    ]);
    table.add_row(vec![
        Cell::new(ui::format_money(
            currencies.symbol(from),
            request.amount,
            from.as_str(),
        )),
        Cell::new(ui::format_money(
            currencies.symbol(to),
            result.converted_amount,
            to.as_str(),
        )),
    ]);

    let mut output = format!(
        "{}\n\n",
        ui::style_text("Conversion successful!", ui::StyleType::Success)
    );
    output.push_str(&table.to_string());
    output.push_str(&format!(
        "\n\nCurrent Exchange Rate: {}",
        ui::style_text(
            &format!("1 {from} = {:.4} {to}", result.pair_rate),
            ui::StyleType::Info
        )
    ));
    output.push_str(&format!("\nFormula: {}", formula(request, result, base)));
    output.push_str(&format!(
        "\n{}",
        ui::style_text(
            &format!("Last updated: {}", updated_at.format("%Y-%m-%d %H:%M:%S")),
            ui::StyleType::Subtle
        )
    ));
    output
}

pub async fn run<P: RateProvider>(
    converter: &Converter<P>,
    request: &ConversionRequest,
) -> Result<()> {
    let spinner = ui::new_spinner("Fetching live exchange rates...");
    let outcome = converter.perform_conversion(request).await;
    spinner.finish_and_clear();

    match outcome {
        ConversionOutcome::Converted { result, updated_at } => {
            println!(
                "{}",
                render_conversion(
                    converter.currencies(),
                    converter.base(),
                    request,
                    &result,
                    &updated_at
                )
            );
            Ok(())
        }
        ConversionOutcome::RatesUnavailable { detail } => {
            eprintln!(
                "{}",
                ui::style_text(
                    "Please check your internet connection and try again later.",
                    ui::StyleType::Warning
                )
            );
            bail!("Failed to get exchange rates: {detail}")
        }
        ConversionOutcome::CurrencyUnavailable { code } => {
            eprintln!(
                "{}",
                ui::style_text(
                    &format!(
                        "The API doesn't provide rates for {code}. Please try another currency."
                    ),
                    ui::StyleType::Warning
                )
            );
            bail!("Exchange rate not available for {code}")
        }
    }
}
