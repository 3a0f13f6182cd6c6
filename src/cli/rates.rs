use super::ui;
use crate::core::{Converter, CurrencyCode, RateProvider, RateTable, SupportedCurrencies, engine};
use anyhow::{Result, anyhow};
use chrono::Local;
use comfy_table::Cell;

/// Lists every supported currency with its rate against the base.
pub fn render_rates(currencies: &SupportedCurrencies, table: &RateTable) -> String {
    let base = table.base();

    let mut output = format!(
        "{}\n\n",
        ui::style_text(&format!("Exchange rates for 1 {base}"), ui::StyleType::Title)
    );

    let mut rates_table = ui::new_styled_table();
    rates_table.set_header(vec![
        ui::header_cell("Currency"),
        ui::header_cell(&format!("Rate (per {base})")),
    ]);
    for info in currencies.iter() {
        let rate = engine::pair_rate(base, &info.code, table)
            .map_or_else(|_| ui::na_cell(), |r| ui::number_cell(format!("{r:.4}")));
        rates_table.add_row(vec![Cell::new(currencies.label(&info.code)), rate]);
    }

    output.push_str(&rates_table.to_string());
    output
}

/// Lists the configured currencies; needs no network access.
pub fn render_currencies(currencies: &SupportedCurrencies, base: &CurrencyCode) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Code"),
        ui::header_cell("Name"),
        ui::header_cell("Symbol"),
    ]);
    for info in currencies.iter() {
        let code = if &info.code == base {
            format!("{} (base)", info.code)
        } else {
            info.code.to_string()
        };
        table.add_row(vec![
            Cell::new(code),
            Cell::new(&info.name),
            Cell::new(&info.symbol),
        ]);
    }
    table.to_string()
}

pub async fn run<P: RateProvider>(converter: &Converter<P>) -> Result<()> {
    let spinner = ui::new_spinner("Fetching live exchange rates...");
    let table = converter.fetch_table().await;
    spinner.finish_and_clear();

    let table = table.map_err(|e| anyhow!("Failed to get exchange rates: {e}"))?;
    println!("{}", render_rates(converter.currencies(), &table));
    println!(
        "\n{}",
        ui::style_text(
            &format!("Last updated: {}", Local::now().format("%Y-%m-%d %H:%M:%S")),
            ui::StyleType::Subtle
        )
    );
    Ok(())
}
