pub mod cli;
pub mod core;
pub mod providers;

use crate::core::config::{AppConfig, Settings};
use crate::core::{ConversionRequest, Converter, CurrencyCode};
use crate::providers::OpenErApiProvider;
use anyhow::Result;
use tracing::{debug, info};

pub enum AppCommand {
    Convert {
        amount: f64,
        from: CurrencyCode,
        to: CurrencyCode,
    },
    Rates,
    Currencies,
    Demo,
}

fn live_converter(settings: Settings) -> Result<Converter<OpenErApiProvider>> {
    let provider = OpenErApiProvider::new(&settings.base_url, settings.timeout)?;
    Ok(Converter::new(provider, settings.base, settings.currencies))
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("fxconv starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    let settings = config.settings()?;
    debug!("Loaded settings: {settings:#?}");

    match command {
        AppCommand::Convert { amount, from, to } => {
            let converter = live_converter(settings)?;
            cli::convert::run(&converter, &ConversionRequest { amount, from, to }).await
        }
        AppCommand::Rates => cli::rates::run(&live_converter(settings)?).await,
        AppCommand::Demo => cli::demo::run(&live_converter(settings)?).await,
        AppCommand::Currencies => {
            println!(
                "{}",
                cli::rates::render_currencies(&settings.currencies, &settings.base)
            );
            Ok(())
        }
    }
}
