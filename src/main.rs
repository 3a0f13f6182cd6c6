use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use fxconv::cli::convert::parse_amount;
use fxconv::core::CurrencyCode;
use fxconv::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for fxconv::AppCommand {
    fn from(cmd: Commands) -> fxconv::AppCommand {
        match cmd {
            Commands::Convert { amount, from, to } => {
                fxconv::AppCommand::Convert { amount, from, to }
            }
            Commands::Rates => fxconv::AppCommand::Rates,
            Commands::Currencies => fxconv::AppCommand::Currencies,
            Commands::Demo => fxconv::AppCommand::Demo,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Convert an amount using live exchange rates
    Convert {
        /// Amount to convert (at least 0.01)
        #[arg(value_parser = parse_amount)]
        amount: f64,

        /// Source currency code
        #[arg(short, long, default_value = "INR")]
        from: CurrencyCode,

        /// Target currency code
        #[arg(short, long, default_value = "USD")]
        to: CurrencyCode,
    },
    /// Display live rates for all supported currencies
    Rates,
    /// List supported currencies
    Currencies,
    /// Walk through sample conversions with live rates
    Demo,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => fxconv::cli::setup::setup(),
        Some(cmd) => fxconv::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
