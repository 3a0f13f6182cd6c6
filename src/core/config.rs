use crate::core::currency::{
    CurrencyCode, CurrencyInfo, DEFAULT_CURRENCIES, SupportedCurrencies,
};
use anyhow::{Context, Result, bail};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use std::{fs, path::PathBuf};
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://open.er-api.com/v6/latest";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct CurrencyConfig {
    pub code: String,
    pub name: String,
    pub symbol: String,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct OpenErApiConfig {
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for OpenErApiConfig {
    fn default() -> Self {
        OpenErApiConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ProvidersConfig {
    pub open_er_api: Option<OpenErApiConfig>,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        ProvidersConfig {
            open_er_api: Some(OpenErApiConfig::default()),
        }
    }
}

fn default_base_currency() -> String {
    "USD".to_string()
}

fn default_currencies() -> Vec<CurrencyConfig> {
    DEFAULT_CURRENCIES
        .iter()
        .map(|(code, name, symbol)| CurrencyConfig {
            code: code.to_string(),
            name: name.to_string(),
            symbol: symbol.to_string(),
        })
        .collect()
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct AppConfig {
    #[serde(default = "default_base_currency")]
    pub base_currency: String,
    #[serde(default = "default_currencies")]
    pub currencies: Vec<CurrencyConfig>,
    #[serde(default)]
    pub providers: ProvidersConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            base_currency: default_base_currency(),
            currencies: default_currencies(),
            providers: ProvidersConfig::default(),
        }
    }
}

impl AppConfig {
    /// Loads the config from the default location, falling back to built-in
    /// defaults when no file has been created yet.
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!("No config at {}, using defaults", config_path.display());
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("dev", "fxconv", "fxconv")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        config.settings().with_context(|| {
            format!("Invalid config file: {}", path.as_ref().display())
        })?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    /// Validates the raw config and turns it into the typed values the
    /// converter runs with.
    pub fn settings(&self) -> Result<Settings> {
        let entries = self
            .currencies
            .iter()
            .map(|c| {
                Ok(CurrencyInfo {
                    code: c.code.parse()?,
                    name: c.name.clone(),
                    symbol: c.symbol.clone(),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        let currencies = SupportedCurrencies::new(entries)?;

        let base: CurrencyCode = self
            .base_currency
            .parse()
            .context("Invalid base currency")?;
        if !currencies.contains(&base) {
            bail!("Base currency {base} is not one of the configured currencies");
        }

        let provider = self.providers.open_er_api.clone().unwrap_or_default();
        if provider.timeout_secs == 0 {
            bail!("Provider timeout must be at least one second");
        }

        Ok(Settings {
            base,
            currencies,
            base_url: provider.base_url,
            timeout: Duration::from_secs(provider.timeout_secs),
        })
    }
}

/// Validated configuration, fixed for the lifetime of the process.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub base: CurrencyCode,
    pub currencies: SupportedCurrencies,
    pub base_url: String,
    pub timeout: Duration,
}
