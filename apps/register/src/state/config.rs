//! # Configuration State
//!
//! Register configuration loaded at startup.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     MOSTRADOR_STORE_NAME="Tienda Centro"                               │
//! │     MOSTRADOR_MAX_CART_LINES=50                                        │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     $MOSTRADOR_CONFIG, or                                              │
//! │     ~/.config/pos/register.toml (Linux)                                │
//! │     ~/Library/Application Support/com.mostrador.pos/register.toml      │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # register.toml
//! [store]
//! name = "Tienda Centro"
//!
//! [currency]
//! code = "MXN"
//! symbol = "$"
//! decimals = 2
//!
//! [cart]
//! max_lines = 100
//! max_item_quantity = 999
//! ```
//!
//! ## Thread Safety
//! Configuration is read-only after loading, so no lock is needed.

use std::path::{Path, PathBuf};

use mostrador_core::{CartLimits, Money, MAX_CART_LINES, MAX_ITEM_QUANTITY};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

// =============================================================================
// Errors
// =============================================================================

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Sections
// =============================================================================

/// `[store]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Shown on receipts and the register header.
    #[serde(default = "default_store_name")]
    pub name: String,
}

fn default_store_name() -> String {
    "Mostrador".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            name: default_store_name(),
        }
    }
}

/// `[currency]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyConfig {
    /// ISO 4217 code.
    #[serde(default = "default_currency_code")]
    pub code: String,

    #[serde(default = "default_currency_symbol")]
    pub symbol: String,

    /// Minor-unit digits. Money is stored in minor units.
    #[serde(default = "default_currency_decimals")]
    pub decimals: u8,
}

fn default_currency_code() -> String {
    "MXN".to_string()
}

fn default_currency_symbol() -> String {
    "$".to_string()
}

fn default_currency_decimals() -> u8 {
    2
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        CurrencyConfig {
            code: default_currency_code(),
            symbol: default_currency_symbol(),
            decimals: default_currency_decimals(),
        }
    }
}

/// `[cart]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartConfig {
    #[serde(default = "default_max_lines")]
    pub max_lines: usize,

    #[serde(default = "default_max_item_quantity")]
    pub max_item_quantity: u32,
}

fn default_max_lines() -> usize {
    MAX_CART_LINES
}

fn default_max_item_quantity() -> u32 {
    MAX_ITEM_QUANTITY
}

impl Default for CartConfig {
    fn default() -> Self {
        CartConfig {
            max_lines: default_max_lines(),
            max_item_quantity: default_max_item_quantity(),
        }
    }
}

// =============================================================================
// ConfigState
// =============================================================================

/// Register configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigState {
    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub currency: CurrencyConfig,

    #[serde(default)]
    pub cart: CartConfig,
}

impl ConfigState {
    /// Loads defaults, then the config file, then environment overrides.
    ///
    /// A missing file is not an error. A file that fails to parse is.
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading register config from file");
                config = Self::from_file(&path)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns defaults if loading fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load register config: {}. Using defaults.", e);
            Self::default()
        })
    }

    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses a `register.toml` document. Missing keys take their defaults.
    pub fn from_toml_str(contents: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Rejects limits of zero and more than four currency decimals.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.cart.max_lines == 0 {
            return Err(ConfigError::Invalid(
                "cart.max_lines must be greater than 0".into(),
            ));
        }

        if self.cart.max_item_quantity == 0 {
            return Err(ConfigError::Invalid(
                "cart.max_item_quantity must be greater than 0".into(),
            ));
        }

        if self.currency.decimals > 4 {
            return Err(ConfigError::Invalid(format!(
                "currency.decimals must be at most 4, got {}",
                self.currency.decimals
            )));
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies `MOSTRADOR_*` overrides from `lookup`. Unparseable numbers
    /// are ignored with a warning.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(name) = lookup("MOSTRADOR_STORE_NAME") {
            debug!(store_name = %name, "Overriding store name from environment");
            self.store.name = name;
        }

        if let Some(symbol) = lookup("MOSTRADOR_CURRENCY_SYMBOL") {
            self.currency.symbol = symbol;
        }

        if let Some(raw) = lookup("MOSTRADOR_MAX_CART_LINES") {
            match raw.parse() {
                Ok(max) => self.cart.max_lines = max,
                Err(_) => warn!(value = %raw, "Ignoring invalid MOSTRADOR_MAX_CART_LINES"),
            }
        }

        if let Some(raw) = lookup("MOSTRADOR_MAX_ITEM_QUANTITY") {
            match raw.parse() {
                Ok(max) => self.cart.max_item_quantity = max,
                Err(_) => warn!(value = %raw, "Ignoring invalid MOSTRADOR_MAX_ITEM_QUANTITY"),
            }
        }
    }

    /// `$MOSTRADOR_CONFIG`, else the platform config dir.
    fn default_config_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var("MOSTRADOR_CONFIG") {
            return Some(PathBuf::from(path));
        }

        directories::ProjectDirs::from("com", "mostrador", "pos")
            .map(|dirs| dirs.config_dir().join("register.toml"))
    }

    /// Cart limits for the validators.
    pub fn cart_limits(&self) -> CartLimits {
        CartLimits {
            max_lines: self.cart.max_lines,
            max_item_quantity: self.cart.max_item_quantity,
        }
    }

    /// Formats an amount with the configured symbol and decimals.
    ///
    /// Amounts are held in hundredths; fewer decimals round half away
    /// from zero, more decimals pad with zeros.
    ///
    /// ## Example
    /// ```rust
    /// use mostrador_core::Money;
    /// use register::state::ConfigState;
    ///
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_money(Money::from_cents(1234)), "$12.34");
    /// ```
    pub fn format_money(&self, amount: Money) -> String {
        let decimals = u32::from(self.currency.decimals);
        let cents = i128::from(amount.cents());

        let units = if decimals >= 2 {
            cents * 10_i128.pow(decimals - 2)
        } else {
            let divisor = 10_i128.pow(2 - decimals);
            let (q, r) = (cents / divisor, cents % divisor);
            if r.abs() * 2 >= divisor {
                q + cents.signum()
            } else {
                q
            }
        };

        let divisor = 10_i128.pow(decimals);
        let whole = (units / divisor).abs();
        let frac = (units % divisor).abs();

        let sign = if units < 0 { "-" } else { "" };
        if decimals > 0 {
            format!(
                "{}{}{}.{:0width$}",
                sign,
                self.currency.symbol,
                whole,
                frac,
                width = decimals as usize
            )
        } else {
            format!("{}{}{}", sign, self.currency.symbol, whole)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_are_valid() {
        let config = ConfigState::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.cart_limits(), CartLimits::default());
    }

    #[test]
    fn test_format_money() {
        let config = ConfigState::default();
        assert_eq!(config.format_money(Money::from_cents(1234)), "$12.34");
        assert_eq!(config.format_money(Money::from_cents(5)), "$0.05");
        assert_eq!(config.format_money(Money::zero()), "$0.00");
        assert_eq!(config.format_money(Money::from_cents(-1234)), "-$12.34");
        assert_eq!(config.format_money(Money::from_cents(-5)), "-$0.05");
    }

    #[test]
    fn test_format_money_other_decimals() {
        let mut config = ConfigState::default();
        config.currency.symbol = "¥".to_string();
        config.currency.decimals = 0;
        assert_eq!(config.format_money(Money::from_cents(1500)), "¥15");
        assert_eq!(config.format_money(Money::from_cents(1549)), "¥15");
        assert_eq!(config.format_money(Money::from_cents(1550)), "¥16");
        assert_eq!(config.format_money(Money::from_cents(-1550)), "-¥16");
        assert_eq!(config.format_money(Money::from_cents(-40)), "¥0");

        config.currency.symbol = "BD ".to_string();
        config.currency.decimals = 3;
        assert_eq!(config.format_money(Money::from_cents(1500)), "BD 15.000");
        assert_eq!(config.format_money(Money::from_cents(-5)), "-BD 0.050");

        config.currency.symbol = "$".to_string();
        config.currency.decimals = 1;
        assert_eq!(config.format_money(Money::from_major(180)), "$180.0");
        assert_eq!(config.format_money(Money::from_cents(1234)), "$12.3");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = ConfigState::from_toml_str(
            r#"
            [store]
            name = "Tienda Centro"

            [cart]
            max_lines = 20
            "#,
        )
        .unwrap();

        assert_eq!(config.store.name, "Tienda Centro");
        assert_eq!(config.cart.max_lines, 20);
        assert_eq!(config.cart.max_item_quantity, MAX_ITEM_QUANTITY);
        assert_eq!(config.currency, CurrencyConfig::default());
    }

    #[test]
    fn test_bad_toml_is_an_error() {
        let result = ConfigState::from_toml_str("[cart]\nmax_lines = \"many\"");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            ("MOSTRADOR_STORE_NAME", "Sucursal Norte"),
            ("MOSTRADOR_CURRENCY_SYMBOL", "MX$"),
            ("MOSTRADOR_MAX_CART_LINES", "12"),
            ("MOSTRADOR_MAX_ITEM_QUANTITY", "lots"),
        ]
        .into_iter()
        .collect();

        let mut config = ConfigState::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.store.name, "Sucursal Norte");
        assert_eq!(config.currency.symbol, "MX$");
        assert_eq!(config.cart.max_lines, 12);
        assert_eq!(config.cart.max_item_quantity, MAX_ITEM_QUANTITY);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = ConfigState::default();
        config.cart.max_lines = 0;
        assert!(config.validate().is_err());

        let mut config = ConfigState::default();
        config.cart.max_item_quantity = 0;
        assert!(config.validate().is_err());

        let mut config = ConfigState::default();
        config.currency.decimals = 5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_serializes_to_sections() {
        let toml_str = toml::to_string_pretty(&ConfigState::default()).unwrap();
        assert!(toml_str.contains("[store]"));
        assert!(toml_str.contains("[currency]"));
        assert!(toml_str.contains("[cart]"));
    }
}
