//! # Checkout Configuration
//!
//! Configuration management for the checkout app.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     CARTWISE_POINTS=120                                                │
//! │     CARTWISE_CATALOG_PATH=./promotions.json                            │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     --config <path>, or                                                │
//! │     ~/.config/cartwise/checkout.toml (Linux)                           │
//! │     ~/Library/Application Support/com.cartwise.checkout/... (macOS)    │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     79 points, "฿", built-in sample catalog                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # checkout.toml
//! [customer]
//! points = 79
//!
//! [display]
//! currency_symbol = "฿"
//!
//! [catalog]
//! path = "promotions.json"   # omit to use the built-in sample catalog
//!
//! [logging]
//! filter = "info,cartwise=debug"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

use cartwise_core::Points;

/// Config file name inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "checkout.toml";

// =============================================================================
// Errors
// =============================================================================

/// Configuration loading failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Sections
// =============================================================================

/// The customer whose cart is being priced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerConfig {
    /// Loyalty points balance, in whole points. At most `Points::MAX_WHOLE`.
    #[serde(default = "default_points")]
    pub points: u64,
}

fn default_points() -> u64 {
    79
}

impl Default for CustomerConfig {
    fn default() -> Self {
        CustomerConfig {
            points: default_points(),
        }
    }
}

/// Output formatting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

fn default_currency_symbol() -> String {
    "฿".to_string()
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            currency_symbol: default_currency_symbol(),
        }
    }
}

/// Where promotions come from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// JSON file in the catalog wire format. `None` uses the sample catalog.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directives used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_log_filter() -> String {
    "info,cartwise=debug".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            filter: default_log_filter(),
        }
    }
}

// =============================================================================
// Checkout Config
// =============================================================================

/// Complete checkout configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CheckoutConfig {
    #[serde(default)]
    pub customer: CustomerConfig,

    #[serde(default)]
    pub display: DisplayConfig,

    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CheckoutConfig {
    /// Loads configuration from file and environment.
    ///
    /// ## Loading Order
    /// 1. Start with defaults
    /// 2. Load from file if it exists
    /// 3. Apply environment variable overrides
    /// 4. Validate
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = match config_path.or_else(Self::default_config_path) {
            Some(path) if path.exists() => {
                info!(?path, "Loading checkout config from file");
                Self::from_file(&path)?
            }
            Some(path) => {
                debug!(?path, "Config file not found, using defaults");
                Self::default()
            }
            None => Self::default(),
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Parses a TOML config file. Missing sections take their defaults.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn to_toml(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        self.points()?;

        if self.display.currency_symbol.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "display.currency_symbol must not be empty".into(),
            ));
        }

        Ok(())
    }

    /// The customer's balance as engine input.
    pub fn points(&self) -> ConfigResult<Points> {
        Points::checked_from_whole(self.customer.points).ok_or_else(|| {
            ConfigError::Invalid(format!(
                "customer.points must be at most {}, got {}",
                Points::MAX_WHOLE,
                self.customer.points
            ))
        })
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies `CARTWISE_*` overrides read through `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(points) = lookup("CARTWISE_POINTS") {
            match points.trim().parse::<u64>() {
                Ok(p) => {
                    debug!(points = p, "Overriding points from environment");
                    self.customer.points = p;
                }
                Err(_) => warn!(value = %points, "Ignoring CARTWISE_POINTS, not a whole non-negative number"),
            }
        }

        if let Some(path) = lookup("CARTWISE_CATALOG_PATH") {
            debug!(path = %path, "Overriding catalog path from environment");
            self.catalog.path = Some(PathBuf::from(path));
        }

        if let Some(symbol) = lookup("CARTWISE_CURRENCY_SYMBOL") {
            self.display.currency_symbol = symbol;
        }

        if let Some(filter) = lookup("CARTWISE_LOG") {
            self.logging.filter = filter;
        }
    }

    /// Gets the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "cartwise", "checkout")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
