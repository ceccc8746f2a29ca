use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::ConfigError;

/// Stores user-configurable preferences for the roomshare shell.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default = "Config::default_locale")]
    pub locale: String,
    #[serde(default = "Config::default_currency")]
    pub currency: String,
    #[serde(default = "Config::default_currency_symbol")]
    pub currency_symbol: String,
    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,
    #[serde(default = "Config::default_backup_retention")]
    pub backup_retention: usize,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Optional custom directory for the session collections.
    pub data_root: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: Self::default_locale(),
            currency: Self::default_currency(),
            currency_symbol: Self::default_currency_symbol(),
            ui_color_enabled: Self::default_ui_color_enabled(),
            backup_retention: Self::default_backup_retention(),
            data_root: None,
        }
    }
}

impl Config {
    pub const KEYS: [&'static str; 6] = [
        "locale",
        "currency",
        "currency_symbol",
        "ui_color_enabled",
        "backup_retention",
        "data_root",
    ];

    pub fn default_locale() -> String {
        "en-IN".into()
    }

    pub fn default_currency() -> String {
        "INR".into()
    }

    pub fn default_currency_symbol() -> String {
        "₹".into()
    }

    pub fn default_ui_color_enabled() -> bool {
        true
    }

    pub fn default_backup_retention() -> usize {
        5
    }

    /// Directory holding the session collections; `<app_dir>/session` unless overridden.
    pub fn resolve_data_root(&self, app_dir: &Path) -> PathBuf {
        self.data_root
            .clone()
            .unwrap_or_else(|| app_dir.join("session"))
    }

    /// Applies a `config set <key> <value>` style update.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = || ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        };
        match key {
            "locale" => self.locale = value.trim().to_string(),
            "currency" => self.currency = value.trim().to_ascii_uppercase(),
            "currency_symbol" => self.currency_symbol = value.trim().to_string(),
            "ui_color_enabled" => {
                self.ui_color_enabled = match value.trim().to_ascii_lowercase().as_str() {
                    "true" | "on" | "yes" | "1" => true,
                    "false" | "off" | "no" | "0" => false,
                    _ => return Err(invalid()),
                }
            }
            "backup_retention" => {
                let retention: usize = value.trim().parse().map_err(|_| invalid())?;
                if retention == 0 {
                    return Err(invalid());
                }
                self.backup_retention = retention;
            }
            "data_root" => {
                let trimmed = value.trim();
                self.data_root = if trimmed.is_empty() || trimmed == "default" {
                    None
                } else {
                    Some(PathBuf::from(trimmed))
                };
            }
            other => return Err(ConfigError::UnknownKey(other.to_string())),
        }
        Ok(())
    }

    /// Current value of `key` rendered for display.
    pub fn get(&self, key: &str) -> Option<String> {
        let value = match key {
            "locale" => self.locale.clone(),
            "currency" => self.currency.clone(),
            "currency_symbol" => self.currency_symbol.clone(),
            "ui_color_enabled" => self.ui_color_enabled.to_string(),
            "backup_retention" => self.backup_retention.to_string(),
            "data_root" => self
                .data_root
                .as_ref()
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "default".into()),
            _ => return None,
        };
        Some(value)
    }
}
