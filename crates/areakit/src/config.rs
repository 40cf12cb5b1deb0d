//! Application configuration.
//!
//! Loaded from YAML; every field is optional.
//!
//! ```yaml
//! default_route: /qgis-query
//! csv_delimiter: ";"
//! copy_feedback_ms: 1200
//! palette_key: p
//! load_sample_input: false
//! log_filter: areakit=debug
//! ```

use areakit_core::Key;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// YAML syntax or type error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
    /// A field holds a value outside its allowed range
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue {
        /// Field name
        field: &'static str,
        /// Error message
        message: String,
    },
}

/// Application settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Route shown for `/` and unknown paths
    pub default_route: String,
    /// Delimiter for CSV exports
    pub csv_delimiter: String,
    /// How long copy feedback stays visible
    pub copy_feedback_ms: u64,
    /// Letter that toggles the command palette with Ctrl or Meta
    pub palette_key: char,
    /// Start the area separator with the sample table
    pub load_sample_input: bool,
    /// Log filter directive
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_route: "/area-separator".to_string(),
            csv_delimiter: ",".to_string(),
            copy_feedback_ms: areakit_widgets::copy_button::DEFAULT_FEEDBACK_MS,
            palette_key: 'k',
            load_sample_input: true,
            log_filter: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Parse and validate YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml_ng::from_str(yaml)?
        };
        config.validate()?;
        tracing::info!(
            default_route = %config.default_route,
            palette_key = %config.palette_key,
            "configuration loaded"
        );
        Ok(config)
    }

    /// Serialize to YAML.
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Check field constraints.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.default_route.starts_with('/') {
            return Err(ConfigError::InvalidValue {
                field: "default_route",
                message: format!("'{}' must start with '/'", self.default_route),
            });
        }
        if self.csv_delimiter.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "csv_delimiter",
                message: "must not be empty".to_string(),
            });
        }
        if !self.palette_key.is_ascii_alphabetic() {
            return Err(ConfigError::InvalidValue {
                field: "palette_key",
                message: format!("'{}' is not an ASCII letter", self.palette_key),
            });
        }
        Ok(())
    }

    /// Key that toggles the command palette.
    pub fn palette_key(&self) -> Key {
        Key::from_letter(self.palette_key).unwrap_or(Key::K)
    }

    /// Install the native log subscriber with `log_filter`.
    ///
    /// Returns `false` if a subscriber was already installed.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn init_logging(&self) -> bool {
        crate::logging::init(&self.log_filter)
    }
}
