//! TOML-based configuration for Prism.
//!
//! Supports a config file (prism.toml) with environment variable expansion.
//!
//! Example configuration:
//! ```toml
//! [dialect]
//! default = "postgres"
//! timezone = "${REPORTING_TZ}"
//!
//! [transform]
//! result_type = "compact"
//! debug_logging = true
//!
//! [logging]
//! filter = "prism=debug"
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use crate::model::ResultType;
use crate::sql::dialect::helpers::validate_timezone;
use crate::sql::Dialect;

/// Error type for settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// SQL dialect defaults.
    pub dialect: DialectSettings,

    /// Result transformation.
    pub transform: TransformSettings,

    /// Log output.
    pub logging: LoggingSettings,
}

/// SQL dialect defaults.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DialectSettings {
    /// Engine used when none is named.
    pub default: Dialect,

    /// Query timezone (supports ${ENV_VAR} expansion).
    pub timezone: String,
}

impl Default for DialectSettings {
    fn default() -> Self {
        Self {
            default: Dialect::default(),
            timezone: "UTC".to_string(),
        }
    }
}

impl DialectSettings {
    /// Get the timezone with environment variables expanded.
    pub fn resolved_timezone(&self) -> Result<String, SettingsError> {
        let timezone = expand_env_vars(&self.timezone)?;
        validate_timezone(&timezone)
            .map_err(|e| SettingsError::InvalidConfig(e.to_string()))?;
        Ok(timezone)
    }
}

/// Result transformation settings.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct TransformSettings {
    /// Shape used when a request does not name one.
    pub result_type: ResultType,

    /// Log a summary of every transform.
    pub debug_logging: bool,
}

/// Log output settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// `tracing_subscriber` filter directive; `RUST_LOG` takes precedence.
    pub filter: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: "prism=info".to_string(),
        }
    }
}

impl LoggingSettings {
    pub fn resolved_filter(&self) -> Result<String, SettingsError> {
        expand_env_vars(&self.filter)
    }

    /// The configured filter, rejecting malformed directives.
    pub fn env_filter(&self) -> Result<EnvFilter, SettingsError> {
        parse_filter(&self.resolved_filter()?)
    }
}

/// Parse a `tracing_subscriber` filter directive string.
pub fn parse_filter(directives: &str) -> Result<EnvFilter, SettingsError> {
    EnvFilter::try_new(directives).map_err(|e| {
        SettingsError::InvalidConfig(format!("invalid log filter '{}': {}", directives, e))
    })
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SettingsError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse settings from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, SettingsError> {
        let settings: Settings = toml::from_str(content)?;
        Ok(settings)
    }

    /// Load settings from the default config file locations.
    ///
    /// Searches in order:
    /// 1. Environment variable `PRISM_CONFIG`
    /// 2. `./prism.toml`
    /// 3. `~/.config/prism/config.toml`
    pub fn load() -> Result<Self, SettingsError> {
        if let Ok(path) = env::var("PRISM_CONFIG") {
            return Self::from_file(&path);
        }

        let local_config = PathBuf::from("prism.toml");
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("prism").join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        Ok(Settings::default())
    }
}

/// Expand environment variables in a string.
///
/// Supports `${VAR}` and `$VAR` syntax.
pub fn expand_env_vars(s: &str) -> Result<String, SettingsError> {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '$' {
            result.push(c);
            continue;
        }

        let mut var_name = String::new();
        if chars.next_if_eq(&'{').is_some() {
            for ch in chars.by_ref() {
                if ch == '}' {
                    break;
                }
                var_name.push(ch);
            }
        } else {
            while let Some(ch) = chars.next_if(|ch| ch.is_alphanumeric() || *ch == '_') {
                var_name.push(ch);
            }
            if var_name.is_empty() {
                // lone '$'
                result.push('$');
                continue;
            }
        }

        let value =
            env::var(&var_name).map_err(|_| SettingsError::MissingEnvVar(var_name.clone()))?;
        result.push_str(&value);
    }

    Ok(result)
}
