//! Configuration module for Prism.
//!
//! Handles the settings file and environment variable expansion.

mod settings;

pub use settings::{
    expand_env_vars, parse_filter, DialectSettings, LoggingSettings, Settings, SettingsError,
    TransformSettings,
};
