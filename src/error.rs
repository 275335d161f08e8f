//! Crate-level error type.
//!
//! Each subsystem reports its own error; [`Error`] wraps them for callers that
//! drive more than one (the CLI, an API layer).

use crate::config::SettingsError;
use crate::sql::DialectError;
use crate::transform::TransformError;

/// Result type for operations spanning subsystems.
pub type Result<T> = std::result::Result<T, Error>;

/// Error category, for mapping onto protocol-level responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A result column belongs to a member the client may not see.
    Visibility,
    /// The query or settings are malformed for the requested mode.
    Configuration,
    /// A dialect was asked for something outside its contract.
    DialectContract,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Dialect(#[from] DialectError),

    #[error(transparent)]
    Transform(#[from] TransformError),

    #[error(transparent)]
    Settings(#[from] SettingsError),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Dialect(_) => ErrorKind::DialectContract,
            Error::Transform(e) => e.kind(),
            Error::Settings(_) => ErrorKind::Configuration,
        }
    }
}
