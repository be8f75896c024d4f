use std::path::PathBuf;

use thiserror::Error;

/// Core error type shared across fmcgen crates.
#[derive(Debug, Error)]
pub enum Error {
    /// The configuration file does not exist.
    #[error("configuration file '{}' not found", .0.display())]
    ConfigNotFound(PathBuf),
    /// The configuration document has no `settings` section.
    #[error("'settings' section not found in config")]
    SettingsMissing,
    /// The `settings` section is present but malformed.
    #[error("invalid settings: {0}")]
    InvalidSettings(String),
    /// A textual value (prefix, range, port range) could not be parsed.
    #[error("invalid value: {0}")]
    InvalidValue(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Convenience alias for results returned by fmcgen crates.
pub type Result<T> = std::result::Result<T, Error>;
