//! Error types for the wizard framework

use crate::config::ConfigError;
use crate::tui::ActionError;
use thiserror::Error;

/// Result type alias for framework operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the wizard framework
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Background action failed: {0}")]
    Action(#[from] ActionError),

    #[error("Failed to serialize TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Failed to start background worker '{name}': {source}")]
    Spawn {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Wizard setup failed: {0}")]
    Setup(String),
}
