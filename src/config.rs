//! Configuration for wizard sessions
//!
//! The configuration is loaded once by the entry point and handed to the
//! wizard as an explicit value; screens reach it through their context.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default interval between timer ticks (spinner frames)
const DEFAULT_TICK_RATE_MS: u64 = 100;

/// Default chunk size for streamed copies (64 KiB)
const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

/// Wizard session configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Interval between timer ticks in milliseconds
    pub tick_rate_ms: u64,

    /// Root directory for artifacts written by wizard actions
    pub home_dir: PathBuf,

    /// Directory holding release binaries, one file per version (e.g. `v0.4.1`)
    pub release_dir: PathBuf,

    /// Chunk size in bytes used when streaming a release into place
    pub chunk_size: usize,

    /// Directory for session log files
    pub log_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_rate_ms: DEFAULT_TICK_RATE_MS,
            home_dir: PathBuf::from(".stepwise"),
            release_dir: PathBuf::from(".stepwise").join("releases"),
            chunk_size: DEFAULT_CHUNK_SIZE,
            log_dir: PathBuf::from("Log"),
        }
    }
}

impl Config {
    /// Build a configuration rooted at the given home directory
    pub fn with_home<P: Into<PathBuf>>(home: P) -> Self {
        let home_dir = home.into();
        Self {
            release_dir: home_dir.join("releases"),
            log_dir: home_dir.join("log"),
            home_dir,
            ..Default::default()
        }
    }

    /// Default configuration rooted at `$HOME/.stepwise`
    pub fn from_environment() -> Result<Self, ConfigError> {
        let home = std::env::var_os("HOME")
            .or_else(|| std::env::var_os("USERPROFILE"))
            .filter(|h| !h.is_empty())
            .ok_or(ConfigError::NoHomeDir)?;
        Ok(Self::with_home(PathBuf::from(home).join(".stepwise")))
    }

    /// Timer tick interval
    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms.max(1))
    }

    /// Directory where downloaded binaries are installed
    pub fn bin_dir(&self) -> PathBuf {
        self.home_dir.join("bin")
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to `fallback` when
    /// the file does not exist
    pub fn load_or<P: AsRef<Path>>(path: P, fallback: Config) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::load_from_file(path)
        } else {
            Ok(fallback)
        }
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::WriteError {
                path: path.to_path_buf(),
                source: e,
            })?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializeError { source: e })?;

        fs::write(path, content).map_err(|e| ConfigError::WriteError {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(())
    }
}

/// Errors that can occur when loading or saving configuration
#[derive(Debug)]
pub enum ConfigError {
    /// No home directory could be determined from the environment
    NoHomeDir,
    /// Failed to read configuration file
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to parse configuration file
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
    /// Failed to write configuration file
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to serialize configuration
    SerializeError { source: toml::ser::Error },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NoHomeDir => {
                write!(f, "Could not determine the home directory (HOME is not set)")
            }
            ConfigError::ReadError { path, source } => {
                write!(f, "Failed to read config file '{}': {}", path.display(), source)
            }
            ConfigError::ParseError { path, source } => {
                write!(f, "Failed to parse config file '{}': {}", path.display(), source)
            }
            ConfigError::WriteError { path, source } => {
                write!(f, "Failed to write config file '{}': {}", path.display(), source)
            }
            ConfigError::SerializeError { source } => {
                write!(f, "Failed to serialize config: {}", source)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::NoHomeDir => None,
            ConfigError::ReadError { source, .. } => Some(source),
            ConfigError::ParseError { source, .. } => Some(source),
            ConfigError::WriteError { source, .. } => Some(source),
            ConfigError::SerializeError { source } => Some(source),
        }
    }
}
