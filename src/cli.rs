//! CLI argument parsing with clap

use crate::config::{Config, ConfigError};
use clap::Parser;
use std::path::PathBuf;

/// Stepwise - interactive launch wizard
///
/// Walks through network selection, chain settings and feature choices,
/// installs the chosen release and writes the resulting launch file.
#[derive(Parser, Debug)]
#[command(name = "stepwise")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file (TOML format)
    ///
    /// When absent, `<home>/config.toml` is used if it exists.
    #[arg(short = 'C', long)]
    pub config: Option<PathBuf>,

    /// Home directory for installed binaries, logs and the launch file
    #[arg(long, env = "STEPWISE_HOME")]
    pub home: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Output log format as JSON
    #[arg(long)]
    pub json_log: bool,
}

impl Cli {
    /// Resolve the effective configuration
    ///
    /// The `--home` flag wins over the environment; an explicit `--config`
    /// file must exist, the implicit one is optional.
    pub fn load_config(&self) -> Result<Config, ConfigError> {
        let base = match self.home {
            Some(ref home) => Config::with_home(home),
            None => Config::from_environment()?,
        };

        let mut config = match self.config {
            Some(ref path) => Config::load_from_file(path)?,
            None => Config::load_or(base.home_dir.join("config.toml"), base.clone())?,
        };

        if let Some(ref home) = self.home {
            config.home_dir = home.clone();
        }

        Ok(config)
    }
}
