//! Launch wizard
//!
//! Collects the settings for a node launch, installs the chosen release from
//! the local release directory and writes `launch.toml` under the home
//! directory.

pub mod jobs;
pub mod screens;
pub mod state;

use crate::config::Config;
use crate::tui::{Context, Navigator};
use std::sync::Arc;

pub use jobs::{LAUNCH_FILE, LaunchFile};
pub use screens::{
    ChainIdInput, DownloadBinary, Done, FeatureSelect, MonikerInput, NetworkSelect,
    ResolveRelease, SaveConfig, VersionInput,
};
pub use state::{Feature, LaunchState, Network};

/// Navigator positioned on the first launch screen
pub fn launch(config: Arc<Config>) -> Navigator<LaunchState> {
    let ctx = Context::new(LaunchState::default(), config);
    Navigator::new(ctx, Box::new(NetworkSelect::new()))
}
