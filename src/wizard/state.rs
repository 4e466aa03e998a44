//! Launch wizard state

use crate::tui::ResponseLog;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Network the node joins
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Testnet,
    Local,
}

impl Network {
    pub const ALL: [Network; 2] = [Network::Testnet, Network::Local];
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Network::Testnet => write!(f, "Testnet"),
            Network::Local => write!(f, "Local"),
        }
    }
}

/// Optional services started next to the node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Feature {
    Oracle,
    Indexer,
    Relayer,
}

impl Feature {
    pub const ALL: [Feature; 3] = [Feature::Oracle, Feature::Indexer, Feature::Relayer];
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Feature::Oracle => write!(f, "Oracle"),
            Feature::Indexer => write!(f, "Indexer"),
            Feature::Relayer => write!(f, "Relayer"),
        }
    }
}

/// Everything the launch wizard has collected so far
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaunchState {
    pub network: Option<Network>,
    pub chain_id: String,
    pub moniker: String,
    pub features: Vec<Feature>,
    /// Newest release found in the release directory
    pub latest_version: Option<String>,
    /// Version chosen by the user, always `vX.Y.Z`
    pub version: String,
    /// Installed binary
    pub binary_path: Option<PathBuf>,
    /// Written launch file
    pub launch_file: Option<PathBuf>,
    pub responses: ResponseLog,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clone_is_deep() {
        let mut original = LaunchState {
            network: Some(Network::Testnet),
            features: vec![Feature::Oracle],
            ..Default::default()
        };
        original.responses.push("Network", "Testnet");

        let mut copy = original.clone();
        copy.features.push(Feature::Relayer);
        copy.chain_id.push_str("edited");
        copy.responses.pop_last(1);

        assert_eq!(original.features, vec![Feature::Oracle]);
        assert!(original.chain_id.is_empty());
        assert_eq!(original.responses.len(), 1);

        original.network = Some(Network::Local);
        assert_eq!(copy.network, Some(Network::Testnet));
    }

    #[test]
    fn test_display_names() {
        assert_eq!(Network::Testnet.to_string(), "Testnet");
        assert_eq!(Feature::Indexer.to_string(), "Indexer");
    }
}
