//! Background jobs of the launch wizard
//!
//! Plain functions doing the blocking work, plus the [`Action`] builders the
//! screens hand to the event loop.

use super::state::{Feature, LaunchState, Network};
use crate::config::Config;
use crate::tui::{Action, ActionError, Reporter};
use rust_i18n::t;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Name of the file written by the last step
pub const LAUNCH_FILE: &str = "launch.toml";

/// Prefix of installed binaries (`node-v1.2.3`)
const BINARY_PREFIX: &str = "node";

/// Parse `vX.Y.Z` or `X.Y.Z`
pub fn parse_version(value: &str) -> Option<(u64, u64, u64)> {
    let value = value.trim();
    let bare = value.strip_prefix('v').unwrap_or(value);
    let mut parts = bare.split('.');
    let major = parts.next()?.parse().ok()?;
    let minor = parts.next()?.parse().ok()?;
    let patch = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((major, minor, patch))
}

/// Canonical `vX.Y.Z` spelling of a version
pub fn canonical_version(value: &str) -> Option<String> {
    parse_version(value).map(|(major, minor, patch)| format!("v{major}.{minor}.{patch}"))
}

/// Newest `vX.Y.Z` release file in `dir`
pub fn latest_release(dir: &Path) -> Result<String, ActionError> {
    let entries = fs::read_dir(dir).map_err(|e| {
        ActionError::new(t!("err_release_dir", path = dir.display(), error = e))
    })?;

    let latest = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| name.starts_with('v'))
        .filter_map(|name| parse_version(&name).map(|version| (version, name)))
        .max_by_key(|(version, _)| *version)
        .map(|(_, name)| name);

    match latest {
        Some(name) => {
            debug!(release = %name, dir = %dir.display(), "Resolved latest release");
            Ok(name)
        }
        None => Err(ActionError::new(t!("err_no_releases", path = dir.display()))),
    }
}

/// Stream the `version` release from `release_dir` into `bin_dir`
///
/// Progress is reported after every chunk. A copy that is cancelled or fails
/// partway removes the partial file.
pub fn install_release(
    release_dir: &Path,
    bin_dir: &Path,
    version: &str,
    chunk_size: usize,
    reporter: &Reporter,
) -> Result<PathBuf, ActionError> {
    let source = release_dir.join(version);
    let mut input = File::open(&source)
        .map_err(|_| ActionError::new(t!("err_release_missing", version = version, path = release_dir.display())))?;
    let total = input.metadata().map(|m| m.len()).ok();

    fs::create_dir_all(bin_dir)?;
    let dest = bin_dir.join(format!("{BINARY_PREFIX}-{version}"));
    let output = File::create(&dest)?;

    match copy_chunks(&mut input, output, &dest, chunk_size, total, reporter) {
        Ok(received) => {
            info!(version, bytes = received, dest = %dest.display(), "Installed release");
            Ok(dest)
        }
        Err(e) => {
            warn!(version, error = %e, dest = %dest.display(), "Install aborted");
            let _ = fs::remove_file(&dest);
            Err(e)
        }
    }
}

/// Copy loop of [`install_release`]; `output` is closed before returning
fn copy_chunks(
    input: &mut File,
    mut output: File,
    dest: &Path,
    chunk_size: usize,
    total: Option<u64>,
    reporter: &Reporter,
) -> Result<u64, ActionError> {
    let mut buffer = vec![0u8; chunk_size.max(1)];
    let mut received = 0u64;
    reporter.progress(received, total);

    loop {
        if reporter.is_cancelled() {
            return Err(ActionError::new(t!("err_cancelled")));
        }

        let read = input.read(&mut buffer)?;
        if read == 0 {
            break;
        }
        output.write_all(&buffer[..read])?;
        received += read as u64;
        reporter.progress(received, total);
    }
    output.flush()?;
    drop(output);

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(dest, fs::Permissions::from_mode(0o755))?;
    }
    #[cfg(not(unix))]
    let _ = dest;

    Ok(received)
}

/// Contents of the launch file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchFile {
    pub network: Network,
    pub chain_id: String,
    pub moniker: String,
    pub features: Vec<Feature>,
    pub version: String,
    pub binary: PathBuf,
}

impl LaunchFile {
    /// `None` while the state is still missing an answer
    pub fn from_state(state: &LaunchState) -> Option<Self> {
        Some(Self {
            network: state.network?,
            chain_id: state.chain_id.clone(),
            moniker: state.moniker.clone(),
            features: state.features.clone(),
            version: state.version.clone(),
            binary: state.binary_path.clone()?,
        })
    }
}

/// Serialize `file` as TOML at `path`, creating parent directories
pub fn write_launch_file(path: &Path, file: &LaunchFile) -> crate::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(file)?;
    fs::write(path, content)?;
    info!(path = %path.display(), "Wrote launch file");
    Ok(())
}

/// Find the newest release; the payload is its version
pub fn resolve_latest(config: Arc<Config>) -> Action {
    Action::new("resolve-release", move |_| {
        latest_release(&config.release_dir).map(Some)
    })
}

/// Install `version`; the payload is the installed binary path
pub fn install(config: Arc<Config>, version: String) -> Action {
    Action::new("install-release", move |reporter| {
        install_release(
            &config.release_dir,
            &config.bin_dir(),
            &version,
            config.chunk_size,
            reporter,
        )
        .map(|path| Some(path.display().to_string()))
    })
}

/// Write the launch file under the home directory; the payload is its path
pub fn save_launch_file(config: Arc<Config>, file: LaunchFile) -> Action {
    Action::new("save-launch-file", move |_| {
        let path = config.home_dir.join(LAUNCH_FILE);
        write_launch_file(&path, &file).map_err(|e| ActionError::new(e.to_string()))?;
        Ok(Some(path.display().to_string()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::{CancelToken, TuiEvent};
    use std::sync::mpsc;
    use tempfile::TempDir;

    fn reporter(cancel: CancelToken) -> (Reporter, mpsc::Receiver<TuiEvent>) {
        let (tx, rx) = mpsc::channel();
        let id = Action::new("install-test", |_| Ok(None)).id();
        (Reporter::new(id, tx, cancel), rx)
    }

    #[test]
    fn test_parse_version() {
        assert_eq!(parse_version("v1.2.3"), Some((1, 2, 3)));
        assert_eq!(parse_version("0.10.0"), Some((0, 10, 0)));
        assert_eq!(parse_version("v1.2"), None);
        assert_eq!(parse_version("v1.2.3.4"), None);
        assert_eq!(parse_version("latest"), None);
        assert_eq!(canonical_version(" 2.0.1 "), Some("v2.0.1".to_string()));
    }

    #[test]
    fn test_latest_release_compares_numerically() {
        let dir = TempDir::new().unwrap();
        for name in ["v0.9.0", "v0.10.0", "v0.2.5", "notes.txt"] {
            fs::write(dir.path().join(name), b"bin").unwrap();
        }
        fs::create_dir(dir.path().join("v9.9.9")).unwrap();

        assert_eq!(latest_release(dir.path()).unwrap(), "v0.10.0");
    }

    #[test]
    fn test_latest_release_empty_or_missing() {
        let dir = TempDir::new().unwrap();
        assert!(latest_release(dir.path()).is_err());
        assert!(latest_release(&dir.path().join("absent")).is_err());
    }

    #[test]
    fn test_install_reports_progress() {
        let releases = TempDir::new().unwrap();
        let home = TempDir::new().unwrap();
        fs::write(releases.path().join("v1.0.0"), vec![7u8; 10]).unwrap();

        let (reporter, rx) = reporter(CancelToken::new());
        let dest = install_release(releases.path(), home.path(), "v1.0.0", 4, &reporter).unwrap();

        assert_eq!(fs::read(&dest).unwrap(), vec![7u8; 10]);
        let received: Vec<u64> = rx
            .try_iter()
            .filter_map(|event| match event {
                TuiEvent::Progress { received, total, .. } => {
                    assert_eq!(total, Some(10));
                    Some(received)
                }
                _ => None,
            })
            .collect();
        assert_eq!(received, vec![0, 4, 8, 10]);
    }

    #[test]
    fn test_install_missing_release() {
        let releases = TempDir::new().unwrap();
        let home = TempDir::new().unwrap();
        let (reporter, _rx) = reporter(CancelToken::new());
        let err = install_release(releases.path(), home.path(), "v3.0.0", 4, &reporter).unwrap_err();
        assert!(err.message().contains("v3.0.0"));
    }

    #[test]
    fn test_cancelled_install_leaves_nothing() {
        let releases = TempDir::new().unwrap();
        let home = TempDir::new().unwrap();
        fs::write(releases.path().join("v1.0.0"), b"payload").unwrap();

        let cancel = CancelToken::new();
        cancel.cancel();
        let (reporter, _rx) = reporter(cancel);
        assert!(install_release(releases.path(), home.path(), "v1.0.0", 4, &reporter).is_err());
        assert!(!home.path().join("node-v1.0.0").exists());
    }

    #[test]
    fn test_failed_copy_leaves_nothing() {
        let releases = TempDir::new().unwrap();
        let home = TempDir::new().unwrap();
        // Opens fine but every read fails
        fs::create_dir(releases.path().join("v1.0.0")).unwrap();

        let (reporter, _rx) = reporter(CancelToken::new());
        assert!(install_release(releases.path(), home.path(), "v1.0.0", 4, &reporter).is_err());
        assert!(!home.path().join("node-v1.0.0").exists());
    }

    #[test]
    fn test_write_launch_file() {
        let home = TempDir::new().unwrap();
        let path = home.path().join("nested").join(LAUNCH_FILE);
        let file = LaunchFile {
            network: Network::Local,
            chain_id: "local-1".into(),
            moniker: "operator".into(),
            features: vec![Feature::Oracle, Feature::Relayer],
            version: "v1.0.0".into(),
            binary: PathBuf::from("/opt/node"),
        };

        write_launch_file(&path, &file).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("network = \"local\""));
        let parsed: LaunchFile = toml::from_str(&content).unwrap();
        assert_eq!(parsed, file);
    }

    #[test]
    fn test_launch_file_needs_network_and_binary() {
        let mut state = LaunchState::default();
        assert!(LaunchFile::from_state(&state).is_none());
        state.network = Some(Network::Testnet);
        state.binary_path = Some(PathBuf::from("bin/node"));
        assert!(LaunchFile::from_state(&state).is_some());
    }
}
