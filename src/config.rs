use serde::Deserialize;
use std::path::PathBuf;

// =============================================================================
// Identifiers
// =============================================================================

/// Application name used for the data directory and log file
pub const APP_NAME: &str = "tfs-status";

/// Command the status item triggers when the language client is stopped
pub const RESTART_CLIENT_COMMAND: &str = "Tools-for-Solidity.wake.restart_client";

/// Installation method used when none is configured
pub const DEFAULT_INSTALLATION_METHOD: &str = "conda";

/// Dependency manifest compiled into the binary
pub const EMBEDDED_MANIFEST: &str = include_str!("../external-dependencies.json");

/// Extension settings, as read from the `Tools-for-Solidity` configuration section
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ExtensionConfig {
    pub wake: WakeConfig,
}

/// Settings controlling how the Wake language server is reached
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct WakeConfig {
    /// Port of an already running Wake server
    pub port: Option<u16>,
    /// Explicit path to a Wake executable
    pub path_to_executable: Option<String>,
    /// Installer used when neither port nor path is set
    pub installation_method: String,
}

impl Default for WakeConfig {
    fn default() -> Self {
        Self {
            port: None,
            path_to_executable: None,
            installation_method: DEFAULT_INSTALLATION_METHOD.to_string(),
        }
    }
}

impl WakeConfig {
    /// Describe how Wake is being reached, for the status tooltip.
    ///
    /// A configured port wins over an executable path, which wins over the
    /// installation method. Port 0 and blank paths count as unset.
    pub fn installation_description(&self) -> String {
        let path = self
            .path_to_executable
            .as_deref()
            .filter(|path| !path.trim().is_empty());

        match (self.port.filter(|port| *port != 0), path) {
            (Some(port), _) => format!("port {}", port),
            (None, Some(path)) => format!("executable path ({}", path),
            (None, None) => self.installation_method.clone(),
        }
    }
}

/// Returns the path to the data directory for tfs-status.
/// Uses $XDG_DATA_HOME/tfs-status if XDG_DATA_HOME is set,
/// otherwise falls back to ~/.local/share/tfs-status,
/// or ./tfs-status if neither is available.
pub fn data_dir() -> PathBuf {
    data_dir_with_env(std::env::var("XDG_DATA_HOME").ok(), dirs::home_dir())
}

/// Returns the path to the log file.
pub fn log_path() -> PathBuf {
    data_dir().join(format!("{}.log", APP_NAME))
}

fn data_dir_with_env(xdg_data_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let data_dir = xdg_data_home
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));

    data_dir.join(APP_NAME)
}
