use std::path::{Path, PathBuf};

use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ConfigPathError {
    MissingHomeDirectory,
}

const APP_DIR: &str = "tonio";
const APP_CONFIG_FILE: &str = "config.json";

const DEFAULT_TOR_HOST: &str = "127.0.0.1";
const DEFAULT_TOR_CONTROL_PORTS: [u16; 2] = [9051, 9151];
const DEFAULT_TOR_SOCKS_PORTS: [u16; 2] = [9050, 9150];
const DEFAULT_TOR_CONNECT_TIMEOUT_MS: u64 = 2_000;

/// Application-level settings from `config.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub tor: TorConfig,
}

/// Where to look for a running Tor. Passed through untouched to the locator.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TorConfig {
    pub host: String,
    pub control_ports: Vec<u16>,
    pub socks_ports: Vec<u16>,
    pub connect_timeout_ms: u64,
}

impl Default for TorConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_TOR_HOST.to_string(),
            control_ports: DEFAULT_TOR_CONTROL_PORTS.to_vec(),
            socks_ports: DEFAULT_TOR_SOCKS_PORTS.to_vec(),
            connect_timeout_ms: DEFAULT_TOR_CONNECT_TIMEOUT_MS,
        }
    }
}

pub fn load_app_config() -> AppConfig {
    let (xdg_config_home, home) = config_env_dirs();
    load_app_config_with(xdg_config_home.as_deref(), home.as_deref())
}

fn load_app_config_with(xdg_config_home: Option<&Path>, home: Option<&Path>) -> AppConfig {
    let path = match app_config_path(APP_DIR, APP_CONFIG_FILE, xdg_config_home, home) {
        Ok(p) => p,
        Err(err) => {
            tracing::debug!(?err, "no config directory available; using defaults");
            return AppConfig::default();
        }
    };
    if !path.exists() {
        return AppConfig::default();
    }
    match std::fs::read_to_string(&path) {
        Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|err| {
            tracing::warn!(?err, ?path, "failed to parse config.json; using defaults");
            AppConfig::default()
        }),
        Err(err) => {
            tracing::warn!(?err, ?path, "failed to read config.json; using defaults");
            AppConfig::default()
        }
    }
}

pub(crate) fn config_env_dirs() -> (Option<PathBuf>, Option<PathBuf>) {
    (
        std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from),
        std::env::var_os("HOME").map(PathBuf::from),
    )
}

pub(crate) fn app_config_path(
    app_dir: &str,
    file_name: &str,
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> Result<PathBuf, ConfigPathError> {
    let mut path = config_root(xdg_config_home, home)?;
    path.push(app_dir);
    path.push(file_name);
    Ok(path)
}

fn config_root(
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> Result<PathBuf, ConfigPathError> {
    if let Some(xdg) = xdg_config_home.filter(|path| !path.as_os_str().is_empty()) {
        return Ok(xdg.to_path_buf());
    }

    let home = home.ok_or(ConfigPathError::MissingHomeDirectory)?;
    Ok(home.join(".config"))
}
