//! User configuration
//!
//! Loaded from `<config dir>/dirwatch/config.toml`. Every field is optional;
//! a missing file means defaults.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::watcher::Backend;

const APP_DIR: &str = "dirwatch";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory to open on startup (defaults to the working directory).
    pub start_directory: Option<PathBuf>,
    /// Theme name, see `ThemeVariant::from_name`.
    pub theme: Option<String>,
    /// Log file (defaults to `<data dir>/dirwatch/dirwatch.log`).
    pub log_file: Option<PathBuf>,
    pub watch: WatchConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    Native,
    Poll,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WatchConfig {
    pub backend: BackendKind,
    /// Only used by the poll backend.
    pub poll_interval_ms: u64,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::Native,
            poll_interval_ms: 1000,
        }
    }
}

impl AppConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents).context("Failed to parse config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.watch.poll_interval_ms == 0 {
            anyhow::bail!("watch.poll_interval_ms must be greater than 0");
        }
        Ok(())
    }

    pub fn backend(&self) -> Backend {
        match self.watch.backend {
            BackendKind::Native => Backend::Native,
            BackendKind::Poll => Backend::Poll(Duration::from_millis(self.watch.poll_interval_ms)),
        }
    }

    pub fn log_file(&self) -> PathBuf {
        self.log_file.clone().unwrap_or_else(default_log_file)
    }
}

/// Default location of the config file, if the platform has a config dir.
pub fn config_file_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.toml"))
}

fn default_log_file() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_DIR)
        .join("dirwatch.log")
}

/// Load config from `path`, or from the default location.
///
/// An explicitly given path must exist; the default one may be absent.
pub fn load(path: Option<&Path>) -> Result<AppConfig> {
    let (path, required) = match path {
        Some(path) => (path.to_path_buf(), true),
        None => match config_file_path() {
            Some(path) => (path, false),
            None => return Ok(AppConfig::default()),
        },
    };

    if !required && !path.exists() {
        return Ok(AppConfig::default());
    }

    let contents = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    AppConfig::from_toml_str(&contents)
        .with_context(|| format!("Invalid config file {}", path.display()))
}
