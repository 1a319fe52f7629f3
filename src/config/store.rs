// ABOUTME: JSON-backed configuration record at ~/.config/resume/config.json
// Missing file means defaults; keys this tool doesn't know survive a save

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not determine home directory")]
    NoHomeDir,

    #[error("Config IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(rename = "ssh_host", default, skip_serializing_if = "Option::is_none")]
    pub remote_host: Option<String>,

    #[serde(rename = "ssh_agent_forwarding", default)]
    pub forwarding_enabled: bool,

    /// Per remote command; unset means rely on ssh's own timeouts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command_timeout_secs: Option<u64>,

    /// Keys written by other tools or newer versions, carried through untouched.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Config {
    /// The configured host, if present and not blank.
    pub fn host(&self) -> Option<&str> {
        self.remote_host
            .as_deref()
            .map(str::trim)
            .filter(|h| !h.is_empty())
    }

    pub fn command_timeout(&self) -> Option<Duration> {
        self.command_timeout_secs.map(Duration::from_secs)
    }
}

#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `~/.config/resume/config.json`, the same on every platform.
    pub fn default_location() -> Result<Self, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        Ok(Self::at(config_dir(&home).join("config.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Config, ConfigError> {
        if !self.path.exists() {
            debug!("No config at {}, using defaults", self.path.display());
            return Ok(Config::default());
        }
        let content = fs::read_to_string(&self.path).map_err(|source| ConfigError::Io {
            path: self.path.clone(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        let io_err = |source: std::io::Error| ConfigError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let mut json = serde_json::to_string_pretty(config).map_err(|source| ConfigError::Parse {
            path: self.path.clone(),
            source,
        })?;
        json.push('\n');
        fs::write(&self.path, json).map_err(io_err)?;
        debug!("Saved config to {}", self.path.display());
        Ok(())
    }
}

/// Directory holding the config file and logs.
pub fn config_dir(home: &Path) -> PathBuf {
    home.join(".config").join("resume")
}
