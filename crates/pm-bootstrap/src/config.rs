//! Layered bootstrap configuration
//!
//! Sources, later overriding earlier:
//! 1. Global (`<config_dir>/gz/bootstrap.toml`)
//! 2. An explicit file passed by the caller
//!
//! A missing global file is skipped. A missing explicit file is an error.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, Result};

const APP_DIR: &str = "gz";
const CONFIG_FILE: &str = "bootstrap.toml";

/// Per-manager overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ManagerSettings {
    /// Replaces the driver's declared dependencies.
    pub depends_on: Option<Vec<String>>,
    /// Drops the driver entirely.
    pub disabled: Option<bool>,
}

impl ManagerSettings {
    pub fn is_disabled(&self) -> bool {
        self.disabled.unwrap_or(false)
    }

    fn merge(&mut self, other: &ManagerSettings) {
        if other.depends_on.is_some() {
            self.depends_on.clone_from(&other.depends_on);
        }
        if other.disabled.is_some() {
            self.disabled = other.disabled;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BootstrapConfig {
    pub timeout_secs: Option<u64>,
    #[serde(default)]
    pub managers: BTreeMap<String, ManagerSettings>,
}

impl BootstrapConfig {
    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Overlay `other` on top of `self`, field by field.
    pub fn merge(&mut self, other: &BootstrapConfig) {
        if other.timeout_secs.is_some() {
            self.timeout_secs = other.timeout_secs;
        }
        for (name, settings) in &other.managers {
            self.managers
                .entry(name.clone())
                .or_default()
                .merge(settings);
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// Loads [`BootstrapConfig`] from the global directory and an optional file.
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    /// When `None`, `dirs::config_dir()/gz` is used.
    global_config_dir: Option<PathBuf>,
    file: Option<PathBuf>,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom global config directory (tests, `GZ_CONFIG_DIR`).
    pub fn with_global_config_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.global_config_dir = Some(dir.into());
        self
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(path.into());
        self
    }

    fn global_config_dir(&self) -> Option<PathBuf> {
        if let Some(dir) = &self.global_config_dir {
            return Some(dir.clone());
        }
        dirs::config_dir().map(|d| d.join(APP_DIR))
    }

    pub fn load(&self) -> Result<BootstrapConfig> {
        let mut config = BootstrapConfig::default();

        if let Some(dir) = self.global_config_dir() {
            let path = dir.join(CONFIG_FILE);
            if path.is_file() {
                tracing::debug!(?path, "loading global config");
                config.merge(&read_config(&path)?);
            } else {
                tracing::debug!(?path, "no global config, skipping");
            }
        }

        if let Some(path) = &self.file {
            tracing::debug!(?path, "loading config file");
            config.merge(&read_config(path)?);
        }

        Ok(config)
    }
}

fn read_config(path: &Path) -> Result<BootstrapConfig> {
    let content = fs::read_to_string(path)?;
    BootstrapConfig::parse(&content, path)
}
