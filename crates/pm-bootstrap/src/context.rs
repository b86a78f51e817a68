//! Execution context for bootstrap drivers

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Environment variables drivers consult to locate their installations.
const TRACKED_VARS: &[&str] = &[
    "SHELL",
    "HOMEBREW_PREFIX",
    "ASDF_DIR",
    "NVM_DIR",
    "RBENV_ROOT",
    "PYENV_ROOT",
    "SDKMAN_DIR",
];

/// Operating system family, as far as bootstrapping cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    MacOs,
    Linux,
    Other,
}

impl Platform {
    /// The platform this binary was compiled for.
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            Self::MacOs
        } else if cfg!(target_os = "linux") {
            Self::Linux
        } else {
            Self::Other
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MacOs => "macos",
            Self::Linux => "linux",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Context passed to drivers for check/install/configure/validate
#[derive(Debug, Clone)]
pub struct Context {
    pub home: PathBuf,
    pub platform: Platform,
    /// Shell profile where managers are expected to be initialised
    pub shell_profile: PathBuf,
    pub env: HashMap<String, String>,
}

impl Context {
    pub fn new(home: impl Into<PathBuf>, platform: Platform) -> Self {
        let home = home.into();
        let shell_profile = default_profile(&home, platform, None);
        Self {
            home,
            platform,
            shell_profile,
            env: HashMap::new(),
        }
    }

    /// Build a context from the running process.
    pub fn detect() -> Result<Self> {
        let home = dirs::home_dir().ok_or(Error::HomeNotFound)?;
        let platform = Platform::current();

        let env: HashMap<String, String> = TRACKED_VARS
            .iter()
            .filter_map(|key| std::env::var(key).ok().map(|v| (key.to_string(), v)))
            .collect();

        let shell_profile = default_profile(&home, platform, env.get("SHELL").map(String::as_str));
        tracing::debug!(home = %home.display(), %platform, profile = %shell_profile.display(), "detected context");

        Ok(Self {
            home,
            platform,
            shell_profile,
            env,
        })
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    pub fn with_shell_profile(mut self, profile: impl Into<PathBuf>) -> Self {
        self.shell_profile = profile.into();
        self
    }

    pub fn var(&self, key: &str) -> Option<&str> {
        self.env
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// Resolve an installation root.
    ///
    /// `env_key` wins when set; otherwise `default` is taken relative to the
    /// home directory (an absolute `default` is used as-is).
    pub fn root_dir(&self, env_key: Option<&str>, default: &str) -> PathBuf {
        if let Some(value) = env_key.and_then(|key| self.var(key)) {
            return PathBuf::from(value);
        }
        self.home.join(default)
    }
}

fn default_profile(home: &Path, platform: Platform, shell: Option<&str>) -> PathBuf {
    let shell = shell.unwrap_or(match platform {
        Platform::MacOs => "/bin/zsh",
        _ => "/bin/bash",
    });

    if shell.ends_with("zsh") {
        home.join(".zshrc")
    } else if shell.ends_with("fish") {
        home.join(".config/fish/config.fish")
    } else if shell.ends_with("bash") {
        match platform {
            Platform::MacOs => home.join(".bash_profile"),
            _ => home.join(".bashrc"),
        }
    } else {
        home.join(".profile")
    }
}
