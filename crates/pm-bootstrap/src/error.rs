//! Error types for pm-bootstrap

use std::path::PathBuf;

/// Result type for bootstrap operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while checking or installing package managers
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Dependency graph error (a cycle)
    #[error(transparent)]
    Resolve(#[from] pm_resolver::Error),

    /// External command exited with a non-zero status
    #[error("Command failed: {command} (exit code {code}): {stderr}")]
    CommandFailed {
        command: String,
        code: i32,
        stderr: String,
    },

    /// External command could not be started
    #[error("Command not found: {command}")]
    CommandNotFound { command: String },

    /// External command ran past its timeout and was killed
    #[error("Command timed out after {seconds}s: {command}")]
    Timeout { command: String, seconds: u64 },

    /// Manager has no installer for the current platform
    #[error("{manager} is not supported on {platform}")]
    Unsupported { manager: String, platform: String },

    /// Shell profile lacks the manager's init snippet
    #[error("{manager} is not initialised in {}; add: {snippet}", .profile.display())]
    NotConfigured {
        manager: String,
        profile: PathBuf,
        snippet: String,
    },

    /// Home directory could not be determined
    #[error("Could not determine the home directory")]
    HomeNotFound,

    /// Invalid TOML in a bootstrap config file
    #[error("Failed to parse config at {}: {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
