//! Options controlling an install run

use std::time::Duration;

/// Default per-step timeout for external installers.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10 * 60);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapOptions {
    /// Install even when the manager is already present.
    pub force: bool,
    pub skip_configuration: bool,
    /// Resolve and check only; never run installers.
    pub dry_run: bool,
    pub timeout: Duration,
}

impl Default for BootstrapOptions {
    fn default() -> Self {
        Self {
            force: false,
            skip_configuration: false,
            dry_run: false,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl BootstrapOptions {
    pub fn dry_run(mut self) -> Self {
        self.dry_run = true;
        self
    }

    pub fn force(mut self) -> Self {
        self.force = true;
        self
    }

    pub fn skip_configuration(mut self) -> Self {
        self.skip_configuration = true;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
