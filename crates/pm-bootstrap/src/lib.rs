//! Package manager bootstrapping
//!
//! [`BootstrapManager`] owns a set of [`BootstrapDriver`]s (Homebrew, asdf,
//! nvm, rbenv, pyenv, SDKMAN! out of the box), feeds their declared
//! dependencies into a [`pm_resolver::DependencyResolver`] and runs
//! check/install/configure/validate for each manager in the resolved order.

pub mod command;
pub mod config;
pub mod context;
pub mod driver;
pub mod drivers;
pub mod error;
pub mod manager;
pub mod options;
pub mod status;

pub use config::{BootstrapConfig, ConfigLoader, ManagerSettings};
pub use context::{Context, Platform};
pub use driver::BootstrapDriver;
pub use drivers::{CommandDriver, ManagerDefinition};
pub use error::{Error, Result};
pub use manager::BootstrapManager;
pub use options::{BootstrapOptions, DEFAULT_TIMEOUT};
pub use status::{BootstrapReport, BootstrapStatus, BootstrapSummary, Outcome};
