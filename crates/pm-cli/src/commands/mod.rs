//! Command implementations for pm-cli

pub mod bootstrap;
pub mod order;

use std::path::PathBuf;

use pm_bootstrap::{BootstrapConfig, BootstrapManager, ConfigLoader, Context};

use crate::error::Result;

pub use bootstrap::run_bootstrap;
pub use order::{run_deps, run_order};

/// Where configuration comes from, as given on the command line.
#[derive(Debug, Clone, Default)]
pub struct ConfigSource {
    pub file: Option<PathBuf>,
    pub global_dir: Option<PathBuf>,
}

impl ConfigSource {
    fn loader(&self) -> ConfigLoader {
        let mut loader = ConfigLoader::new();
        if let Some(dir) = &self.global_dir {
            loader = loader.with_global_config_dir(dir);
        }
        if let Some(file) = &self.file {
            loader = loader.with_file(file);
        }
        loader
    }
}

/// Detect the environment, apply configuration and check the graph.
pub fn load_manager(source: &ConfigSource) -> Result<(BootstrapManager, BootstrapConfig)> {
    let config = source.loader().load()?;
    let mut manager = BootstrapManager::new(Context::detect()?);
    manager.apply_config(&config);
    manager.validate_dependencies()?;
    Ok((manager, config))
}
