//! BootstrapManager: runs drivers in dependency order

use pm_resolver::DependencyResolver;
use std::collections::BTreeMap;
use std::time::Instant;

use crate::config::BootstrapConfig;
use crate::context::Context;
use crate::driver::BootstrapDriver;
use crate::drivers;
use crate::error::Result;
use crate::options::BootstrapOptions;
use crate::status::{BootstrapReport, BootstrapStatus, Outcome};

/// Owns the driver registry and the dependency graph built from it.
///
/// Drivers are processed strictly one at a time, in resolved order. A
/// failure of one manager is recorded on its status and never stops the
/// rest of the run; only a dependency cycle aborts, and it does so before
/// any driver runs.
pub struct BootstrapManager {
    context: Context,
    drivers: BTreeMap<String, Box<dyn BootstrapDriver>>,
    resolver: DependencyResolver,
}

impl BootstrapManager {
    /// Manager with every built-in driver registered.
    pub fn new(context: Context) -> Self {
        Self::with_drivers(context, drivers::builtin())
    }

    pub fn with_drivers(context: Context, drivers: Vec<Box<dyn BootstrapDriver>>) -> Self {
        let mut manager = Self {
            context,
            drivers: BTreeMap::new(),
            resolver: DependencyResolver::new(),
        };
        for driver in drivers {
            manager.register(driver);
        }
        manager
    }

    /// Add a driver, replacing any registered under the same name.
    pub fn register(&mut self, driver: Box<dyn BootstrapDriver>) {
        let name = driver.name().to_string();
        self.resolver.add_dependency(name.clone(), driver.dependencies());
        tracing::debug!(manager = %name, "registered driver");
        self.drivers.insert(name, driver);
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn resolver(&self) -> &DependencyResolver {
        &self.resolver
    }

    /// Apply user overrides: drop disabled drivers, replace declared edges.
    ///
    /// A disabled manager keeps its edges in the graph so that other
    /// managers are still ordered relative to it.
    pub fn apply_config(&mut self, config: &BootstrapConfig) {
        for (name, settings) in &config.managers {
            if let Some(deps) = &settings.depends_on {
                self.resolver.add_dependency(name.clone(), deps.iter().cloned());
            }
            if settings.is_disabled() && self.drivers.remove(name).is_some() {
                tracing::info!(manager = %name, "manager disabled by config");
            }
        }
    }

    /// Sorted names of the registered drivers.
    pub fn available_managers(&self) -> Vec<String> {
        self.drivers.keys().cloned().collect()
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.drivers.contains_key(name)
    }

    /// Startup check that the declared graph has no cycle.
    pub fn validate_dependencies(&self) -> Result<()> {
        self.resolver.validate_no_cycles()?;
        Ok(())
    }

    /// Order in which `names` would be processed; empty means every
    /// registered manager.
    pub fn installation_order<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<String>> {
        let order = if names.is_empty() {
            self.resolver.resolve(&self.available_managers())?
        } else {
            self.resolver.resolve(names)?
        };
        Ok(order)
    }

    /// Status of every registered driver, in installation order.
    pub async fn check_all(&self) -> Result<BootstrapReport> {
        let started = Instant::now();
        let order = self.installation_order::<String>(&[])?;

        let mut statuses = Vec::with_capacity(order.len());
        for name in &order {
            statuses.push(self.check_one(name).await);
        }

        Ok(BootstrapReport::new(
            self.context.platform,
            statuses,
            started.elapsed(),
        ))
    }

    async fn check_one(&self, name: &str) -> BootstrapStatus {
        let Some(driver) = self.drivers.get(name) else {
            return unknown_manager(name);
        };
        if !driver.is_supported(&self.context) {
            return self.unsupported(driver.as_ref());
        }
        match driver.check_installation(&self.context).await {
            Ok(status) => status,
            Err(e) => {
                tracing::warn!(manager = name, error = %e, "check failed");
                BootstrapStatus::failed(name, format!("check failed: {e}"))
                    .with_dependencies(driver.dependencies())
            }
        }
    }

    /// Install `names` (empty: every registered manager) in dependency order.
    ///
    /// Returns `Err` only for a dependency cycle. Every other problem is
    /// recorded on the affected manager's status.
    pub async fn install_managers<S: AsRef<str>>(
        &self,
        names: &[S],
        options: &BootstrapOptions,
    ) -> Result<BootstrapReport> {
        let started = Instant::now();
        let order = self.installation_order(names)?;
        tracing::info!(order = %order.join(" → "), dry_run = options.dry_run, "installation order");

        let mut statuses = Vec::with_capacity(order.len());
        for name in &order {
            statuses.push(self.install_one(name, options).await);
        }

        Ok(BootstrapReport::new(
            self.context.platform,
            statuses,
            started.elapsed(),
        ))
    }

    async fn install_one(&self, name: &str, options: &BootstrapOptions) -> BootstrapStatus {
        let Some(driver) = self.drivers.get(name) else {
            tracing::warn!(manager = name, "no driver registered");
            return unknown_manager(name);
        };
        if !driver.is_supported(&self.context) {
            return self.unsupported(driver.as_ref());
        }

        let current = match driver.check_installation(&self.context).await {
            Ok(status) => status,
            Err(e) => {
                tracing::warn!(manager = name, error = %e, "check failed");
                return BootstrapStatus::failed(name, format!("check failed: {e}"))
                    .with_dependencies(driver.dependencies());
            }
        };

        if current.installed && !options.force {
            tracing::info!(manager = name, version = ?current.version, "already installed");
            return current.with_outcome(Outcome::Skipped);
        }

        if options.dry_run {
            return current
                .with_outcome(Outcome::Planned)
                .with_detail("action", "would install");
        }

        tracing::info!(manager = name, "installing");
        if let Err(e) = driver.install(&self.context, options).await {
            tracing::warn!(manager = name, error = %e, "install failed");
            return current
                .with_issue(format!("install failed: {e}"))
                .with_outcome(Outcome::Failed);
        }

        let mut issues = Vec::new();
        if !options.skip_configuration {
            if let Err(e) = driver.configure(&self.context, options).await {
                tracing::warn!(manager = name, error = %e, "configure failed");
                issues.push(format!("configure failed: {e}"));
            }
        }
        if let Err(e) = driver.validate(&self.context).await {
            tracing::warn!(manager = name, error = %e, "validation failed");
            issues.push(format!("validation failed: {e}"));
        }

        let mut status = match driver.check_installation(&self.context).await {
            Ok(status) => status,
            Err(e) => BootstrapStatus::failed(name, format!("check failed: {e}"))
                .with_dependencies(driver.dependencies()),
        };
        status.issues.extend(issues);
        status.outcome = if status.installed {
            Outcome::Installed
        } else {
            Outcome::Failed
        };
        status
    }

    fn unsupported(&self, driver: &dyn BootstrapDriver) -> BootstrapStatus {
        let platform = self.context.platform;
        tracing::info!(manager = driver.name(), %platform, "not supported on this platform");
        BootstrapStatus::new(driver.name())
            .with_dependencies(driver.dependencies())
            .with_issue(format!("{} is not supported on {platform}", driver.name()))
            .with_outcome(Outcome::Unsupported)
    }
}

fn unknown_manager(name: &str) -> BootstrapStatus {
    BootstrapStatus::failed(name, format!("unknown package manager: {name}"))
}
