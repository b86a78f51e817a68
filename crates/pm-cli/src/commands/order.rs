//! `pm order` and `pm deps`

use colored::Colorize;
use pm_bootstrap::BootstrapManager;

use super::bootstrap::ensure_known;
use crate::error::Result;

/// Print the resolved installation order for `managers` (all when empty).
pub fn run_order(manager: &BootstrapManager, managers: &[String]) -> Result<()> {
    ensure_known(manager, managers)?;
    let order = manager.installation_order(managers)?;
    println!("{}", order.join(" → "));
    Ok(())
}

/// Print the direct and transitive dependencies of `name`.
pub fn run_deps(manager: &BootstrapManager, name: &str) -> Result<()> {
    ensure_known(manager, &[name.to_string()])?;
    let resolver = manager.resolver();
    let direct = resolver.dependencies(name);
    let all = resolver.all_dependencies(name)?;

    println!("{}", name.cyan().bold());
    println!("  {}: {}", "direct".dimmed(), list_or_none(&direct));
    println!("  {}: {}", "all".dimmed(), list_or_none(&all));
    Ok(())
}

fn list_or_none(names: &[String]) -> String {
    if names.is_empty() {
        "none".to_string()
    } else {
        names.join(", ")
    }
}
