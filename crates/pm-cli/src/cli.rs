//! CLI argument parsing using clap derive

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

/// gz - developer environment tooling
#[derive(Parser, Debug)]
#[command(name = "gz")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Additional bootstrap config file (overrides the global one)
    #[arg(long, global = true, env = "GZ_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory holding the global bootstrap.toml
    #[arg(long, global = true, env = "GZ_CONFIG_DIR", hide = true)]
    pub config_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Package manager operations
    Pm {
        #[command(subcommand)]
        action: PmAction,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum PmAction {
    /// Check, install and configure package managers
    ///
    /// Examples:
    ///   gz pm bootstrap                      # Install everything missing
    ///   gz pm bootstrap --check              # Report what is installed
    ///   gz pm bootstrap --install asdf,nvm   # Install selected managers
    ///   gz pm bootstrap --install --dry-run  # Show what would happen
    Bootstrap(BootstrapArgs),

    /// Print the resolved installation order
    Order {
        /// Managers to order (default: all)
        managers: Vec<String>,
    },

    /// Show direct and transitive dependencies of a manager
    Deps {
        manager: String,
    },
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct BootstrapArgs {
    /// Only report installation status (takes precedence over --install)
    #[arg(long)]
    pub check: bool,

    /// Managers to install, comma separated (default: all missing)
    #[arg(
        long,
        num_args = 0..=1,
        default_missing_value = "",
        value_name = "MANAGERS"
    )]
    pub install: Option<String>,

    /// Reinstall managers that are already present
    #[arg(long)]
    pub force: bool,

    /// Output the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Show what would be installed without installing
    #[arg(long)]
    pub dry_run: bool,

    /// Do not check shell profile initialisation
    #[arg(long)]
    pub skip_config: bool,

    /// Per-step timeout (e.g. 90, 90s, 10m, 1h)
    #[arg(long, value_parser = parse_duration)]
    pub timeout: Option<Duration>,
}

impl BootstrapArgs {
    /// Managers named by `--install`, empty for "all".
    pub fn install_list(&self) -> Vec<String> {
        self.install
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Parse `90`, `90s`, `10m` or `1h`.
pub fn parse_duration(value: &str) -> Result<Duration, String> {
    let value = value.trim();
    let (digits, multiplier) = match value.char_indices().last() {
        Some((idx, 's')) => (&value[..idx], 1),
        Some((idx, 'm')) => (&value[..idx], 60),
        Some((idx, 'h')) => (&value[..idx], 60 * 60),
        _ => (value, 1),
    };
    let amount: u64 = digits
        .parse()
        .map_err(|_| format!("invalid duration: {value}"))?;
    if amount == 0 {
        return Err("duration must be greater than zero".to_string());
    }
    let secs = amount
        .checked_mul(multiplier)
        .ok_or_else(|| format!("duration too large: {value}"))?;
    Ok(Duration::from_secs(secs))
}
