//! `pm bootstrap` implementation

use colored::Colorize;
use pm_bootstrap::{
    BootstrapConfig, BootstrapManager, BootstrapOptions, BootstrapReport, BootstrapStatus,
    DEFAULT_TIMEOUT, Outcome,
};
use std::fmt::Write;

use crate::cli::BootstrapArgs;
use crate::error::{CliError, Result};

/// Run `pm bootstrap`: install missing managers by default, only report
/// with `--check`.
///
/// Check mode always succeeds once the report is printed; install mode fails
/// when any manager ended up `failed`.
pub async fn run_bootstrap(
    manager: &BootstrapManager,
    config: &BootstrapConfig,
    args: &BootstrapArgs,
    verbose: bool,
) -> Result<()> {
    if args.check {
        let report = manager.check_all().await?;
        return print_report(&report, args.json, verbose);
    }

    let names = args.install_list();
    ensure_known(manager, &names)?;
    let options = build_options(args, config);

    let order = manager.installation_order(&names)?;
    if !args.json {
        let label = if options.dry_run {
            "Installation order (dry run)"
        } else {
            "Installation order"
        };
        println!("{}: {}", label.bold(), order.join(" → ").cyan());
        println!();
    }

    let report = manager.install_managers(&names, &options).await?;
    print_report(&report, args.json, verbose)?;

    if report.has_failures() {
        return Err(CliError::user("some installations failed"));
    }
    Ok(())
}

fn print_report(report: &BootstrapReport, json: bool, verbose: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        print!("{}", format_report(report, verbose));
    }
    Ok(())
}

fn build_options(args: &BootstrapArgs, config: &BootstrapConfig) -> BootstrapOptions {
    let timeout = args
        .timeout
        .or_else(|| config.timeout())
        .unwrap_or(DEFAULT_TIMEOUT);

    BootstrapOptions {
        force: args.force,
        skip_configuration: args.skip_config,
        dry_run: args.dry_run,
        timeout,
    }
}

/// Fail before doing anything if a name has no registered driver.
pub(crate) fn ensure_known(manager: &BootstrapManager, names: &[String]) -> Result<()> {
    match names.iter().find(|name| !manager.is_registered(name)) {
        Some(unknown) => Err(CliError::user(format!(
            "unknown package manager: {unknown}. Available: {}",
            manager.available_managers().join(", ")
        ))),
        None => Ok(()),
    }
}

/// Human-readable report. Details are only shown when `verbose`.
pub fn format_report(report: &BootstrapReport, verbose: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} ({})",
        "Package Managers".bold(),
        report.platform.to_string().dimmed()
    );
    let _ = writeln!(out);

    for status in &report.managers {
        let _ = writeln!(out, "  {} {} {}", marker(status), status.manager.cyan(), describe(status));
        for issue in &status.issues {
            let _ = writeln!(out, "      {} {}", "-".yellow(), issue);
        }
        if verbose {
            if !status.dependencies.is_empty() {
                let _ = writeln!(
                    out,
                    "      {}: {}",
                    "depends on".dimmed(),
                    status.dependencies.join(", ")
                );
            }
            for (key, value) in &status.details {
                let value = value
                    .as_str()
                    .map(str::to_string)
                    .unwrap_or_else(|| value.to_string());
                let _ = writeln!(out, "      {}: {}", key.dimmed(), value);
            }
        }
    }

    let summary = &report.summary;
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "{} total, {} installed, {} missing, {} failed, {} skipped ({:.1}s)",
        summary.total,
        summary.installed.to_string().green(),
        summary.missing.to_string().yellow(),
        summary.failed.to_string().red(),
        summary.skipped,
        report.duration.as_secs_f64()
    );
    out
}

fn marker(status: &BootstrapStatus) -> colored::ColoredString {
    match status.outcome {
        Outcome::Failed => "✗".red(),
        Outcome::Unsupported => "-".dimmed(),
        Outcome::Planned => "→".yellow(),
        _ if status.installed => "✓".green(),
        _ => "✗".yellow(),
    }
}

fn describe(status: &BootstrapStatus) -> String {
    let state = match (&status.version, status.installed) {
        (Some(version), true) => version.clone(),
        (None, true) => "installed".to_string(),
        (_, false) => "not installed".to_string(),
    };
    match status.outcome {
        Outcome::Checked => state,
        Outcome::Skipped => format!("{state} (already installed)"),
        Outcome::Installed => format!("{state} (installed)"),
        Outcome::Planned => format!("{state} (would install)"),
        Outcome::Failed => format!("{state} (failed)"),
        Outcome::Unsupported => "unsupported on this platform".to_string(),
    }
}
