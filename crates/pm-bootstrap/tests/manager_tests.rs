//! BootstrapManager orchestration against scripted drivers

mod common;

use common::{ScriptedDriver, entries, journal, test_context};
use pm_bootstrap::{BootstrapConfig, BootstrapManager, BootstrapOptions, Error, Outcome};
use pretty_assertions::assert_eq;
use std::path::Path;

fn names(report: &pm_bootstrap::BootstrapReport) -> Vec<&str> {
    report.managers.iter().map(|s| s.manager.as_str()).collect()
}

#[tokio::test]
async fn test_install_runs_in_dependency_order() {
    let log = journal();
    let manager = BootstrapManager::with_drivers(
        test_context(),
        vec![
            ScriptedDriver::new("asdf", &["brew"], &log).boxed(),
            ScriptedDriver::new("brew", &[], &log).boxed(),
        ],
    );

    let report = manager
        .install_managers::<String>(&[], &BootstrapOptions::default())
        .await
        .unwrap();

    assert_eq!(names(&report), vec!["brew", "asdf"]);
    assert_eq!(
        entries(&log),
        vec![
            "check:brew",
            "install:brew",
            "configure:brew",
            "validate:brew",
            "check:brew",
            "check:asdf",
            "install:asdf",
            "configure:asdf",
            "validate:asdf",
            "check:asdf",
        ]
    );
    assert!(report.managers.iter().all(|s| s.outcome == Outcome::Installed));
    assert_eq!(report.summary.installed, 2);
    assert!(!report.has_failures());
}

#[tokio::test]
async fn test_install_only_touches_requested_managers() {
    let log = journal();
    let manager = BootstrapManager::with_drivers(
        test_context(),
        vec![
            ScriptedDriver::new("brew", &[], &log).boxed(),
            ScriptedDriver::new("rbenv", &["brew"], &log).boxed(),
        ],
    );

    let report = manager
        .install_managers(&["rbenv"], &BootstrapOptions::default())
        .await
        .unwrap();

    assert_eq!(names(&report), vec!["rbenv"]);
    assert!(entries(&log).iter().all(|e| e.ends_with(":rbenv")));
}

#[tokio::test]
async fn test_already_installed_is_skipped_unless_forced() {
    let log = journal();
    let manager = BootstrapManager::with_drivers(
        test_context(),
        vec![ScriptedDriver::new("nvm", &[], &log).installed().boxed()],
    );

    let report = manager
        .install_managers(&["nvm"], &BootstrapOptions::default())
        .await
        .unwrap();
    assert_eq!(report.managers[0].outcome, Outcome::Skipped);
    assert_eq!(report.managers[0].version.as_deref(), Some("1.0.0"));
    assert_eq!(entries(&log), vec!["check:nvm"]);

    let report = manager
        .install_managers(&["nvm"], &BootstrapOptions::default().force())
        .await
        .unwrap();
    assert_eq!(report.managers[0].outcome, Outcome::Installed);
    assert!(entries(&log).contains(&"install:nvm".to_string()));
}

#[tokio::test]
async fn test_install_failure_does_not_stop_the_run() {
    let log = journal();
    let manager = BootstrapManager::with_drivers(
        test_context(),
        vec![
            ScriptedDriver::new("brew", &[], &log).failing_install().boxed(),
            ScriptedDriver::new("asdf", &["brew"], &log).boxed(),
            ScriptedDriver::new("sdkman", &[], &log).boxed(),
        ],
    );

    let report = manager
        .install_managers::<String>(&[], &BootstrapOptions::default())
        .await
        .unwrap();

    let brew = report.status("brew").unwrap();
    assert_eq!(brew.outcome, Outcome::Failed);
    assert!(brew.issues.iter().any(|i| i.starts_with("install failed")));
    assert_eq!(report.status("asdf").unwrap().outcome, Outcome::Installed);
    assert_eq!(report.status("sdkman").unwrap().outcome, Outcome::Installed);
    assert_eq!(report.summary.failed, 1);
    assert!(report.has_failures());
    assert!(!entries(&log).contains(&"configure:brew".to_string()));
}

#[tokio::test]
async fn test_configure_and_validate_failures_are_issues_only() {
    let log = journal();
    let manager = BootstrapManager::with_drivers(
        test_context(),
        vec![
            ScriptedDriver::new("pyenv", &[], &log)
                .failing_configure()
                .failing_validate()
                .boxed(),
        ],
    );

    let report = manager
        .install_managers(&["pyenv"], &BootstrapOptions::default())
        .await
        .unwrap();

    let pyenv = report.status("pyenv").unwrap();
    assert_eq!(pyenv.outcome, Outcome::Installed);
    assert!(pyenv.installed);
    assert_eq!(pyenv.issues.len(), 2);
    assert!(pyenv.issues[0].starts_with("configure failed"));
    assert!(pyenv.issues[1].starts_with("validation failed"));
    assert!(!report.has_failures());
}

#[tokio::test]
async fn test_skip_configuration() {
    let log = journal();
    let manager = BootstrapManager::with_drivers(
        test_context(),
        vec![ScriptedDriver::new("nvm", &[], &log).boxed()],
    );

    manager
        .install_managers(&["nvm"], &BootstrapOptions::default().skip_configuration())
        .await
        .unwrap();

    assert_eq!(
        entries(&log),
        vec!["check:nvm", "install:nvm", "validate:nvm", "check:nvm"]
    );
}

#[tokio::test]
async fn test_dry_run_never_installs() {
    let log = journal();
    let manager = BootstrapManager::with_drivers(
        test_context(),
        vec![
            ScriptedDriver::new("brew", &[], &log).installed().boxed(),
            ScriptedDriver::new("asdf", &["brew"], &log).boxed(),
        ],
    );

    let report = manager
        .install_managers::<String>(&[], &BootstrapOptions::default().dry_run())
        .await
        .unwrap();

    assert_eq!(entries(&log), vec!["check:brew", "check:asdf"]);
    assert_eq!(report.status("brew").unwrap().outcome, Outcome::Skipped);
    let asdf = report.status("asdf").unwrap();
    assert_eq!(asdf.outcome, Outcome::Planned);
    assert_eq!(asdf.details["action"], "would install");
}

#[tokio::test]
async fn test_unknown_manager_is_recorded_and_run_continues() {
    let log = journal();
    let manager = BootstrapManager::with_drivers(
        test_context(),
        vec![ScriptedDriver::new("nvm", &[], &log).boxed()],
    );

    let report = manager
        .install_managers(&["bogus", "nvm"], &BootstrapOptions::default())
        .await
        .unwrap();

    assert_eq!(names(&report), vec!["bogus", "nvm"]);
    let bogus = report.status("bogus").unwrap();
    assert_eq!(bogus.outcome, Outcome::Failed);
    assert_eq!(bogus.issues, vec!["unknown package manager: bogus"]);
    assert_eq!(report.status("nvm").unwrap().outcome, Outcome::Installed);
}

#[tokio::test]
async fn test_cycle_aborts_before_any_driver_runs() {
    let log = journal();
    let manager = BootstrapManager::with_drivers(
        test_context(),
        vec![
            ScriptedDriver::new("a", &["b"], &log).boxed(),
            ScriptedDriver::new("b", &["c"], &log).boxed(),
            ScriptedDriver::new("c", &["a"], &log).boxed(),
        ],
    );

    let err = manager
        .install_managers(&["a", "b", "c"], &BootstrapOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Resolve(_)));
    assert!(err.to_string().contains("circular dependency detected"));
    assert!(entries(&log).is_empty());
    assert!(manager.validate_dependencies().is_err());
}

#[tokio::test]
async fn test_unsupported_manager_is_not_installed() {
    let log = journal();
    let manager = BootstrapManager::with_drivers(
        test_context(),
        vec![ScriptedDriver::new("brew", &[], &log).unsupported().boxed()],
    );

    let report = manager
        .install_managers(&["brew"], &BootstrapOptions::default())
        .await
        .unwrap();

    let brew = report.status("brew").unwrap();
    assert_eq!(brew.outcome, Outcome::Unsupported);
    assert!(brew.issues[0].contains("not supported on linux"));
    assert!(entries(&log).is_empty());
}

#[tokio::test]
async fn test_check_all_reports_in_order_without_installing() {
    let log = journal();
    let manager = BootstrapManager::with_drivers(
        test_context(),
        vec![
            ScriptedDriver::new("rbenv", &["brew"], &log).boxed(),
            ScriptedDriver::new("brew", &[], &log).installed().boxed(),
        ],
    );

    let report = manager.check_all().await.unwrap();

    assert_eq!(names(&report), vec!["brew", "rbenv"]);
    assert_eq!(entries(&log), vec!["check:brew", "check:rbenv"]);
    assert!(report.status("brew").unwrap().installed);
    assert_eq!(report.status("rbenv").unwrap().dependencies, vec!["brew"]);
    assert_eq!(report.summary.installed, 1);
    assert_eq!(report.summary.missing, 1);
}

#[tokio::test]
async fn test_disabled_manager_is_left_out() {
    let log = journal();
    let mut manager = BootstrapManager::with_drivers(
        test_context(),
        vec![
            ScriptedDriver::new("brew", &[], &log).boxed(),
            ScriptedDriver::new("sdkman", &[], &log).boxed(),
        ],
    );
    let config =
        BootstrapConfig::parse("[managers.sdkman]\ndisabled = true", Path::new("b.toml")).unwrap();
    manager.apply_config(&config);

    assert_eq!(manager.available_managers(), vec!["brew"]);

    let report = manager
        .install_managers::<String>(&[], &BootstrapOptions::default())
        .await
        .unwrap();
    assert_eq!(names(&report), vec!["brew"]);
}
