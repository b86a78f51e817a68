//! Per-manager status snapshots and the report built from them

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use crate::context::Platform;

/// What happened to a manager during a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// Inspected only (check mode).
    Checked,
    /// Already installed, nothing to do.
    Skipped,
    Installed,
    /// Would be installed (dry run).
    Planned,
    Failed,
    Unsupported,
}

/// Snapshot of one manager, created fresh on every check.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BootstrapStatus {
    pub manager: String,
    pub installed: bool,
    pub version: Option<String>,
    pub config_path: Option<PathBuf>,
    pub issues: Vec<String>,
    pub dependencies: Vec<String>,
    pub details: BTreeMap<String, serde_json::Value>,
    pub outcome: Outcome,
}

impl BootstrapStatus {
    pub fn new(manager: impl Into<String>) -> Self {
        Self {
            manager: manager.into(),
            installed: false,
            version: None,
            config_path: None,
            issues: Vec::new(),
            dependencies: Vec::new(),
            details: BTreeMap::new(),
            outcome: Outcome::Checked,
        }
    }

    pub fn installed(manager: impl Into<String>, version: Option<String>) -> Self {
        Self {
            installed: true,
            version,
            ..Self::new(manager)
        }
    }

    /// A status that failed before the driver could report anything.
    pub fn failed(manager: impl Into<String>, issue: impl Into<String>) -> Self {
        Self::new(manager)
            .with_issue(issue)
            .with_outcome(Outcome::Failed)
    }

    pub fn with_issue(mut self, issue: impl Into<String>) -> Self {
        self.issues.push(issue.into());
        self
    }

    pub fn with_outcome(mut self, outcome: Outcome) -> Self {
        self.outcome = outcome;
        self
    }

    pub fn with_dependencies(mut self, dependencies: Vec<String>) -> Self {
        self.dependencies = dependencies;
        self
    }

    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BootstrapSummary {
    pub total: usize,
    pub installed: usize,
    pub missing: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl BootstrapSummary {
    pub fn from_statuses(statuses: &[BootstrapStatus]) -> Self {
        let installed = statuses.iter().filter(|s| s.installed).count();
        Self {
            total: statuses.len(),
            installed,
            missing: statuses.len() - installed,
            failed: statuses
                .iter()
                .filter(|s| s.outcome == Outcome::Failed)
                .count(),
            skipped: statuses
                .iter()
                .filter(|s| s.outcome == Outcome::Skipped)
                .count(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BootstrapReport {
    pub run_id: String,
    pub timestamp: DateTime<Utc>,
    pub platform: Platform,
    pub managers: Vec<BootstrapStatus>,
    pub summary: BootstrapSummary,
    #[serde(rename = "duration_secs", serialize_with = "serialize_secs")]
    pub duration: Duration,
}

impl BootstrapReport {
    pub fn new(platform: Platform, managers: Vec<BootstrapStatus>, duration: Duration) -> Self {
        let summary = BootstrapSummary::from_statuses(&managers);
        Self {
            run_id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            platform,
            managers,
            summary,
            duration,
        }
    }

    pub fn status(&self, manager: &str) -> Option<&BootstrapStatus> {
        self.managers.iter().find(|s| s.manager == manager)
    }

    pub fn has_failures(&self) -> bool {
        self.summary.failed > 0
    }
}

fn serialize_secs<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(duration.as_secs_f64())
}
