//! Driver that shells out according to a [`ManagerDefinition`]

use async_trait::async_trait;
use regex::Regex;
use std::path::PathBuf;
use std::time::Duration;

use super::definition::{BREW, ManagerDefinition};
use crate::command::run_shell;
use crate::context::Context;
use crate::driver::BootstrapDriver;
use crate::error::{Error, Result};
use crate::options::BootstrapOptions;
use crate::status::BootstrapStatus;

/// Version probes should answer quickly; installers get the caller's timeout.
const PROBE_TIMEOUT: Duration = Duration::from_secs(30);

pub struct CommandDriver {
    definition: ManagerDefinition,
    version_pattern: Option<Regex>,
}

impl CommandDriver {
    pub fn new(definition: ManagerDefinition) -> Self {
        let version_pattern = match Regex::new(definition.version_pattern) {
            Ok(re) => Some(re),
            Err(e) => {
                tracing::warn!(manager = definition.name, error = %e, "invalid version pattern");
                None
            }
        };
        Self {
            definition,
            version_pattern,
        }
    }

    pub fn definition(&self) -> &ManagerDefinition {
        &self.definition
    }

    pub fn root(&self, context: &Context) -> PathBuf {
        context.root_dir(
            self.definition.root_env,
            self.definition.default_root(context.platform),
        )
    }

    fn render(&self, template: &str, context: &Context) -> String {
        template
            .replace("{root}", &self.root(context).to_string_lossy())
            .replace("{brew_prefix}", &brew_prefix(context).to_string_lossy())
    }

    /// Extract a version from probe output.
    ///
    /// Falls back to the first non-empty line when the pattern does not match.
    fn parse_version(&self, output: &str) -> Option<String> {
        let captured = self
            .version_pattern
            .as_ref()
            .and_then(|re| re.captures(output))
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string());
        if captured.is_some() {
            return captured;
        }
        output
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .map(str::to_string)
    }

    async fn probe(&self, context: &Context) -> Result<String> {
        run_shell(&self.render(self.definition.probe, context), PROBE_TIMEOUT).await
    }
}

/// Homebrew's root, which may not be on PATH yet when brew was installed
/// earlier in the same run.
fn brew_prefix(context: &Context) -> PathBuf {
    context.root_dir(BREW.root_env, BREW.default_root(context.platform))
}

#[async_trait]
impl BootstrapDriver for CommandDriver {
    fn name(&self) -> &str {
        self.definition.name
    }

    fn dependencies(&self) -> Vec<String> {
        self.definition
            .dependencies
            .iter()
            .map(|d| d.to_string())
            .collect()
    }

    fn is_supported(&self, context: &Context) -> bool {
        self.definition.platforms.contains(&context.platform)
    }

    async fn check_installation(&self, context: &Context) -> Result<BootstrapStatus> {
        let root = self.root(context);
        let base = BootstrapStatus::new(self.definition.name)
            .with_dependencies(self.dependencies())
            .with_config_path(&root)
            .with_detail("root", root.to_string_lossy().into_owned());

        match self.probe(context).await {
            Ok(output) => {
                let version = self.parse_version(&output);
                tracing::debug!(manager = self.definition.name, ?version, "probe succeeded");
                Ok(BootstrapStatus {
                    installed: true,
                    version,
                    ..base
                })
            }
            Err(Error::Io(e)) => Err(Error::Io(e)),
            Err(e) => {
                tracing::debug!(manager = self.definition.name, error = %e, "probe failed");
                Ok(base
                    .with_issue(format!("{} is not installed", self.definition.name))
                    .with_detail("probe_error", e.to_string()))
            }
        }
    }

    async fn install(&self, context: &Context, options: &BootstrapOptions) -> Result<()> {
        let template = self
            .definition
            .install_command(context.platform)
            .ok_or_else(|| Error::Unsupported {
                manager: self.definition.name.to_string(),
                platform: context.platform.to_string(),
            })?;

        let script = self.render(template, context);
        tracing::info!(manager = self.definition.name, "running installer");
        run_shell(&script, options.timeout).await?;
        Ok(())
    }

    /// Verify that the shell profile initialises this manager.
    ///
    /// The profile is never edited; a missing snippet is reported so the user
    /// can add it.
    async fn configure(&self, context: &Context, _options: &BootstrapOptions) -> Result<()> {
        let contents = match tokio::fs::read_to_string(&context.shell_profile).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
            Err(e) => return Err(e.into()),
        };

        if contents.contains(self.definition.profile_marker) {
            return Ok(());
        }

        Err(Error::NotConfigured {
            manager: self.definition.name.to_string(),
            profile: context.shell_profile.clone(),
            snippet: self.render(self.definition.init_snippet, context),
        })
    }

    async fn validate(&self, context: &Context) -> Result<()> {
        self.probe(context).await.map(|_| ())
    }
}
