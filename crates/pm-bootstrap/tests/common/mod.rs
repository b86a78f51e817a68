#![allow(dead_code)]

use async_trait::async_trait;
use pm_bootstrap::{
    BootstrapDriver, BootstrapOptions, BootstrapStatus, Context, Error, Platform, Result,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Shared record of driver calls, e.g. `"install:brew"`.
pub type Journal = Arc<Mutex<Vec<String>>>;

pub fn journal() -> Journal {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn entries(journal: &Journal) -> Vec<String> {
    journal.lock().unwrap().clone()
}

pub fn test_context() -> Context {
    Context::new("/home/dev", Platform::Linux)
}

/// In-memory driver whose behaviour is set up front.
pub struct ScriptedDriver {
    name: String,
    dependencies: Vec<String>,
    installed: Arc<AtomicBool>,
    supported: bool,
    fail_install: bool,
    fail_configure: bool,
    fail_validate: bool,
    journal: Journal,
}

impl ScriptedDriver {
    pub fn new(name: &str, dependencies: &[&str], journal: &Journal) -> Self {
        Self {
            name: name.to_string(),
            dependencies: dependencies.iter().map(|d| d.to_string()).collect(),
            installed: Arc::new(AtomicBool::new(false)),
            supported: true,
            fail_install: false,
            fail_configure: false,
            fail_validate: false,
            journal: Arc::clone(journal),
        }
    }

    pub fn installed(self) -> Self {
        self.installed.store(true, Ordering::SeqCst);
        self
    }

    pub fn unsupported(mut self) -> Self {
        self.supported = false;
        self
    }

    pub fn failing_install(mut self) -> Self {
        self.fail_install = true;
        self
    }

    pub fn failing_configure(mut self) -> Self {
        self.fail_configure = true;
        self
    }

    pub fn failing_validate(mut self) -> Self {
        self.fail_validate = true;
        self
    }

    pub fn boxed(self) -> Box<dyn BootstrapDriver> {
        Box::new(self)
    }

    fn record(&self, op: &str) {
        self.journal
            .lock()
            .unwrap()
            .push(format!("{op}:{}", self.name));
    }

    fn failure(&self, op: &str) -> Error {
        Error::CommandFailed {
            command: format!("{op} {}", self.name),
            code: 1,
            stderr: "scripted failure".to_string(),
        }
    }
}

#[async_trait]
impl BootstrapDriver for ScriptedDriver {
    fn name(&self) -> &str {
        &self.name
    }

    fn dependencies(&self) -> Vec<String> {
        self.dependencies.clone()
    }

    fn is_supported(&self, _context: &Context) -> bool {
        self.supported
    }

    async fn check_installation(&self, _context: &Context) -> Result<BootstrapStatus> {
        self.record("check");
        let status = if self.installed.load(Ordering::SeqCst) {
            BootstrapStatus::installed(&self.name, Some("1.0.0".to_string()))
        } else {
            BootstrapStatus::new(&self.name).with_issue(format!("{} is not installed", self.name))
        };
        Ok(status.with_dependencies(self.dependencies.clone()))
    }

    async fn install(&self, _context: &Context, _options: &BootstrapOptions) -> Result<()> {
        self.record("install");
        if self.fail_install {
            return Err(self.failure("install"));
        }
        self.installed.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn configure(&self, _context: &Context, _options: &BootstrapOptions) -> Result<()> {
        self.record("configure");
        if self.fail_configure {
            return Err(self.failure("configure"));
        }
        Ok(())
    }

    async fn validate(&self, _context: &Context) -> Result<()> {
        self.record("validate");
        if self.fail_validate {
            return Err(self.failure("validate"));
        }
        Ok(())
    }
}
