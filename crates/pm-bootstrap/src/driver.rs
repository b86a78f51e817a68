//! BootstrapDriver trait

use crate::Result;
use crate::context::Context;
use crate::options::BootstrapOptions;
use crate::status::BootstrapStatus;
use async_trait::async_trait;

/// Core trait for package manager drivers.
///
/// `name` is also the node key in the dependency graph, so it must be
/// stable. The manager only ever hands drivers their own name's turn in the
/// resolved order; drivers never see each other.
#[async_trait]
pub trait BootstrapDriver: Send + Sync {
    fn name(&self) -> &str;

    /// Names of other drivers that must be installed first.
    fn dependencies(&self) -> Vec<String>;

    fn is_supported(&self, context: &Context) -> bool;

    async fn check_installation(&self, context: &Context) -> Result<BootstrapStatus>;

    async fn install(&self, context: &Context, options: &BootstrapOptions) -> Result<()>;

    async fn configure(&self, context: &Context, options: &BootstrapOptions) -> Result<()>;

    async fn validate(&self, context: &Context) -> Result<()>;
}
