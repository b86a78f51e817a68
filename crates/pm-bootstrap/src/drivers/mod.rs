//! Built-in package manager drivers

mod command_driver;
pub mod definition;

pub use command_driver::CommandDriver;
pub use definition::{BUILTIN, ManagerDefinition};

use crate::driver::BootstrapDriver;

/// One driver per built-in manager.
pub fn builtin() -> Vec<Box<dyn BootstrapDriver>> {
    BUILTIN
        .iter()
        .map(|def| Box::new(CommandDriver::new(*def)) as Box<dyn BootstrapDriver>)
        .collect()
}
