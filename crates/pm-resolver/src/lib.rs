//! Dependency resolution for package managers.
//!
//! Package managers depend on each other: `asdf`, `rbenv` and `pyenv` are
//! installed through Homebrew, so `brew` has to be present first. This crate
//! keeps the declared "manager depends on manager" edges and computes a safe
//! installation order for any requested subset, detecting cycles.
//!
//! # Example
//!
//! ```
//! use pm_resolver::DependencyResolver;
//!
//! let mut resolver = DependencyResolver::new();
//! resolver.add_dependency("asdf", ["brew"]);
//! resolver.add_dependency("brew", Vec::<String>::new());
//!
//! let order = resolver.resolve(&["asdf", "brew"]).unwrap();
//! assert_eq!(order, vec!["brew", "asdf"]);
//!
//! // Dependencies order the result but are never added to it.
//! let order = resolver.resolve(&["asdf"]).unwrap();
//! assert_eq!(order, vec!["asdf"]);
//! ```

pub mod error;
mod graph;
pub mod resolver;

pub use error::{Error, Result};
pub use resolver::DependencyResolver;
