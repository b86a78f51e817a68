//! Error types for pm-resolver

/// Errors raised while walking or ordering the dependency graph.
///
/// Both variants describe the same structural defect seen from two
/// different algorithms: the depth-first walk knows exactly which manager
/// closed the loop, the batch ordering only knows what it could not emit.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A transitive walk reached a manager that is still on the current path.
    #[error("circular dependency detected: {manager}")]
    CircularDependency { manager: String },

    /// The topological sort stalled; `unresolved` lists every manager it
    /// could not place (cycle members and everything downstream of them).
    #[error("circular dependency detected among: {}", .unresolved.join(", "))]
    DependencyCycle { unresolved: Vec<String> },
}

pub type Result<T> = std::result::Result<T, Error>;
