//! Dependency declarations and the queries built on top of them.

use std::collections::{HashMap, HashSet};

use crate::error::{Error, Result};
use crate::graph::WorkingGraph;

/// Directed graph of "manager depends on manager" declarations.
///
/// A manager that was never declared is a valid leaf with no dependencies;
/// names can be referenced as dependencies before (or without) being added
/// themselves.
///
/// Declarations are made through `&mut self` during setup. Every query takes
/// `&self` and only allocates local working state, so a fully-built resolver
/// can be shared across threads for concurrent reads.
#[derive(Debug, Clone, Default)]
pub struct DependencyResolver {
    /// Key depends on each value, in declaration order.
    dependencies: HashMap<String, Vec<String>>,
}

impl DependencyResolver {
    /// Create an empty resolver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the dependency list for `manager`.
    ///
    /// Replaces any earlier declaration for the same manager (last write
    /// wins, no merge). Referenced names are not required to exist. Repeated
    /// names in `dependencies` are kept once.
    pub fn add_dependency<I, S>(&mut self, manager: impl Into<String>, dependencies: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let manager = manager.into();
        let mut deps: Vec<String> = Vec::new();
        for dep in dependencies {
            let dep = dep.into();
            if !deps.contains(&dep) {
                deps.push(dep);
            }
        }

        tracing::trace!(%manager, ?deps, "declared dependencies");
        self.dependencies.insert(manager, deps);
    }

    /// Direct dependencies of `manager`, or an empty list if it is unknown.
    pub fn dependencies(&self, manager: &str) -> Vec<String> {
        self.direct_dependencies(manager).to_vec()
    }

    pub(crate) fn direct_dependencies(&self, manager: &str) -> &[String] {
        self.dependencies
            .get(manager)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Whether `dependency` is a direct dependency of `manager`.
    ///
    /// Transitive dependencies are not considered.
    pub fn has_dependency(&self, manager: &str, dependency: &str) -> bool {
        self.direct_dependencies(manager)
            .iter()
            .any(|dep| dep == dependency)
    }

    /// Every manager reachable from `manager`, nearest first, excluding
    /// `manager` itself.
    ///
    /// The walk is depth-first. A manager is marked while it is on the
    /// current path and unmarked once its subtree is done, so reaching the
    /// same manager through two branches (a diamond) is fine while reaching
    /// one that is still on the path is a cycle.
    ///
    /// # Errors
    ///
    /// Returns `Error::CircularDependency` naming the manager at which the
    /// walk looped back onto its own path.
    pub fn all_dependencies(&self, manager: &str) -> Result<Vec<String>> {
        let mut state = Walk::default();
        self.walk(manager, &mut state)?;
        Ok(state.closure)
    }

    fn walk<'a>(&'a self, manager: &'a str, state: &mut Walk<'a>) -> Result<()> {
        if !state.on_path.insert(manager) {
            return Err(Error::CircularDependency {
                manager: manager.to_string(),
            });
        }

        for dep in self.direct_dependencies(manager) {
            if state.seen.insert(dep.as_str()) {
                state.closure.push(dep.clone());
            }
            if !state.finished.contains(dep.as_str()) {
                self.walk(dep, state)?;
            }
        }

        state.on_path.remove(manager);
        state.finished.insert(manager);
        Ok(())
    }

    /// Check that every declared manager can be ordered.
    ///
    /// # Errors
    ///
    /// Propagates the `Error::DependencyCycle` from [`resolve`](Self::resolve).
    pub fn validate_no_cycles(&self) -> Result<()> {
        let managers = self.managers();
        self.resolve(&managers).map(|_| ())
    }

    /// Order `managers` so that every dependency precedes its dependents.
    ///
    /// Dependencies that were not requested are used for ordering but are
    /// not part of the result: callers must request every manager they want
    /// back. Names repeated in the request appear once. Among managers with
    /// no ordering constraint between them, the lexicographically smaller
    /// name comes first.
    ///
    /// # Errors
    ///
    /// Returns `Error::DependencyCycle` if a cycle is reachable from the
    /// request. No partial order is returned.
    pub fn resolve<S: AsRef<str>>(&self, managers: &[S]) -> Result<Vec<String>> {
        if managers.is_empty() {
            return Ok(Vec::new());
        }

        let requested: HashSet<&str> = managers.iter().map(|m| m.as_ref()).collect();
        let graph = WorkingGraph::build(self, managers.iter().map(|m| m.as_ref()));
        tracing::debug!(
            requested = requested.len(),
            discovered = graph.node_count(),
            "resolving installation order"
        );

        let order = graph.topological_order()?;

        Ok(order
            .into_iter()
            .filter(|manager| requested.contains(manager))
            .map(str::to_string)
            .collect())
    }

    /// Names with a declaration, sorted.
    pub fn managers(&self) -> Vec<String> {
        let mut names: Vec<String> = self.dependencies.keys().cloned().collect();
        names.sort();
        names
    }

    /// Number of declared managers.
    pub fn len(&self) -> usize {
        self.dependencies.len()
    }

    /// Whether nothing has been declared.
    pub fn is_empty(&self) -> bool {
        self.dependencies.is_empty()
    }
}

/// Traversal state for [`DependencyResolver::all_dependencies`].
#[derive(Default)]
struct Walk<'a> {
    on_path: HashSet<&'a str>,
    finished: HashSet<&'a str>,
    seen: HashSet<&'a str>,
    closure: Vec<String>,
}
