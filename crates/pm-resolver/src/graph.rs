//! Working graph used by a single resolve call.
//!
//! Edges point from dependency to dependent: if `asdf` depends on `brew`,
//! `brew` lists `asdf` among its dependents and `asdf` carries one unit of
//! in-degree. Kahn's algorithm then emits dependencies first.

use std::collections::{BTreeSet, HashMap, HashSet};

use crate::error::{Error, Result};
use crate::resolver::DependencyResolver;

/// Subgraph restricted to the transitive closure of a request.
#[derive(Debug, Default)]
pub(crate) struct WorkingGraph<'a> {
    in_degree: HashMap<&'a str, usize>,
    dependents: HashMap<&'a str, Vec<&'a str>>,
}

impl<'a> WorkingGraph<'a> {
    /// Pull every requested manager and everything it transitively depends
    /// on into the graph.
    ///
    /// Uses an explicit worklist; each manager is expanded at most once, so
    /// shared sub-dependencies add their edges exactly once.
    pub(crate) fn build<I>(resolver: &'a DependencyResolver, requested: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut graph = Self::default();
        let mut expanded: HashSet<&str> = HashSet::new();
        let mut worklist: Vec<&str> = Vec::new();

        for manager in requested {
            graph.in_degree.entry(manager).or_insert(0);
            worklist.push(manager);
        }

        while let Some(manager) = worklist.pop() {
            if !expanded.insert(manager) {
                continue;
            }

            for dep in resolver.direct_dependencies(manager) {
                let dep = dep.as_str();
                graph.in_degree.entry(dep).or_insert(0);
                *graph.in_degree.entry(manager).or_insert(0) += 1;
                graph.dependents.entry(dep).or_default().push(manager);
                worklist.push(dep);
            }
        }

        graph
    }

    /// Number of distinct managers discovered while building.
    pub(crate) fn node_count(&self) -> usize {
        self.in_degree.len()
    }

    /// Perform a topological sort using Kahn's algorithm.
    ///
    /// The ready set is ordered, so among independent managers the
    /// lexicographically smallest is always emitted first and the result
    /// never depends on hash map iteration order.
    ///
    /// # Errors
    ///
    /// Returns `Error::DependencyCycle` if fewer managers are emitted than
    /// were discovered.
    pub(crate) fn topological_order(mut self) -> Result<Vec<&'a str>> {
        let mut ready: BTreeSet<&str> = self
            .in_degree
            .iter()
            .filter(|(_, degree)| **degree == 0)
            .map(|(manager, _)| *manager)
            .collect();

        let mut order = Vec::with_capacity(self.node_count());

        while let Some(current) = ready.pop_first() {
            order.push(current);

            let Some(dependents) = self.dependents.get(current) else {
                continue;
            };
            for &dependent in dependents {
                if let Some(degree) = self.in_degree.get_mut(dependent) {
                    *degree = degree.saturating_sub(1);
                    if *degree == 0 {
                        ready.insert(dependent);
                    }
                }
            }
        }

        if order.len() < self.node_count() {
            let emitted: HashSet<&str> = order.iter().copied().collect();
            let mut unresolved: Vec<String> = self
                .in_degree
                .keys()
                .filter(|manager| !emitted.contains(*manager))
                .map(|manager| manager.to_string())
                .collect();
            unresolved.sort();
            return Err(Error::DependencyCycle { unresolved });
        }

        Ok(order)
    }
}
