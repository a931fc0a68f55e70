//! Depth-bounded dependency graph construction.
//!
//! Starting from a root package, [`GraphBuilder`] asks a [`PackageSource`]
//! for direct dependencies one package at a time, never fetching a package
//! twice, and stops descending once `max_depth` is reached.
//!
//! Packages are explored breadth-first, so each one is fetched at its
//! shortest distance from the root and the resulting graph does not depend
//! on the order dependencies are declared in.

use std::collections::{HashSet, VecDeque};

use tracing::{debug, info, warn};

use super::DependencyGraph;
use crate::source::{PackageSource, SourceError};

/// Errors that abort a graph build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// The package source could not be used at all.
    #[error("package source unavailable while resolving '{package}': {source}")]
    SourceUnavailable {
        /// Package being looked up when the source failed
        package: String,
        /// Underlying source failure
        #[source]
        source: SourceError,
    },
}

/// Per-build traversal state.
#[derive(Debug, Default)]
struct Exploration {
    visited: HashSet<String>,
    pending: VecDeque<(String, usize)>,
}

impl Exploration {
    fn new(root: &str) -> Self {
        Self {
            visited: HashSet::new(),
            pending: VecDeque::from([(root.to_string(), 0)]),
        }
    }
}

/// Builds dependency graphs up to a fixed depth.
///
/// # Example
///
/// ```rust
/// use depviz::graph::GraphBuilder;
/// use depviz::source::FixtureSource;
///
/// let source = FixtureSource::from_table([("app", vec!["lib"]), ("lib", vec!["core"])]);
/// let graph = GraphBuilder::new(1).build("app", &source).unwrap();
///
/// // "core" sits past the depth bound: referenced, backfilled, never fetched
/// assert_eq!(graph.dependencies("lib"), vec!["core"]);
/// assert!(graph.contains_key("core"));
/// assert!(graph.dependencies("core").is_empty());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphBuilder {
    max_depth: usize,
}

impl GraphBuilder {
    /// Creates a builder that explores packages up to `max_depth` edges
    /// away from the root.
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// Explores `root`'s dependencies and returns the completed graph.
    ///
    /// Packages the source does not know are left out; anything still
    /// referenced is backfilled with an empty dependency list before the
    /// graph is returned. A source failure aborts the whole build and no
    /// partial graph is produced.
    pub fn build<S>(&self, root: &str, source: &S) -> Result<DependencyGraph, BuildError>
    where
        S: PackageSource + ?Sized,
    {
        let mut graph = DependencyGraph::new();
        let mut state = Exploration::new(root);

        while let Some((package, depth)) = state.pending.pop_front() {
            if depth > self.max_depth {
                continue;
            }
            if !state.visited.insert(package.clone()) {
                continue;
            }

            debug!(package = %package, depth, "fetching dependencies");
            let deps = match source.fetch_dependencies(&package) {
                Ok(Some(deps)) => deps,
                Ok(None) => {
                    warn!("Package '{}' not found, skipping", package);
                    continue;
                }
                Err(source) => {
                    return Err(BuildError::SourceUnavailable { package, source });
                }
            };

            for dep in &deps {
                if depth < self.max_depth && !state.visited.contains(dep) {
                    state.pending.push_back((dep.clone(), depth + 1));
                }
            }
            graph.insert_at_depth(package, deps, depth);
        }

        let filled = graph.backfill();
        info!(
            root,
            packages = graph.package_count(),
            edges = graph.edge_count(),
            backfilled = filled,
            "dependency graph built"
        );
        Ok(graph)
    }
}
