//! Dependency graph implementation using petgraph.
//!
//! Models the "package -> direct dependencies" mapping as a directed graph.
//! Edges point from the dependent package to its dependency, and the
//! outgoing edges of a package are kept in the order they were discovered.

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::collections::{BTreeMap, HashMap};

use super::order::{self, TopologicalOrder};

/// A package vertex in the dependency graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageNode {
    /// Package name (case-sensitive, unique within a graph)
    pub name: String,
    /// Depth at which the package was first seen (0 = root)
    pub depth: usize,
    /// Whether the package is a key of the mapping.
    ///
    /// Unresolved packages are only referenced from someone's dependency
    /// list; [`DependencyGraph::backfill`] resolves them with an empty list.
    pub resolved: bool,
}

impl PackageNode {
    /// Creates an unresolved node at the given depth.
    pub fn new(name: impl Into<String>, depth: usize) -> Self {
        Self {
            name: name.into(),
            depth,
            resolved: false,
        }
    }
}

/// A directed graph of package dependencies.
///
/// The graph uses petgraph's `DiGraph` internally together with a name
/// index for O(1) lookup, the same shape a plain
/// `name -> [dependency names]` map would have, except that packages which
/// are only referenced (never explored) are still first-class vertices.
///
/// # Example
///
/// ```rust
/// use depviz::graph::DependencyGraph;
///
/// let mut graph = DependencyGraph::new();
/// graph.insert("app", ["http", "log"]);
/// graph.insert("http", ["log"]);
///
/// assert_eq!(graph.dependencies("app"), vec!["http", "log"]);
/// assert!(graph.contains("log"));
/// assert!(!graph.contains_key("log"));
///
/// graph.backfill();
/// assert!(graph.contains_key("log"));
/// assert!(graph.is_complete());
/// ```
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    /// The underlying directed graph
    graph: DiGraph<PackageNode, ()>,
    /// Maps package names to their node indices
    node_indices: HashMap<String, NodeIndex>,
}

impl DependencyGraph {
    /// Creates a new empty dependency graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a resolved graph straight from a `name -> dependencies` mapping.
    ///
    /// Every key becomes resolved. Names that only appear as dependencies
    /// stay unresolved until [`backfill`](Self::backfill) is called.
    ///
    /// # Example
    ///
    /// ```rust
    /// use depviz::graph::DependencyGraph;
    ///
    /// let graph = DependencyGraph::from_adjacency([
    ///     ("a", vec!["b", "c"]),
    ///     ("b", vec!["d"]),
    /// ]);
    ///
    /// assert_eq!(graph.package_count(), 4);
    /// assert_eq!(graph.keys(), vec!["a", "b"]);
    /// ```
    pub fn from_adjacency<I, K, V, D>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: IntoIterator<Item = D>,
        D: Into<String>,
    {
        let mut graph = Self::new();
        for (name, deps) in entries {
            graph.insert(name, deps);
        }
        graph
    }

    /// Adds a package vertex, returning the existing index if it is already
    /// present. New vertices start unresolved.
    pub fn add_package(&mut self, name: &str, depth: usize) -> NodeIndex {
        if let Some(&idx) = self.node_indices.get(name) {
            return idx;
        }

        let idx = self.graph.add_node(PackageNode::new(name, depth));
        self.node_indices.insert(name.to_string(), idx);
        idx
    }

    /// Records `name`'s direct dependencies, in order.
    ///
    /// Returns `false` without touching the graph if `name` is already a key.
    pub fn insert<N, V, D>(&mut self, name: N, deps: V) -> bool
    where
        N: Into<String>,
        V: IntoIterator<Item = D>,
        D: Into<String>,
    {
        self.insert_at_depth(name, deps, 0)
    }

    /// Like [`insert`](Self::insert), tagging newly seen vertices with
    /// `depth` (and their dependencies with `depth + 1`).
    pub fn insert_at_depth<N, V, D>(&mut self, name: N, deps: V, depth: usize) -> bool
    where
        N: Into<String>,
        V: IntoIterator<Item = D>,
        D: Into<String>,
    {
        let name = name.into();
        let idx = self.add_package(&name, depth);
        if self.graph[idx].resolved {
            return false;
        }
        self.graph[idx].resolved = true;

        for dep in deps {
            let dep = dep.into();
            let dep_idx = self.add_package(&dep, depth + 1);
            self.graph.add_edge(idx, dep_idx, ());
        }
        true
    }

    /// Resolves every referenced-but-unexplored package with an empty
    /// dependency list. Returns how many packages were backfilled.
    pub fn backfill(&mut self) -> usize {
        let mut filled = 0;
        for node in self.graph.node_weights_mut() {
            if !node.resolved {
                node.resolved = true;
                filled += 1;
            }
        }
        filled
    }

    /// Returns `name`'s direct dependencies in discovery order.
    ///
    /// Unknown and unresolved packages have no dependencies.
    pub fn dependencies(&self, name: &str) -> Vec<&str> {
        let Some(&idx) = self.node_indices.get(name) else {
            return Vec::new();
        };

        let mut edges: Vec<_> = self
            .graph
            .edges_directed(idx, Direction::Outgoing)
            .collect();
        edges.sort_by_key(|edge| edge.id());
        edges
            .into_iter()
            .map(|edge| self.graph[edge.target()].name.as_str())
            .collect()
    }

    /// Returns the packages that list `name` as a dependency.
    pub fn dependents(&self, name: &str) -> Vec<&str> {
        let Some(&idx) = self.node_indices.get(name) else {
            return Vec::new();
        };

        let mut edges: Vec<_> = self
            .graph
            .edges_directed(idx, Direction::Incoming)
            .collect();
        edges.sort_by_key(|edge| edge.id());
        edges
            .into_iter()
            .map(|edge| self.graph[edge.source()].name.as_str())
            .collect()
    }

    /// Gets a package vertex by name.
    pub fn get_node(&self, name: &str) -> Option<&PackageNode> {
        self.node_indices
            .get(name)
            .and_then(|&idx| self.graph.node_weight(idx))
    }

    /// Checks if a package is a vertex of the graph (key or referenced).
    pub fn contains(&self, name: &str) -> bool {
        self.node_indices.contains_key(name)
    }

    /// Checks if a package is a key of the mapping.
    pub fn contains_key(&self, name: &str) -> bool {
        self.get_node(name).is_some_and(|node| node.resolved)
    }

    /// Returns the names of all resolved packages, sorted.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self
            .graph
            .node_weights()
            .filter(|node| node.resolved)
            .map(|node| node.name.as_str())
            .collect();
        keys.sort_unstable();
        keys
    }

    /// Returns the names of all vertices, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.node_indices.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Returns the sorted `name -> dependencies` view of the resolved packages.
    pub fn adjacency(&self) -> BTreeMap<String, Vec<String>> {
        self.keys()
            .into_iter()
            .map(|name| {
                let deps = self
                    .dependencies(name)
                    .into_iter()
                    .map(str::to_string)
                    .collect();
                (name.to_string(), deps)
            })
            .collect()
    }

    /// True once every referenced package is also a key.
    pub fn is_complete(&self) -> bool {
        self.graph.node_weights().all(|node| node.resolved)
    }

    /// Number of vertices, referenced-only packages included.
    pub fn package_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of dependency edges.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Checks if the graph is empty.
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Computes a dependencies-first ordering of every vertex.
    ///
    /// See [`order::topological_order`].
    pub fn topological_order(&self) -> TopologicalOrder {
        order::topological_order(self)
    }

    /// Read-only access to the underlying petgraph graph.
    pub fn petgraph(&self) -> &DiGraph<PackageNode, ()> {
        &self.graph
    }
}
