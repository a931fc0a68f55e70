//! Graph module for dependency relationship modeling.
//!
//! This module provides the [`DependencyGraph`] data model, the
//! depth-bounded [`GraphBuilder`] that fills it from a package source, and
//! the load-order resolver.
//!
//! # Example
//!
//! ```rust
//! use depviz::graph::{DependencyGraph, TopologicalOrder};
//!
//! let graph = DependencyGraph::from_adjacency([
//!     ("app", vec!["http", "log"]),
//!     ("http", vec!["log"]),
//!     ("log", vec![]),
//! ]);
//!
//! assert_eq!(graph.package_count(), 3);
//! assert_eq!(
//!     graph.topological_order(),
//!     TopologicalOrder::Ordered(vec!["log".into(), "http".into(), "app".into()])
//! );
//! ```

mod builder;
mod dependency_graph;
mod order;

pub use builder::{BuildError, GraphBuilder};
pub use dependency_graph::{DependencyGraph, PackageNode};
pub use order::{topological_order, TopologicalOrder};
