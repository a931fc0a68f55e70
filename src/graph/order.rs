//! Load-order resolution.
//!
//! Kahn's algorithm over every vertex of a [`DependencyGraph`], producing an
//! order in which each package comes after all of its dependencies.

use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::collections::VecDeque;

use super::DependencyGraph;

/// Outcome of ordering a dependency graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopologicalOrder {
    /// Every package, dependencies first.
    Ordered(Vec<String>),
    /// The graph contains at least one cycle, so no order exists.
    ///
    /// `unresolved` counts the packages that could not be placed. Cycle
    /// members are not identified.
    CycleDetected { unresolved: usize },
}

impl TopologicalOrder {
    /// Returns the ordered packages, or `None` if a cycle was detected.
    pub fn packages(&self) -> Option<&[String]> {
        match self {
            Self::Ordered(packages) => Some(packages),
            Self::CycleDetected { .. } => None,
        }
    }

    /// Consumes the result, returning the order if one exists.
    pub fn into_packages(self) -> Option<Vec<String>> {
        match self {
            Self::Ordered(packages) => Some(packages),
            Self::CycleDetected { .. } => None,
        }
    }

    /// Returns true if no order exists.
    pub fn is_cycle(&self) -> bool {
        matches!(self, Self::CycleDetected { .. })
    }
}

/// Orders every vertex of `graph` so dependencies precede dependents.
///
/// Referenced-only packages take part even if the graph was never
/// backfilled. Ties between ready packages are broken by name first, then by
/// the order in which they became ready, so the result is deterministic.
///
/// A package listing itself is a cycle: its own edge keeps it pending forever.
///
/// # Example
///
/// ```rust
/// use depviz::graph::{DependencyGraph, TopologicalOrder};
///
/// let graph = DependencyGraph::from_adjacency([("app", vec!["lib"]), ("lib", vec![])]);
/// assert_eq!(
///     graph.topological_order(),
///     TopologicalOrder::Ordered(vec!["lib".to_string(), "app".to_string()])
/// );
///
/// let cyclic = DependencyGraph::from_adjacency([("a", vec!["b"]), ("b", vec!["a"])]);
/// assert!(cyclic.topological_order().is_cycle());
/// ```
pub fn topological_order(graph: &DependencyGraph) -> TopologicalOrder {
    let inner = graph.petgraph();
    let total = inner.node_count();

    // Node indices are dense because vertices are never removed.
    let mut pending: Vec<usize> = inner
        .node_indices()
        .map(|idx| inner.edges_directed(idx, Direction::Outgoing).count())
        .collect();

    let mut ready: Vec<NodeIndex> = inner
        .node_indices()
        .filter(|idx| pending[idx.index()] == 0)
        .collect();
    ready.sort_by(|a, b| inner[*a].name.cmp(&inner[*b].name));
    let mut frontier: VecDeque<NodeIndex> = ready.into();

    let mut order = Vec::with_capacity(total);
    while let Some(idx) = frontier.pop_front() {
        order.push(inner[idx].name.clone());

        let mut dependents: Vec<_> = inner.edges_directed(idx, Direction::Incoming).collect();
        dependents.sort_by_key(|edge| edge.id());
        for edge in dependents {
            let dependent = edge.source();
            let remaining = &mut pending[dependent.index()];
            *remaining -= 1;
            if *remaining == 0 {
                frontier.push_back(dependent);
            }
        }
    }

    if order.len() == total {
        TopologicalOrder::Ordered(order)
    } else {
        TopologicalOrder::CycleDetected {
            unresolved: total - order.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position(order: &[String], name: &str) -> usize {
        order
            .iter()
            .position(|n| n == name)
            .unwrap_or_else(|| panic!("{name} missing from {order:?}"))
    }

    #[test]
    fn test_empty_graph_orders_to_empty() {
        let graph = DependencyGraph::new();
        assert_eq!(topological_order(&graph), TopologicalOrder::Ordered(vec![]));
    }

    #[test]
    fn test_diamond_respects_partial_order() {
        let graph = DependencyGraph::from_adjacency([
            ("A", vec!["B", "C"]),
            ("B", vec!["D"]),
            ("C", vec!["D"]),
            ("D", vec![]),
        ]);

        let result = topological_order(&graph);
        let order = result.packages().expect("diamond is acyclic");
        assert_eq!(order.len(), 4);
        assert!(position(order, "D") < position(order, "B"));
        assert!(position(order, "D") < position(order, "C"));
        assert!(position(order, "B") < position(order, "A"));
        assert!(position(order, "C") < position(order, "A"));
    }

    #[test]
    fn test_chain_is_fully_determined() {
        let graph = DependencyGraph::from_adjacency([("a", vec!["b"]), ("b", vec!["c"])]);
        assert_eq!(
            topological_order(&graph).into_packages(),
            Some(vec!["c".to_string(), "b".to_string(), "a".to_string()])
        );
    }

    #[test]
    fn test_works_without_backfill() {
        // "d" is only referenced, never a key
        let graph = DependencyGraph::from_adjacency([("a", vec!["d"])]);
        assert!(!graph.is_complete());

        let order = topological_order(&graph).into_packages().unwrap();
        assert_eq!(order, vec!["d".to_string(), "a".to_string()]);
    }

    #[test]
    fn test_two_node_cycle() {
        let graph = DependencyGraph::from_adjacency([("A", vec!["B"]), ("B", vec!["A"])]);
        assert_eq!(
            topological_order(&graph),
            TopologicalOrder::CycleDetected { unresolved: 2 }
        );
    }

    #[test]
    fn test_self_loop_is_a_cycle() {
        let graph = DependencyGraph::from_adjacency([("A", vec!["A"])]);
        let result = topological_order(&graph);
        assert!(result.is_cycle());
        assert!(result.packages().is_none());
    }

    #[test]
    fn test_cycle_downstream_of_acyclic_part() {
        // x is fine on its own but depends on a cycle, so it cannot be placed either
        let graph = DependencyGraph::from_adjacency([
            ("x", vec!["a"]),
            ("a", vec!["b"]),
            ("b", vec!["a"]),
            ("leaf", vec![]),
        ]);
        assert_eq!(
            topological_order(&graph),
            TopologicalOrder::CycleDetected { unresolved: 3 }
        );
    }

    #[test]
    fn test_duplicate_edges_are_counted() {
        let graph = DependencyGraph::from_adjacency([("a", vec!["b", "b"]), ("b", vec![])]);
        assert_eq!(
            topological_order(&graph).into_packages(),
            Some(vec!["b".to_string(), "a".to_string()])
        );
    }

    #[test]
    fn test_ties_broken_by_name() {
        let graph = DependencyGraph::from_adjacency([
            ("zeta", Vec::<&str>::new()),
            ("alpha", vec![]),
            ("mid", vec![]),
        ]);
        assert_eq!(
            topological_order(&graph).into_packages(),
            Some(vec![
                "alpha".to_string(),
                "mid".to_string(),
                "zeta".to_string()
            ])
        );
    }

    #[test]
    fn test_every_vertex_appears_once() {
        let graph = DependencyGraph::from_adjacency([
            ("app", vec!["http", "json", "log"]),
            ("http", vec!["net", "log"]),
            ("json", vec!["log"]),
            ("net", vec![]),
        ]);

        let order = topological_order(&graph).into_packages().unwrap();
        let mut sorted = order.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), order.len());
        assert_eq!(sorted, graph.names());
    }
}
