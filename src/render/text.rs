//! Plain text output: the sorted package listing and the load order.

use std::io::{self, Write};

use crate::graph::{DependencyGraph, TopologicalOrder};

/// Printed in place of an order when the graph has a cycle.
pub const CYCLE_MESSAGE: &str = "Cannot determine order due to cycles.";

/// Writes one `name -> [deps]` line per package, sorted by name.
pub fn write_listing<W: Write>(graph: &DependencyGraph, writer: &mut W) -> io::Result<()> {
    for name in graph.keys() {
        writeln!(writer, "{} -> [{}]", name, graph.dependencies(name).join(", "))?;
    }
    Ok(())
}

/// Formats an order as `a -> b -> c`, or the cycle message.
pub fn order_line(order: &TopologicalOrder) -> String {
    match order.packages() {
        Some(packages) => packages.join(" -> "),
        None => CYCLE_MESSAGE.to_string(),
    }
}

/// Writes the load order on a single line.
pub fn write_order<W: Write>(order: &TopologicalOrder, writer: &mut W) -> io::Result<()> {
    writeln!(writer, "{}", order_line(order))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_sorted_with_backfilled_leaves() {
        let mut graph = DependencyGraph::from_adjacency([("b", vec!["c"]), ("a", vec!["c", "b"])]);
        graph.backfill();

        let mut out = Vec::new();
        write_listing(&graph, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "a -> [c, b]\nb -> [c]\nc -> []\n"
        );
    }

    #[test]
    fn test_order_line() {
        let order = TopologicalOrder::Ordered(vec!["d".into(), "b".into(), "a".into()]);
        assert_eq!(order_line(&order), "d -> b -> a");
        assert_eq!(order_line(&TopologicalOrder::Ordered(vec![])), "");
    }

    #[test]
    fn test_cycle_message() {
        let mut out = Vec::new();
        write_order(&TopologicalOrder::CycleDetected { unresolved: 2 }, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Cannot determine order due to cycles.\n"
        );
    }
}
