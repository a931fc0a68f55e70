//! Indented dependency tree rendering
//!
//! Provides `TreeNode` for the hierarchical view of a dependency graph and
//! `FlattenedNode` for printing it line by line with branch connectors.
//!
//! The tree is built with its own traversal, separate from the graph
//! builder: it stops at a depth cap, and a package already on the current
//! path is printed once with a cycle marker instead of being expanded.
//! A package whose dependencies were already shown at the same or a
//! shallower depth is printed as `(deduped)` and not expanded again.

use std::collections::{HashMap, HashSet};
use std::io::{self, Write};

use crate::graph::DependencyGraph;

/// Connector characters used when printing a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TreeStyle {
    /// Box-drawing characters (`├──`, `└──`, `│`)
    #[default]
    Unicode,
    /// Plain ASCII (`+--`, `` `-- ``, `|`)
    Ascii,
}

impl TreeStyle {
    fn branch(self, is_last: bool) -> &'static str {
        match (self, is_last) {
            (TreeStyle::Unicode, false) => "├── ",
            (TreeStyle::Unicode, true) => "└── ",
            (TreeStyle::Ascii, false) => "+-- ",
            (TreeStyle::Ascii, true) => "`-- ",
        }
    }

    fn indent(self, ancestor_is_last: bool) -> &'static str {
        match (self, ancestor_is_last) {
            (_, true) => "    ",
            (TreeStyle::Unicode, false) => "│   ",
            (TreeStyle::Ascii, false) => "|   ",
        }
    }
}

/// A node in the dependency tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    /// Package name
    pub name: String,
    /// Child dependencies
    pub children: Vec<TreeNode>,
    /// Depth in the tree (0 = root)
    pub depth: usize,
    /// The package already appears on the path from the root
    pub cycle: bool,
    /// The package's dependencies are shown elsewhere in the tree
    pub deduped: bool,
}

impl TreeNode {
    /// Create a new tree node
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
            depth: 0,
            cycle: false,
            deduped: false,
        }
    }

    /// Builds the tree rooted at `root`, descending at most `max_depth`
    /// levels.
    pub fn from_graph(graph: &DependencyGraph, root: &str, max_depth: usize) -> Self {
        let mut shown = HashMap::new();
        Self::build(graph, root, 0, max_depth, &HashSet::new(), &mut shown)
    }

    fn build(
        graph: &DependencyGraph,
        name: &str,
        depth: usize,
        max_depth: usize,
        path: &HashSet<String>,
        shown: &mut HashMap<String, usize>,
    ) -> Self {
        let mut node = TreeNode::new(name);
        node.depth = depth;

        if path.contains(name) {
            node.cycle = true;
            return node;
        }
        let deps = graph.dependencies(name);
        if depth >= max_depth || deps.is_empty() {
            return node;
        }
        // An expansion at a shallower depth showed at least as many levels
        if shown.get(name).is_some_and(|&at| at <= depth) {
            node.deduped = true;
            return node;
        }
        shown.insert(name.to_string(), depth);

        let mut path = path.clone();
        path.insert(name.to_string());
        for dep in deps {
            node.children
                .push(Self::build(graph, dep, depth + 1, max_depth, &path, shown));
        }
        node
    }

    /// Flatten the tree into a list for printing
    pub fn flatten(&self) -> Vec<FlattenedNode> {
        let mut result = Vec::new();
        self.flatten_recursive(&mut result, true, &[]);
        result
    }

    fn flatten_recursive(
        &self,
        result: &mut Vec<FlattenedNode>,
        is_last: bool,
        ancestors_are_last: &[bool],
    ) {
        result.push(FlattenedNode {
            name: self.name.clone(),
            depth: self.depth,
            is_last_child: is_last,
            ancestors_are_last: ancestors_are_last.to_vec(),
            cycle: self.cycle,
            deduped: self.deduped,
        });

        // The root's own "last" flag never draws a column
        let mut ancestors = ancestors_are_last.to_vec();
        if self.depth > 0 {
            ancestors.push(is_last);
        }

        let child_count = self.children.len();
        for (i, child) in self.children.iter().enumerate() {
            child.flatten_recursive(result, i == child_count - 1, &ancestors);
        }
    }

    /// Writes the tree, one package per line.
    pub fn write<W: Write>(&self, style: TreeStyle, writer: &mut W) -> io::Result<()> {
        for node in self.flatten() {
            writeln!(writer, "{}", node.line(style))?;
        }
        Ok(())
    }
}

/// A flattened representation of a tree node for printing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlattenedNode {
    /// Package name
    pub name: String,
    /// Depth in the tree
    pub depth: usize,
    /// Whether this is the last child of its parent
    pub is_last_child: bool,
    /// For each ancestor below the root, whether it was a last child
    pub ancestors_are_last: Vec<bool>,
    /// The package closes a cycle on this path
    pub cycle: bool,
    /// The package was expanded earlier in the tree
    pub deduped: bool,
}

impl FlattenedNode {
    /// Build the tree prefix (indentation and branch lines)
    pub fn tree_prefix(&self, style: TreeStyle) -> String {
        let mut prefix = String::new();

        for &is_last in &self.ancestors_are_last {
            prefix.push_str(style.indent(is_last));
        }

        if self.depth > 0 {
            prefix.push_str(style.branch(self.is_last_child));
        }

        prefix
    }

    /// The full printed line for this node.
    pub fn line(&self, style: TreeStyle) -> String {
        let mut line = self.tree_prefix(style);
        line.push_str(&self.name);
        if self.cycle {
            line.push_str(" (cycle)");
        } else if self.deduped {
            line.push_str(" (deduped)");
        }
        line
    }
}

/// Writes the dependency tree of `root` to `writer`.
pub fn write_tree<W: Write>(
    graph: &DependencyGraph,
    root: &str,
    max_depth: usize,
    style: TreeStyle,
    writer: &mut W,
) -> io::Result<()> {
    TreeNode::from_graph(graph, root, max_depth).write(style, writer)
}
