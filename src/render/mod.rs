//! Human-facing renderers for a finished dependency graph.
//!
//! - [`dot`] - Graphviz diagram text and image conversion
//! - [`tree`] - depth-capped indented tree
//! - [`text`] - sorted listing and load order

pub mod dot;
pub mod text;
pub mod tree;

pub use tree::{write_tree, TreeNode, TreeStyle};

/// Errors that can occur while rendering.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The external layout tool is not installed.
    #[error("diagram tool '{0}' not found on PATH")]
    ToolNotFound(String),

    /// The external layout tool ran but failed.
    #[error("diagram tool '{tool}' exited with {status}: {stderr}")]
    ToolFailed {
        tool: String,
        status: std::process::ExitStatus,
        stderr: String,
    },

    /// Writing output failed.
    #[error("I/O error while rendering: {0}")]
    Io(#[from] std::io::Error),
}
