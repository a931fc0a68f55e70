//! Graphviz diagram output.
//!
//! Emits the dependency graph in the DOT language and optionally pipes it
//! through the Graphviz `dot` tool to produce an image.

use std::io::{self, Write};
use std::path::Path;
use std::process::{Command, Stdio};

use tracing::{debug, info};

use super::RenderError;
use crate::graph::DependencyGraph;

/// Graphviz layout tool used for image output.
pub const DEFAULT_TOOL: &str = "dot";

const IMAGE_FORMATS: &[&str] = &["png", "svg", "pdf", "jpg", "jpeg", "gif"];

/// Quote a package name as a DOT identifier.
fn quote(name: &str) -> String {
    format!("\"{}\"", name.replace('\\', "\\\\").replace('"', "\\\""))
}

/// Writes `graph` as a DOT digraph.
///
/// One edge statement is emitted per dependency, packages in name order
/// and edges in discovery order. Packages without edges are emitted as
/// bare node statements so they still show up in the diagram.
pub fn write_dot<W: Write>(graph: &DependencyGraph, writer: &mut W) -> io::Result<()> {
    writeln!(writer, "digraph dependencies {{")?;
    writeln!(writer, "    node [shape=box];")?;

    for name in graph.names() {
        let deps = graph.dependencies(name);
        if deps.is_empty() && graph.dependents(name).is_empty() {
            writeln!(writer, "    {};", quote(name))?;
            continue;
        }
        for dep in deps {
            writeln!(writer, "    {} -> {};", quote(name), quote(dep))?;
        }
    }

    writeln!(writer, "}}")
}

/// Renders `graph` to a DOT string.
pub fn to_dot(graph: &DependencyGraph) -> String {
    let mut buffer = Vec::new();
    // Writing into a Vec cannot fail
    let _ = write_dot(graph, &mut buffer);
    String::from_utf8_lossy(&buffer).into_owned()
}

/// Picks the Graphviz output format from the file extension, defaulting to PNG.
pub fn image_format(output: &Path) -> &'static str {
    output
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .and_then(|ext| IMAGE_FORMATS.iter().copied().find(|format| *format == ext))
        .unwrap_or("png")
}

/// Pipes `dot_source` through `tool` to write an image at `output`.
pub fn render_image(dot_source: &str, output: &Path, tool: &str) -> Result<(), RenderError> {
    let format = image_format(output);
    debug!("Running {} -T{} -o {}", tool, format, output.display());

    let mut child = Command::new(tool)
        .arg(format!("-T{format}"))
        .arg("-o")
        .arg(output)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                RenderError::ToolNotFound(tool.to_string())
            } else {
                RenderError::Io(e)
            }
        })?;

    if let Some(mut stdin) = child.stdin.take() {
        // The tool may exit before reading everything; its status says why
        if let Err(e) = stdin.write_all(dot_source.as_bytes()) {
            if e.kind() != io::ErrorKind::BrokenPipe {
                return Err(RenderError::Io(e));
            }
        }
    }

    let result = child.wait_with_output()?;
    if !result.status.success() {
        return Err(RenderError::ToolFailed {
            tool: tool.to_string(),
            status: result.status,
            stderr: String::from_utf8_lossy(&result.stderr).trim().to_string(),
        });
    }

    info!("Wrote diagram to {}", output.display());
    Ok(())
}
