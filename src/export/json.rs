//! JSON export implementation.
//!
//! Exports the dependency graph and load order in JSON format for
//! machine-readable output.

use super::{ExportData, Exporter};
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::{self, Write};

/// JSON exporter implementation.
pub struct JsonExporter;

/// Summary statistics for JSON output.
#[derive(Serialize)]
struct JsonSummary {
    packages: usize,
    edges: usize,
}

/// Root JSON export structure.
#[derive(Serialize)]
struct JsonExport<'a> {
    root: &'a str,
    max_depth: usize,
    summary: JsonSummary,
    packages: BTreeMap<String, Vec<String>>,
    order: Option<&'a [String]>,
    cycle_detected: bool,
}

impl Exporter for JsonExporter {
    fn export<W: Write>(&self, data: &ExportData<'_>, writer: &mut W) -> io::Result<()> {
        let export = JsonExport {
            root: data.root,
            max_depth: data.max_depth,
            summary: JsonSummary {
                packages: data.graph.package_count(),
                edges: data.graph.edge_count(),
            },
            packages: data.graph.adjacency(),
            order: data.order.packages(),
            cycle_detected: data.order.is_cycle(),
        };

        serde_json::to_writer_pretty(&mut *writer, &export)?;
        writeln!(writer)?;
        Ok(())
    }
}
