//! Export functionality for dependency graphs.
//!
//! This module provides exporters for writing a built graph and its load
//! order in machine-readable formats: JSON, CSV (the fixture table format)
//! and Graphviz DOT.

pub mod csv;
pub mod json;

use crate::graph::{DependencyGraph, TopologicalOrder};
use crate::render::dot;
use std::io::{self, Write};

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// JSON format - machine-readable, full data
    Json,
    /// CSV format - one row per package, readable as a fixture
    Csv,
    /// DOT format - Graphviz diagram source
    Dot,
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            "dot" | "graphviz" => Ok(ExportFormat::Dot),
            _ => Err(format!(
                "Unknown export format: '{}'. Valid formats: json, csv, dot",
                s
            )),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Json => write!(f, "json"),
            ExportFormat::Csv => write!(f, "csv"),
            ExportFormat::Dot => write!(f, "dot"),
        }
    }
}

/// Data container for export operations.
#[derive(Debug, Clone, Copy)]
pub struct ExportData<'a> {
    /// Root package the graph was built from
    pub root: &'a str,
    /// Depth bound used for the build
    pub max_depth: usize,
    /// The completed graph
    pub graph: &'a DependencyGraph,
    /// Load order computed from the graph
    pub order: &'a TopologicalOrder,
}

impl<'a> ExportData<'a> {
    /// Create new export data from build results.
    pub fn new(
        root: &'a str,
        max_depth: usize,
        graph: &'a DependencyGraph,
        order: &'a TopologicalOrder,
    ) -> Self {
        Self {
            root,
            max_depth,
            graph,
            order,
        }
    }
}

/// Trait for exporters.
pub trait Exporter {
    /// Export the data to the given writer.
    fn export<W: Write>(&self, data: &ExportData<'_>, writer: &mut W) -> io::Result<()>;
}

/// Graphviz exporter.
pub struct DotExporter;

impl Exporter for DotExporter {
    fn export<W: Write>(&self, data: &ExportData<'_>, writer: &mut W) -> io::Result<()> {
        dot::write_dot(data.graph, writer)
    }
}

/// Export data in the specified format.
pub fn export<W: Write>(
    format: ExportFormat,
    data: &ExportData<'_>,
    writer: &mut W,
) -> io::Result<()> {
    match format {
        ExportFormat::Json => json::JsonExporter.export(data, writer),
        ExportFormat::Csv => csv::CsvExporter.export(data, writer),
        ExportFormat::Dot => DotExporter.export(data, writer),
    }
}

/// Export data to a string.
pub fn export_to_string(format: ExportFormat, data: &ExportData<'_>) -> io::Result<String> {
    let mut buffer = Vec::new();
    export(format, data, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_format_from_str() {
        assert_eq!("json".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert_eq!("JSON".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert_eq!("csv".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert_eq!("dot".parse::<ExportFormat>().unwrap(), ExportFormat::Dot);
        assert_eq!(
            "graphviz".parse::<ExportFormat>().unwrap(),
            ExportFormat::Dot
        );
        assert!("invalid".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn test_export_format_display() {
        assert_eq!(format!("{}", ExportFormat::Json), "json");
        assert_eq!(format!("{}", ExportFormat::Csv), "csv");
        assert_eq!(format!("{}", ExportFormat::Dot), "dot");
    }

    #[test]
    fn test_export_dot_matches_renderer() {
        let graph = DependencyGraph::from_adjacency([("a", vec!["b"])]);
        let order = graph.topological_order();
        let data = ExportData::new("a", 1, &graph, &order);

        let exported = export_to_string(ExportFormat::Dot, &data).unwrap();
        assert_eq!(exported, dot::to_dot(&graph));
    }
}
