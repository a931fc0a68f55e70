//! CSV export implementation.
//!
//! Writes one row per package, `name,dep1,dep2,...`, which is exactly the
//! fixture table format, so a graph fetched from a registry can be replayed
//! offline later.

use super::{ExportData, Exporter};
use crate::records::escape_field;
use std::io::{self, Write};

/// CSV exporter implementation.
pub struct CsvExporter;

impl Exporter for CsvExporter {
    fn export<W: Write>(&self, data: &ExportData<'_>, writer: &mut W) -> io::Result<()> {
        writeln!(
            writer,
            "# dependencies of {} (max depth {})",
            data.root, data.max_depth
        )?;

        for name in data.graph.keys() {
            let mut row = vec![escape_field(name)];
            row.extend(
                data.graph
                    .dependencies(name)
                    .into_iter()
                    .map(escape_field),
            );
            writeln!(writer, "{}", row.join(","))?;
        }

        Ok(())
    }
}
