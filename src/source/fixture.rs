//! Static package table loaded from a CSV file.
//!
//! One row per package: the first field is the package name, the remaining
//! fields are its direct dependencies.
//!
//! ```text
//! # name,dependencies...
//! A,B,C
//! B,D
//! C,D
//! D
//! ```

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use tracing::{debug, warn};

use super::{PackageSource, SourceError};
use crate::records::{is_skippable, split_record};

/// A package source backed by an in-memory table.
#[derive(Debug, Clone, Default)]
pub struct FixtureSource {
    packages: HashMap<String, Vec<String>>,
}

impl FixtureSource {
    /// Loads a fixture table from disk.
    ///
    /// A missing or unreadable file is reported as a [`SourceError`], since
    /// no lookup could ever succeed against it.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| {
            if source.kind() == ErrorKind::NotFound {
                SourceError::FixtureNotFound(path.to_path_buf())
            } else {
                SourceError::FixtureRead {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;

        let fixture = Self::parse_str(&content)?;
        debug!(
            "Loaded {} packages from fixture {}",
            fixture.len(),
            path.display()
        );
        Ok(fixture)
    }

    /// Parses a fixture table from a string.
    ///
    /// Empty fields are ignored. If a package appears on several rows the
    /// first row wins.
    ///
    /// # Example
    ///
    /// ```
    /// use depviz::source::{FixtureSource, PackageSource};
    ///
    /// let fixture = FixtureSource::parse_str("app,http,log\nhttp,log\n").unwrap();
    /// assert_eq!(
    ///     fixture.fetch_dependencies("app").unwrap(),
    ///     Some(vec!["http".to_string(), "log".to_string()])
    /// );
    /// assert_eq!(fixture.fetch_dependencies("log").unwrap(), None);
    /// ```
    pub fn parse_str(content: &str) -> Result<Self, SourceError> {
        let mut packages = HashMap::new();

        for (number, line) in content.lines().enumerate() {
            if is_skippable(line) {
                continue;
            }
            let line_number = number + 1;
            let fields = split_record(line).map_err(|source| SourceError::FixtureFormat {
                line: line_number,
                source,
            })?;

            let mut fields = fields.into_iter().filter(|field| !field.is_empty());
            let Some(name) = fields.next() else {
                warn!("Fixture line {} has no package name, skipping", line_number);
                continue;
            };

            if packages.contains_key(&name) {
                warn!(
                    "Duplicate fixture row for '{}' at line {}, keeping the first",
                    name, line_number
                );
                continue;
            }
            packages.insert(name, fields.collect());
        }

        Ok(Self { packages })
    }

    /// Builds a fixture directly from `name -> dependencies` pairs.
    pub fn from_table<I, K, V, D>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: IntoIterator<Item = D>,
        D: Into<String>,
    {
        let mut packages = HashMap::new();
        for (name, deps) in entries {
            packages
                .entry(name.into())
                .or_insert_with(|| deps.into_iter().map(Into::into).collect());
        }
        Self { packages }
    }

    /// Number of packages in the table.
    pub fn len(&self) -> usize {
        self.packages.len()
    }

    /// Returns true if the table has no packages.
    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    /// Checks if the table has a row for `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.packages.contains_key(name)
    }
}

impl PackageSource for FixtureSource {
    fn fetch_dependencies(&self, name: &str) -> Result<Option<Vec<String>>, SourceError> {
        Ok(self.packages.get(name).cloned())
    }
}
