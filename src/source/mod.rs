//! Package sources.
//!
//! A [`PackageSource`] answers one question: what are the direct
//! dependencies of this package? Two implementations are provided:
//!
//! - [`FixtureSource`] - a static table loaded from a CSV file
//! - [`RegistrySource`] - a live HTTP registry serving JSON package documents
//!
//! Both report unknown or unparseable packages as `Ok(None)` so one bad
//! package never aborts a build. An `Err` means the source as a whole is
//! unusable.

mod fixture;
mod registry;

use std::path::PathBuf;

pub use fixture::FixtureSource;
pub use registry::{extract_dependencies, RegistrySource, DEFAULT_VERSION};

use crate::records::RecordError;

/// Errors that make a package source unusable.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The fixture table does not exist.
    #[error("fixture file not found: {}", .0.display())]
    FixtureNotFound(PathBuf),

    /// The fixture table exists but could not be read.
    #[error("failed to read fixture {}: {source}", .path.display())]
    FixtureRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A fixture row could not be split into fields.
    #[error("invalid fixture row at line {line}: {source}")]
    FixtureFormat {
        line: usize,
        #[source]
        source: RecordError,
    },

    /// The registry base URL is not an absolute http(s) URL.
    #[error("invalid registry URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The HTTP client could not be constructed.
    #[error("failed to create HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// The registry could not be reached at all.
    #[error("registry unreachable at {url}: {source}")]
    Unreachable {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Supplies a package's direct dependencies.
pub trait PackageSource {
    /// Returns `name`'s direct dependency names in declaration order, or
    /// `Ok(None)` if the package is unknown or its metadata is unusable.
    fn fetch_dependencies(&self, name: &str) -> Result<Option<Vec<String>>, SourceError>;
}

/// Opens the source selected by configuration.
///
/// In test mode `location` is a fixture path; otherwise it is the registry
/// base URL.
pub fn open(test_mode: bool, location: &str) -> Result<Box<dyn PackageSource>, SourceError> {
    if test_mode {
        Ok(Box::new(FixtureSource::open(location)?))
    } else {
        Ok(Box::new(RegistrySource::new(location)?))
    }
}
