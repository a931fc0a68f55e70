//! Live registry lookups over HTTP.
//!
//! Package documents are fetched from `{base_url}/{name}` and are expected
//! to look like npm registry documents:
//!
//! ```json
//! {
//!   "dist-tags": { "latest": "1.2.0" },
//!   "versions": {
//!     "1.2.0": { "dependencies": { "http": "^2.0.0", "log": "~1.1" } }
//!   }
//! }
//! ```

use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};
use url::Url;

use super::{PackageSource, SourceError};

/// The single version every package is resolved at.
pub const DEFAULT_VERSION: &str = "latest";

/// Default timeout for HTTP requests (30 seconds)
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Deserialize)]
struct PackageDocument {
    #[serde(default, rename = "dist-tags")]
    dist_tags: Map<String, Value>,
    #[serde(default)]
    versions: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct VersionManifest {
    #[serde(default)]
    dependencies: Map<String, Value>,
}

/// Extracts the dependency names of `version` from a package document.
///
/// `version` is looked up in `versions` first and then resolved through
/// `dist-tags`. A document without that version has no dependencies; a
/// document that is not valid JSON of the expected shape is an error.
///
/// # Example
///
/// ```
/// use depviz::source::extract_dependencies;
///
/// let doc = r#"{"versions": {"latest": {"dependencies": {"b": "1", "a": "2"}}}}"#;
/// assert_eq!(extract_dependencies(doc, "latest").unwrap(), vec!["b", "a"]);
/// ```
pub fn extract_dependencies(document: &str, version: &str) -> Result<Vec<String>, serde_json::Error> {
    let document: PackageDocument = serde_json::from_str(document)?;

    let entry = document.versions.get(version).or_else(|| {
        document
            .dist_tags
            .get(version)
            .and_then(Value::as_str)
            .and_then(|resolved| document.versions.get(resolved))
    });
    let Some(entry) = entry else {
        debug!("No '{}' version in package document", version);
        return Ok(Vec::new());
    };

    let manifest = VersionManifest::deserialize(entry)?;
    Ok(manifest.dependencies.keys().cloned().collect())
}

/// A package source backed by an HTTP registry.
#[derive(Debug, Clone)]
pub struct RegistrySource {
    client: Client,
    base_url: String,
}

impl RegistrySource {
    /// Creates a registry source with the default request timeout.
    pub fn new(base_url: impl Into<String>) -> Result<Self, SourceError> {
        Self::with_timeout(base_url, HTTP_TIMEOUT)
    }

    /// Creates a registry source with a custom request timeout.
    ///
    /// `base_url` must be an absolute `http` or `https` URL.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self, SourceError> {
        let base_url = base_url.into();
        validate_base_url(&base_url)?;

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(SourceError::Client)?;

        Ok(Self { client, base_url })
    }

    /// The configured base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of `name`'s package document.
    pub fn package_url(&self, name: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), name)
    }
}

fn validate_base_url(base_url: &str) -> Result<(), SourceError> {
    let invalid = |reason: String| SourceError::InvalidUrl {
        url: base_url.to_string(),
        reason,
    };

    let parsed = Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
    match parsed.scheme() {
        "http" | "https" if parsed.has_host() => Ok(()),
        "http" | "https" => Err(invalid("missing host".to_string())),
        scheme => Err(invalid(format!("unsupported scheme '{scheme}'"))),
    }
}

impl PackageSource for RegistrySource {
    fn fetch_dependencies(&self, name: &str) -> Result<Option<Vec<String>>, SourceError> {
        let url = self.package_url(name);
        debug!("Fetching package document from {}", url);

        let response = match self.client.get(&url).send() {
            Ok(response) => response,
            Err(source)
                if source.is_connect()
                    || source.is_timeout()
                    || source.is_builder()
                    || source.is_request() =>
            {
                return Err(SourceError::Unreachable { url, source });
            }
            Err(e) => {
                warn!("Request for {} failed: {}", url, e);
                return Ok(None);
            }
        };

        let status = response.status();
        if !status.is_success() {
            warn!("HTTP {} for {}", status.as_u16(), url);
            return Ok(None);
        }

        let body = match response.text() {
            Ok(body) => body,
            Err(e) => {
                warn!("Failed to read response from {}: {}", url, e);
                return Ok(None);
            }
        };

        match extract_dependencies(&body, DEFAULT_VERSION) {
            Ok(deps) => Ok(Some(deps)),
            Err(e) => {
                warn!("Invalid package document for '{}': {}", name, e);
                Ok(None)
            }
        }
    }
}
