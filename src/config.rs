//! Configuration file loading.
//!
//! The configuration is a two-column CSV file of `key,value` rows:
//!
//! ```text
//! package_name,express
//! repo_url,https://registry.npmjs.org
//! test_mode,false
//! version,latest
//! output_image,graph.png
//! ascii_output,true
//! max_depth,2
//! ```
//!
//! Every key below is required. Unknown keys are reported and ignored.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::records::{is_skippable, split_record, RecordError};

/// Errors that can occur while loading a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file does not exist.
    #[error("config file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Failed to read the file from disk.
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// A row could not be split into fields.
    #[error("line {line}: {source}")]
    Record {
        line: usize,
        #[source]
        source: RecordError,
    },

    /// A row has a key but no value.
    #[error("line {line}: expected `key,value`")]
    MissingValue { line: usize },

    /// A value does not match the type its key requires.
    #[error("invalid value '{value}' for '{key}': expected {expected}")]
    InvalidValue {
        key: String,
        value: String,
        expected: &'static str,
    },

    /// Required keys were never set.
    #[error("missing required keys: {}", .0.join(", "))]
    MissingKeys(Vec<String>),
}

/// Result type alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldKind {
    Text,
    Bool,
    UInt,
}

impl FieldKind {
    fn expected(self) -> &'static str {
        match self {
            FieldKind::Text => "a string",
            FieldKind::Bool => "a boolean (true/false, yes/no, on/off, 1/0)",
            FieldKind::UInt => "a non-negative integer",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum FieldValue {
    Text(String),
    Bool(bool),
    UInt(usize),
}

const SCHEMA: &[(&str, FieldKind)] = &[
    ("package_name", FieldKind::Text),
    ("repo_url", FieldKind::Text),
    ("test_mode", FieldKind::Bool),
    ("version", FieldKind::Text),
    ("output_image", FieldKind::Text),
    ("ascii_output", FieldKind::Bool),
    ("max_depth", FieldKind::UInt),
];

/// Parses a boolean the way config files usually spell them.
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl FieldKind {
    fn parse(self, key: &str, raw: String) -> ConfigResult<FieldValue> {
        let invalid = |value: String| ConfigError::InvalidValue {
            key: key.to_string(),
            value,
            expected: self.expected(),
        };

        match self {
            FieldKind::Text => Ok(FieldValue::Text(raw)),
            FieldKind::Bool => parse_bool(&raw).map(FieldValue::Bool).ok_or_else(|| invalid(raw)),
            FieldKind::UInt => match raw.parse::<usize>() {
                Ok(n) => Ok(FieldValue::UInt(n)),
                Err(_) => Err(invalid(raw)),
            },
        }
    }
}

/// Typed application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Root package whose dependencies are explored
    pub package_name: String,
    /// Registry base URL, or fixture path in test mode
    pub repo_url: String,
    /// Read dependencies from a fixture file instead of the registry
    pub test_mode: bool,
    /// Requested version (informational; packages resolve at "latest")
    pub version: String,
    /// Where to write the rendered diagram image
    pub output_image: String,
    /// Draw trees with ASCII connectors instead of box-drawing characters
    pub ascii_output: bool,
    /// How many dependency levels to explore below the root
    pub max_depth: usize,
}

impl Config {
    /// Loads a configuration file from disk.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                ConfigError::NotFound(path.to_path_buf())
            } else {
                ConfigError::Io(e)
            }
        })?;
        Self::parse_str(&content)
    }

    /// Parses a configuration from a string.
    ///
    /// # Example
    ///
    /// ```
    /// use depviz::config::Config;
    ///
    /// let config = Config::parse_str(
    ///     "package_name,A\nrepo_url,fixtures/graph.csv\ntest_mode,yes\n\
    ///      version,latest\noutput_image,graph.png\nascii_output,off\nmax_depth,3\n",
    /// )
    /// .unwrap();
    ///
    /// assert!(config.test_mode);
    /// assert_eq!(config.max_depth, 3);
    /// ```
    pub fn parse_str(content: &str) -> ConfigResult<Self> {
        let mut values: HashMap<&'static str, FieldValue> = HashMap::new();

        for (number, line) in content.lines().enumerate() {
            if is_skippable(line) {
                continue;
            }
            let line_number = number + 1;
            let mut fields = split_record(line)
                .map_err(|source| ConfigError::Record {
                    line: line_number,
                    source,
                })?
                .into_iter();

            let key = fields.next().unwrap_or_default();
            let Some(raw) = fields.next() else {
                return Err(ConfigError::MissingValue { line: line_number });
            };

            let Some(&(name, kind)) = SCHEMA.iter().find(|(k, _)| *k == key) else {
                warn!("Unknown key in config: {}", key);
                continue;
            };
            values.insert(name, kind.parse(name, raw)?);
        }

        let missing: Vec<String> = SCHEMA
            .iter()
            .filter(|(key, _)| !values.contains_key(key))
            .map(|(key, _)| key.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(ConfigError::MissingKeys(missing));
        }

        Ok(Self {
            package_name: take_text(&mut values, "package_name")?,
            repo_url: take_text(&mut values, "repo_url")?,
            test_mode: take_bool(&mut values, "test_mode")?,
            version: take_text(&mut values, "version")?,
            output_image: take_text(&mut values, "output_image")?,
            ascii_output: take_bool(&mut values, "ascii_output")?,
            max_depth: take_uint(&mut values, "max_depth")?,
        })
    }

    /// Key/value pairs in schema order, for display.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("package_name", self.package_name.clone()),
            ("repo_url", self.repo_url.clone()),
            ("test_mode", self.test_mode.to_string()),
            ("version", self.version.clone()),
            ("output_image", self.output_image.clone()),
            ("ascii_output", self.ascii_output.to_string()),
            ("max_depth", self.max_depth.to_string()),
        ]
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, value) in self.entries() {
            writeln!(f, "{}: {}", key, value)?;
        }
        Ok(())
    }
}

fn missing(key: &str) -> ConfigError {
    ConfigError::MissingKeys(vec![key.to_string()])
}

fn take_text(values: &mut HashMap<&'static str, FieldValue>, key: &str) -> ConfigResult<String> {
    match values.remove(key) {
        Some(FieldValue::Text(value)) => Ok(value),
        _ => Err(missing(key)),
    }
}

fn take_bool(values: &mut HashMap<&'static str, FieldValue>, key: &str) -> ConfigResult<bool> {
    match values.remove(key) {
        Some(FieldValue::Bool(value)) => Ok(value),
        _ => Err(missing(key)),
    }
}

fn take_uint(values: &mut HashMap<&'static str, FieldValue>, key: &str) -> ConfigResult<usize> {
    match values.remove(key) {
        Some(FieldValue::UInt(value)) => Ok(value),
        _ => Err(missing(key)),
    }
}
