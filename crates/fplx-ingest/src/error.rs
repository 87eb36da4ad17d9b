//! Error types for table loading and configuration.

use std::path::PathBuf;
use thiserror::Error;

/// Conditions that make a table impossible to load at all.
///
/// Row-level problems are not errors; they are reported as findings and the
/// remaining rows still load.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Table file does not exist.
    #[error("table file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File is not UTF-8.
    #[error("unsupported encoding {encoding} in {path} (tables must be UTF-8)")]
    UnsupportedEncoding {
        path: PathBuf,
        encoding: &'static str,
    },

    /// Invalid UTF-8 byte sequence.
    #[error("invalid UTF-8 in {path} at line {line}")]
    InvalidUtf8 { path: PathBuf, line: usize },

    /// No line of the file uses the configured terminator.
    #[error("{path} uses {found} line endings, expected {expected}")]
    Dialect {
        path: PathBuf,
        expected: &'static str,
        found: &'static str,
    },

    /// The CSV reader could not continue.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },
}

impl LoadError {
    pub(crate) fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound { path }
        } else {
            Self::FileRead { path, source }
        }
    }
}

/// Errors from reading the checker configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse TOML config {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config: {message}")]
    Invalid { message: String },
}

/// Result type for loading operations.
pub type Result<T> = std::result::Result<T, LoadError>;
