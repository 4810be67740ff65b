//! # Error Module
//!
//! Typed errors for the library layer. The binaries wrap these in `anyhow`
//! with extra context before printing them.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias used across the library.
pub type Result<T> = std::result::Result<T, HarnessError>;

/// Errors produced while loading configuration, running categories or
/// writing and reading reports.
#[derive(Error, Debug)]
pub enum HarnessError {
    /// The configuration file could not be read.
    #[error("failed to read configuration file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The configuration file is not valid JSON or does not match the schema.
    #[error("failed to parse configuration file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The configuration parsed but holds an unusable value.
    #[error("invalid configuration: {0}")]
    ConfigInvalid(String),

    /// A command template expanded to something that cannot be executed.
    #[error("invalid command `{command}`: {reason}")]
    InvalidCommand { command: String, reason: String },

    /// A persisted report could not be parsed.
    #[error("failed to parse report {path}: {reason}")]
    ReportParse { path: PathBuf, reason: String },

    /// A glob pattern built from the configuration is malformed.
    #[error("invalid glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    /// JSON serialization of results failed.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Plot rendering failed.
    #[error("failed to render plot {path}: {reason}")]
    Plot { path: PathBuf, reason: String },

    /// I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}
