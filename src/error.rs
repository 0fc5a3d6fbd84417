//! Error types for junit-reporter

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for junit-reporter operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for junit-reporter
#[derive(Error, Debug)]
pub enum Error {
    /// No `junit-*.xml` files were found in the input directory.
    #[error("files not found: {}", .0.display())]
    NoFiles(PathBuf),

    /// A discovered file could not be read as JUnit XML.
    #[error("failed to ingest JUnit xml {}: {message}", path.display())]
    Ingest { path: PathBuf, message: String },

    /// A test case name has no whitespace-delimited token to use as a method name.
    #[error("Invalid test name: {0:?}")]
    InvalidTestName(String),

    /// The requested export format is not one of csv or json.
    #[error("unsupported output format: {0}")]
    UnsupportedExportFormat(String),

    /// A version pattern failed to compile.
    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// Configuration file error or invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Writing a CSV export failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Writing a JSON export failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
