//! Error types for the command-line tool.

use std::path::PathBuf;

use oxide_ddl_core::ParseError;

/// Errors that can occur while reading, parsing or printing a script.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// The input file could not be read.
    #[error("Failed to read '{path}': {source}")]
    Read {
        /// Path of the input file.
        path: PathBuf,
        /// The underlying error.
        source: std::io::Error,
    },

    /// IO error on standard input or output.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A statement of the script failed to parse.
    #[error("Statement {index}: {source}")]
    Parse {
        /// One-based position of the statement in the script.
        index: usize,
        /// The parser's error.
        source: Box<ParseError>,
    },

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for the command-line tool.
pub type Result<T> = std::result::Result<T, CliError>;
