//! Error types for the hazard table normalizer.
//!
//! Each stage of the pipeline owns its error type:
//!
//! - [`ReadError`] - Reading and decoding the input table
//! - [`PatternError`] - Compiling the classification rules
//! - [`WriteError`] - Serializing and writing the output table
//! - [`PipelineError`] - Top-level orchestration errors
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries. None of these errors
//! is recoverable: they all end the run.

use std::path::PathBuf;
use thiserror::Error;

// =============================================================================
// Read Errors
// =============================================================================

/// Errors while loading the input table.
#[derive(Debug, Error)]
pub enum ReadError {
    /// Failed to open or read the file.
    #[error("Failed to read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The content is not well-formed delimited text.
    #[error("Invalid CSV format: {0}")]
    Parse(#[from] csv::Error),

    /// A quote is misplaced: bare quote in an unquoted field, text after a
    /// closing quote, or a quoted field that never closes.
    #[error("Invalid quoting on line {line}: {message}")]
    Quote { line: u64, message: &'static str },

    /// The bytes could not be decoded to text.
    #[error("Failed to decode input: {0}")]
    Encoding(String),
}

// =============================================================================
// Pattern Errors
// =============================================================================

/// A classification pattern failed to compile.
///
/// The patterns are constants, so this only happens after a bad edit.
#[derive(Debug, Error)]
pub enum PatternError {
    #[error("Invalid pattern '{pattern}': {source}")]
    Compile {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

// =============================================================================
// Write Errors
// =============================================================================

/// Errors while writing the output table.
#[derive(Debug, Error)]
pub enum WriteError {
    /// Failed to create, write or flush the file.
    #[error("Failed to write '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Record serialization failed.
    #[error("Failed to serialize records: {0}")]
    Csv(#[from] csv::Error),
}

// =============================================================================
// Pipeline Errors (top-level)
// =============================================================================

/// Top-level pipeline errors.
///
/// This is the error type returned by [`crate::transform::pipeline::normalize_file`].
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Input error.
    #[error("Read error: {0}")]
    Read(#[from] ReadError),

    /// Rule compilation error.
    #[error("Pattern error: {0}")]
    Pattern(#[from] PatternError),

    /// Output error.
    #[error("Write error: {0}")]
    Write(#[from] WriteError),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for read operations.
pub type ReadResult<T> = Result<T, ReadError>;

/// Result type for write operations.
pub type WriteResult<T> = Result<T, WriteError>;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion_chain() {
        // ReadError -> PipelineError
        let read_err = ReadError::Encoding("unknown charset".into());
        let pipeline_err: PipelineError = read_err.into();
        assert!(pipeline_err.to_string().contains("unknown charset"));

        // PatternError -> PipelineError
        let source = regex::Regex::new("(").unwrap_err();
        let pattern_err = PatternError::Compile { pattern: "(".into(), source };
        let pipeline_err: PipelineError = pattern_err.into();
        assert!(pipeline_err.to_string().starts_with("Pattern error"));
    }

    #[test]
    fn test_io_error_mentions_path() {
        let err = WriteError::Io {
            path: PathBuf::from("files/result.csv"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let msg = err.to_string();
        assert!(msg.contains("files/result.csv"));
        assert!(msg.contains("denied"));
    }
}
