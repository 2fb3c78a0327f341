//! # siz-hazards - hazard/event table normalizer
//!
//! Reads a semicolon-delimited list of hazards and their events, where an
//! event row may leave the hazard columns empty, and writes one complete
//! record per event.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  CSV File   │────▶│   Parser    │────▶│    Fill     │────▶│   Writer    │
//! │ (UTF8/1251) │     │ (auto-enc)  │     │ (carry-over)│     │ (4 columns) │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use siz_hazards::{normalize_file, NormalizeOptions};
//!
//! let report = normalize_file(&NormalizeOptions::default()).unwrap();
//! println!("Wrote {} records", report.records.len());
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Error types per stage
//! - [`models`] - Record and classification models
//! - [`parser`] - Delimited table reading with encoding detection
//! - [`transform`] - Rules, forward-fill and pipeline
//! - [`writer`] - Output serialization
//! - [`logs`] - Pipeline log helpers

// Core modules
pub mod error;
pub mod logs;
pub mod models;

// Reading
pub mod parser;

// Transformation
pub mod transform;

// Writing
pub mod writer;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{PatternError, PipelineError, ReadError, WriteError};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{FillStats, Record, RowKind};

// =============================================================================
// Re-exports - Parsing
// =============================================================================

pub use parser::{decode_auto, detect_encoding, parse_bytes, parse_file, parse_table, ParsedTable};

// =============================================================================
// Re-exports - Transformation
// =============================================================================

pub use transform::{
    normalize_bytes, normalize_file, normalize_table, trim_cells, Classifier, FillResult,
    FillStep, NormalizeOptions, NormalizeReport, SkippedRow, DEFAULT_INPUT, DEFAULT_OUTPUT,
    HEADER_ROWS, SEPARATOR,
};

// =============================================================================
// Re-exports - Writing
// =============================================================================

pub use writer::{render_records, write_records};
