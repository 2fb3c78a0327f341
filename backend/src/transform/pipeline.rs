//! High-level pipeline: read → classify/fill → write.
//!
//! # Example
//!
//! ```rust,no_run
//! use siz_hazards::{normalize_file, NormalizeOptions};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let report = normalize_file(&NormalizeOptions::default())?;
//!     println!("Wrote {} records", report.records.len());
//!     Ok(())
//! }
//! ```

use std::path::PathBuf;

use crate::error::PipelineResult;
use crate::logs::{log_debug, log_info, log_info_indent, log_success, log_success_indent, log_warning};
use crate::models::{FillStats, Record};
use crate::parser::{parse_bytes, parse_file, ParsedTable};
use crate::writer::write_records;

use super::fill::{Classifier, FillResult, SkippedRow};

/// Input table location
pub const DEFAULT_INPUT: &str = "files/siz_by_dangerous.csv";
/// Output table location
pub const DEFAULT_OUTPUT: &str = "files/result.csv";
/// Field separator for both files
pub const SEPARATOR: u8 = b';';
/// Leading rows that never carry data
pub const HEADER_ROWS: usize = 2;

/// Options for a normalization run
#[derive(Debug, Clone)]
pub struct NormalizeOptions {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Rows to discard before classification
    pub header_rows: usize,
    /// Accept rows with differing field counts
    pub flexible: bool,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output: PathBuf::from(DEFAULT_OUTPUT),
            header_rows: HEADER_ROWS,
            flexible: false,
        }
    }
}

/// Result of a normalization run
#[derive(Debug, Clone)]
pub struct NormalizeReport {
    /// Records in output order
    pub records: Vec<Record>,
    pub skipped: Vec<SkippedRow>,
    pub stats: FillStats,
    /// Encoding the input was decoded with
    pub encoding: String,
    /// Rows in the file, headers included
    pub total_rows: usize,
}

impl NormalizeReport {
    fn new(table: &ParsedTable, filled: FillResult) -> Self {
        Self {
            records: filled.records,
            skipped: filled.skipped,
            stats: filled.stats,
            encoding: table.encoding.clone(),
            total_rows: table.rows.len(),
        }
    }
}

/// Fill the data rows of an already parsed table.
pub fn normalize_table(table: &ParsedTable, header_rows: usize, classifier: &Classifier) -> FillResult {
    classifier.fill_rows(table.data_rows(header_rows))
}

/// Normalize raw bytes without touching the filesystem.
pub fn normalize_bytes(bytes: &[u8], options: &NormalizeOptions) -> PipelineResult<NormalizeReport> {
    let classifier = Classifier::new()?;
    let table = parse_bytes(bytes, SEPARATOR, options.flexible)?;
    let filled = normalize_table(&table, options.header_rows, &classifier);
    Ok(NormalizeReport::new(&table, filled))
}

/// Run the whole pipeline on files.
///
/// Rules are compiled before the input is opened, so a broken pattern fails
/// without any I/O. The output is only written once every row is processed.
pub fn normalize_file(options: &NormalizeOptions) -> PipelineResult<NormalizeReport> {
    let classifier = Classifier::new()?;

    log_info(format!("📖 Reading {}", options.input.display()));
    let table = parse_file(&options.input, SEPARATOR, options.flexible)?;
    log_success_indent(format!("Encoding: {}", table.encoding), 1);
    log_success_indent(format!("Read {} rows", table.rows.len()), 1);

    if table.rows.len() <= options.header_rows {
        log_warning(format!(
            "Only {} rows, all treated as headers",
            table.rows.len()
        ));
    }

    log_info("⚙️  Filling hazard fields...");
    let filled = normalize_table(&table, options.header_rows, &classifier);
    report_fill(&filled, options.header_rows);

    log_info(format!("💾 Writing {}", options.output.display()));
    write_records(&options.output, &filled.records, SEPARATOR)?;
    log_success(format!("Wrote {} records", filled.records.len()));

    Ok(NormalizeReport::new(&table, filled))
}

/// Print fill statistics and skipped rows
fn report_fill(filled: &FillResult, header_rows: usize) {
    let stats = &filled.stats;
    log_success_indent(filled.summary(), 1);
    log_info_indent(
        format!(
            "{} data rows: {} full, {} continuation, {} orphaned, {} unmatched",
            stats.rows, stats.full, stats.continuation, stats.orphaned, stats.skipped
        ),
        1,
    );

    if stats.orphaned > 0 {
        log_warning(format!(
            "{} continuation rows appear before any hazard",
            stats.orphaned
        ));
    }

    for skip in &filled.skipped {
        // 1-based line in the file
        log_debug(format!("Row {} skipped: {}", skip.row + header_rows + 1, skip.reason));
    }
}
