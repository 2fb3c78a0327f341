//! Output table writer.
//!
//! Records are serialized in memory first, then written in one go. The file
//! is created or truncated; it is closed when the handle drops, on error too.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use crate::error::{WriteError, WriteResult};
use crate::models::Record;

/// Serialize records as `hazard_id;hazard;event_id;event` lines.
///
/// No header row and no quoting. Lines end with `\n`.
pub fn render_records(records: &[Record], delimiter: u8) -> WriteResult<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .quote_style(csv::QuoteStyle::Never)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    for record in records {
        writer.serialize(record)?;
    }

    writer
        .into_inner()
        .map_err(|e| WriteError::Csv(csv::Error::from(e.into_error())))
}

/// Write records to `path`, replacing any existing content.
pub fn write_records<P: AsRef<Path>>(path: P, records: &[Record], delimiter: u8) -> WriteResult<()> {
    let path = path.as_ref();
    let content = render_records(records, delimiter)?;
    let io_err = |source: std::io::Error| WriteError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }

    let mut file = File::create(path).map_err(io_err)?;
    file.write_all(&content).map_err(io_err)?;
    file.flush().map_err(io_err)?;

    Ok(())
}
