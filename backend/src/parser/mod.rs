//! Delimited table reader with encoding detection.
//!
//! Turns the input file into an ordered matrix of raw cells. No hazard
//! specific logic here: trimming and classification happen in
//! [`crate::transform`].

use encoding_rs::{Encoding, IBM866, ISO_8859_5, KOI8_R, UTF_8, WINDOWS_1251, X_MAC_CYRILLIC};
use std::path::Path;

use crate::error::{ReadError, ReadResult};

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// chardet answers below this are ignored
const MIN_CONFIDENCE: f32 = 0.8;

/// Result of reading a table with metadata
#[derive(Debug, Clone)]
pub struct ParsedTable {
    /// Rows in file order, headers included
    pub rows: Vec<Vec<String>>,
    /// Encoding the bytes were decoded with
    pub encoding: String,
}

impl ParsedTable {
    /// Rows after the first `header_rows` ones.
    pub fn data_rows(&self, header_rows: usize) -> &[Vec<String>] {
        let start = header_rows.min(self.rows.len());
        &self.rows[start..]
    }
}

/// Single-byte Cyrillic code pages tried for non UTF-8 input, in tie-break order.
fn cyrillic_encodings() -> [&'static Encoding; 5] {
    [WINDOWS_1251, KOI8_R, IBM866, X_MAC_CYRILLIC, ISO_8859_5]
}

/// Detect the charset of raw bytes using chardet.
///
/// Returns a label understood by `encoding_rs`, or `None` when chardet is
/// unsure.
pub fn detect_encoding(bytes: &[u8]) -> Option<String> {
    let (charset, confidence, _language) = chardet::detect(bytes);
    if confidence < MIN_CONFIDENCE {
        return None;
    }

    // Normalize charset names
    let label = match charset.to_lowercase().as_str() {
        "ascii" | "utf-8" | "utf8" => "utf-8".to_string(),
        "windows-1251" | "cp1251" => "windows-1251".to_string(),
        "koi8-r" => "koi8-r".to_string(),
        "ibm866" | "cp866" => "ibm866".to_string(),
        "maccyrillic" | "x-mac-cyrillic" => "x-mac-cyrillic".to_string(),
        "iso-8859-5" => "iso-8859-5".to_string(),
        "" => return None,
        other => other.to_string(),
    };
    Some(label)
}

/// Weight of Cyrillic letters in decoded text.
///
/// Lowercase counts double: running text is mostly lowercase, and a wrong
/// code page tends to swap case or turn letters into symbols.
pub fn cyrillic_score(text: &str) -> usize {
    text.chars()
        .map(|c| match c {
            'а'..='я' => 2,
            'А'..='Я' => 1,
            _ => 0,
        })
        .sum()
}

/// Decode bytes with the given encoding label.
pub fn decode_content(bytes: &[u8], encoding: &str) -> ReadResult<String> {
    let encoding = Encoding::for_label(encoding.as_bytes()).unwrap_or(WINDOWS_1251);
    let (text, had_errors) = encoding.decode_without_bom_handling(bytes);
    if had_errors {
        return Err(ReadError::Encoding(format!(
            "input is not valid {}",
            encoding.name()
        )));
    }
    Ok(text.into_owned())
}

/// Decode bytes, preferring UTF-8 and falling back to Cyrillic code pages.
///
/// Non UTF-8 input is decoded with every Cyrillic candidate and the text
/// with the best [`cyrillic_score`] wins. Ties go to windows-1251, then to
/// a confident chardet guess. Returns the text and the encoding name.
pub fn decode_auto(bytes: &[u8]) -> ReadResult<(String, String)> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

    if let Ok(text) = std::str::from_utf8(bytes) {
        return Ok((text.to_string(), UTF_8.name().to_lowercase()));
    }

    let mut candidates = vec![WINDOWS_1251];
    if let Some(detected) = detect_encoding(bytes)
        .and_then(|label| Encoding::for_label(label.as_bytes()))
        .filter(|enc| cyrillic_encodings().contains(enc))
    {
        candidates.push(detected);
    }
    candidates.extend(cyrillic_encodings());

    let mut best: Option<(usize, String, &'static Encoding)> = None;
    for encoding in candidates {
        let (text, had_errors) = encoding.decode_without_bom_handling(bytes);
        if had_errors {
            continue;
        }
        let score = cyrillic_score(&text);
        if best.as_ref().map_or(true, |(top, _, _)| score > *top) {
            best = Some((score, text.into_owned(), encoding));
        }
    }

    match best {
        Some((_, text, encoding)) => Ok((text, encoding.name().to_lowercase())),
        None => Err(ReadError::Encoding(
            "input is neither UTF-8 nor a Cyrillic code page".to_string(),
        )),
    }
}

/// Reject quotes the standard delimited-text grammar does not allow.
///
/// `raw` is the source text of one record. A quote may only open a field or
/// be doubled inside a quoted field; a closing quote must be followed by a
/// delimiter or a line end, and quoted fields must be closed.
fn check_quoting(raw: &[u8], delimiter: u8, line: u64) -> ReadResult<()> {
    enum State {
        FieldStart,
        Unquoted,
        Quoted,
        QuoteInQuoted,
    }

    let mut state = State::FieldStart;
    for &byte in raw {
        let boundary = byte == delimiter || byte == b'\n' || byte == b'\r';
        state = match state {
            State::FieldStart | State::Unquoted if boundary => State::FieldStart,
            State::FieldStart if byte == b'"' => State::Quoted,
            State::FieldStart | State::Unquoted if byte == b'"' => {
                return Err(ReadError::Quote { line, message: "bare \" in non-quoted field" });
            }
            State::FieldStart | State::Unquoted => State::Unquoted,
            State::Quoted if byte == b'"' => State::QuoteInQuoted,
            State::Quoted => State::Quoted,
            State::QuoteInQuoted if byte == b'"' => State::Quoted,
            State::QuoteInQuoted if boundary => State::FieldStart,
            State::QuoteInQuoted => {
                return Err(ReadError::Quote { line, message: "extraneous text after closing \"" });
            }
        };
    }

    match state {
        State::Quoted => Err(ReadError::Quote { line, message: "quoted field is never closed" }),
        _ => Ok(()),
    }
}

/// Split decoded text into rows of raw cells.
///
/// Quoted fields may contain the delimiter, doubled quotes and newlines.
/// Any other use of quotes is a [`ReadError::Quote`]. Unless `flexible` is
/// set, every row must have as many fields as the first.
pub fn parse_table(content: &str, delimiter: u8, flexible: bool) -> ReadResult<Vec<Vec<String>>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(flexible)
        .from_reader(content.as_bytes());

    let bytes = content.as_bytes();
    let mut rows = Vec::new();
    let mut record = csv::StringRecord::new();
    let mut start = reader.position().byte() as usize;

    while reader.read_record(&mut record)? {
        let end = reader.position().byte() as usize;
        let line = record.position().map_or(0, |pos| pos.line());
        check_quoting(bytes.get(start..end).unwrap_or_default(), delimiter, line)?;

        rows.push(record.iter().map(str::to_string).collect());
        start = end;
    }

    Ok(rows)
}

/// Parse a table from raw bytes.
pub fn parse_bytes(bytes: &[u8], delimiter: u8, flexible: bool) -> ReadResult<ParsedTable> {
    let (content, encoding) = decode_auto(bytes)?;
    let rows = parse_table(&content, delimiter, flexible)?;
    Ok(ParsedTable { rows, encoding })
}

/// Read and parse a table file. The whole file is loaded into memory.
pub fn parse_file<P: AsRef<Path>>(path: P, delimiter: u8, flexible: bool) -> ReadResult<ParsedTable> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| ReadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    parse_bytes(&bytes, delimiter, flexible)
}
