//! Delimited file parser
//!
//! Produces one [`RawRecord`] per data row. Cells are trimmed. A row whose
//! field count differs from the header, or that is not valid UTF-8, is still
//! emitted but carries a defect so that only that row fails.

use super::error::ImportError;
use super::types::RawRecord;
use csv::{ByteRecord, ReaderBuilder, Trim};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Header-row aware CSV parser
#[derive(Debug, Clone, Copy)]
pub struct RecordParser {
    delimiter: u8,
}

impl Default for RecordParser {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl RecordParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Parse the file at `path`, naming it `display_name` in errors.
    /// Blocking; run it off the async executor.
    pub fn parse(&self, path: &Path, display_name: &str) -> Result<ParsedRecords, ImportError> {
        let file = File::open(path).map_err(|e| parse_error(display_name, e))?;
        self.parse_reader(file, display_name)
    }

    /// Parse from any reader; `source` names the input in errors
    pub fn parse_reader<R: Read>(&self, reader: R, source: &str) -> Result<ParsedRecords, ImportError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .delimiter(self.delimiter)
            .from_reader(reader);

        let headers: Arc<[String]> = reader
            .headers()
            .map_err(|e| parse_error(source, e))?
            .iter()
            .map(|header| header.trim_start_matches('\u{feff}').to_string())
            .collect::<Vec<_>>()
            .into();

        let mut records = Vec::new();
        let mut record = ByteRecord::new();
        loop {
            match reader.read_byte_record(&mut record) {
                Ok(true) => {
                    let row = records.len() + 1;
                    records.push(decode_row(row, &headers, &record));
                }
                Ok(false) => break,
                Err(e) if matches!(e.kind(), csv::ErrorKind::Io(_)) => {
                    return Err(parse_error(source, e));
                }
                Err(e) => {
                    let row = records.len() + 1;
                    records.push(
                        RawRecord::new(row, headers.clone(), Vec::new()).with_defect(e.to_string()),
                    );
                }
            }
        }

        debug!(
            source = %source,
            columns = headers.len(),
            rows = records.len(),
            "Parsed delimited file"
        );

        Ok(ParsedRecords {
            headers,
            records: records.into_iter(),
        })
    }
}

fn decode_row(row: usize, headers: &Arc<[String]>, record: &ByteRecord) -> RawRecord {
    let mut values = Vec::with_capacity(record.len());
    for (column, cell) in record.iter().enumerate() {
        match std::str::from_utf8(cell) {
            Ok(value) => values.push(value.to_string()),
            Err(_) => {
                return RawRecord::new(row, headers.clone(), values)
                    .with_defect(format!("column {} is not valid UTF-8", column + 1));
            }
        }
    }

    let width = values.len();
    let record = RawRecord::new(row, headers.clone(), values);
    if width != headers.len() {
        record.with_defect(format!(
            "row has {} fields but the header has {}",
            width,
            headers.len()
        ))
    } else {
        record
    }
}

fn parse_error(source: &str, error: impl std::fmt::Display) -> ImportError {
    ImportError::Parse {
        file: source.to_string(),
        reason: error.to_string(),
    }
}

/// Records of one parsed file, in file order. Consumed once.
#[derive(Debug)]
pub struct ParsedRecords {
    headers: Arc<[String]>,
    records: std::vec::IntoIter<RawRecord>,
}

impl ParsedRecords {
    pub fn headers(&self) -> &[String] {
        &self.headers
    }
}

impl Iterator for ParsedRecords {
    type Item = RawRecord;

    fn next(&mut self) -> Option<Self::Item> {
        self.records.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.records.size_hint()
    }
}

impl ExactSizeIterator for ParsedRecords {}
