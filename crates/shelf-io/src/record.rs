//! Line splitting and field parsing shared by both loaders.

use std::io::BufRead;
use std::str::FromStr;

use shelf_core::ValidationError;

use crate::error::{LoadError, LoadResult};

/// Field separator used by every data file.
pub const SEPARATOR: char = '|';

/// One non-blank line of a data file.
#[derive(Debug)]
pub(crate) struct Record {
    /// 1-based line number.
    pub line: usize,
    pub text: String,
}

impl Record {
    /// Splits on `|` and trims every field, requiring exactly `expected` fields.
    pub fn fields(&self, expected: usize) -> LoadResult<Vec<&str>> {
        let fields: Vec<&str> = self.text.split(SEPARATOR).map(str::trim).collect();
        if fields.len() != expected {
            return Err(LoadError::malformed(
                self.line,
                format!("expected {} fields, found {}", expected, fields.len()),
            ));
        }
        Ok(fields)
    }

    /// Parses a numeric field, naming it in the error.
    pub fn number<T: FromStr>(&self, field: &str, value: &str) -> LoadResult<T> {
        value.parse().map_err(|_| {
            LoadError::malformed(self.line, format!("{} '{}' is not a number", field, value))
        })
    }

    /// Attaches this record's line number to a validation failure.
    pub fn invalid(&self, err: ValidationError) -> LoadError {
        LoadError::malformed(self.line, err.to_string())
    }
}

/// Reads every non-blank line, trimmed, with its line number.
pub(crate) fn read_records(reader: impl BufRead) -> LoadResult<Vec<Record>> {
    let mut records = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line_number = index + 1;
        let text = line.map_err(|source| LoadError::Read {
            line: line_number,
            source,
        })?;
        let text = text.trim();
        if text.is_empty() {
            continue;
        }
        records.push(Record {
            line: line_number,
            text: text.to_string(),
        });
    }
    Ok(records)
}
