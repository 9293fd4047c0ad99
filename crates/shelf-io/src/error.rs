//! # Loader Error Types
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io::Error / ValidationError / number parse failure               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  LoadError (this module) ← Adds path and line number                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CliError (in shelf-cli) ← Logged, load aborted, non-zero exit         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The first bad line aborts the whole file; nothing from a partially read
//! file is handed to the catalog.

use std::path::PathBuf;

use thiserror::Error;

/// File loading errors.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be opened.
    #[error("Cannot open {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading failed part way through.
    #[error("Read failed at line {line}: {source}")]
    Read {
        line: usize,
        #[source]
        source: std::io::Error,
    },

    /// A line has the wrong number of fields or an unparseable value.
    ///
    /// ## When This Occurs
    /// - `LIBRO|L001|El principito` (too few fields)
    /// - `LIBRO|L001|...|diez|...` (price is not a number)
    /// - `Ana|...|31|02|2000|...` (no such date)
    #[error("Malformed record at line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },

    /// An inventory line starts with a tag other than `LIBRO` or `JUEGO`.
    #[error("Unknown record kind '{kind}' at line {line}")]
    UnknownRecordKind { line: usize, kind: String },
}

impl LoadError {
    /// Creates a MalformedRecord error.
    pub fn malformed(line: usize, reason: impl Into<String>) -> Self {
        LoadError::MalformedRecord {
            line,
            reason: reason.into(),
        }
    }

    /// Line number the error refers to, if any (1-based).
    pub fn line(&self) -> Option<usize> {
        match self {
            LoadError::Io { .. } => None,
            LoadError::Read { line, .. }
            | LoadError::MalformedRecord { line, .. }
            | LoadError::UnknownRecordKind { line, .. } => Some(*line),
        }
    }
}

/// Result type for loader operations.
pub type LoadResult<T> = Result<T, LoadError>;
