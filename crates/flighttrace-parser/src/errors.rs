use std::fmt;
use std::path::PathBuf;

use polars::prelude::PolarsError;
use thiserror::Error;

/// Why one delimited layout was rejected while probing an export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReaderAttempt {
    pub reader: &'static str,
    pub reason: String,
}

impl ReaderAttempt {
    pub fn new(reader: &'static str, reason: impl Into<String>) -> Self {
        Self {
            reader,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ReaderAttempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.reader, self.reason)
    }
}

fn list_attempts(attempts: &[ReaderAttempt]) -> String {
    attempts
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("telemetry file {path} could not be read: {source}")]
    FileNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{reader} format mismatch: {reason}")]
    FormatMismatch {
        reader: &'static str,
        reason: String,
    },

    #[error("{reader} CSV error: {source}")]
    Csv {
        reader: &'static str,
        #[source]
        source: csv::Error,
    },

    #[error("{reader} workbook could not be opened: {source}")]
    Workbook {
        reader: &'static str,
        #[source]
        source: calamine::Error,
    },

    #[error("{reader} data row {line_index} invalid: {message}")]
    DataRow {
        reader: &'static str,
        line_index: usize,
        message: String,
    },

    #[error("{reader} file did not contain any data rows")]
    EmptyData { reader: &'static str },

    #[error("{reader} failed to build table: {source}")]
    Table {
        reader: &'static str,
        #[source]
        source: PolarsError,
    },

    #[error("no delimited layout fits this export: {}", list_attempts(.attempts))]
    NoMatchingReader { attempts: Vec<ReaderAttempt> },
}
