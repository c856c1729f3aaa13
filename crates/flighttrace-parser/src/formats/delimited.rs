use std::borrow::Cow;

use tracing::{debug, warn};

use crate::errors::LoaderError;
use crate::model::RawTable;
use crate::registry::TableReader;

use super::{build_text_table, clean_cell, disambiguate_headers};

/// Reads spreadsheet exports saved as delimited text.
#[derive(Debug, Clone, Copy)]
pub struct DelimitedReader {
    name: &'static str,
    delimiter: u8,
}

impl DelimitedReader {
    pub const COMMA: Self = Self {
        name: "CSV",
        delimiter: b',',
    };
    pub const TAB: Self = Self {
        name: "TSV",
        delimiter: b'\t',
    };
    pub const SEMICOLON: Self = Self {
        name: "SEMICOLON",
        delimiter: b';',
    };
}

impl TableReader for DelimitedReader {
    fn name(&self) -> &'static str {
        self.name
    }

    fn read(&self, data: &[u8]) -> Result<RawTable, LoaderError> {
        let decoded = String::from_utf8_lossy(data);
        if matches!(decoded, Cow::Owned(_)) {
            warn!(
                reader = self.name,
                "export is not valid UTF-8; undecodable bytes were replaced"
            );
        }
        let content = decoded.trim_start_matches('\u{feff}');
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(self.delimiter)
            .from_reader(content.as_bytes());

        let mut records = reader.records();

        let header = records
            .next()
            .ok_or(LoaderError::FormatMismatch {
                reader: self.name,
                reason: "file missing column header row".to_string(),
            })?
            .map_err(|source| LoaderError::Csv {
                reader: self.name,
                source,
            })?;

        if header.len() < 2 {
            return Err(LoaderError::FormatMismatch {
                reader: self.name,
                reason: format!("expected at least 2 header fields, found {}", header.len()),
            });
        }

        let headers: Vec<String> = header.iter().map(str::to_string).collect();
        let headers = disambiguate_headers(&headers);
        let mut columns: Vec<Vec<Option<String>>> = vec![Vec::new(); headers.len()];
        let mut row_count = 0usize;

        for (row_idx, record) in records.enumerate() {
            let record = record.map_err(|source| LoaderError::Csv {
                reader: self.name,
                source,
            })?;

            if record.iter().all(|cell| cell.trim().is_empty()) {
                continue;
            }

            if record.len() > headers.len() {
                return Err(LoaderError::DataRow {
                    reader: self.name,
                    line_index: row_idx + 1,
                    message: format!(
                        "row has {} fields but header has {}",
                        record.len(),
                        headers.len()
                    ),
                });
            }

            for (idx, column) in columns.iter_mut().enumerate() {
                column.push(record.get(idx).and_then(clean_cell));
            }
            row_count += 1;
        }

        if row_count == 0 {
            return Err(LoaderError::EmptyData { reader: self.name });
        }

        debug!(reader = self.name, rows = row_count, columns = headers.len(), "read delimited table");

        let df = build_text_table(self.name, &headers, columns)?;
        Ok(RawTable::new(self.name, df))
    }
}
