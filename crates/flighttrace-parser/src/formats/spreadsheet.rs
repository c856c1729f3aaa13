use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, ExcelDateTime, Reader};
use tracing::debug;

use crate::errors::LoaderError;
use crate::model::RawTable;
use crate::registry::TableReader;

use super::{build_text_table, clean_cell, disambiguate_headers};

const READER: &str = "WORKBOOK";

/// Reads the first worksheet of a binary workbook. The first non-blank row is the header.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpreadsheetReader;

impl TableReader for SpreadsheetReader {
    fn name(&self) -> &'static str {
        READER
    }

    fn read(&self, data: &[u8]) -> Result<RawTable, LoaderError> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(data))
            .map_err(|source| LoaderError::Workbook {
                reader: READER,
                source,
            })?;

        let range = workbook
            .worksheet_range_at(0)
            .ok_or(LoaderError::EmptyData { reader: READER })?
            .map_err(|source| LoaderError::Workbook {
                reader: READER,
                source,
            })?;

        let mut rows = range
            .rows()
            .filter(|row| row.iter().any(|cell| cell_text(cell).is_some()));

        let header = rows.next().ok_or(LoaderError::EmptyData { reader: READER })?;
        if header.len() < 2 {
            return Err(LoaderError::FormatMismatch {
                reader: READER,
                reason: format!("expected at least 2 header fields, found {}", header.len()),
            });
        }

        let headers: Vec<String> = header.iter().map(header_text).collect();
        let headers = disambiguate_headers(&headers);
        let mut columns: Vec<Vec<Option<String>>> = vec![Vec::new(); headers.len()];
        let mut row_count = 0usize;

        for row in rows {
            for (idx, column) in columns.iter_mut().enumerate() {
                column.push(row.get(idx).and_then(cell_text));
            }
            row_count += 1;
        }

        if row_count == 0 {
            return Err(LoaderError::EmptyData { reader: READER });
        }

        debug!(reader = READER, rows = row_count, columns = headers.len(), "read worksheet");

        let df = build_text_table(READER, &headers, columns)?;
        Ok(RawTable::new(READER, df))
    }
}

fn header_text(cell: &Data) -> String {
    match cell {
        Data::String(name) => name.clone(),
        other => cell_text(other).unwrap_or_default(),
    }
}

/// Renders a cell the way it would appear in a delimited export of the same sheet.
fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(text) | Data::DateTimeIso(text) | Data::DurationIso(text) => clean_cell(text),
        Data::Float(value) => Some(value.to_string()),
        Data::Int(value) => Some(value.to_string()),
        Data::Bool(value) => Some(value.to_string()),
        Data::DateTime(value) => excel_datetime_text(value),
    }
}

/// Serial values below one day are clock times and render without a date.
fn excel_datetime_text(value: &ExcelDateTime) -> Option<String> {
    let datetime = value.as_datetime()?;
    if value.as_f64() < 1.0 {
        Some(datetime.time().format("%H:%M:%S%.f").to_string())
    } else {
        Some(datetime.format("%Y-%m-%d %H:%M:%S%.f").to_string())
    }
}
