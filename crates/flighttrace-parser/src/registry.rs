use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::errors::{LoaderError, ReaderAttempt};
use crate::formats::{DelimitedReader, SpreadsheetReader};
use crate::model::RawTable;

pub trait TableReader {
    fn name(&self) -> &'static str;
    fn read(&self, data: &[u8]) -> Result<RawTable, LoaderError>;
}

const ZIP_MAGIC: &[u8] = b"PK\x03\x04";
const OLE_MAGIC: &[u8] = &[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

/// How an export is laid out on disk, decided from its extension and leading bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// Binary workbook (`.xlsx`, `.xlsm`, `.xlsb`, `.xls`, `.ods`).
    Workbook,
    /// Spreadsheet saved as delimited text.
    Delimited,
}

impl SourceKind {
    /// Workbook extensions win; any other path falls back to the zip/OLE signature.
    pub fn detect(path: &Path, data: &[u8]) -> Self {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("xlsx" | "xlsm" | "xlsb" | "xls" | "ods") => Self::Workbook,
            _ if data.starts_with(ZIP_MAGIC) || data.starts_with(OLE_MAGIC) => Self::Workbook,
            _ => Self::Delimited,
        }
    }
}

/// Reads the whole file and routes it to the workbook reader or the delimited readers.
pub fn load_table(path: &Path) -> Result<RawTable, LoaderError> {
    let data = fs::read(path).map_err(|source| LoaderError::FileNotFound {
        path: path.to_path_buf(),
        source,
    })?;
    let kind = SourceKind::detect(path, &data);
    debug!(path = %path.display(), ?kind, bytes = data.len(), "detected export layout");

    let table = match kind {
        SourceKind::Workbook => SpreadsheetReader.read(&data)?,
        SourceKind::Delimited => parse_table(&data)?,
    };
    info!(
        path = %path.display(),
        reader = table.reader,
        rows = table.height(),
        "loaded telemetry table"
    );
    Ok(table)
}

/// Tries comma, tab and semicolon layouts in that order.
pub fn parse_table(data: &[u8]) -> Result<RawTable, LoaderError> {
    let comma = DelimitedReader::COMMA;
    let tab = DelimitedReader::TAB;
    let semicolon = DelimitedReader::SEMICOLON;
    let readers: [&dyn TableReader; 3] = [&comma, &tab, &semicolon];
    parse_with_readers(data, &readers)
}

pub fn parse_with_readers(
    data: &[u8],
    readers: &[&dyn TableReader],
) -> Result<RawTable, LoaderError> {
    let mut attempts = Vec::with_capacity(readers.len());

    for reader in readers {
        match reader.read(data) {
            Ok(table) => return Ok(table),
            Err(LoaderError::FormatMismatch { reason, .. }) => {
                debug!(reader = reader.name(), %reason, "layout rejected");
                attempts.push(ReaderAttempt::new(reader.name(), reason));
            }
            Err(err) => return Err(err),
        }
    }

    Err(LoaderError::NoMatchingReader { attempts })
}
