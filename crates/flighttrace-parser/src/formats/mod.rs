mod common;
mod delimited;
mod spreadsheet;

pub use delimited::DelimitedReader;
pub use spreadsheet::SpreadsheetReader;

pub(crate) use common::{build_text_table, clean_cell, disambiguate_headers};
