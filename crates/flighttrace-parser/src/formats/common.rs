use std::collections::HashSet;

use polars::prelude::*;

use crate::errors::LoaderError;

pub(crate) fn clean_cell(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Header names must be unique for the table; later repeats get a `_duplicated_<n>` suffix.
pub(crate) fn disambiguate_headers(headers: &[String]) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::with_capacity(headers.len());
    let mut out = Vec::with_capacity(headers.len());
    for header in headers {
        if seen.insert(header.clone()) {
            out.push(header.clone());
            continue;
        }
        let mut n = 0usize;
        let renamed = loop {
            let candidate = format!("{header}_duplicated_{n}");
            if !seen.contains(&candidate) {
                break candidate;
            }
            n += 1;
        };
        seen.insert(renamed.clone());
        out.push(renamed);
    }
    out
}

pub(crate) fn build_text_table(
    reader: &'static str,
    headers: &[String],
    columns: Vec<Vec<Option<String>>>,
) -> Result<DataFrame, LoaderError> {
    let cols: Vec<Column> = headers
        .iter()
        .zip(columns)
        .map(|(name, values)| {
            let utf8: Vec<Option<&str>> = values.iter().map(|v| v.as_deref()).collect();
            Series::new(name.as_str().into(), utf8).into()
        })
        .collect();

    DataFrame::new(cols).map_err(|source| LoaderError::Table { reader, source })
}
