use std::collections::HashSet;

use flighttrace_parser::RawTable;
use polars::prelude::*;
use tracing::{info, warn};

use crate::error::{PipelineError, PipelineWarning, Result};

pub const REQUIRED_COLUMNS: [&str; 4] = ["time", "latitude", "longitude", "altitude"];
pub const ATTITUDE_COLUMNS: [&str; 3] = ["roll", "pitch", "heading"];

/// Unit suffixes dropped from canonical names, matched longest first.
const UNIT_SUFFIXES: &[&str] = &["meters", "deg"];

const ALIASES: &[(&str, &str)] = &[("lattitude", "latitude"), ("trueheading", "heading")];

/// Telemetry table with canonical column names. Cells are still text.
#[derive(Debug, Clone)]
pub struct NormalizedTable {
    pub df: DataFrame,
    pub warnings: Vec<PipelineWarning>,
}

impl NormalizedTable {
    pub fn height(&self) -> usize {
        self.df.height()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.df.column(name).is_ok()
    }

    pub fn text_column(&self, name: &str) -> Result<Vec<Option<&str>>> {
        Ok(self.df.column(name)?.str()?.into_iter().collect())
    }
}

/// Lowercases, drops whitespace and parentheses, then strips trailing unit suffixes.
pub fn canonicalize(name: &str) -> String {
    let mut canonical: String = name
        .trim()
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '(' && *c != ')')
        .collect();

    while let Some(stripped) = strip_unit_suffix(&canonical) {
        canonical = stripped;
    }
    canonical
}

fn strip_unit_suffix(name: &str) -> Option<String> {
    let mut suffixes = UNIT_SUFFIXES.to_vec();
    suffixes.sort_by_key(|suffix| std::cmp::Reverse(suffix.len()));
    suffixes.into_iter().find_map(|suffix| {
        name.strip_suffix(suffix)
            .filter(|rest| !rest.is_empty())
            .map(str::to_string)
    })
}

pub fn resolve_alias(canonical: &str) -> &str {
    ALIASES
        .iter()
        .find(|(alias, _)| *alias == canonical)
        .map(|(_, target)| *target)
        .unwrap_or(canonical)
}

pub fn normalize(table: &RawTable) -> Result<NormalizedTable> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut columns: Vec<Column> = Vec::with_capacity(table.df.width());
    let mut warnings = Vec::new();

    for column in table.df.get_columns() {
        let source = column.name().to_string();
        let canonical = resolve_alias(&canonicalize(&source)).to_string();

        if !seen.insert(canonical.clone()) {
            warn!(source = %source, canonical = %canonical, "dropping duplicate column");
            warnings.push(PipelineWarning::DuplicateColumn { source, canonical });
            continue;
        }

        let values: Vec<Option<&str>> = column.str()?.into_iter().collect();
        columns.push(Series::new(canonical.as_str().into(), values).into());
    }

    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|required| !seen.contains(**required))
        .map(|required| required.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(PipelineError::MissingColumns(missing));
    }

    let df = DataFrame::new(columns)?;
    info!(columns = ?df.get_column_names(), "normalized column names");
    Ok(NormalizedTable { df, warnings })
}
