// crates/flighttrace-core/src/error.rs

use std::fmt;

use flighttrace_parser::LoaderError;
use serde::Serialize;
use thiserror::Error;

/// Pipeline boundary at which a row-count check failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Cleaner,
    Reducer,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Cleaner => f.write_str("cleaner"),
            Stage::Reducer => f.write_str("reducer"),
        }
    }
}

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Load(#[from] LoaderError),

    #[error("missing required columns: {0:?}")]
    MissingColumns(Vec<String>),

    #[error("{stage} kept {rows} usable rows; at least 2 are required")]
    InsufficientData { stage: Stage, rows: usize },

    #[error("Polars operation failed: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, PipelineError>;

/// Non-fatal conditions surfaced to the caller alongside a successful result.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PipelineWarning {
    /// No time format matched; samples carry their row index and are not in wall-clock order.
    TimeParseExhausted { formats: Vec<String> },
    DuplicateColumn { source: String, canonical: String },
    /// Decimation left fewer than 2 points, so the whole cleaned table was used.
    ReductionFallback { rows: usize },
}

impl fmt::Display for PipelineWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineWarning::TimeParseExhausted { formats } => write!(
                f,
                "no time format matched ({}); using row order as time",
                formats.join(", ")
            ),
            PipelineWarning::DuplicateColumn { source, canonical } => {
                write!(f, "column '{source}' duplicates '{canonical}' and was dropped")
            }
            PipelineWarning::ReductionFallback { rows } => {
                write!(f, "reduction left too few points; using all {rows} rows")
            }
        }
    }
}
