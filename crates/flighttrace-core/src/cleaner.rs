use serde::Serialize;
use tracing::info;

use crate::error::{PipelineError, Result, Stage};
use crate::normalize::NormalizedTable;
use crate::time_resolver::ResolvedTime;
use crate::types::{FlightSample, TimeValue};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CleaningReport {
    pub input_rows: usize,
    pub dropped_unparsed_time: usize,
    pub dropped_missing_fields: usize,
    pub kept_rows: usize,
}

#[derive(Debug, Clone)]
pub struct CleanedTable {
    pub samples: Vec<FlightSample>,
    pub chronological: bool,
    pub report: CleaningReport,
}

struct CandidateRow {
    time: TimeValue,
    latitude: Option<f64>,
    longitude: Option<f64>,
    altitude: Option<f64>,
    roll: Option<f64>,
    pitch: Option<f64>,
    heading: Option<f64>,
}

impl CandidateRow {
    fn into_sample(self) -> Option<FlightSample> {
        Some(FlightSample {
            time: self.time,
            latitude: self.latitude?,
            longitude: self.longitude?,
            altitude: self.altitude?,
            roll: self.roll,
            pitch: self.pitch,
            heading: self.heading,
        })
    }
}

/// Blank, `nan`, non-numeric and non-finite cells all count as missing.
pub fn parse_number(value: Option<&str>) -> Option<f64> {
    let trimmed = value?.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|parsed| parsed.is_finite())
}

fn numeric_column(table: &NormalizedTable, name: &str) -> Result<Vec<Option<f64>>> {
    Ok(table
        .text_column(name)?
        .into_iter()
        .map(parse_number)
        .collect())
}

fn optional_numeric_column(
    table: &NormalizedTable,
    name: &str,
) -> Result<Option<Vec<Option<f64>>>> {
    if table.has_column(name) {
        numeric_column(table, name).map(Some)
    } else {
        Ok(None)
    }
}

fn cell(column: &Option<Vec<Option<f64>>>, idx: usize) -> Option<f64> {
    column.as_ref().and_then(|values| values.get(idx).copied().flatten())
}

/// Drops rows without a usable time, orders chronological tables by time, then drops rows
/// missing any position field. Fails when fewer than two rows survive.
pub fn clean(table: &NormalizedTable, time: &ResolvedTime) -> Result<CleanedTable> {
    let input_rows = table.height();
    let latitude = numeric_column(table, "latitude")?;
    let longitude = numeric_column(table, "longitude")?;
    let altitude = numeric_column(table, "altitude")?;
    let roll = optional_numeric_column(table, "roll")?;
    let pitch = optional_numeric_column(table, "pitch")?;
    let heading = optional_numeric_column(table, "heading")?;

    let mut rows: Vec<CandidateRow> = (0..input_rows)
        .filter_map(|idx| {
            let time = time.value(idx)?;
            Some(CandidateRow {
                time,
                latitude: latitude.get(idx).copied().flatten(),
                longitude: longitude.get(idx).copied().flatten(),
                altitude: altitude.get(idx).copied().flatten(),
                roll: cell(&roll, idx),
                pitch: cell(&pitch, idx),
                heading: cell(&heading, idx),
            })
        })
        .collect();
    let dropped_unparsed_time = input_rows - rows.len();

    if time.is_chronological() {
        rows.sort_by_key(|row| row.time.as_timestamp());
    }

    let with_time = rows.len();
    let samples: Vec<FlightSample> = rows
        .into_iter()
        .filter_map(CandidateRow::into_sample)
        .collect();

    let report = CleaningReport {
        input_rows,
        dropped_unparsed_time,
        dropped_missing_fields: with_time - samples.len(),
        kept_rows: samples.len(),
    };
    info!(
        input_rows = report.input_rows,
        dropped_unparsed_time = report.dropped_unparsed_time,
        dropped_missing_fields = report.dropped_missing_fields,
        kept_rows = report.kept_rows,
        "cleaned telemetry rows"
    );

    if samples.len() < 2 {
        return Err(PipelineError::InsufficientData {
            stage: Stage::Cleaner,
            rows: samples.len(),
        });
    }

    Ok(CleanedTable {
        samples,
        chronological: time.is_chronological(),
        report,
    })
}
