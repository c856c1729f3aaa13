use std::path::Path;

use flighttrace_parser::{load_table, RawTable};
use serde::Serialize;
use tracing::info;

use crate::cleaner::{clean, CleaningReport};
use crate::config::PipelineConfig;
use crate::error::{PipelineWarning, Result};
use crate::normalize::normalize;
use crate::reducer::{reduce, ReductionBounds};
use crate::scene::Scene;
use crate::time_resolver::resolve_time;

/// Row counts and decisions taken at each stage of one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineReport {
    pub reader: &'static str,
    pub source_rows: usize,
    pub columns: Vec<String>,
    pub time_format: Option<String>,
    pub chronological: bool,
    pub cleaning: CleaningReport,
    pub target_points: usize,
    pub stride: usize,
    pub reduced_points: usize,
    pub frames: usize,
}

#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub scene: Scene,
    pub report: PipelineReport,
    pub warnings: Vec<PipelineWarning>,
}

pub fn run_pipeline(path: &Path, config: &PipelineConfig) -> Result<PipelineOutput> {
    let table = load_table(path)?;
    process_table(&table, config)
}

/// Runs every stage after loading. Any stage failure aborts the run with no partial output.
pub fn process_table(table: &RawTable, config: &PipelineConfig) -> Result<PipelineOutput> {
    config.validate()?;
    let normalized = normalize(table)?;
    let mut warnings = normalized.warnings.clone();

    let raw_time = normalized.text_column("time")?;
    let resolution = resolve_time(&raw_time, &config.time_formats, config.time_parse_policy);
    warnings.extend(resolution.warning.clone());

    let cleaned = clean(&normalized, &resolution.time)?;
    let reduction = reduce(&cleaned.samples, ReductionBounds::from(config))?;
    if reduction.fell_back {
        warnings.push(PipelineWarning::ReductionFallback {
            rows: reduction.samples.len(),
        });
    }

    let reduced_points = reduction.samples.len();
    let scene = Scene::build(
        reduction.samples,
        cleaned.chronological,
        warnings.clone(),
        config,
    )?;

    let report = PipelineReport {
        reader: table.reader,
        source_rows: table.height(),
        columns: normalized
            .df
            .get_column_names()
            .into_iter()
            .map(|name| name.to_string())
            .collect(),
        time_format: resolution.time.format().map(str::to_string),
        chronological: cleaned.chronological,
        cleaning: cleaned.report,
        target_points: reduction.target,
        stride: reduction.stride,
        reduced_points,
        frames: scene.frames.len(),
    };
    info!(
        points = report.reduced_points,
        frames = report.frames,
        warnings = warnings.len(),
        "built trajectory scene"
    );

    Ok(PipelineOutput {
        scene,
        report,
        warnings,
    })
}
