use serde::Serialize;

use crate::config::PipelineConfig;
use crate::error::{PipelineError, PipelineWarning, Result, Stage};
use crate::frames::{
    build_frames, endpoint_markers, hover_texts, AnimationFrame, Marker, AIRCRAFT_LABEL,
};
use crate::types::FlightSample;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

impl AxisRange {
    fn padded(values: impl Iterator<Item = f64>, padding: f64) -> Option<Self> {
        let (min, max) = values.fold(None, |acc: Option<(f64, f64)>, value| match acc {
            Some((lo, hi)) => Some((lo.min(value), hi.max(value))),
            None => Some((value, value)),
        })?;
        Some(Self {
            min: min - padding,
            max: max + padding,
        })
    }
}

/// Scene extents, padded so the presenter does not clip the outermost points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AxisBounds {
    pub longitude: AxisRange,
    pub latitude: AxisRange,
    pub altitude: AxisRange,
}

impl AxisBounds {
    pub fn from_samples(
        samples: &[FlightSample],
        degree_padding: f64,
        altitude_padding: f64,
    ) -> Option<Self> {
        Some(Self {
            longitude: AxisRange::padded(samples.iter().map(|s| s.longitude), degree_padding)?,
            latitude: AxisRange::padded(samples.iter().map(|s| s.latitude), degree_padding)?,
            altitude: AxisRange::padded(samples.iter().map(|s| s.altitude), altitude_padding)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AxisTitles {
    pub x: String,
    pub y: String,
    pub z: String,
}

impl Default for AxisTitles {
    fn default() -> Self {
        Self {
            x: "Longitude".to_string(),
            y: "Latitude".to_string(),
            z: "Altitude (m)".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Playback {
    pub frame_duration_ms: u64,
}

/// Everything the 3D presenter needs to draw and animate the trajectory.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub title: String,
    pub axis_titles: AxisTitles,
    /// `false` when samples are in file order because no time format matched.
    pub chronological: bool,
    pub samples: Vec<FlightSample>,
    pub hover_text: Vec<String>,
    pub start: Marker,
    pub end: Marker,
    pub aircraft: Marker,
    pub frames: Vec<AnimationFrame>,
    pub bounds: AxisBounds,
    pub playback: Playback,
    pub warnings: Vec<PipelineWarning>,
}

impl Scene {
    pub fn build(
        samples: Vec<FlightSample>,
        chronological: bool,
        warnings: Vec<PipelineWarning>,
        config: &PipelineConfig,
    ) -> Result<Self> {
        let insufficient = || PipelineError::InsufficientData {
            stage: Stage::Reducer,
            rows: samples.len(),
        };
        if samples.len() < 2 {
            return Err(insufficient());
        }

        let (start, end) = endpoint_markers(&samples).ok_or_else(insufficient)?;
        let aircraft = Marker::at(AIRCRAFT_LABEL, &samples, 0).ok_or_else(insufficient)?;
        let bounds =
            AxisBounds::from_samples(&samples, config.degree_padding, config.altitude_padding_m)
                .ok_or_else(insufficient)?;

        Ok(Self {
            title: config.title.clone(),
            axis_titles: AxisTitles::default(),
            chronological,
            hover_text: hover_texts(&samples),
            frames: build_frames(samples.len(), config.max_frames),
            samples,
            start,
            end,
            aircraft,
            bounds,
            playback: Playback {
                frame_duration_ms: config.frame_duration_ms,
            },
            warnings,
        })
    }

    pub fn to_json_pretty(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
