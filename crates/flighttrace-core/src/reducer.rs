use tracing::{info, warn};

use crate::config::PipelineConfig;
use crate::error::{PipelineError, Result, Stage};
use crate::types::FlightSample;

/// Point-count limits for stride decimation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReductionBounds {
    pub min_points: usize,
    pub max_points: usize,
    pub divisor: usize,
}

impl Default for ReductionBounds {
    fn default() -> Self {
        Self {
            min_points: 10,
            max_points: 100,
            divisor: 100,
        }
    }
}

impl From<&PipelineConfig> for ReductionBounds {
    fn from(config: &PipelineConfig) -> Self {
        Self {
            min_points: config.min_points,
            max_points: config.max_points,
            divisor: config.points_divisor,
        }
    }
}

impl ReductionBounds {
    fn cap(&self) -> usize {
        self.max_points.max(self.min_points)
    }

    pub fn target_points(&self, rows: usize) -> usize {
        (rows / self.divisor.max(1)).clamp(self.min_points, self.cap())
    }

    pub fn stride(&self, rows: usize) -> usize {
        (rows / self.target_points(rows).max(1)).max(1)
    }
}

#[derive(Debug, Clone)]
pub struct Reduction {
    pub samples: Vec<FlightSample>,
    pub target: usize,
    pub stride: usize,
    /// Decimation produced fewer than two points and the full input was kept.
    pub fell_back: bool,
}

/// Keeps every `stride`-th sample starting at the first, never more than `max_points` of them.
pub fn reduce(samples: &[FlightSample], bounds: ReductionBounds) -> Result<Reduction> {
    let rows = samples.len();
    let target = bounds.target_points(rows);
    let stride = bounds.stride(rows);

    let reduced: Vec<FlightSample> = samples
        .iter()
        .step_by(stride)
        .take(bounds.cap())
        .cloned()
        .collect();

    if reduced.len() >= 2 {
        info!(rows, target, stride, points = reduced.len(), "reduced trajectory");
        return Ok(Reduction {
            samples: reduced,
            target,
            stride,
            fell_back: false,
        });
    }

    if rows < 2 {
        return Err(PipelineError::InsufficientData {
            stage: Stage::Reducer,
            rows,
        });
    }

    warn!(rows, stride, "reduction left fewer than 2 points; using all rows");
    Ok(Reduction {
        samples: samples.to_vec(),
        target,
        stride,
        fell_back: true,
    })
}
