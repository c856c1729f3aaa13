use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, Result};

/// How the time resolver decides that a candidate format fits the column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeParsePolicy {
    /// Accept the first format under which at least one value parses.
    #[default]
    FirstSuccess,
    /// Accept the first format under which more than half of the non-blank values parse.
    Majority,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// chrono patterns, tried in order. Patterns without a date are anchored on 1900-01-01;
    /// patterns containing `%.f` only match values that carry a fractional second.
    pub time_formats: Vec<String>,
    pub time_parse_policy: TimeParsePolicy,
    pub min_points: usize,
    pub max_points: usize,
    pub points_divisor: usize,
    pub max_frames: usize,
    pub degree_padding: f64,
    pub altitude_padding_m: f64,
    pub frame_duration_ms: u64,
    pub title: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            time_formats: vec![
                "%H:%M:%S%.f".to_string(),
                "%H:%M:%S".to_string(),
                "%Y-%m-%d %H:%M:%S%.f".to_string(),
                "%Y-%m-%d %H:%M:%S".to_string(),
            ],
            time_parse_policy: TimeParsePolicy::FirstSuccess,
            min_points: 10,
            max_points: 100,
            points_divisor: 100,
            max_frames: 50,
            degree_padding: 0.0001,
            altitude_padding_m: 10.0,
            frame_duration_ms: 100,
            title: "3D Flight Trajectory Animation with Hover Tooltips".to_string(),
        }
    }
}

impl PipelineConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|err| PipelineError::Config(format!("failed to parse TOML: {err}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|err| {
            PipelineError::Config(format!("failed to read {}: {err}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<()> {
        if self.time_formats.is_empty() {
            return Err(PipelineError::Config(
                "time_formats must list at least one pattern".to_string(),
            ));
        }
        if self.min_points < 1 {
            return Err(PipelineError::Config("min_points must be at least 1".to_string()));
        }
        if self.max_points < self.min_points {
            return Err(PipelineError::Config(format!(
                "max_points ({}) must not be below min_points ({})",
                self.max_points, self.min_points
            )));
        }
        if self.points_divisor < 1 {
            return Err(PipelineError::Config(
                "points_divisor must be at least 1".to_string(),
            ));
        }
        if self.max_frames < 1 {
            return Err(PipelineError::Config("max_frames must be at least 1".to_string()));
        }
        let paddings = [self.degree_padding, self.altitude_padding_m];
        if paddings.iter().any(|pad| !pad.is_finite() || *pad < 0.0) {
            return Err(PipelineError::Config(
                "axis paddings must be finite and not negative".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        PipelineConfig::default().validate().expect("defaults validate");
    }

    #[test]
    fn partial_toml_keeps_remaining_defaults() {
        let config = PipelineConfig::from_toml_str(
            r#"
            max_frames = 20
            time_parse_policy = "majority"
            "#,
        )
        .expect("parse config");
        assert_eq!(config.max_frames, 20);
        assert_eq!(config.time_parse_policy, TimeParsePolicy::Majority);
        assert_eq!(config.max_points, 100);
        assert_eq!(config.time_formats.len(), 4);
    }

    #[test]
    fn inverted_point_bounds_are_rejected() {
        let err = PipelineConfig::from_toml_str("min_points = 50\nmax_points = 5\n")
            .expect_err("inverted bounds");
        assert!(matches!(err, PipelineError::Config(_)));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = PipelineConfig::from_toml_str("max_frame = 3\n").expect_err("typo key");
        assert!(matches!(err, PipelineError::Config(_)));
    }

    #[test]
    fn non_finite_padding_is_rejected() {
        for toml in ["degree_padding = nan\n", "altitude_padding_m = inf\n"] {
            let err = PipelineConfig::from_toml_str(toml).expect_err("non-finite padding");
            assert!(matches!(err, PipelineError::Config(_)), "{toml}");
        }
    }
}
