use serde::Serialize;

use crate::types::FlightSample;

/// Line separator understood by the presenter's hover labels.
pub const HOVER_SEPARATOR: &str = "<br>";
pub const START_LABEL: &str = "Start";
pub const END_LABEL: &str = "End";
pub const AIRCRAFT_LABEL: &str = "Aircraft";

fn attitude_line(label: &str, value: Option<f64>) -> String {
    match value {
        Some(degrees) => format!("{label}: {degrees:.2}°"),
        None => format!("{label}: N/A"),
    }
}

pub fn hover_text(sample: &FlightSample) -> String {
    [
        format!("Time: {}", sample.time),
        attitude_line("Roll", sample.roll),
        attitude_line("Pitch", sample.pitch),
        attitude_line("Heading", sample.heading),
        format!("Longitude: {:.6}", sample.longitude),
        format!("Latitude: {:.6}", sample.latitude),
        format!("Altitude: {:.2} m", sample.altitude),
    ]
    .join(HOVER_SEPARATOR)
}

pub fn hover_texts(samples: &[FlightSample]) -> Vec<String> {
    samples.iter().map(hover_text).collect()
}

/// Keyframe showing the trajectory up to and including `prefix_end_index`, with the aircraft
/// drawn at `current_index`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnimationFrame {
    pub frame_name: String,
    pub prefix_end_index: usize,
    pub current_index: usize,
}

impl AnimationFrame {
    pub fn new(index: usize) -> Self {
        Self {
            frame_name: format!("frame{index}"),
            prefix_end_index: index,
            current_index: index,
        }
    }

    pub fn trajectory<'a>(&self, samples: &'a [FlightSample]) -> &'a [FlightSample] {
        let end = (self.prefix_end_index + 1).min(samples.len());
        &samples[..end]
    }

    pub fn current<'a>(&self, samples: &'a [FlightSample]) -> Option<&'a FlightSample> {
        samples.get(self.current_index)
    }
}

/// Up to `max_frames` indices spread evenly over `1..=len-1`, truncated to integers.
pub fn frame_indices(len: usize, max_frames: usize) -> Vec<usize> {
    let last = len.saturating_sub(1);
    let count = max_frames.min(last);
    if count == 0 {
        return vec![last.min(1)];
    }
    if count == 1 {
        return vec![1];
    }

    let span = last - 1;
    let intervals = count - 1;
    let mut indices: Vec<usize> = (0..count).map(|i| 1 + i * span / intervals).collect();
    indices.dedup();
    indices
}

pub fn build_frames(len: usize, max_frames: usize) -> Vec<AnimationFrame> {
    frame_indices(len, max_frames)
        .into_iter()
        .map(AnimationFrame::new)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub label: &'static str,
    pub sample_index: usize,
    pub sample: FlightSample,
    pub hover: String,
}

impl Marker {
    pub fn at(label: &'static str, samples: &[FlightSample], index: usize) -> Option<Self> {
        let sample = samples.get(index)?.clone();
        let hover = hover_text(&sample);
        Some(Self {
            label,
            sample_index: index,
            sample,
            hover,
        })
    }
}

/// Start and End markers for the first and last samples.
pub fn endpoint_markers(samples: &[FlightSample]) -> Option<(Marker, Marker)> {
    let last = samples.len().checked_sub(1)?;
    Some((
        Marker::at(START_LABEL, samples, 0)?,
        Marker::at(END_LABEL, samples, last)?,
    ))
}
