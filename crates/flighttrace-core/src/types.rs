use std::cmp::Ordering;
use std::fmt;

use chrono::{NaiveDateTime, Timelike};
use serde::Serialize;

/// Time of a sample: a parsed wall-clock timestamp, or the row's position in the source file
/// when no time format matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum TimeValue {
    Timestamp(NaiveDateTime),
    Ordinal(usize),
}

impl TimeValue {
    pub fn as_timestamp(&self) -> Option<NaiveDateTime> {
        match self {
            TimeValue::Timestamp(ts) => Some(*ts),
            TimeValue::Ordinal(_) => None,
        }
    }

    pub fn as_ordinal(&self) -> Option<usize> {
        match self {
            TimeValue::Ordinal(idx) => Some(*idx),
            TimeValue::Timestamp(_) => None,
        }
    }
}

impl PartialOrd for TimeValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (TimeValue::Timestamp(a), TimeValue::Timestamp(b)) => Some(a.cmp(b)),
            (TimeValue::Ordinal(a), TimeValue::Ordinal(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

impl fmt::Display for TimeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeValue::Timestamp(ts) if ts.nanosecond() == 0 => {
                write!(f, "{}", ts.format("%Y-%m-%d %H:%M:%S"))
            }
            TimeValue::Timestamp(ts) => write!(f, "{}", ts.format("%Y-%m-%d %H:%M:%S%.6f")),
            TimeValue::Ordinal(idx) => write!(f, "{idx}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlightSample {
    pub time: TimeValue,
    pub latitude: f64,
    pub longitude: f64,
    /// Meters.
    pub altitude: f64,
    /// Degrees.
    pub roll: Option<f64>,
    pub pitch: Option<f64>,
    pub heading: Option<f64>,
}
