use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use tracing::{debug, info, warn};

use crate::config::TimeParsePolicy;
use crate::error::PipelineWarning;
use crate::types::TimeValue;

const DATE_SPECIFIERS: &[&str] = &[
    "%Y", "%y", "%C", "%m", "%b", "%B", "%h", "%d", "%e", "%j", "%F", "%D", "%G", "%g", "%s",
];

/// Time-only values have no calendar date; they are placed on this day.
fn anchor_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1900, 1, 1).expect("1900-01-01 is a valid date")
}

/// One candidate chrono pattern for the time column.
#[derive(Debug, Clone)]
pub struct TimeFormat {
    pattern: String,
    has_date: bool,
    requires_fraction: bool,
}

impl TimeFormat {
    pub fn new(pattern: impl Into<String>) -> Self {
        let pattern = pattern.into();
        let has_date = DATE_SPECIFIERS.iter().any(|spec| pattern.contains(spec));
        let requires_fraction = pattern.contains("%.f");
        Self {
            pattern,
            has_date,
            requires_fraction,
        }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn parse(&self, value: &str) -> Option<NaiveDateTime> {
        let trimmed = value.trim();
        if self.requires_fraction && !has_fractional_seconds(trimmed) {
            return None;
        }
        if self.has_date {
            NaiveDateTime::parse_from_str(trimmed, &self.pattern).ok()
        } else {
            NaiveTime::parse_from_str(trimmed, &self.pattern)
                .ok()
                .map(|time| anchor_date().and_time(time))
        }
    }
}

fn has_fractional_seconds(value: &str) -> bool {
    value
        .rsplit(':')
        .next()
        .is_some_and(|seconds| seconds.contains('.'))
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedTime {
    /// Values parsed under `format`; `None` where that format did not match the cell.
    Chronological {
        format: String,
        values: Vec<Option<NaiveDateTime>>,
    },
    /// No format matched; each row's time is its zero-based position.
    Ordinal { len: usize },
}

impl ResolvedTime {
    pub fn is_chronological(&self) -> bool {
        matches!(self, ResolvedTime::Chronological { .. })
    }

    pub fn len(&self) -> usize {
        match self {
            ResolvedTime::Chronological { values, .. } => values.len(),
            ResolvedTime::Ordinal { len } => *len,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn value(&self, idx: usize) -> Option<TimeValue> {
        match self {
            ResolvedTime::Chronological { values, .. } => {
                values.get(idx).copied().flatten().map(TimeValue::Timestamp)
            }
            ResolvedTime::Ordinal { len } => (idx < *len).then_some(TimeValue::Ordinal(idx)),
        }
    }

    pub fn format(&self) -> Option<&str> {
        match self {
            ResolvedTime::Chronological { format, .. } => Some(format),
            ResolvedTime::Ordinal { .. } => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TimeResolution {
    pub time: ResolvedTime,
    pub warning: Option<PipelineWarning>,
}

/// Tries each pattern against the whole column and keeps the first one the policy accepts.
/// Under [`TimeParsePolicy::FirstSuccess`] a single parsed value is enough, even if that
/// format leaves most other rows unparsed.
pub fn resolve_time(
    raw: &[Option<&str>],
    formats: &[String],
    policy: TimeParsePolicy,
) -> TimeResolution {
    let non_blank = raw.iter().filter(|value| value.is_some()).count();

    let accepted = formats.iter().map(TimeFormat::new).find_map(|format| {
        let values: Vec<Option<NaiveDateTime>> = raw
            .iter()
            .map(|value| value.and_then(|v| format.parse(v)))
            .collect();
        let parsed = values.iter().filter(|value| value.is_some()).count();
        debug!(format = format.pattern(), parsed, rows = raw.len(), "tried time format");

        let fits = match policy {
            TimeParsePolicy::FirstSuccess => parsed > 0,
            TimeParsePolicy::Majority => parsed * 2 > non_blank,
        };
        fits.then(|| (format, values, parsed))
    });

    match accepted {
        Some((format, values, parsed)) => {
            info!(
                format = format.pattern(),
                parsed,
                unparsed = raw.len() - parsed,
                "parsed time column"
            );
            TimeResolution {
                time: ResolvedTime::Chronological {
                    format: format.pattern().to_string(),
                    values,
                },
                warning: None,
            }
        }
        None => {
            warn!(
                formats = ?formats,
                "all time formats failed; using row order as time"
            );
            TimeResolution {
                time: ResolvedTime::Ordinal { len: raw.len() },
                warning: Some(PipelineWarning::TimeParseExhausted {
                    formats: formats.to_vec(),
                }),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fraction_pattern_rejects_whole_seconds() {
        let format = TimeFormat::new("%H:%M:%S%.f");
        assert!(format.parse("09:36:14").is_none());
        let parsed = format.parse("09:36:14.250").expect("fractional time");
        assert_eq!(parsed.to_string(), "1900-01-01 09:36:14.250");
    }

    #[test]
    fn time_only_values_land_on_anchor_date() {
        let parsed = TimeFormat::new("%H:%M:%S")
            .parse(" 23:59:59 ")
            .expect("time only");
        assert_eq!(parsed.date(), anchor_date());
    }

    #[test]
    fn date_patterns_keep_their_own_date() {
        let parsed = TimeFormat::new("%Y-%m-%d %H:%M:%S")
            .parse("2023-07-04 09:36:14")
            .expect("date time");
        assert_eq!(parsed.to_string(), "2023-07-04 09:36:14");
    }

    #[test]
    fn fractional_check_ignores_dots_in_dates() {
        assert!(!has_fractional_seconds("2023.07.04 09:36:14"));
        assert!(has_fractional_seconds("2023-07-04 09:36:14.5"));
    }
}
