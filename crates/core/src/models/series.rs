use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Two-tone coloring class of a chart point relative to the series' opening value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tone {
    /// At or above the opening value
    Positive,
    /// Below the opening value
    Negative,
}

impl Tone {
    /// Classify `value` against the series' first value.
    pub fn classify(value: f64, opening: f64) -> Self {
        if value >= opening {
            Tone::Positive
        } else {
            Tone::Negative
        }
    }
}

/// A single sample of a synthetic sparkline series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub time: DateTime<Utc>,
    pub value: f64,
    pub tone: Tone,
}
