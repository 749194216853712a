use chrono::{DateTime, Duration, Utc};
use rand::Rng;

use crate::models::series::{SeriesPoint, Tone};

/// Number of points in a series: one per hour over 24 hours, both ends included.
pub const SERIES_LEN: usize = 25;

/// Value of the first point.
pub const SERIES_SEED: f64 = 20_000.0;

/// Largest step (up or down) between two consecutive points.
pub const SERIES_MAX_STEP: f64 = 1_000.0;

/// No point ever drops below this value.
pub const SERIES_FLOOR: f64 = 1_000.0;

const SPARK_GLYPHS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Generates the placeholder chart series shown in list rows and the detail view.
///
/// The series is a bounded random walk with no relationship to any real
/// asset or price. Every call draws a new, independent series.
pub struct SeriesService;

impl SeriesService {
    pub fn new() -> Self {
        Self
    }

    /// Generate a fresh series ending now, using the thread-local RNG.
    pub fn generate(&self) -> Vec<SeriesPoint> {
        self.generate_with(&mut rand::rng(), Utc::now())
    }

    /// Generate a series ending at `end` from the given RNG.
    ///
    /// Point `i` sits at `end - (24 - i) hours`. The first value is
    /// [`SERIES_SEED`]; each next value adds a uniform step in
    /// `[-SERIES_MAX_STEP, SERIES_MAX_STEP]` and is floored at [`SERIES_FLOOR`].
    pub fn generate_with<R: Rng>(&self, rng: &mut R, end: DateTime<Utc>) -> Vec<SeriesPoint> {
        let start = end - Duration::hours(SERIES_LEN as i64 - 1);
        let mut points = Vec::with_capacity(SERIES_LEN);
        let mut value = SERIES_SEED;

        for i in 0..SERIES_LEN {
            if i > 0 {
                let step: f64 = rng.random_range(-SERIES_MAX_STEP..=SERIES_MAX_STEP);
                value = (value + step).max(SERIES_FLOOR);
            }
            points.push(SeriesPoint {
                time: start + Duration::hours(i as i64),
                value,
                tone: Tone::classify(value, SERIES_SEED),
            });
        }

        points
    }

    /// Render a series as a one-line block-glyph sparkline.
    pub fn sparkline(points: &[SeriesPoint]) -> String {
        let (min, max) = points.iter().fold((f64::MAX, f64::MIN), |(lo, hi), p| {
            (lo.min(p.value), hi.max(p.value))
        });
        let span = max - min;
        points
            .iter()
            .map(|p| {
                if span <= 0.0 {
                    return SPARK_GLYPHS[0];
                }
                let level = ((p.value - min) / span * (SPARK_GLYPHS.len() - 1) as f64).round();
                SPARK_GLYPHS[level as usize]
            })
            .collect()
    }
}

impl Default for SeriesService {
    fn default() -> Self {
        Self::new()
    }
}
