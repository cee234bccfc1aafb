//! Derivations for the ranking / distribution page.

use crate::api::Ranking;

/// Select option that means "no region filter". Compared as an exact literal.
pub const ALL_REGIONS: &str = "All";

pub const FEATURE_OPTIONS: [&str; 9] = [
    "happiness",
    "facilities",
    "location",
    "opportunities",
    "clubs",
    "social",
    "safety",
    "food",
    "internet",
];

/// Ratings are on a 1-5 scale.
pub const SCORE_CEILING: f64 = 5.0;

const MAX_LABEL_CHARS: usize = 35;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegionFilter {
    All,
    State(String),
}

impl RegionFilter {
    /// Only the literal `"All"` is the sentinel; `"all"` or `""` are ordinary states.
    pub fn from_select(value: &str) -> Self {
        if value == ALL_REGIONS {
            RegionFilter::All
        } else {
            RegionFilter::State(value.to_string())
        }
    }

    pub fn request_value(&self) -> &str {
        match self {
            RegionFilter::All => ALL_REGIONS,
            RegionFilter::State(s) => s,
        }
    }

    pub fn title(&self) -> String {
        match self {
            RegionFilter::All => "the US".to_string(),
            RegionFilter::State(s) => s.clone(),
        }
    }

    pub fn for_phrase(&self) -> String {
        match self {
            RegionFilter::All => "for All States".to_string(),
            RegionFilter::State(s) => format!("for {}", s),
        }
    }

    pub fn in_phrase(&self) -> String {
        match self {
            RegionFilter::All => "in the US".to_string(),
            RegionFilter::State(s) => format!("in {}", s),
        }
    }
}

/// Bars start just below the weakest entry so small differences stay visible.
pub fn axis_min(values: &[f64]) -> f64 {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    if min.is_finite() {
        (min - 0.5).max(0.0)
    } else {
        0.0
    }
}

pub fn truncate_label(label: &str) -> String {
    if label.chars().count() > MAX_LABEL_CHARS {
        let head: String = label.chars().take(MAX_LABEL_CHARS).collect();
        format!("{}...", head)
    } else {
        label.to_string()
    }
}

/// Filled and remaining segments of the average-score doughnut.
pub fn gauge_segments(average: f64) -> [f64; 2] {
    [average, SCORE_CEILING - average]
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub full_label: String,
    pub value: f64,
}

/// One bar chart's worth of data with its value axis.
#[derive(Debug, Clone, PartialEq)]
pub struct BarSeries {
    pub bars: Vec<Bar>,
    pub min: f64,
    pub max: f64,
}

impl BarSeries {
    pub fn top_schools(ranking: &Ranking) -> Self {
        let values: Vec<f64> = ranking.top_schools.iter().map(|s| s.score).collect();
        Self {
            bars: ranking
                .top_schools
                .iter()
                .map(|s| Bar {
                    label: truncate_label(&s.school_name),
                    full_label: s.school_name.clone(),
                    value: s.score,
                })
                .collect(),
            min: axis_min(&values),
            max: SCORE_CEILING,
        }
    }

    pub fn top_states(ranking: &Ranking) -> Self {
        let values: Vec<f64> = ranking.top_states.iter().map(|s| s.score).collect();
        Self {
            bars: ranking
                .top_states
                .iter()
                .map(|s| Bar {
                    label: s.state.clone(),
                    full_label: s.state.clone(),
                    value: s.score,
                })
                .collect(),
            min: axis_min(&values),
            max: SCORE_CEILING,
        }
    }

    /// Histogram counts, axis from zero.
    pub fn distribution(ranking: &Ranking) -> Self {
        let bars: Vec<Bar> = ranking
            .distribution
            .labels
            .iter()
            .zip(&ranking.distribution.counts)
            .map(|(label, count)| Bar {
                label: label.clone(),
                full_label: label.clone(),
                value: f64::from(*count),
            })
            .collect();
        let top = bars.iter().map(|b| b.value).fold(0.0_f64, f64::max);
        Self {
            bars,
            min: 0.0,
            max: if top > 0.0 { top } else { 1.0 },
        }
    }

    /// Bar length as a percentage of the axis span, clamped to [0, 100].
    pub fn fraction(&self, value: f64) -> f64 {
        let span = self.max - self.min;
        if span <= 0.0 {
            return 0.0;
        }
        ((value - self.min) / span * 100.0).clamp(0.0, 100.0)
    }
}

/// Number roll from one displayed average to the next in 0.05 steps.
#[derive(Debug, Clone, PartialEq)]
pub struct CountUp {
    start: f64,
    end: f64,
    duration_ms: u32,
}

const COUNT_INCREMENT: f64 = 0.05;

impl CountUp {
    /// `None` when there is nothing to animate.
    pub fn new(start: f64, end: f64, duration_ms: u32) -> Option<Self> {
        let start = if start.is_finite() { start } else { 0.0 };
        if start == end || !end.is_finite() {
            return None;
        }
        Some(Self {
            start,
            end,
            duration_ms,
        })
    }

    fn frame_count(&self) -> usize {
        ((self.end - self.start).abs() / COUNT_INCREMENT - 1e-9).ceil().max(1.0) as usize
    }

    /// Delay between frames so the whole roll takes about `duration_ms`.
    pub fn interval_ms(&self) -> u32 {
        let frames = self.frame_count() as f64;
        (f64::from(self.duration_ms) / frames).floor().max(1.0) as u32
    }

    /// Values to display, one per tick; the last is exactly `end`.
    pub fn frames(&self) -> Vec<f64> {
        let n = self.frame_count();
        let increment = if self.end > self.start {
            COUNT_INCREMENT
        } else {
            -COUNT_INCREMENT
        };
        let mut frames: Vec<f64> = (1..n)
            .map(|i| self.start + increment * i as f64)
            .collect();
        frames.push(self.end);
        frames
    }

    /// Frames tagged with whether they finish the roll, so the driver can
    /// stop its timer on the last one.
    pub fn ticks(&self) -> impl Iterator<Item = Tick> {
        let frames = self.frames();
        let last = frames.len() - 1;
        frames
            .into_iter()
            .enumerate()
            .map(move |(i, value)| Tick {
                value,
                done: i == last,
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    pub value: f64,
    pub done: bool,
}
