use std::collections::BTreeSet;

use crate::api::FeatureGain;

/// Sign class used by the score diff and per-card gain text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Positive,
    Negative,
    Neutral,
}

impl Tone {
    pub fn of(value: f64) -> Self {
        if value > 0.0 {
            Tone::Positive
        } else if value < 0.0 {
            Tone::Negative
        } else {
            Tone::Neutral
        }
    }

    pub fn diff_class(self) -> &'static str {
        match self {
            Tone::Positive => "score-diff diff-positive",
            Tone::Negative => "score-diff diff-negative",
            Tone::Neutral => "score-diff diff-neutral",
        }
    }

    pub fn gain_class(self) -> &'static str {
        match self {
            Tone::Positive => "card-gain positive-gain",
            Tone::Negative => "card-gain negative-gain",
            Tone::Neutral => "card-gain zero-gain",
        }
    }
}

/// Baseline plus the gains of every selected feature that the profile knows about.
pub fn total_score(baseline: f64, rankings: &[FeatureGain], selection: &BTreeSet<String>) -> f64 {
    baseline + added_points(rankings, selection)
}

pub fn added_points(rankings: &[FeatureGain], selection: &BTreeSet<String>) -> f64 {
    rankings
        .iter()
        .filter(|r| selection.contains(&r.feature))
        .map(|r| r.gain_percent)
        .sum()
}

/// `+x.xx%` for positive, natural sign for negative, `+0.00%` for zero.
pub fn format_added(added: f64) -> String {
    match Tone::of(added) {
        Tone::Positive => format!("+{:.2}%", added),
        Tone::Negative => format!("{:.2}%", added),
        Tone::Neutral => "+0.00%".to_string(),
    }
}

pub fn format_gain(gain: f64) -> String {
    if gain > 0.0 {
        format!("+{:.2}%", gain)
    } else {
        format!("{:.2}%", gain)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreSummary {
    pub baseline: f64,
    pub total: f64,
    pub added: f64,
    pub active_count: usize,
}

impl ScoreSummary {
    pub fn compute(baseline: f64, rankings: &[FeatureGain], selection: &BTreeSet<String>) -> Self {
        let added = added_points(rankings, selection);
        Self {
            baseline,
            total: baseline + added,
            added,
            active_count: selection.len(),
        }
    }

    pub fn baseline_text(&self) -> String {
        format!("{:.2}%", self.baseline)
    }

    pub fn total_text(&self) -> String {
        format!("{:.2}%", self.total)
    }

    pub fn added_text(&self) -> String {
        format_added(self.added)
    }

    pub fn tone(&self) -> Tone {
        Tone::of(self.added)
    }
}

/// Everything a feature card needs to draw itself.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureCard {
    pub feature: String,
    pub gain_text: String,
    pub tone: Tone,
    /// Current level, rounded to a whole percent.
    pub current_badge: String,
    /// Bar width in percent of the card.
    pub bar_width: f64,
    pub selected: bool,
    /// Selected and losing happiness.
    pub negative_selection: bool,
    pub negative_bar: bool,
}

impl FeatureCard {
    pub fn class(&self) -> &'static str {
        match (self.selected, self.negative_selection) {
            (true, true) => "feature-card selected negative-selection",
            (true, false) => "feature-card selected",
            _ => "feature-card",
        }
    }
}

/// Cards in backend order, bars scaled against the largest gain magnitude.
pub fn feature_cards(rankings: &[FeatureGain], selection: &BTreeSet<String>) -> Vec<FeatureCard> {
    let max_magnitude = rankings
        .iter()
        .map(|r| r.gain_percent.abs())
        .fold(0.0_f64, f64::max)
        .max(1.0);

    rankings
        .iter()
        .map(|r| {
            let selected = selection.contains(&r.feature);
            let negative = r.gain_percent < 0.0;
            FeatureCard {
                feature: r.feature.clone(),
                gain_text: format_gain(r.gain_percent),
                tone: Tone::of(r.gain_percent),
                current_badge: format!("{}%", r.current_percent.round()),
                bar_width: r.gain_percent.abs() / max_magnitude * 100.0,
                selected,
                negative_selection: selected && negative,
                negative_bar: negative,
            }
        })
        .collect()
}
