use std::num::NonZeroU32;

use crate::api::SweepPoint;

pub const DEFAULT_POINT_COLOR: &str = "#9CA3AF";

/// Fixed marker color per improvable feature.
pub fn feature_color(feature: &str) -> &'static str {
    match feature {
        "facilities" => "#4F46E5",
        "location" => "#10B981",
        "opportunities" => "#F59E0B",
        "clubs" => "#EF4444",
        "social" => "#8B5CF6",
        "safety" => "#EC4899",
        "food" => "#06B6D4",
        "internet" => "#6366F1",
        _ => DEFAULT_POINT_COLOR,
    }
}

/// Format a number the way the chart axis shows it: `5` not `5.0`, `7.5` stays `7.5`.
pub fn format_delta(value: f64) -> String {
    if value.fract() == 0.0 && value.is_finite() {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// Keep points whose rounded delta is a multiple of `step`, in original order.
pub fn resample(sweep: &[SweepPoint], step: NonZeroU32) -> Vec<SweepPoint> {
    let step = i64::from(step.get());
    sweep
        .iter()
        .filter(|p| (p.delta.round() as i64).rem_euclid(step) == 0)
        .cloned()
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrendPoint {
    pub label: String,
    pub gain_percent: f64,
    pub best_feature: String,
    pub color: &'static str,
}

impl TrendPoint {
    pub fn tooltip(&self) -> String {
        format!("Best: {} (+{:.2}%)", self.best_feature, self.gain_percent)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub feature: String,
    pub color: &'static str,
}

/// Series for the trend chart plus its legend.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrendView {
    pub points: Vec<TrendPoint>,
    pub legend: Vec<LegendEntry>,
}

impl TrendView {
    pub fn build(filtered: &[SweepPoint]) -> Self {
        let points = filtered
            .iter()
            .map(|p| TrendPoint {
                label: format!("{}%", format_delta(p.delta)),
                gain_percent: p.gain_percent,
                best_feature: p.best_feature.clone(),
                color: feature_color(&p.best_feature),
            })
            .collect();
        Self {
            points,
            legend: legend(filtered),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Upper bound for the y axis; the axis always starts at zero.
    pub fn y_max(&self) -> f64 {
        let top = self
            .points
            .iter()
            .map(|p| p.gain_percent)
            .fold(0.0_f64, f64::max);
        if top > 0.0 {
            top
        } else {
            1.0
        }
    }
}

/// Distinct best features in first-seen order.
pub fn legend(filtered: &[SweepPoint]) -> Vec<LegendEntry> {
    let mut entries: Vec<LegendEntry> = Vec::new();
    for p in filtered {
        if !entries.iter().any(|e| e.feature == p.best_feature) {
            entries.push(LegendEntry {
                feature: p.best_feature.clone(),
                color: feature_color(&p.best_feature),
            });
        }
    }
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(delta: f64, gain_percent: f64, best_feature: &str) -> SweepPoint {
        SweepPoint {
            delta,
            gain_percent,
            best_feature: best_feature.to_string(),
        }
    }

    fn step(n: u32) -> NonZeroU32 {
        NonZeroU32::new(n).unwrap()
    }

    fn sweep() -> Vec<SweepPoint> {
        vec![
            point(5.0, 0.5, "food"),
            point(10.0, 1.0, "food"),
            point(15.0, 1.4, "safety"),
            point(20.0, 1.9, "safety"),
        ]
    }

    #[test]
    fn test_step_ten_keeps_multiples_in_order() {
        let deltas: Vec<f64> = resample(&sweep(), step(10)).iter().map(|p| p.delta).collect();
        assert_eq!(deltas, vec![10.0, 20.0]);
    }

    #[test]
    fn test_step_one_is_identity() {
        assert_eq!(resample(&sweep(), step(1)), sweep());
    }

    #[test]
    fn test_near_integer_deltas_are_rounded_first() {
        let noisy = vec![point(4.9999999, 0.5, "food"), point(10.0000001, 1.0, "food")];
        assert_eq!(resample(&noisy, step(5)).len(), 2);
    }

    #[test]
    fn test_resample_is_subset_for_every_step() {
        let full: Vec<SweepPoint> = (0..=50).map(|d| point(d as f64, d as f64 / 10.0, "clubs")).collect();
        for n in 1..=50 {
            let filtered = resample(&full, step(n));
            assert!(filtered.iter().all(|p| full.contains(p)));
            assert_eq!(filtered, resample(&full, step(n)), "resample must be deterministic");
        }
    }

    #[test]
    fn test_legend_is_first_seen_unique() {
        let data = vec![
            point(0.0, 0.1, "food"),
            point(5.0, 0.4, "safety"),
            point(10.0, 0.9, "food"),
            point(15.0, 1.2, "mystery"),
        ];
        let legend = legend(&data);
        let names: Vec<&str> = legend.iter().map(|e| e.feature.as_str()).collect();
        assert_eq!(names, vec!["food", "safety", "mystery"]);
        assert_eq!(legend[0].color, "#06B6D4");
        assert_eq!(legend[2].color, DEFAULT_POINT_COLOR);
    }

    #[test]
    fn test_trend_labels_and_tooltip() {
        let view = TrendView::build(&[point(10.0, 1.234, "facilities"), point(12.5, 1.5, "food")]);
        assert_eq!(view.points[0].label, "10%");
        assert_eq!(view.points[1].label, "12.5%");
        assert_eq!(view.points[0].color, "#4F46E5");
        assert_eq!(view.points[0].tooltip(), "Best: facilities (+1.23%)");
        assert_eq!(view.y_max(), 1.5);
    }

    #[test]
    fn test_empty_trend_view() {
        let view = TrendView::build(&[]);
        assert!(view.is_empty());
        assert!(view.legend.is_empty());
        assert_eq!(view.y_max(), 1.0);
    }
}
