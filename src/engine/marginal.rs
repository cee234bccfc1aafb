use crate::api::MarginalRow;

pub const NO_GAINS_PLACEHOLDER: &str = "No significant gains found.";

/// How soon a feature's biggest marginal jump arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    QuickWin,
    Strategic,
    LongTerm,
}

impl Strategy {
    /// Both thresholds are inclusive: 10 is a quick win, 35 is long term.
    pub fn classify(optimal_delta: f64) -> Self {
        if optimal_delta <= 10.0 {
            Strategy::QuickWin
        } else if optimal_delta >= 35.0 {
            Strategy::LongTerm
        } else {
            Strategy::Strategic
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Strategy::QuickWin => "Quick Win",
            Strategy::Strategic => "Strategic",
            Strategy::LongTerm => "Long Term",
        }
    }

    pub fn badge_class(self) -> &'static str {
        match self {
            Strategy::QuickWin => "badge badge-success",
            Strategy::Strategic => "badge badge-primary",
            Strategy::LongTerm => "badge badge-warning",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarginalLine {
    pub feature: String,
    pub optimal_delta: String,
    pub jump: String,
    pub strategy: Strategy,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MarginalTable {
    /// Nothing worth showing; render a single explanatory row.
    Placeholder,
    Rows(Vec<MarginalLine>),
}

impl MarginalTable {
    pub fn build(rows: &[MarginalRow]) -> Self {
        if rows.is_empty() {
            return MarginalTable::Placeholder;
        }
        MarginalTable::Rows(
            rows.iter()
                .map(|r| MarginalLine {
                    feature: r.feature.clone(),
                    optimal_delta: format!("{:.2}%", r.optimal_delta),
                    jump: format!("+{:.3}%", r.jump_size),
                    strategy: Strategy::classify(r.optimal_delta),
                })
                .collect(),
        )
    }
}
