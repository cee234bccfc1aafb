pub mod bar_chart;
pub mod delta_control;
pub mod feature_card;
pub mod marginal_table;
pub mod school_search;
pub mod score_gauge;
pub mod score_panel;
pub mod sidebar;
pub mod status_badge;
pub mod trend_chart;
