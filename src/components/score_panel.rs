use leptos::prelude::*;

use crate::engine::score::ScoreSummary;

#[component]
pub fn ScorePanel(#[prop(into)] summary: Signal<ScoreSummary>) -> impl IntoView {
    view! {
        <div class="score-panel">
            <div class="score-block">
                <span class="score-label">"Baseline"</span>
                <span class="score-value" id="baseline-disp">
                    {move || summary.with(|s| s.baseline_text())}
                </span>
            </div>
            <div class="score-block score-final">
                <span class="score-label">"Projected Happiness"</span>
                <span class="score-value" id="final-score">
                    {move || summary.with(|s| s.total_text())}
                </span>
                <span class=move || summary.with(|s| s.tone().diff_class())>
                    {move || summary.with(|s| s.added_text())}
                </span>
            </div>
            <div class="score-block">
                <span class="score-label">"Active Improvements"</span>
                <span class="score-value" id="active-count">
                    {move || summary.with(|s| s.active_count)}
                </span>
            </div>
        </div>
    }
}
