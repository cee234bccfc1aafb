use leptos::prelude::*;

use crate::engine::marginal::Strategy;

#[component]
pub fn StrategyBadge(strategy: Strategy) -> impl IntoView {
    view! { <span class=strategy.badge_class()>{strategy.label()}</span> }
}
