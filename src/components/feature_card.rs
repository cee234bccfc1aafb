use leptos::prelude::*;

use crate::engine::score::FeatureCard as CardData;

#[component]
pub fn FeatureCard(card: CardData, #[prop(into)] on_toggle: Callback<String>) -> impl IntoView {
    let feature = card.feature.clone();
    let bar_class = if card.negative_bar {
        "impact-bar-fill negative"
    } else {
        "impact-bar-fill"
    };

    view! {
        <div class=card.class() on:click=move |_| on_toggle.run(feature.clone())>
            <div class="card-header-row">
                <span class="card-title">{card.feature.clone()}</span>
                <span class="current-badge" title="Current Level">
                    {card.current_badge.clone()}
                </span>
            </div>
            <div class=card.tone.gain_class()>{format!("{} Happiness", card.gain_text)}</div>
            <div class="impact-bar-bg">
                <div class=bar_class style=format!("width: {}%", card.bar_width)></div>
            </div>
        </div>
    }
}

/// Grid of toggleable feature cards, dimmed while a fetch is outstanding.
#[component]
pub fn FeatureGrid(
    #[prop(into)] cards: Signal<Vec<CardData>>,
    #[prop(into)] loading: Signal<bool>,
    #[prop(into)] on_toggle: Callback<String>,
) -> impl IntoView {
    view! {
        <div
            class="cards-grid"
            style=move || if loading.get() { "opacity: 0.5" } else { "opacity: 1" }
        >
            {move || {
                let cards = cards.get();
                if cards.is_empty() {
                    view! { <p class="empty-state">"No improvable features for this school."</p> }
                        .into_any()
                } else {
                    cards
                        .into_iter()
                        .map(|card| view! { <FeatureCard card=card on_toggle=on_toggle /> })
                        .collect::<Vec<_>>()
                        .into_any()
                }
            }}
        </div>
    }
}
