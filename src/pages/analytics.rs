use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::api::{self, Ranking};
use crate::components::bar_chart::{BarChart, Orientation};
use crate::components::score_gauge::ScoreGauge;
use crate::config::DashboardConfig;
use crate::engine::ranking::{BarSeries, RegionFilter, ALL_REGIONS, FEATURE_OPTIONS};

#[component]
pub fn AnalyticsPage() -> impl IntoView {
    let config = StoredValue::new(use_context::<DashboardConfig>().unwrap_or_default());

    let (states, set_states) = signal::<Vec<String>>(vec![]);
    let (region, set_region) = signal(RegionFilter::All);
    let (feature, set_feature) = signal(FEATURE_OPTIONS[0].to_string());
    let (ranking, set_ranking) = signal(Ranking::default());
    let (is_loading, set_is_loading) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);
    // Id of the newest rank request; older answers are dropped
    let latest = StoredValue::new(0_u64);

    // Load region list on mount
    Effect::new(move |_| {
        let config = config.get_value();
        spawn_local(async move {
            match api::list_states(&config).await {
                Ok(mut list) => {
                    list.sort();
                    set_states.set(list);
                }
                Err(e) => log::warn!("Failed to load states: {}", e),
            }
        });
    });

    // Refetch whenever the region or feature changes
    Effect::new(move |_| {
        let region = region.get();
        let feature = feature.get();
        let config = config.get_value();

        latest.update_value(|id| *id += 1);
        let id = latest.get_value();
        set_is_loading.set(true);

        spawn_local(async move {
            let result = api::fetch_ranking(&config, region.request_value(), &feature).await;
            if latest.get_value() != id {
                log::debug!("Discarding stale ranking #{}", id);
                return;
            }
            match result {
                Ok(r) => {
                    set_ranking.set(r);
                    set_error.set(None);
                }
                Err(e) => {
                    log::warn!("Ranking fetch failed: {}", e);
                    set_error.set(Some(format!("Could not load rankings: {}", e)));
                }
            }
            set_is_loading.set(false);
        });
    });

    let schools = Signal::derive(move || ranking.with(BarSeries::top_schools));
    let top_states = Signal::derive(move || ranking.with(BarSeries::top_states));
    let distribution = Signal::derive(move || ranking.with(BarSeries::distribution));
    let average = Signal::derive(move || ranking.with(|r| r.average_score));

    view! {
        <div class="page analytics-page">
            <style>{include_str!("analytics.css")}</style>

            <h2>"Top Schools in " <span id="state-title">{move || region.get().title()}</span></h2>
            <p class="page-description">
                "Ranked by " <span id="lead-feat">{move || feature.get()}</span>
                ", weighted 85% rating and 15% review volume."
            </p>

            <div class="analytics-filters">
                <div class="form-group">
                    <label>"Region"</label>
                    <select
                        class="input"
                        on:change=move |ev| set_region.set(RegionFilter::from_select(&event_target_value(&ev)))
                    >
                        <option value=ALL_REGIONS selected=true>"All States"</option>
                        <For
                            each=move || states.get()
                            key=|s| s.clone()
                            children=|s| {
                                let label = s.clone();
                                view! { <option value=s>{label}</option> }
                            }
                        />
                    </select>
                </div>
                <div class="form-group">
                    <label>"Feature"</label>
                    <select class="input" on:change=move |ev| set_feature.set(event_target_value(&ev))>
                        {FEATURE_OPTIONS
                            .iter()
                            .map(|f| view! { <option value=*f>{*f}</option> })
                            .collect::<Vec<_>>()}
                    </select>
                </div>
                <Show when=move || is_loading.get()>
                    <span class="mini-spinner"></span>
                </Show>
            </div>

            {move || error.get().map(|e| view! { <div class="error-banner">{e}</div> })}

            <div class="analytics-grid">
                <div class="chart-card chart-wide">
                    <h3>"Top 10 Schools by " {move || feature.get()}</h3>
                    <BarChart series=schools orientation=Orientation::Horizontal color="#4F46E5" />
                </div>

                <div class="chart-card">
                    <h3>"Top States by " <span id="state-feat">{move || feature.get()}</span></h3>
                    <BarChart series=top_states orientation=Orientation::Vertical color="#10B981" />
                </div>

                <div class="chart-card">
                    <h3>
                        "Score Distribution " <span id="dist-state">{move || region.get().in_phrase()}</span>
                    </h3>
                    <BarChart
                        series=distribution
                        orientation=Orientation::Vertical
                        color="#8B5CF6"
                        precision=0
                    />
                    <p class="chart-axis-title">
                        <span id="dist-feat">{move || feature.get()}</span> " Range"
                    </p>
                </div>

                <div class="chart-card">
                    <h3>
                        "Average " <span id="avg-feat">{move || feature.get()}</span> " "
                        <span id="pie-state">{move || region.get().for_phrase()}</span>
                    </h3>
                    <ScoreGauge average=average />
                </div>
            </div>
        </div>
    }
}
