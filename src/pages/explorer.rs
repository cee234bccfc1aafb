use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::api;
use crate::components::delta_control::DeltaControl;
use crate::components::feature_card::FeatureGrid;
use crate::components::marginal_table::MarginalTable;
use crate::components::school_search::SchoolSearch;
use crate::components::score_panel::ScorePanel;
use crate::components::trend_chart::TrendChart;
use crate::config::DashboardConfig;
use crate::engine::autocomplete::Autocomplete;
use crate::engine::session::{Effect as SessionEffect, LoadStatus, Msg, SessionState};

/// Runs session effects: fetches go out through `spawn_local`, refresh
/// timers are real `Timeout`s. Only one timer is held; storing a new one
/// drops, and thereby cancels, the previous.
#[derive(Clone, Copy)]
struct Driver {
    session: RwSignal<SessionState>,
    timer: StoredValue<Option<Timeout>, LocalStorage>,
    config: StoredValue<DashboardConfig>,
}

impl Driver {
    fn dispatch(self, msg: Msg) {
        match self.session.try_update(|s| s.update(msg)) {
            Some(Ok(effect)) => self.perform(effect),
            Some(Err(e)) => log::warn!("Profile refresh failed: {}", e),
            None => {}
        }
    }

    fn perform(self, effect: SessionEffect) {
        match effect {
            SessionEffect::None => {}
            SessionEffect::Fetch(req) => {
                let config = self.config.get_value();
                spawn_local(async move {
                    let result = api::fetch_profile(&config, &req.entity, req.delta).await;
                    self.dispatch(Msg::ProfileLoaded {
                        request: req.id,
                        result,
                    });
                });
            }
            SessionEffect::ScheduleRefresh(ticket) => {
                let delay = (ticket.due_at_ms - js_sys::Date::now()).max(0.0) as u32;
                let timeout = Timeout::new(delay, move || {
                    self.dispatch(Msg::DebounceElapsed(ticket));
                });
                self.timer.set_value(Some(timeout));
            }
        }
    }
}

#[component]
pub fn ExplorerPage() -> impl IntoView {
    let config = use_context::<DashboardConfig>().unwrap_or_default();
    let presets = config.step_presets.clone();
    let suggestion_limit = config.suggestion_limit;
    let default_entity = config.default_entity.clone();

    let session = RwSignal::new(SessionState::new(&config));
    let autocomplete = RwSignal::new(Autocomplete::new(vec![], suggestion_limit));
    let (startup_error, set_startup_error) = signal::<Option<String>>(None);

    let driver = Driver {
        session,
        timer: StoredValue::new_local(None),
        config: StoredValue::new(config),
    };

    on_cleanup(move || driver.timer.set_value(None));

    // Load the school list, then the default school
    Effect::new(move |_| {
        let config = driver.config.get_value();
        let default_entity = default_entity.clone();
        spawn_local(async move {
            match api::fetch_metadata(&config).await {
                Ok(meta) => {
                    log::info!("Loaded {} schools", meta.schools.len());
                    autocomplete.set(Autocomplete::new(meta.schools, suggestion_limit));
                    autocomplete.update(|ac| {
                        ac.select(&default_entity);
                    });
                    driver.dispatch(Msg::SelectEntity(default_entity));
                }
                Err(e) => {
                    log::warn!("Failed to load school list: {}", e);
                    set_startup_error.set(Some(format!("Could not load schools: {}", e)));
                }
            }
        });
    });

    let on_select = move |name: String| driver.dispatch(Msg::SelectEntity(name));
    let on_edit = move |value: f64| {
        driver.dispatch(Msg::EditDelta {
            value,
            now_ms: js_sys::Date::now(),
        })
    };
    let on_toggle = move |name: String| driver.dispatch(Msg::ToggleFeature(name));
    let on_step = move |n: u32| driver.dispatch(Msg::SetStep(n));

    let (delta_min, delta_max) = session.with_untracked(|s| s.delta_bounds());
    let loading = Signal::derive(move || session.with(|s| s.is_loading()));
    let fetch_error = move || {
        session.with(|s| match s.status() {
            LoadStatus::Failed(e) => Some(e.clone()),
            _ => None,
        })
    };

    view! {
        <div class="page explorer-page">
            <style>{include_str!("explorer.css")}</style>

            <div class="explorer-header">
                <h2 id="school-title">
                    {move || session.with(|s| s.entity().unwrap_or("Select a school").to_string())}
                </h2>
                <SchoolSearch autocomplete=autocomplete on_select=on_select />
            </div>

            {move || startup_error.get().map(|e| view! { <div class="error-banner">{e}</div> })}
            {move || {
                fetch_error()
                    .map(|e| {
                        view! {
                            <div class="error-banner">
                                {format!("Refresh failed, showing previous results: {}", e)}
                            </div>
                        }
                    })
            }}

            <div class="explorer-controls">
                <DeltaControl
                    value=Signal::derive(move || session.with(|s| s.delta_percent()))
                    min=delta_min
                    max=delta_max
                    on_edit=on_edit
                />
                <ScorePanel summary=Signal::derive(move || session.with(|s| s.summary()))/>
            </div>

            <FeatureGrid
                cards=Signal::derive(move || session.with(|s| s.cards()))
                loading=loading
                on_toggle=on_toggle
            />

            <TrendChart
                trend=Signal::derive(move || session.with(|s| s.trend()))
                presets=presets
                active_step=Signal::derive(move || session.with(|s| s.active_step().get()))
                on_step=on_step
            />

            <MarginalTable table=Signal::derive(move || session.with(|s| s.marginal_table())) />
        </div>
    }
}
