use gloo_timers::callback::Interval;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::engine::ranking::{gauge_segments, CountUp, SCORE_CEILING};

const RADIUS: f64 = 52.0;
const ROLL_MS: u32 = 1000;

/// Doughnut of the average score out of 5 with a rolling number in the middle.
#[component]
pub fn ScoreGauge(#[prop(into)] average: Signal<f64>) -> impl IntoView {
    let (shown, set_shown) = signal(0.0_f64);
    // Running roll, tagged so a finished roll only clears itself
    let ticker = StoredValue::new_local(None::<(u64, Interval)>);
    let rolls = StoredValue::new(0_u64);

    Effect::new(move |_| {
        let target = average.get();
        let Some(roll) = CountUp::new(shown.get_untracked(), target, ROLL_MS) else {
            return;
        };
        rolls.update_value(|n| *n += 1);
        let roll_id = rolls.get_value();
        let mut ticks = roll.ticks();
        let interval = Interval::new(roll.interval_ms(), move || {
            let Some(tick) = ticks.next() else {
                return;
            };
            set_shown.set(tick.value);
            if tick.done {
                // Dropped after this callback returns, not from inside it
                spawn_local(async move {
                    ticker.update_value(|slot| {
                        if slot.as_ref().is_some_and(|(id, _)| *id == roll_id) {
                            *slot = None;
                        }
                    });
                });
            }
        });
        // Dropping the previous handle cancels its roll
        ticker.set_value(Some((roll_id, interval)));
    });

    on_cleanup(move || ticker.set_value(None));

    let circumference = 2.0 * std::f64::consts::PI * RADIUS;

    view! {
        <div class="score-gauge">
            <svg viewBox="0 0 140 140" class="gauge-svg">
                <circle cx="70" cy="70" r=RADIUS.to_string() fill="none" stroke="#F3F4F6" stroke-width="14" />
                <circle
                    cx="70"
                    cy="70"
                    r=RADIUS.to_string()
                    fill="none"
                    stroke="#F59E0B"
                    stroke-width="14"
                    transform="rotate(-90 70 70)"
                    stroke-dasharray=move || {
                        let [filled, _gap] = gauge_segments(average.get().clamp(0.0, SCORE_CEILING));
                        let arc = circumference * filled / SCORE_CEILING;
                        format!("{:.2} {:.2}", arc, circumference - arc)
                    }
                />
            </svg>
            <span class="gauge-value" id="pie-score">{move || format!("{:.2}", shown.get())}</span>
        </div>
    }
}
