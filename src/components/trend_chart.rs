use leptos::prelude::*;

use crate::engine::sweep::{LegendEntry, TrendView, DEFAULT_POINT_COLOR};

const WIDTH: f64 = 640.0;
const HEIGHT: f64 = 260.0;
const PAD: f64 = 36.0;

/// Screen coordinates for each point; y grows downward from a zero baseline.
fn layout(view: &TrendView) -> Vec<(f64, f64)> {
    let n = view.points.len();
    let y_max = view.y_max();
    let plot_w = WIDTH - 2.0 * PAD;
    let plot_h = HEIGHT - 2.0 * PAD;
    view.points
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let x = if n > 1 {
                PAD + plot_w * i as f64 / (n - 1) as f64
            } else {
                WIDTH / 2.0
            };
            let y = HEIGHT - PAD - (p.gain_percent.max(0.0) / y_max) * plot_h;
            (x, y)
        })
        .collect()
}

fn line_path(coords: &[(f64, f64)]) -> String {
    coords
        .iter()
        .enumerate()
        .map(|(i, (x, y))| format!("{}{:.1},{:.1}", if i == 0 { "M" } else { " L" }, x, y))
        .collect()
}

/// Area under the line, closed against the x axis.
fn area_path(coords: &[(f64, f64)]) -> String {
    match (coords.first(), coords.last()) {
        (Some(first), Some(last)) => format!(
            "{} L{:.1},{:.1} L{:.1},{:.1} Z",
            line_path(coords),
            last.0,
            HEIGHT - PAD,
            first.0,
            HEIGHT - PAD
        ),
        _ => String::new(),
    }
}

/// Line chart of best gain per delta, markers colored by winning feature.
#[component]
pub fn TrendChart(
    #[prop(into)] trend: Signal<TrendView>,
    presets: Vec<u32>,
    #[prop(into)] active_step: Signal<u32>,
    #[prop(into)] on_step: Callback<u32>,
) -> impl IntoView {
    let step_buttons = presets
        .into_iter()
        .map(|n| {
            view! {
                <button
                    class="step-btn"
                    class:active=move || active_step.get() == n
                    on:click=move |_| on_step.run(n)
                >
                    {format!("{}%", n)}
                </button>
            }
        })
        .collect::<Vec<_>>();

    view! {
        <div class="trend-panel">
            <div class="trend-header">
                <h3>"Best Strategy by Investment Level"</h3>
                <div class="step-buttons">{step_buttons}</div>
            </div>

            {move || {
                let view_data = trend.get();
                if view_data.is_empty() {
                    return view! {
                        <div class="trend-empty">"No positive gains at any investment level."</div>
                    }
                    .into_any();
                }

                let coords = layout(&view_data);
                let y_max = view_data.y_max();
                let markers = view_data
                    .points
                    .iter()
                    .zip(coords.iter())
                    .map(|(p, (x, y))| {
                        view! {
                            <circle cx=format!("{:.1}", x) cy=format!("{:.1}", y) r="6" fill=p.color>
                                <title>{p.tooltip()}</title>
                            </circle>
                            <text
                                class="trend-x-label"
                                x=format!("{:.1}", x)
                                y=format!("{:.1}", HEIGHT - PAD / 3.0)
                                text-anchor="middle"
                            >
                                {p.label.clone()}
                            </text>
                        }
                    })
                    .collect::<Vec<_>>();

                view! {
                    <svg class="trend-svg" viewBox=format!("0 0 {} {}", WIDTH, HEIGHT)>
                        <line
                            class="trend-axis"
                            x1=PAD.to_string()
                            y1=(HEIGHT - PAD).to_string()
                            x2=(WIDTH - PAD).to_string()
                            y2=(HEIGHT - PAD).to_string()
                        />
                        <text class="trend-y-label" x="4" y=(PAD + 4.0).to_string()>
                            {format!("{:.2}%", y_max)}
                        </text>
                        <text class="trend-y-label" x="4" y=(HEIGHT - PAD).to_string()>"0%"</text>
                        <path class="trend-area" d=area_path(&coords) fill="rgba(243, 244, 246, 0.5)" />
                        <path
                            class="trend-line"
                            d=line_path(&coords)
                            fill="none"
                            stroke=DEFAULT_POINT_COLOR
                            stroke-width="2"
                        />
                        {markers}
                    </svg>
                }
                .into_any()
            }}

            <TrendLegend entries=Signal::derive(move || trend.with(|t| t.legend.clone())) />
        </div>
    }
}

#[component]
pub fn TrendLegend(#[prop(into)] entries: Signal<Vec<LegendEntry>>) -> impl IntoView {
    view! {
        <div class="custom-legend">
            <For
                each=move || entries.get()
                key=|e| e.feature.clone()
                children=|e| {
                    view! {
                        <div class="legend-item">
                            <div class="legend-dot" style=format!("background: {}", e.color)></div>
                            <span>{e.feature}</span>
                        </div>
                    }
                }
            />
        </div>
    }
}
