use leptos::prelude::*;

use crate::engine::ranking::BarSeries;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// Bar chart that re-renders in place when `series` changes.
#[component]
pub fn BarChart(
    #[prop(into)] series: Signal<BarSeries>,
    orientation: Orientation,
    color: &'static str,
    /// Decimal places on the value readout.
    #[prop(default = 2)]
    precision: usize,
) -> impl IntoView {
    let class = match orientation {
        Orientation::Horizontal => "bar-chart bar-chart-horizontal",
        Orientation::Vertical => "bar-chart bar-chart-vertical",
    };

    view! {
        <div class=class>
            {move || {
                let s = series.get();
                if s.bars.is_empty() {
                    return view! { <div class="chart-empty">"No data"</div> }.into_any();
                }
                s.bars
                    .iter()
                    .map(|bar| {
                        let pct = s.fraction(bar.value);
                        let size = match orientation {
                            Orientation::Horizontal => format!("width: {:.1}%; background: {}", pct, color),
                            Orientation::Vertical => format!("height: {:.1}%; background: {}", pct, color),
                        };
                        view! {
                            <div class="bar-row" title=bar.full_label.clone()>
                                <span class="bar-label">{bar.label.clone()}</span>
                                <div class="bar-track">
                                    <div class="bar-fill" style=size></div>
                                </div>
                                <span class="bar-value">{format!("{:.*}", precision, bar.value)}</span>
                            </div>
                        }
                    })
                    .collect::<Vec<_>>()
                    .into_any()
            }}
        </div>
    }
}
