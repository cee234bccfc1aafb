use leptos::prelude::*;

use crate::components::status_badge::StrategyBadge;
use crate::engine::marginal::{MarginalTable as TableData, NO_GAINS_PLACEHOLDER};

#[component]
pub fn MarginalTable(#[prop(into)] table: Signal<TableData>) -> impl IntoView {
    view! {
        <div class="marginal-panel">
            <h3>"Where Each Dollar Counts Most"</h3>
            <table class="marginal-table">
                <thead>
                    <tr>
                        <th>"Feature"</th>
                        <th>"Optimal Delta"</th>
                        <th>"Biggest Jump"</th>
                        <th>"Strategy"</th>
                    </tr>
                </thead>
                <tbody>
                    {move || match table.get() {
                        TableData::Placeholder => view! {
                            <tr>
                                <td colspan="4" class="marginal-empty">{NO_GAINS_PLACEHOLDER}</td>
                            </tr>
                        }
                        .into_any(),
                        TableData::Rows(lines) => lines
                            .into_iter()
                            .map(|line| {
                                view! {
                                    <tr>
                                        <td class="fw-bold feature-name">{line.feature}</td>
                                        <td>{line.optimal_delta}</td>
                                        <td class="jump-cell">{line.jump}</td>
                                        <td><StrategyBadge strategy=line.strategy /></td>
                                    </tr>
                                }
                            })
                            .collect::<Vec<_>>()
                            .into_any(),
                    }}
                </tbody>
            </table>
        </div>
    }
}
