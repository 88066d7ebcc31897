//! Result grid shared by the admin and history pages

use leptos::prelude::*;
use momentum_core::{Grid, ResultView};

const TH: &str = "px-4 py-2 text-left text-xs font-medium text-gray-500 uppercase tracking-wider";
const TD: &str = "px-4 py-2 whitespace-nowrap text-sm text-gray-700";

#[component]
pub fn ResultTable(result: ResultView) -> impl IntoView {
    match result {
        ResultView::Grid(grid) => view! { <GridTable grid=grid /> }.into_any(),
        ResultView::NoData => view! {
            <div class="text-center py-8 bg-white rounded-lg shadow text-gray-500">
                {momentum_core::NO_DATA}
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn GridTable(grid: Grid) -> impl IntoView {
    view! {
        <div class="bg-white rounded-lg shadow overflow-x-auto">
            <table class="result-grid min-w-full divide-y divide-gray-200">
                <thead class="bg-gray-50">
                    <tr>
                        {grid.columns.into_iter().map(|column| view! { <th class=TH>{column}</th> }).collect_view()}
                    </tr>
                </thead>
                <tbody class="bg-white divide-y divide-gray-200">
                    {grid.rows.into_iter().map(|row| view! {
                        <tr class="hover:bg-gray-50">
                            {row.into_iter().map(|cell| view! { <td class=TD>{cell}</td> }).collect_view()}
                        </tr>
                    }).collect_view()}
                </tbody>
            </table>
        </div>
    }
}
