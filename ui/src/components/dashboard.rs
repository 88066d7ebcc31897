use leptos::prelude::*;
use momentum_core::render::{format_local, format_seconds};
use momentum_core::row::{WodRow, WorkoutRow};
use wasm_bindgen_futures::spawn_local;

use crate::api;
use crate::refresh::use_history_refresh;

const RECENT: usize = 5;

#[component]
pub fn Dashboard() -> impl IntoView {
    let refresh = use_history_refresh();
    let (wod, set_wod) = signal::<Option<Result<WodRow, String>>>(None);
    let (fetching, set_fetching) = signal(false);

    let recent = LocalResource::new(move || {
        let _ = refresh.track();
        async move { api::logged_cardio().await }
    });

    let get_workout = move |_: leptos::ev::MouseEvent| {
        set_fetching.set(true);
        spawn_local(async move {
            let result = api::workout_of_the_day().await;
            if let Err(e) = &result {
                log::error!("Failed to fetch workout of the day: {}", e);
            }
            set_wod.set(Some(result));
            set_fetching.set(false);
        });
    };

    view! {
        <div class="p-6">
            <h2 class="text-2xl font-bold mb-6">"Dashboard"</h2>

            <div class="bg-white p-4 rounded-lg shadow mb-6 max-w-xl">
                <div class="flex justify-between items-center mb-2">
                    <h3 class="text-lg font-semibold text-gray-700">"Workout of the Day"</h3>
                    <button
                        class="bg-blue-500 hover:bg-blue-600 text-white px-4 py-2 rounded disabled:opacity-50"
                        disabled=move || fetching.get()
                        on:click=get_workout
                    >
                        "Get workout"
                    </button>
                </div>
                {move || match wod.get() {
                    Some(Ok(wod)) => view! { <WodCard wod=wod /> }.into_any(),
                    Some(Err(e)) => view! {
                        <p class="text-red-600 text-sm">{format!("Could not fetch a workout: {}", e)}</p>
                    }.into_any(),
                    None => view! {
                        <p class="text-gray-500 text-sm">"Press the button for today's suggestion."</p>
                    }.into_any(),
                }}
            </div>

            <h3 class="text-lg font-semibold text-gray-700 mb-2">"Recent Cardio"</h3>
            <Suspense fallback=move || view! { <div class="text-gray-500">"Loading..."</div> }>
                {move || match recent.get() {
                    Some(Ok(entries)) if entries.is_empty() => view! {
                        <div class="text-gray-500">"No cardio logged yet."</div>
                    }.into_any(),
                    Some(Ok(entries)) => view! { <RecentCardio entries=entries /> }.into_any(),
                    Some(Err(e)) => view! {
                        <div class="bg-red-50 border border-red-200 rounded-lg p-4 text-red-800">
                            {format!("Failed to load cardio log: {}", e)}
                        </div>
                    }.into_any(),
                    None => view! { <div class="text-gray-500">"Loading..."</div> }.into_any(),
                }}
            </Suspense>
        </div>
    }
}

#[component]
fn WodCard(wod: WodRow) -> impl IntoView {
    view! {
        <div class="grid grid-cols-3 gap-4 text-sm">
            <div>
                <span class="text-gray-500">"Type: "</span>
                <span class="font-semibold">{wod.kind}</span>
            </div>
            <div>
                <span class="text-gray-500">"Duration: "</span>
                <span class="font-mono">{format_seconds(wod.duration)}</span>
            </div>
            <div>
                <span class="text-gray-500">"Distance: "</span>
                <span class="font-mono">{wod.distance}</span>
            </div>
        </div>
    }
}

#[component]
fn RecentCardio(entries: Vec<WorkoutRow>) -> impl IntoView {
    let mut entries = entries;
    entries.sort_by(|a, b| b.date.cmp(&a.date));
    entries.truncate(RECENT);

    view! {
        <div class="bg-white rounded-lg shadow overflow-hidden max-w-xl">
            <table class="min-w-full divide-y divide-gray-200 text-sm">
                <tbody class="divide-y divide-gray-200">
                    {entries.into_iter().map(|entry| view! {
                        <tr>
                            <td class="px-4 py-2 text-gray-500">{format_local(&entry.date)}</td>
                            <td class="px-4 py-2 font-medium">{entry.kind}</td>
                            <td class="px-4 py-2 font-mono">{format_seconds(entry.duration)}</td>
                            <td class="px-4 py-2 font-mono">{entry.distance}</td>
                        </tr>
                    }).collect_view()}
                </tbody>
            </table>
        </div>
    }
}
