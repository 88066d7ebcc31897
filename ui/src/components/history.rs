//! Logged cardio and weights sessions, plus the last session of each
//! weights workout type

use leptos::prelude::*;
use momentum_core::client::WEIGHTS_TYPES;
use momentum_core::render::{format_local, format_seconds};
use momentum_core::row::{WeightsLogRow, WorkoutRow};

use crate::api;
use crate::refresh::use_history_refresh;

const TH: &str = "px-4 py-2 text-left text-xs font-medium text-gray-500 uppercase tracking-wider";
const TD: &str = "px-4 py-2 whitespace-nowrap text-sm text-gray-700";

#[component]
pub fn History() -> impl IntoView {
    let refresh = use_history_refresh();

    let cardio = LocalResource::new(move || {
        let _ = refresh.track();
        async move { api::logged_cardio().await }
    });
    let weights = LocalResource::new(move || {
        let _ = refresh.track();
        async move { api::logged_weights().await }
    });

    view! {
        <div class="p-6 space-y-8">
            <h2 class="text-2xl font-bold">"History"</h2>

            <section>
                <h3 class="text-lg font-semibold text-gray-700 mb-2">"Cardio Workouts"</h3>
                <Suspense fallback=move || view! { <div class="text-gray-500">"Loading..."</div> }>
                    {move || match cardio.get() {
                        Some(Ok(entries)) => view! { <CardioTable entries=entries /> }.into_any(),
                        Some(Err(e)) => load_error("cardio workouts", e),
                        None => view! { <div class="text-gray-500">"Loading..."</div> }.into_any(),
                    }}
                </Suspense>
            </section>

            <section>
                <h3 class="text-lg font-semibold text-gray-700 mb-2">"Weights Workouts"</h3>
                <Suspense fallback=move || view! { <div class="text-gray-500">"Loading..."</div> }>
                    {move || match weights.get() {
                        Some(Ok(entries)) => view! { <WeightsTable entries=entries /> }.into_any(),
                        Some(Err(e)) => load_error("weights workouts", e),
                        None => view! { <div class="text-gray-500">"Loading..."</div> }.into_any(),
                    }}
                </Suspense>
            </section>

            <section class="grid grid-cols-1 xl:grid-cols-3 gap-6">
                {WEIGHTS_TYPES.iter().map(|t| view! { <LastWorkout workout_type=*t /> }).collect_view()}
            </section>
        </div>
    }
}

fn load_error(what: &str, error: String) -> AnyView {
    log::error!("Error fetching logged {}: {}", what, error);
    view! {
        <div class="bg-red-50 border border-red-200 rounded-lg p-4 text-red-800">
            {format!("Failed to load {}: {}", what, error)}
        </div>
    }
    .into_any()
}

#[component]
fn CardioTable(entries: Vec<WorkoutRow>) -> impl IntoView {
    view! {
        <div class="bg-white rounded-lg shadow overflow-x-auto">
            <table class="min-w-full divide-y divide-gray-200">
                <thead class="bg-gray-50">
                    <tr>
                        <th class=TH>"Type"</th>
                        <th class=TH>"Duration"</th>
                        <th class=TH>"Distance"</th>
                        <th class=TH>"Date"</th>
                    </tr>
                </thead>
                <tbody class="divide-y divide-gray-200">
                    {entries.into_iter().map(|w| view! {
                        <tr>
                            <td class=TD>{w.kind}</td>
                            <td class=TD>{format_seconds(w.duration)}</td>
                            <td class=TD>{w.distance}</td>
                            <td class=TD>{format_local(&w.date)}</td>
                        </tr>
                    }).collect_view()}
                </tbody>
            </table>
        </div>
    }
}

#[component]
fn WeightsTable(entries: Vec<WeightsLogRow>) -> impl IntoView {
    view! {
        <div class="bg-white rounded-lg shadow overflow-x-auto">
            <table class="min-w-full divide-y divide-gray-200">
                <thead class="bg-gray-50">
                    <tr>
                        <th class=TH>"Workout Type"</th>
                        <th class=TH>"Date"</th>
                    </tr>
                </thead>
                <tbody class="divide-y divide-gray-200">
                    {entries.into_iter().map(|w| view! {
                        <tr>
                            <td class=TD>{w.workout_type}</td>
                            <td class=TD>{format_local(&w.date)}</td>
                        </tr>
                    }).collect_view()}
                </tbody>
            </table>
        </div>
    }
}

/// Exercises of the most recent session of one workout type
#[component]
fn LastWorkout(workout_type: &'static str) -> impl IntoView {
    let refresh = use_history_refresh();
    let last = LocalResource::new(move || {
        let _ = refresh.track();
        async move { api::last_weights(workout_type).await }
    });

    let message_row = |text: &'static str| view! {
        <tr><td colspan="5" class="px-4 py-2 text-sm text-gray-500">{text}</td></tr>
    };

    view! {
        <div class="bg-white rounded-lg shadow overflow-x-auto">
            <h4 class="px-4 pt-3 font-semibold text-gray-700 capitalize">{format!("Last {} workout", workout_type)}</h4>
            <table class="min-w-full divide-y divide-gray-200">
                <thead class="bg-gray-50">
                    <tr>
                        <th class=TH>"Exercise"</th>
                        <th class=TH>"Set 1"</th>
                        <th class=TH>"Set 2"</th>
                        <th class=TH>"Set 3"</th>
                        <th class=TH>"Date"</th>
                    </tr>
                </thead>
                <tbody class="divide-y divide-gray-200">
                    <Suspense fallback=move || message_row("Loading...")>
                        {move || match last.get() {
                            Some(Ok(Some(log))) => {
                                let date = format_local(&log.date);
                                match log.exercises.filter(|list| !list.is_empty()) {
                                    Some(list) => list.into_iter().map(|e| view! {
                                        <tr>
                                            <td class=TD>{e.name}</td>
                                            <td class=TD>{e.set1}</td>
                                            <td class=TD>{e.set2}</td>
                                            <td class=TD>{e.set3}</td>
                                            <td class=TD>{date.clone()}</td>
                                        </tr>
                                    }).collect_view().into_any(),
                                    None => message_row("No exercises found").into_any(),
                                }
                            }
                            Some(Ok(None)) => message_row("No workout found").into_any(),
                            Some(Err(e)) => {
                                log::error!("Error fetching last logged {} workout: {}", workout_type, e);
                                message_row("Failed to load").into_any()
                            }
                            None => message_row("Loading...").into_any(),
                        }}
                    </Suspense>
                </tbody>
            </table>
        </div>
    }
}
