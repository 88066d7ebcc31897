use leptos::prelude::*;
use momentum_core::client::WEIGHTS_TYPES;
use momentum_core::row::WeightWorkoutRow;
use momentum_core::{ExerciseSets, WeightsLogEntry};
use std::collections::BTreeMap;
use wasm_bindgen_futures::spawn_local;

use crate::api;
use crate::refresh::use_history_refresh;

/// Raw set inputs keyed by exercise name
type SetInputs = BTreeMap<String, [String; 3]>;

#[component]
pub fn LogWeights() -> impl IntoView {
    let refresh = use_history_refresh();

    let (workout_type, set_workout_type) = signal(WEIGHTS_TYPES[0].to_string());
    let sets = RwSignal::new(SetInputs::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (saved, set_saved) = signal(false);

    let exercises = LocalResource::new(move || {
        let workout_type = workout_type.get();
        async move { api::weight_workouts(&workout_type).await }
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        set_saved.set(false);

        let Some(Ok(catalog)) = exercises.get_untracked() else {
            set_error.set(Some("Exercises are still loading".to_string()));
            return;
        };

        let parsed: Result<Vec<ExerciseSets>, _> = sets.with_untracked(|inputs| {
            catalog
                .iter()
                .map(|entry| {
                    let raw = inputs.get(&entry.exercise);
                    let set = |i: usize| raw.map(|r| r[i].as_str()).unwrap_or("");
                    ExerciseSets::from_form(&entry.exercise, [set(0), set(1), set(2)])
                })
                .collect()
        });
        let entry = match parsed {
            Ok(list) => WeightsLogEntry::new(workout_type.get_untracked(), list),
            Err(e) => {
                set_error.set(Some(e.to_string()));
                return;
            }
        };

        spawn_local(async move {
            match api::log_weights(&entry).await {
                Ok(()) => {
                    log::info!("Weights workout logged ({} exercises)", entry.exercises.len());
                    sets.set(SetInputs::new());
                    set_error.set(None);
                    set_saved.set(true);
                    refresh.bump();
                }
                Err(e) => {
                    log::error!("Failed to log weights workout: {}", e);
                    set_error.set(Some(format!("Failed to log weights workout: {}", e)));
                }
            }
        });
    };

    view! {
        <div class="p-6">
            <h2 class="text-2xl font-bold mb-6">"Log Weights"</h2>

            {move || error.get().map(|e| view! {
                <div class="mb-4 p-3 bg-red-100 border border-red-400 text-red-700 rounded max-w-2xl">{e}</div>
            })}
            <Show when=move || saved.get()>
                <div class="mb-4 p-3 bg-green-100 border border-green-400 text-green-700 rounded max-w-2xl">
                    "Weights workout logged."
                </div>
            </Show>

            <form on:submit=on_submit class="bg-white rounded-lg shadow p-6 max-w-2xl space-y-4">
                <div>
                    <label class="block text-sm font-medium text-gray-700 mb-1">"Workout type"</label>
                    <select
                        class="w-full px-3 py-2 border border-gray-300 rounded-md focus:outline-none focus:ring-2 focus:ring-blue-500"
                        on:change=move |ev| {
                            sets.set(SetInputs::new());
                            set_workout_type.set(event_target_value(&ev));
                        }
                    >
                        {WEIGHTS_TYPES.iter().map(|t| view! {
                            <option value=*t selected=move || workout_type.get() == *t>{*t}</option>
                        }).collect_view()}
                    </select>
                </div>

                <Suspense fallback=move || view! { <div class="text-gray-500">"Loading exercises..."</div> }>
                    {move || match exercises.get() {
                        Some(Ok(list)) if list.is_empty() => view! {
                            <p class="text-gray-500">"No exercises found for this workout type."</p>
                        }.into_any(),
                        Some(Ok(list)) => view! { <SetTable exercises=list sets=sets /> }.into_any(),
                        Some(Err(e)) => view! {
                            <p class="text-red-600">{format!("Failed to load exercises: {}", e)}</p>
                        }.into_any(),
                        None => view! { <div class="text-gray-500">"Loading exercises..."</div> }.into_any(),
                    }}
                </Suspense>

                <button type="submit" class="bg-blue-500 hover:bg-blue-600 text-white px-4 py-2 rounded">
                    "Log workout"
                </button>
            </form>
        </div>
    }
}

#[component]
fn SetTable(exercises: Vec<WeightWorkoutRow>, sets: RwSignal<SetInputs>) -> impl IntoView {
    view! {
        <table class="min-w-full divide-y divide-gray-200 text-sm">
            <thead class="bg-gray-50">
                <tr>
                    <th class="px-4 py-2 text-left">"Exercise"</th>
                    <th class="px-4 py-2 text-left">"Set 1 Weight"</th>
                    <th class="px-4 py-2 text-left">"Set 2 Weight"</th>
                    <th class="px-4 py-2 text-left">"Set 3 Weight"</th>
                </tr>
            </thead>
            <tbody class="divide-y divide-gray-200">
                {exercises.into_iter().map(|entry| {
                    let name = entry.exercise;
                    view! {
                        <tr>
                            <td class="px-4 py-2 font-medium">{name.clone()}</td>
                            {(0..3).map(|i| {
                                let read = name.clone();
                                let write = name.clone();
                                view! {
                                    <td class="px-4 py-2">
                                        <input
                                            type="number"
                                            placeholder="0"
                                            class="w-24 px-2 py-1 border border-gray-300 rounded"
                                            prop:value=move || sets.with(|s| s.get(&read).map(|r| r[i].clone()).unwrap_or_default())
                                            on:input=move |ev| {
                                                let value = event_target_value(&ev);
                                                sets.update(|s| s.entry(write.clone()).or_default()[i] = value);
                                            }
                                        />
                                    </td>
                                }
                            }).collect_view()}
                        </tr>
                    }
                }).collect_view()}
            </tbody>
        </table>
    }
}
