use leptos::prelude::*;
use momentum_core::client::CARDIO_TYPES;
use momentum_core::CardioEntry;
use wasm_bindgen_futures::spawn_local;

use crate::api;
use crate::refresh::use_history_refresh;

const INPUT: &str = "w-full px-3 py-2 border border-gray-300 rounded-md focus:outline-none focus:ring-2 focus:ring-blue-500";

#[component]
pub fn LogCardio() -> impl IntoView {
    let refresh = use_history_refresh();

    let (kind, set_kind) = signal(CARDIO_TYPES[0].to_string());
    let (minutes, set_minutes) = signal(String::new());
    let (seconds, set_seconds) = signal(String::new());
    let (distance, set_distance) = signal(String::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (saved, set_saved) = signal(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        set_saved.set(false);

        let entry = match CardioEntry::from_form(&kind.get(), &minutes.get(), &seconds.get(), &distance.get()) {
            Ok(entry) => entry,
            Err(e) => {
                set_error.set(Some(e.to_string()));
                return;
            }
        };

        spawn_local(async move {
            match api::log_cardio(&entry).await {
                Ok(()) => {
                    log::info!("Cardio workout logged");
                    set_minutes.set(String::new());
                    set_seconds.set(String::new());
                    set_distance.set(String::new());
                    set_error.set(None);
                    set_saved.set(true);
                    refresh.bump();
                }
                Err(e) => {
                    log::error!("Failed to log cardio workout: {}", e);
                    set_error.set(Some(format!("Failed to log cardio workout: {}", e)));
                }
            }
        });
    };

    view! {
        <div class="p-6">
            <h2 class="text-2xl font-bold mb-6">"Log Cardio"</h2>

            {move || error.get().map(|e| view! {
                <div class="mb-4 p-3 bg-red-100 border border-red-400 text-red-700 rounded max-w-xl">{e}</div>
            })}
            <Show when=move || saved.get()>
                <div class="mb-4 p-3 bg-green-100 border border-green-400 text-green-700 rounded max-w-xl">
                    "Cardio workout logged."
                </div>
            </Show>

            <form on:submit=on_submit class="bg-white rounded-lg shadow p-6 max-w-xl space-y-4">
                <div>
                    <label class="block text-sm font-medium text-gray-700 mb-1">"Exercise type"</label>
                    <select class=INPUT on:change=move |ev| set_kind.set(event_target_value(&ev))>
                        {CARDIO_TYPES.iter().map(|t| view! {
                            <option value=*t selected=move || kind.get() == *t>{*t}</option>
                        }).collect_view()}
                    </select>
                </div>
                <div class="grid grid-cols-2 gap-4">
                    <div>
                        <label class="block text-sm font-medium text-gray-700 mb-1">"Minutes"</label>
                        <input
                            type="number"
                            min="0"
                            class=INPUT
                            prop:value=move || minutes.get()
                            on:input=move |ev| set_minutes.set(event_target_value(&ev))
                        />
                    </div>
                    <div>
                        <label class="block text-sm font-medium text-gray-700 mb-1">"Seconds"</label>
                        <input
                            type="number"
                            min="0"
                            max="59"
                            class=INPUT
                            prop:value=move || seconds.get()
                            on:input=move |ev| set_seconds.set(event_target_value(&ev))
                        />
                    </div>
                </div>
                <div>
                    <label class="block text-sm font-medium text-gray-700 mb-1">"Distance"</label>
                    <input
                        type="number"
                        step="any"
                        class=INPUT
                        prop:value=move || distance.get()
                        on:input=move |ev| set_distance.set(event_target_value(&ev))
                    />
                </div>
                <button type="submit" class="bg-blue-500 hover:bg-blue-600 text-white px-4 py-2 rounded">
                    "Log workout"
                </button>
            </form>
        </div>
    }
}
