//! Schema-driven admin console
//!
//! All page state lives in one `AdminSessionState` signal. Requests are
//! started from the tickets it hands out and their outcomes are fed back
//! into it, so a slow view response can never overwrite a newer one.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use momentum_core::session::{AfterMutation, SubmitAction};
use momentum_core::{AdminSessionState, FieldView, Notice, Operation, Phase, Resource, ViewTicket};
use wasm_bindgen_futures::spawn_local;

use crate::api;
use crate::components::grid::ResultTable;
use crate::refresh::{use_history_refresh, HistoryRefresh};

const NOTICE_MS: u32 = 5_000;

#[component]
pub fn Admin() -> impl IntoView {
    let refresh = use_history_refresh();

    let state = RwSignal::new(AdminSessionState::default());
    let (submitting, set_submitting) = signal(false);

    let load = move |ticket: ViewTicket| {
        spawn_local(async move {
            let result = api::view_table(ticket.resource()).await;
            state.update(|s| {
                s.apply_view(ticket, result);
            });
        });
    };

    // Open on the host's configured table unless the operator already picked one
    spawn_local(async move {
        let defaults = api::console_defaults().await;
        let first_view = state
            .try_update(|s| {
                if s.phase() != Phase::Idle {
                    return None;
                }
                s.select_operation(defaults.operation).ok()?;
                s.select_resource(defaults.resource).ok()
            })
            .flatten();
        if let Some(ticket) = first_view {
            load(ticket);
        }
    });

    let on_resource_change = move |ev: leptos::ev::Event| {
        let Ok(resource) = event_target_value(&ev).parse::<Resource>() else {
            return;
        };
        if let Some(Ok(ticket)) = state.try_update(|s| s.select_resource(resource)) {
            load(ticket);
        }
    };

    let on_operation_change = move |ev: leptos::ev::Event| {
        if let Ok(operation) = event_target_value(&ev).parse::<Operation>() {
            state.update(|s| {
                let _ = s.select_operation(operation);
            });
        }
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        match state.try_update(|s| s.begin_submit()) {
            Some(Ok(SubmitAction::Dispatch(submission))) => {
                set_submitting.set(true);
                spawn_local(async move {
                    let outcome = api::dispatch(&submission).await;
                    let after = state.try_update(|s| s.finish_submit(&submission, outcome)).flatten();
                    follow_up(state, refresh, after, load);
                    set_submitting.set(false);
                });
            }
            Some(Ok(SubmitAction::Refresh(ticket))) => load(ticket),
            // The confirmation modal opens from the pending request
            Some(Ok(SubmitAction::Confirm(_))) => {}
            // Validation errors are already in the notice
            Some(Err(_)) | None => {}
        }
    };

    let on_empty_request = move |_: leptos::ev::MouseEvent| {
        state.update(|s| {
            s.request_empty();
        });
    };

    let on_empty_confirm = move |_: leptos::ev::MouseEvent| {
        let Some(pending) = state.with_untracked(|s| s.pending_empty()) else {
            return;
        };
        let Some(command) = state.try_update(|s| s.confirm_empty(pending)).flatten() else {
            return;
        };
        set_submitting.set(true);
        spawn_local(async move {
            let outcome = api::empty_table(command).await;
            let after = state.try_update(|s| s.finish_empty(command, outcome)).flatten();
            follow_up(state, refresh, after, load);
            set_submitting.set(false);
        });
    };

    let on_empty_cancel = move |_: leptos::ev::MouseEvent| state.update(|s| s.cancel_empty());

    view! {
        <div class="p-6">
            <h2 class="text-2xl font-bold mb-6">"Admin Console"</h2>

            <NoticeBanner state=state />

            <form on:submit=on_submit class="bg-white rounded-lg shadow p-6 mb-6 max-w-3xl">
                <div class="grid grid-cols-1 md:grid-cols-2 gap-4 mb-4">
                    <div>
                        <label class="block text-sm font-medium text-gray-700 mb-1">"Table"</label>
                        <select
                            class="w-full px-3 py-2 border border-gray-300 rounded-md focus:outline-none focus:ring-2 focus:ring-blue-500"
                            on:change=on_resource_change
                        >
                            {Resource::ALL.into_iter().map(|resource| view! {
                                <option
                                    value=resource.as_str()
                                    selected=move || state.with(|s| s.resource() == resource)
                                >
                                    {resource.label()}
                                </option>
                            }).collect_view()}
                        </select>
                    </div>
                    <div>
                        <label class="block text-sm font-medium text-gray-700 mb-1">"Operation"</label>
                        <select
                            class="w-full px-3 py-2 border border-gray-300 rounded-md focus:outline-none focus:ring-2 focus:ring-blue-500"
                            on:change=on_operation_change
                        >
                            {Operation::ALL.into_iter().map(|operation| view! {
                                <option
                                    value=operation.as_str()
                                    selected=move || state.with(|s| s.operation() == operation)
                                >
                                    {operation.label()}
                                </option>
                            }).collect_view()}
                        </select>
                    </div>
                </div>

                <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                    {move || state.with(|s| s.field_views()).into_iter().map(|field| view! {
                        <FieldInput field=field state=state />
                    }).collect_view()}
                </div>

                <div class="flex justify-between items-center mt-6">
                    <button
                        type="submit"
                        class="bg-blue-500 hover:bg-blue-600 text-white px-4 py-2 rounded disabled:opacity-50"
                        disabled=move || submitting.get()
                    >
                        {move || if submitting.get() { "Working..." } else { "Submit" }}
                    </button>
                    <button
                        type="button"
                        class="text-red-600 hover:text-red-900 px-4 py-2"
                        on:click=on_empty_request
                    >
                        "Empty table"
                    </button>
                </div>
            </form>

            {move || match state.with(|s| s.view().cloned()) {
                Some(result) => view! { <ResultTable result=result /> }.into_any(),
                None => view! { <div class="text-gray-500">"Loading..."</div> }.into_any(),
            }}

            // Empty confirmation modal
            <Show when=move || state.with(|s| s.pending_empty().is_some())>
                <div class="fixed inset-0 bg-black bg-opacity-50 flex items-center justify-center z-50">
                    <div class="bg-white rounded-lg p-6 max-w-sm w-full mx-4">
                        <h3 class="text-lg font-semibold mb-4">"Empty Table?"</h3>
                        <p class="text-gray-600 mb-2">
                            {move || state.with(|s| s.pending_empty().map(|p| p.prompt()).unwrap_or_default())}
                        </p>
                        <p class="text-red-600 text-sm mb-6">
                            "Warning: every record in this table will be deleted."
                        </p>
                        <div class="flex justify-end gap-3">
                            <button
                                class="px-4 py-2 text-gray-600 hover:bg-gray-100 rounded"
                                on:click=on_empty_cancel
                            >
                                "Cancel"
                            </button>
                            <button
                                class="px-4 py-2 bg-red-600 text-white rounded hover:bg-red-700 disabled:opacity-50"
                                disabled=move || submitting.get()
                                on:click=on_empty_confirm
                            >
                                "Empty"
                            </button>
                        </div>
                    </div>
                </div>
            </Show>
        </div>
    }
}

/// Re-fetch the table and the history pages after a successful write.
fn follow_up(
    state: RwSignal<AdminSessionState>,
    refresh: HistoryRefresh,
    after: Option<AfterMutation>,
    load: impl Fn(ViewTicket),
) {
    let Some(after) = after else {
        return;
    };
    load(after.view);
    if after.refresh_summaries {
        refresh.bump();
    }

    let shown = state.with_untracked(|s| s.notice().cloned());
    spawn_local(async move {
        TimeoutFuture::new(NOTICE_MS).await;
        state.update(|s| {
            if s.notice().cloned() == shown {
                s.dismiss_notice();
            }
        });
    });
}

#[component]
fn NoticeBanner(state: RwSignal<AdminSessionState>) -> impl IntoView {
    move || {
        state.with(|s| s.notice().cloned()).map(|notice| {
            let class = match notice {
                Notice::Success(_) => "mb-4 p-3 bg-green-100 border border-green-400 text-green-700 rounded flex justify-between",
                Notice::Error(_) => "mb-4 p-3 bg-red-100 border border-red-400 text-red-700 rounded flex justify-between",
            };
            view! {
                <div class=class>
                    <span>{notice.message().to_string()}</span>
                    <button class="ml-4 font-bold" on:click=move |_| state.update(|s| s.dismiss_notice())>
                        "×"
                    </button>
                </div>
            }
        })
    }
}

/// One input built from its declarative description
#[component]
fn FieldInput(field: FieldView, state: RwSignal<AdminSessionState>) -> impl IntoView {
    let name = field.name;
    let label = if field.required {
        format!("{} *", field.label)
    } else {
        field.label.to_string()
    };

    view! {
        <div>
            <label class="block text-sm font-medium text-gray-700 mb-1">{label}</label>
            <input
                type=field.input.html_type()
                step=field.input.step()
                name=name
                required=field.required
                class="w-full px-3 py-2 border border-gray-300 rounded-md focus:outline-none focus:ring-2 focus:ring-blue-500"
                prop:value=move || state.with(|s| s.value(name).to_string())
                on:input=move |ev| state.update(|s| s.set_field(name, event_target_value(&ev)))
            />
        </div>
    }
}
