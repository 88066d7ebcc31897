use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes, A};
use leptos_router::path;

mod api;
mod components;
mod refresh;

use components::admin::Admin;
use components::dashboard::Dashboard;
use components::history::History;
use components::log_cardio::LogCardio;
use components::log_weights::LogWeights;
use refresh::HistoryRefresh;

#[component]
pub fn App() -> impl IntoView {
    provide_context(HistoryRefresh::new());

    view! {
        <Router>
            <div class="flex h-screen bg-gray-100">
                // Sidebar
                <div class="w-64 bg-gray-800 text-white p-4 flex flex-col">
                    <h1 class="text-2xl font-bold mb-8">"Momentum"</h1>
                    <nav class="space-y-1 flex-1">
                        <NavLink href="/" label="Dashboard" />
                        <NavLink href="/log/cardio" label="Log Cardio" />
                        <NavLink href="/log/weights" label="Log Weights" />
                        <NavLink href="/history" label="History" />
                        <div class="border-t border-gray-700 my-4"></div>
                        <NavLink href="/admin" label="Admin" />
                    </nav>
                    <div class="text-xs text-gray-500 mt-4">
                        "Momentum fitness tracker"
                    </div>
                </div>

                // Main Content
                <div class="flex-1 overflow-y-auto">
                    <Routes fallback=|| "Not found.">
                        <Route path=path!("/") view=Dashboard/>
                        <Route path=path!("/log/cardio") view=LogCardio/>
                        <Route path=path!("/log/weights") view=LogWeights/>
                        <Route path=path!("/history") view=History/>
                        <Route path=path!("/admin") view=Admin/>
                    </Routes>
                </div>
            </div>
        </Router>
    }
}

#[component]
fn NavLink(href: &'static str, label: &'static str) -> impl IntoView {
    view! {
        <A href=href attr:class="block p-2 hover:bg-gray-700 rounded transition-colors">
            {label}
        </A>
    }
}

#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::mount_to_body(App);
}
