use leptos::prelude::*;

/// Counter shared through context. Pages that show logged workouts read it
/// so they re-fetch after any write made elsewhere in the console.
#[derive(Clone, Copy)]
pub struct HistoryRefresh(RwSignal<u32>);

impl HistoryRefresh {
    pub fn new() -> Self {
        Self(RwSignal::new(0))
    }

    /// Track the counter inside a resource or effect
    pub fn track(&self) -> u32 {
        self.0.get()
    }

    pub fn bump(&self) {
        self.0.update(|n| *n = n.wrapping_add(1));
    }
}

impl Default for HistoryRefresh {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_history_refresh() -> HistoryRefresh {
    use_context::<HistoryRefresh>().unwrap_or_default()
}
