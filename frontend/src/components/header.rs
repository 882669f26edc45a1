use leptos::prelude::*;

use crate::state::AppState;

#[component]
pub fn Header() -> impl IntoView {
    let state = expect_context::<AppState>();

    view! {
        <header class="app-header">
            <h1>"Help Center Assistant"</h1>
            <span class="topic-badge">
                {move || {
                    state
                        .panel_state
                        .with(|s| s.topic.map(|t| t.label()).unwrap_or("All topics"))
                }}
            </span>
        </header>
    }
}
