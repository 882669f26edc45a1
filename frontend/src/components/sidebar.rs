use faq_widget_core::Topic;
use leptos::prelude::*;

use crate::state::AppState;

/// Sidebar listing the FAQ topics. Selection is emitted upward through `on_select`.
#[component]
pub fn Sidebar(#[prop(into)] on_select: Callback<Option<Topic>>) -> impl IntoView {
    let state = expect_context::<AppState>();
    let active = move || state.panel_state.with(|s| s.topic);

    view! {
        <aside class="sidebar">
            <div class="sidebar-header">
                <h2>"Topics"</h2>
            </div>
            <div class="topic-list">
                <div
                    class="topic-item"
                    class:active=move || active().is_none()
                    on:click=move |_| on_select.run(None)
                >
                    "All topics"
                </div>
                {Topic::ALL
                    .into_iter()
                    .map(|topic| {
                        view! {
                            <div
                                class="topic-item"
                                class:active=move || active() == Some(topic)
                                on:click=move |_| on_select.run(Some(topic))
                            >
                                {topic.label()}
                            </div>
                        }
                    })
                    .collect_view()}
            </div>
        </aside>
    }
}
