use leptos::prelude::*;

use crate::state::AppState;

#[component]
pub fn Footer() -> impl IntoView {
    let state = expect_context::<AppState>();

    view! {
        <footer class="app-footer">
            <span>"Answers are generated from our FAQ and may be incomplete."</span>
            {state.site_base_url.get_value().map(|url| {
                view! { <a href=url target="_blank">"Visit the help center"</a> }
            })}
        </footer>
    }
}
