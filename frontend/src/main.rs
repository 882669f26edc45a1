mod api;
mod components;
mod config;
mod delay;
mod state;

use faq_widget_core::Topic;
use leptos::mount::mount_to_body;
use leptos::prelude::*;

use components::chat::ChatArea;
use components::footer::Footer;
use components::header::Header;
use components::sidebar::Sidebar;
use state::AppState;

/// Root shell: wires the sidebar's selection into the topic bridge.
#[component]
fn App() -> impl IntoView {
    let state = AppState::provide(config::load());

    let on_topic = move |topic: Option<Topic>| state.select_topic(topic);

    view! {
        <div class="app-container">
            <Header />
            <div class="app-body">
                <Sidebar on_select=on_topic />
                <ChatArea />
            </div>
            <Footer />
        </div>
    }
}

fn main() {
    console_log::init_with_level(log::Level::Debug).expect("Failed to init logger");
    mount_to_body(App);
}
