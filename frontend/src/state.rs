use std::rc::Rc;

use faq_widget_core::{ChatPanel, KnowledgeTables, PanelState, Topic, TopicBridge, WidgetConfig};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::Backend;

/// Shared application state, provided via Leptos context.
///
/// The chat panel owns the conversation; `panel_state` mirrors it so
/// components can subscribe to changes.
#[derive(Clone, Copy)]
pub struct AppState {
    pub panel_state: ReadSignal<PanelState>,
    pub site_base_url: StoredValue<Option<String>>,
    panel: StoredValue<Rc<ChatPanel<Backend>>, LocalStorage>,
}

impl AppState {
    /// Create a new `AppState` and provide it in the current Leptos context.
    pub fn provide(config: WidgetConfig) -> Self {
        let tables = Rc::new(KnowledgeTables::builtin());
        let backend = Backend::from_config(&config, tables.clone());

        let topics = TopicBridge::global().subscribe();
        let panel = Rc::new(ChatPanel::new(backend, tables, topics.current()));

        let (panel_state, set_panel_state) = signal(panel.snapshot());

        // Mirror every panel change into the signal
        let mut changes = panel.watch();
        spawn_local(async move {
            while changes.changed().await.is_ok() {
                set_panel_state.set(changes.borrow_and_update().clone());
            }
        });

        // Follow the topic bridge
        let follower = panel.clone();
        spawn_local(async move { follower.follow(topics).await });

        let state = Self {
            panel_state,
            site_base_url: StoredValue::new(config.site_base_url),
            panel: StoredValue::new_local(panel),
        };
        provide_context(state);
        state
    }

    /// Publish a sidebar selection to every topic subscriber.
    pub fn select_topic(&self, topic: Option<Topic>) {
        TopicBridge::global().set_topic(topic);
    }

    /// Send a question. Ignored by the panel while a previous one is in flight.
    pub fn submit(&self, text: String) {
        let panel = self.panel.get_value();
        spawn_local(async move {
            let outcome = panel.submit(&text).await;
            log::debug!("submit finished: {outcome:?}");
        });
    }

    pub fn clear(&self) {
        self.panel.with_value(|panel| panel.clear());
    }
}
