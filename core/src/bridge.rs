use std::sync::OnceLock;

use tokio::sync::watch;

use crate::models::Topic;

/// Topic every bridge starts with.
pub const INITIAL_TOPIC: Topic = Topic::GettingStarted;

/// Latest-value broadcast of the selected topic.
///
/// New subscribers see the current value immediately. A subscriber that
/// falls behind only observes the most recent value, never the backlog.
#[derive(Debug)]
pub struct TopicBridge {
    tx: watch::Sender<Option<Topic>>,
}

impl TopicBridge {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(Some(INITIAL_TOPIC));
        Self { tx }
    }

    /// The process-wide bridge shared by the shell and the chat panel.
    pub fn global() -> &'static TopicBridge {
        static BRIDGE: OnceLock<TopicBridge> = OnceLock::new();
        BRIDGE.get_or_init(TopicBridge::new)
    }

    pub fn set_topic(&self, topic: Option<Topic>) {
        log::debug!("topic bridge: {topic:?}");
        self.tx.send_replace(topic);
    }

    pub fn current(&self) -> Option<Topic> {
        *self.tx.borrow()
    }

    pub fn subscribe(&self) -> TopicSubscription {
        TopicSubscription { rx: self.tx.subscribe() }
    }
}

impl Default for TopicBridge {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone)]
pub struct TopicSubscription {
    rx: watch::Receiver<Option<Topic>>,
}

impl TopicSubscription {
    pub fn current(&self) -> Option<Topic> {
        *self.rx.borrow()
    }

    /// Waits for the next published value. Returns `None` once the bridge is gone.
    pub async fn changed(&mut self) -> Option<Option<Topic>> {
        self.rx.changed().await.ok()?;
        Some(*self.rx.borrow_and_update())
    }
}
