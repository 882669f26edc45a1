use crate::knowledge::TopicTable;
use crate::models::{ChatMessage, FaqEntry, Topic};

/// Read-only, display-only subsets of the transcript and FAQ catalog that
/// match the last submitted query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterView {
    pub query: String,
    pub messages: Vec<ChatMessage>,
    pub faqs: Vec<FaqEntry>,
}

impl FilterView {
    /// Case-insensitive substring match of `query` over message contents and
    /// over FAQ titles/contents of the topic's bucket. While a topic is active,
    /// topic-change notices are always kept.
    pub fn compute(
        query: &str,
        transcript: &[ChatMessage],
        faqs: &TopicTable<FaqEntry>,
        topic: Option<Topic>,
    ) -> Self {
        let needle = query.to_lowercase();

        let messages = transcript
            .iter()
            .filter(|m| {
                m.content.to_lowercase().contains(&needle)
                    || (topic.is_some() && m.is_topic_notice())
            })
            .cloned()
            .collect();

        let faqs = faqs
            .bucket(topic.map(|t| t.id()))
            .iter()
            .filter(|f| {
                f.title.to_lowercase().contains(&needle)
                    || f.content.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect();

        Self { query: query.to_string(), messages, faqs }
    }
}
