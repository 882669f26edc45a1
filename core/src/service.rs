use std::rc::Rc;

use log::debug;

use crate::config::LatencyProfile;
use crate::delay::Delay;
use crate::error::WidgetError;
use crate::knowledge::KnowledgeTables;
use crate::models::ChatMessage;
use crate::synthesis::{select_tool, synthesize};

/// Anything that can answer a question for an optional topic id.
///
/// Unknown topic ids are treated the same as no topic.
#[allow(async_fn_in_trait)]
pub trait AnswerService {
    async fn ask(&self, question: &str, topic: Option<&str>) -> Result<ChatMessage, WidgetError>;
}

/// Simulated retrieval-augmented answering over the static knowledge tables.
pub struct MockRagService<D> {
    tables: Rc<KnowledgeTables>,
    latency: LatencyProfile,
    delay: D,
}

impl<D: Delay> MockRagService<D> {
    pub fn new(tables: Rc<KnowledgeTables>, latency: LatencyProfile, delay: D) -> Self {
        Self { tables, latency, delay }
    }
}

impl<D: Delay> AnswerService for MockRagService<D> {
    async fn ask(&self, question: &str, topic: Option<&str>) -> Result<ChatMessage, WidgetError> {
        let docs = self.tables.snippets.retrieve(question, topic);
        let tool = select_tool(question);
        debug!("mock answer: topic={topic:?} tool={tool} docs={}", docs.len());
        let content = synthesize(tool, &docs);

        self.delay.sleep(self.latency.sample()).await;
        Ok(ChatMessage::assistant(content))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::time::Duration;

    use super::*;
    use crate::models::Role;

    /// Completes immediately.
    struct NoDelay;

    impl Delay for NoDelay {
        async fn sleep(&self, _duration: Duration) {}
    }

    /// Tokio-backed timer for tests; pair with `start_paused` so it never blocks.
    pub(crate) struct TokioSleep;

    impl Delay for TokioSleep {
        async fn sleep(&self, duration: Duration) {
            tokio::time::sleep(duration).await;
        }
    }

    fn instant_service() -> MockRagService<NoDelay> {
        MockRagService::new(Rc::new(KnowledgeTables::builtin()), LatencyProfile::NONE, NoDelay)
    }

    #[tokio::test]
    async fn api_questions_use_api_docs_tool_and_api_bucket() {
        let service = instant_service();
        let api = KnowledgeTables::builtin().snippets.bucket(Some("api")).to_vec();

        for question in ["key rotation", "Which key do I use?"] {
            let answer = service.ask(question, Some("api")).await.unwrap();
            assert_eq!(answer.role, Role::Assistant);
            assert!(!answer.error);
            assert!(answer.content.contains("api.docs.search"));

            let bullets: Vec<&str> = answer
                .content
                .lines()
                .filter_map(|l| l.strip_prefix("- "))
                .collect();
            assert!(!bullets.is_empty());
            assert!(bullets.iter().all(|b| api.iter().any(|s| s == b)));
        }
    }

    #[tokio::test]
    async fn unknown_topic_behaves_like_no_topic() {
        let service = instant_service();
        let question = "How do I get started?";
        let unknown = service.ask(question, Some("unknown-id")).await.unwrap();
        let none = service.ask(question, None).await.unwrap();
        assert_eq!(unknown, none);
    }

    #[tokio::test(start_paused = true)]
    async fn answer_waits_for_simulated_latency() {
        let latency = LatencyProfile { base: Duration::from_millis(450), jitter: Duration::from_millis(300) };
        let service = MockRagService::new(Rc::new(KnowledgeTables::builtin()), latency, TokioSleep);

        let started = tokio::time::Instant::now();
        let answer = service.ask("What are the rate limits?", Some("api")).await.unwrap();
        let elapsed = started.elapsed();

        assert!(elapsed >= Duration::from_millis(450), "elapsed {elapsed:?}");
        assert!(elapsed <= Duration::from_millis(751), "elapsed {elapsed:?}");
        assert!(answer.content.starts_with("Here's what I found using api.docs.search:"));
        assert!(answer.content.contains("Rate limits are 100 requests per minute"));
    }
}
