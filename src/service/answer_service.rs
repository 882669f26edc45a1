use std::sync::Arc;

use faq_widget_core::synthesis::{select_tool, synthesize};
use faq_widget_core::wire::{CompleteRequest, CompleteResponse, RetrieveQuery};
use faq_widget_core::{KnowledgeTables, LatencyProfile};
use tracing::debug;

use crate::errors::AppError;

const MAX_QUESTION_LENGTH: usize = 8000;

/// Serves retrieval and completion from the static knowledge tables.
#[derive(Clone)]
pub struct AnswerBackend {
    tables: Arc<KnowledgeTables>,
    latency: LatencyProfile,
}

impl AnswerBackend {
    pub fn new(tables: KnowledgeTables, latency: LatencyProfile) -> Self {
        Self { tables: Arc::new(tables), latency }
    }

    pub fn retrieve(&self, query: &RetrieveQuery) -> Vec<String> {
        self.tables.snippets.retrieve(&query.q, query.topic.as_deref())
    }

    pub async fn complete(&self, request: CompleteRequest) -> Result<CompleteResponse, AppError> {
        // ── Validation ────────────────────────────────────────────────────────
        let question = request.question.trim();
        if question.is_empty() {
            return Err(AppError::empty_field("question"));
        }
        if question.len() > MAX_QUESTION_LENGTH {
            return Err(AppError::FieldTooLong {
                field_name: "question".to_string(),
                max_length: MAX_QUESTION_LENGTH,
                actual_length: question.len(),
            });
        }

        // ── Retrieve server-side when the caller sent no documents ───────────
        let docs = if request.retrieved_docs.is_empty() {
            self.tables.snippets.retrieve(question, request.topic.as_deref())
        } else {
            request.retrieved_docs
        };

        let tool = select_tool(question);
        debug!(tool, docs = docs.len(), topic = ?request.topic, "completing question");
        let content = synthesize(tool, &docs);

        tokio::time::sleep(self.latency.sample()).await;

        Ok(CompleteResponse { tool: tool.to_string(), content })
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn backend() -> AnswerBackend {
        AnswerBackend::new(KnowledgeTables::builtin(), LatencyProfile::default())
    }

    #[tokio::test(start_paused = true)]
    async fn completes_with_server_side_retrieval() {
        let started = tokio::time::Instant::now();
        let response = backend()
            .complete(CompleteRequest {
                question: "What are the rate limits?".to_string(),
                topic: Some("api".to_string()),
                retrieved_docs: vec![],
            })
            .await
            .unwrap();

        assert!(started.elapsed() >= Duration::from_millis(450));
        assert_eq!(response.tool, "api.docs.search");
        assert!(response.content.contains("Rate limits are 100 requests per minute"));
    }

    #[tokio::test(start_paused = true)]
    async fn uses_documents_supplied_by_the_caller() {
        let response = backend()
            .complete(CompleteRequest {
                question: "invoice copy".to_string(),
                topic: None,
                retrieved_docs: vec!["Invoices live on the Billing page.".to_string()],
            })
            .await
            .unwrap();

        assert_eq!(response.tool, "billing.lookup");
        assert!(response.content.contains("- Invoices live on the Billing page."));
    }

    #[tokio::test]
    async fn rejects_blank_question() {
        let err = backend()
            .complete(CompleteRequest { question: "  ".to_string(), topic: None, retrieved_docs: vec![] })
            .await
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn retrieve_falls_back_for_unknown_topic() {
        let backend = backend();
        let unknown = backend.retrieve(&RetrieveQuery { topic: Some("unknown-id".into()), q: "support".into() });
        let none = backend.retrieve(&RetrieveQuery { topic: None, q: "support".into() });
        assert_eq!(unknown, none);
        assert!(!none.is_empty());
    }
}
