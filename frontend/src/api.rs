use std::rc::Rc;

use faq_widget_core::wire::{
    COMPLETE_PATH, CompleteRequest, CompleteResponse, RETRIEVE_PATH,
};
use faq_widget_core::{
    AnswerService, ChatMessage, KnowledgeTables, MockRagService, WidgetConfig, WidgetError,
};
use gloo_net::http::{Request, Response};

use crate::delay::TimerDelay;

/// Answers through the retrieval/completion backend.
pub struct HttpAnswerService {
    base_url: String,
}

impl HttpAnswerService {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into() }
    }

    /// GET `/rag/retrieve` — snippets for the question and topic.
    async fn retrieve(&self, question: &str, topic: Option<&str>) -> Result<Vec<String>, WidgetError> {
        let mut params = vec![("q", question)];
        if let Some(topic) = topic {
            params.push(("topic", topic));
        }

        let resp = Request::get(&format!("{}{RETRIEVE_PATH}", self.base_url))
            .query(params)
            .send()
            .await
            .map_err(|e| WidgetError::Network(e.to_string()))?;

        read_json(resp).await
    }

    /// POST `/chat/complete` — the synthesized answer.
    async fn complete(
        &self,
        question: &str,
        topic: Option<&str>,
        retrieved_docs: Vec<String>,
    ) -> Result<CompleteResponse, WidgetError> {
        let body = CompleteRequest {
            question: question.to_string(),
            topic: topic.map(str::to_string),
            retrieved_docs,
        };

        let resp = Request::post(&format!("{}{COMPLETE_PATH}", self.base_url))
            .json(&body)
            .map_err(|e| WidgetError::Decode(e.to_string()))?
            .send()
            .await
            .map_err(|e| WidgetError::Network(e.to_string()))?;

        read_json(resp).await
    }
}

async fn read_json<T: serde::de::DeserializeOwned>(resp: Response) -> Result<T, WidgetError> {
    if !resp.ok() {
        return Err(WidgetError::Http { status: resp.status() });
    }
    resp.json::<T>().await.map_err(|e| WidgetError::Decode(e.to_string()))
}

impl AnswerService for HttpAnswerService {
    async fn ask(&self, question: &str, topic: Option<&str>) -> Result<ChatMessage, WidgetError> {
        let docs = self.retrieve(question, topic).await?;
        let completion = self.complete(question, topic, docs).await?;
        log::debug!("backend answered with {}", completion.tool);
        Ok(ChatMessage::assistant(completion.content))
    }
}

/// The answer source picked at startup: the built-in mock unless an API base URL is configured.
pub enum Backend {
    Mock(MockRagService<TimerDelay>),
    Http(HttpAnswerService),
}

impl Backend {
    pub fn from_config(config: &WidgetConfig, tables: Rc<KnowledgeTables>) -> Self {
        match &config.api_base_url {
            Some(url) => {
                log::info!("Answering through backend at {url}");
                Backend::Http(HttpAnswerService::new(url.clone()))
            }
            None => Backend::Mock(MockRagService::new(tables, config.latency, TimerDelay)),
        }
    }
}

impl AnswerService for Backend {
    async fn ask(&self, question: &str, topic: Option<&str>) -> Result<ChatMessage, WidgetError> {
        match self {
            Backend::Mock(service) => service.ask(question, topic).await,
            Backend::Http(service) => service.ask(question, topic).await,
        }
    }
}
