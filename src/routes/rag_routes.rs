use axum::extract::{Query, State};
use axum::Json;
use faq_widget_core::wire::{CompleteRequest, CompleteResponse, RetrieveQuery};
use tracing::info;

use crate::errors::AppError;
use crate::service::answer_service::AnswerBackend;

/// GET `/rag/retrieve?topic=&q=` — JSON array of matching snippets
pub async fn retrieve_handler(
    State(backend): State<AnswerBackend>,
    Query(query): Query<RetrieveQuery>,
) -> Json<Vec<String>> {
    let docs = backend.retrieve(&query);
    info!("retrieve topic={:?} -> {} docs", query.topic, docs.len());
    Json(docs)
}

/// POST `/chat/complete` — synthesized answer for a question and its documents
pub async fn complete_handler(
    State(backend): State<AnswerBackend>,
    Json(request): Json<CompleteRequest>,
) -> Result<Json<CompleteResponse>, AppError> {
    backend.complete(request).await.map(Json)
}

/// GET `/health`
pub async fn health_handler() -> &'static str {
    "ok"
}
