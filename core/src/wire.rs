//! JSON bodies of the retrieval/completion backend.

use serde::{Deserialize, Serialize};

pub const RETRIEVE_PATH: &str = "/rag/retrieve";
pub const COMPLETE_PATH: &str = "/chat/complete";

/// Query string of `GET /rag/retrieve`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetrieveQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(default)]
    pub q: String,
}

/// Body of `POST /chat/complete`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompleteRequest {
    pub question: String,
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub retrieved_docs: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompleteResponse {
    pub tool: String,
    pub content: String,
}
