use thiserror::Error;

/// Errors surfaced by the answer pipeline and its configuration.
/// None of them are fatal: the chat panel turns them into a chat message.
#[derive(Debug, Error)]
pub enum WidgetError {
    // ── Answer backend ───────────────────────────────────────────────────────
    #[error("Answer service failed: {message}")]
    Service { message: String },

    #[error("Backend returned HTTP {status}")]
    Http { status: u16 },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Could not decode backend response: {0}")]
    Decode(String),

    // ── Configuration ────────────────────────────────────────────────────────
    #[error("Invalid value '{value}' for {key}")]
    InvalidConfig { key: String, value: String },

    #[error("Could not load knowledge tables: {0}")]
    Knowledge(#[from] serde_json::Error),

    #[error("Knowledge table '{table}' has no default bucket")]
    MissingDefault { table: &'static str },
}

impl WidgetError {
    pub fn service(message: impl Into<String>) -> Self {
        WidgetError::Service { message: message.into() }
    }

    /// True when the failure happened while talking to a remote backend.
    pub fn is_transport(&self) -> bool {
        matches!(self, WidgetError::Http { .. } | WidgetError::Network(_) | WidgetError::Decode(_))
    }
}
