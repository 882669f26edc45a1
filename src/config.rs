use std::path::PathBuf;

use faq_widget_core::{KnowledgeTables, WidgetConfig, WidgetError};
use tracing::info;

use crate::errors::AppError;

const DEFAULT_PORT: u16 = 8080;
const KNOWLEDGE_PATH_KEY: &str = "FAQ_KNOWLEDGE_PATH";

/// Server settings read from the process environment (after `.env` is loaded).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub knowledge_path: Option<PathBuf>,
    pub widget: WidgetConfig,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            None => DEFAULT_PORT,
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| WidgetError::InvalidConfig {
                key: "PORT".to_string(),
                value: raw.clone(),
            })?,
        };
        let knowledge_path = lookup(KNOWLEDGE_PATH_KEY)
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);
        let widget = WidgetConfig::from_lookup(&lookup)?;

        Ok(Self { port, knowledge_path, widget })
    }

    /// Built-in tables, or the JSON override file when one is configured.
    pub fn load_tables(&self) -> Result<KnowledgeTables, AppError> {
        let Some(path) = &self.knowledge_path else {
            return Ok(KnowledgeTables::builtin());
        };
        let json = std::fs::read_to_string(path).map_err(|source| AppError::KnowledgeFile {
            path: path.clone(),
            source,
        })?;
        let tables = KnowledgeTables::from_json(&json)?;
        info!("Loaded knowledge tables from {}", path.display());
        Ok(tables)
    }
}
