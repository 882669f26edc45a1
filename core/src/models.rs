use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::System => "system",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the chat transcript. Never mutated once appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub error: bool,
    /// Set on the system notice recording a topic-context change.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub topic_change: bool,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self { role, content: content.into(), error: false, topic_change: false }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    /// Assistant message flagged as a failed answer.
    pub fn assistant_error(content: impl Into<String>) -> Self {
        Self { error: true, ..Self::assistant(content) }
    }

    /// Builds the system notice recording a switch of topic context.
    pub fn topic_notice(topic: Option<Topic>) -> Self {
        let content = match topic {
            Some(t) => format!("Topic context changed to {}.", t.label()),
            None => "Topic context cleared.".to_string(),
        };
        Self { topic_change: true, ..Self::system(content) }
    }

    pub fn is_topic_notice(&self) -> bool {
        self.role == Role::System && self.topic_change
    }
}

/// The closed set of FAQ topics offered by the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Topic {
    GettingStarted,
    Account,
    Security,
    Api,
    Troubleshooting,
}

impl Topic {
    pub const ALL: [Topic; 5] = [
        Topic::GettingStarted,
        Topic::Account,
        Topic::Security,
        Topic::Api,
        Topic::Troubleshooting,
    ];

    /// Stable identifier used for table lookups and on the wire.
    pub fn id(&self) -> &'static str {
        match self {
            Topic::GettingStarted => "getting-started",
            Topic::Account => "account",
            Topic::Security => "security",
            Topic::Api => "api",
            Topic::Troubleshooting => "troubleshooting",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Topic::GettingStarted => "Getting Started",
            Topic::Account => "Account",
            Topic::Security => "Security",
            Topic::Api => "API",
            Topic::Troubleshooting => "Troubleshooting",
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Topic {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Topic::ALL
            .into_iter()
            .find(|t| t.id() == s)
            .ok_or_else(|| format!("Unknown topic: {s}"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqEntry {
    pub title: String,
    pub content: String,
}

impl FaqEntry {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self { title: title.into(), content: content.into() }
    }
}
