//! FAQ chat pipeline shared by the browser widget and the dev backend:
//! input sanitation, mock retrieval and synthesis, the topic bridge and the
//! chat panel state machine.

pub mod bridge;
pub mod config;
pub mod delay;
pub mod error;
pub mod filter_view;
pub mod knowledge;
pub mod models;
pub mod panel;
pub mod sanitize;
pub mod service;
pub mod synthesis;
pub mod wire;

pub use bridge::{TopicBridge, TopicSubscription};
pub use config::{LatencyProfile, WidgetConfig};
pub use delay::Delay;
pub use error::WidgetError;
pub use knowledge::KnowledgeTables;
pub use models::{ChatMessage, FaqEntry, Role, Topic};
pub use panel::{ChatPanel, PanelState, SubmitOutcome};
pub use service::{AnswerService, MockRagService};
