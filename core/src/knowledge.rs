//! Static reference data: knowledge snippets for mock retrieval and the FAQ
//! catalog shown next to the chat. Both are keyed by topic id with a
//! guaranteed `default` bucket.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::WidgetError;
use crate::models::FaqEntry;

pub const DEFAULT_BUCKET: &str = "default";

/// Topic id → entries, falling back to the `default` bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TopicTable<T> {
    buckets: HashMap<String, Vec<T>>,
}

impl<T> TopicTable<T> {
    /// Entries for `topic` when it names a non-empty bucket, else the default bucket.
    pub fn bucket(&self, topic: Option<&str>) -> &[T] {
        topic
            .and_then(|t| self.buckets.get(t))
            .filter(|entries| !entries.is_empty())
            .or_else(|| self.buckets.get(DEFAULT_BUCKET))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    fn has_default(&self) -> bool {
        self.buckets.contains_key(DEFAULT_BUCKET)
    }
}

impl<T, S: Into<T>> FromIterator<(&'static str, Vec<S>)> for TopicTable<T> {
    fn from_iter<I: IntoIterator<Item = (&'static str, Vec<S>)>>(iter: I) -> Self {
        let buckets = iter
            .into_iter()
            .map(|(key, entries)| (key.to_string(), entries.into_iter().map(Into::into).collect()))
            .collect();
        Self { buckets }
    }
}

impl TopicTable<String> {
    /// Mock retrieval: keeps the entries containing the first word of the
    /// question, or the first two entries of the bucket when nothing matches.
    pub fn retrieve(&self, question: &str, topic: Option<&str>) -> Vec<String> {
        let bucket = self.bucket(topic);
        let lowered = question.to_lowercase();
        let token = lowered.split_whitespace().next().unwrap_or_default();

        let hits: Vec<String> = bucket
            .iter()
            .filter(|snippet| snippet.to_lowercase().contains(token))
            .cloned()
            .collect();

        if hits.is_empty() {
            bucket.iter().take(2).cloned().collect()
        } else {
            hits
        }
    }
}

/// Both reference tables, as loaded at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeTables {
    pub snippets: TopicTable<String>,
    pub faqs: TopicTable<FaqEntry>,
}

impl KnowledgeTables {
    /// Parses an override file. Each table must carry a `default` bucket.
    pub fn from_json(json: &str) -> Result<Self, WidgetError> {
        let tables: KnowledgeTables = serde_json::from_str(json)?;
        if !tables.snippets.has_default() {
            return Err(WidgetError::MissingDefault { table: "snippets" });
        }
        if !tables.faqs.has_default() {
            return Err(WidgetError::MissingDefault { table: "faqs" });
        }
        Ok(tables)
    }

    pub fn builtin() -> Self {
        Self { snippets: builtin_snippets(), faqs: builtin_faqs() }
    }
}

fn builtin_snippets() -> TopicTable<String> {
    [
        (
            "getting-started",
            vec![
                "Create a workspace from the dashboard, then invite teammates from Settings > Members.",
                "The onboarding checklist on the home page walks through connecting your first data source.",
                "Sample projects can be imported from the template gallery to explore features safely.",
            ],
        ),
        (
            "account",
            vec![
                "You can change your email address and display name under Profile settings.",
                "Billing owners can download invoices and update the payment method from the Billing page.",
                "Deleting an account is permanent after a 14-day grace period.",
            ],
        ),
        (
            "security",
            vec![
                "Multi-factor authentication (MFA) can be enforced for every member of a workspace.",
                "SSO is available via SAML 2.0 and OIDC on the Business plan.",
                "Role-based access control (RBAC) lets admins scope permissions per project.",
                "All data is encrypted in transit with TLS 1.2+ and at rest with AES-256.",
            ],
        ),
        (
            "api",
            vec![
                "Rate limits are 100 requests per minute per API key; exceeding them returns HTTP 429.",
                "API keys are created under Settings > Developer and can be rotated at any time.",
                "Send your key in the Authorization header as a Bearer token.",
                "List endpoints paginate with the cursor returned in each response.",
            ],
        ),
        (
            "troubleshooting",
            vec![
                "If the page does not load, clear your browser cache and disable extensions.",
                "Sync errors usually resolve after reconnecting the affected integration.",
                "Check the status page for ongoing incidents before opening a ticket.",
            ],
        ),
        (
            DEFAULT_BUCKET,
            vec![
                "Our help center covers setup, account management, security and the API.",
                "Pick a topic in the sidebar to get more focused answers.",
                "Support is available by email on weekdays from 9:00 to 17:00 UTC.",
            ],
        ),
    ]
    .into_iter()
    .collect()
}

fn builtin_faqs() -> TopicTable<FaqEntry> {
    [
        (
            "getting-started",
            vec![
                FaqEntry::new("How do I create a workspace?", "Open the dashboard and choose New workspace."),
                FaqEntry::new("How do I invite teammates?", "Go to Settings > Members and send an invite link."),
            ],
        ),
        (
            "account",
            vec![
                FaqEntry::new("How do I change my email?", "Update it under Profile settings and confirm the link we send."),
                FaqEntry::new("Where are my invoices?", "Billing owners can download invoices from the Billing page."),
            ],
        ),
        (
            "security",
            vec![
                FaqEntry::new("Do you support SSO?", "Yes, SAML 2.0 and OIDC are available on the Business plan."),
                FaqEntry::new("How do I enforce MFA?", "Admins can require MFA for all members in Security settings."),
            ],
        ),
        (
            "api",
            vec![
                FaqEntry::new("What are the rate limits?", "100 requests per minute per API key."),
                FaqEntry::new("How do I rotate an API key?", "Create a new key under Settings > Developer, then revoke the old one."),
            ],
        ),
        (
            "troubleshooting",
            vec![
                FaqEntry::new("The app will not load", "Clear the browser cache and disable extensions, then retry."),
                FaqEntry::new("My integration shows a sync error", "Reconnect the integration from the Integrations page."),
            ],
        ),
        (
            DEFAULT_BUCKET,
            vec![
                FaqEntry::new("How do I contact support?", "Email support on weekdays from 9:00 to 17:00 UTC."),
                FaqEntry::new("Where can I find the docs?", "The help center links to guides for every topic."),
            ],
        ),
    ]
    .into_iter()
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_or_missing_topic_falls_back_to_default() {
        let tables = KnowledgeTables::builtin();
        let default = tables.snippets.bucket(None);
        assert!(!default.is_empty());
        assert_eq!(tables.snippets.bucket(Some("unknown-id")), default);
        assert_eq!(tables.faqs.bucket(Some("nope")), tables.faqs.bucket(None));
    }

    #[test]
    fn empty_bucket_falls_back_to_default() {
        let table: TopicTable<String> =
            [("api", Vec::<&str>::new()), (DEFAULT_BUCKET, vec!["fallback"])].into_iter().collect();
        assert_eq!(table.bucket(Some("api")), ["fallback".to_string()]);
    }

    #[test]
    fn retrieval_keeps_entries_matching_first_token() {
        let tables = KnowledgeTables::builtin();
        let docs = tables.snippets.retrieve("Key rotation policy", Some("api"));
        assert!(!docs.is_empty());
        assert!(docs.iter().all(|d| d.to_lowercase().contains("key")));
        assert!(docs.iter().all(|d| tables.snippets.bucket(Some("api")).contains(d)));
    }

    #[test]
    fn retrieval_falls_back_to_first_two_entries() {
        let tables = KnowledgeTables::builtin();
        let bucket = tables.snippets.bucket(Some("api"));
        let docs = tables.snippets.retrieve("What are the rate limits?", Some("api"));
        assert_eq!(docs, bucket[..2].to_vec());
        assert!(docs[0].starts_with("Rate limits"));
    }

    #[test]
    fn empty_question_matches_every_entry() {
        let tables = KnowledgeTables::builtin();
        let docs = tables.snippets.retrieve("   ", Some("security"));
        assert_eq!(docs, tables.snippets.bucket(Some("security")).to_vec());
    }

    #[test]
    fn override_file_requires_default_buckets() {
        let json = r#"{"snippets":{"api":["x"]},"faqs":{"default":[]}}"#;
        assert!(matches!(
            KnowledgeTables::from_json(json),
            Err(WidgetError::MissingDefault { table: "snippets" })
        ));

        let json = r#"{"snippets":{"default":["x"]},"faqs":{"default":[{"title":"t","content":"c"}]}}"#;
        let tables = KnowledgeTables::from_json(json).unwrap();
        assert_eq!(tables.snippets.retrieve("anything", Some("api")), vec!["x".to_string()]);
    }
}
