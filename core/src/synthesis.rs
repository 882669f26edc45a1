//! Mock tool selection and answer synthesis.

const TOOL_RULES: [(&[&str], &str); 4] = [
    (&["billing", "invoice", "payment"], "billing.lookup"),
    (&["api", "key", "token", "rate"], "api.docs.search"),
    (&["security", "mfa", "sso", "rbac"], "security.policy.fetch"),
    (&["troubleshoot", "error", "issue"], "diagnostics.helper"),
];

pub const FALLBACK_TOOL: &str = "knowledge.search";

const CLOSING_LINE: &str =
    "If you need more details, feel free to ask or refine by selecting a topic.";

/// Picks the tool label for a question. Rules are checked in order and the
/// first one with a keyword contained in the question wins.
pub fn select_tool(question: &str) -> &'static str {
    let lowered = question.to_lowercase();
    TOOL_RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lowered.contains(k)))
        .map(|(_, tool)| *tool)
        .unwrap_or(FALLBACK_TOOL)
}

pub fn synthesize(tool: &str, snippets: &[String]) -> String {
    let bullets = snippets
        .iter()
        .map(|s| format!("- {s}"))
        .collect::<Vec<_>>()
        .join("\n");
    format!("Here's what I found using {tool}:\n{bullets}\n\n{CLOSING_LINE}")
}
