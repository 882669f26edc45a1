use std::sync::LazyLock;

use regex::Regex;

pub const EMPTY_INPUT_FEEDBACK: &str = "Please enter a question before sending.";
pub const MASKED_FEEDBACK: &str = "Note: Certain words were masked for safety.";
pub const MASK_TOKEN: &str = "****";

const BANNED_WORDS: [&str; 3] = ["badword", "curse", "offensive"];

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

static BANNED: LazyLock<Regex> = LazyLock::new(|| {
    let pattern = format!(r"(?i)\b(?:{})\b", BANNED_WORDS.join("|"));
    Regex::new(&pattern).expect("valid regex")
});

/// Outcome of cleaning raw user input.
///
/// `cleaned` is `None` when the message must not be sent. `feedback` carries
/// a user-facing note in both the rejected and the masked case.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InputFilter {
    pub cleaned: Option<String>,
    pub feedback: Option<String>,
}

impl InputFilter {
    fn rejected() -> Self {
        Self { cleaned: None, feedback: Some(EMPTY_INPUT_FEEDBACK.to_string()) }
    }
}

/// Strips angle brackets, normalizes whitespace and masks banned words.
/// Masking never blocks a message.
pub fn filter_input(raw: &str) -> InputFilter {
    let stripped: String = raw.chars().filter(|c| !matches!(c, '<' | '>')).collect();
    let normalized = WHITESPACE.replace_all(stripped.trim(), " ");
    if normalized.is_empty() {
        return InputFilter::rejected();
    }

    let masked = BANNED.replace_all(&normalized, MASK_TOKEN);
    let was_masked = masked != normalized;

    InputFilter {
        cleaned: Some(masked.into_owned()),
        feedback: was_masked.then(|| MASKED_FEEDBACK.to_string()),
    }
}
