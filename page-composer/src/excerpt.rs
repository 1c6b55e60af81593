use once_cell::sync::Lazy;
use regex::Regex;

pub const DEFAULT_EXCERPT_LENGTH: usize = 150;

static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").unwrap());
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Plain text of an HTML fragment: every tag becomes a space, whitespace runs
/// collapse to one space, and the result is trimmed.
pub fn strip_tags(html: &str) -> String {
    let text = TAG.replace_all(html, " ");
    WHITESPACE.replace_all(&text, " ").trim().to_string()
}

/// Plain-text excerpt of at most `max_chars` characters, with `...` appended
/// only when something was cut off.
pub fn excerpt(html: &str, max_chars: usize) -> String {
    let text = strip_tags(html);
    if text.chars().count() <= max_chars {
        return text;
    }

    let truncated: String = text.chars().take(max_chars).collect();
    format!("{}...", truncated.trim_end())
}
