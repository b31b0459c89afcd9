use std::sync::LazyLock;

use regex::Regex;

const MAX_VISIBLE_CHARS: usize = 200;

static SECRET_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)(?P<key>bearer |api_key=|password=|secret=|token=)[^\s&"']+|sk-[A-Za-z0-9_-]{8,}"#)
        .unwrap()
});

/// Shortens extracted document text or model output for log lines and masks
/// anything that looks like a credential.
pub fn sanitize_for_log(text: &str) -> String {
    let trimmed = text.trim();

    if trimmed.is_empty() {
        return String::from("[EMPTY]");
    }

    let total_chars = trimmed.chars().count();
    let visible = if total_chars > MAX_VISIBLE_CHARS {
        let cut: String = trimmed.chars().take(MAX_VISIBLE_CHARS).collect();
        format!("{cut}... ({total_chars} chars total)")
    } else {
        trimmed.to_string()
    };

    SECRET_PATTERN
        .replace_all(&visible, |caps: &regex::Captures| match caps.name("key") {
            Some(key) => format!("{}[REDACTED]", key.as_str()),
            None => "[REDACTED]".to_string(),
        })
        .into_owned()
}
