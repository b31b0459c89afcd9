use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::domain::{AnalysisResult, raw_preview};

const REQUIRED_LIST_KEYS: [&str; 3] = ["dates", "medications", "actions"];

static CLOSED_FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^```[A-Za-z0-9_+-]*[ \t]*\r?\n?(?P<body>.*?)```").unwrap()
});

static OPEN_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^```[A-Za-z0-9_+-]*[ \t]*\r?\n?(?P<body>.*)$").unwrap());

/// Turns model output into an [`AnalysisResult`] with every required key present.
///
/// Never fails: unparseable content yields a degraded result whose `error`
/// describes the problem and whose `raw` holds a preview of `original_text`.
pub fn normalize(raw_content: &str, original_text: &str) -> AnalysisResult {
    let content = strip_code_fences(raw_content);

    let mut value: Value = match serde_json::from_str(content) {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!(error = %e, "Model returned content that is not valid JSON");
            return AnalysisResult::degraded(original_text, e.to_string());
        }
    };

    let Some(object) = value.as_object_mut() else {
        tracing::warn!("Model returned JSON that is not an object");
        return AnalysisResult::degraded(original_text, "expected a JSON object");
    };

    for key in REQUIRED_LIST_KEYS {
        let missing = object.get(key).is_none_or(Value::is_null);
        if missing {
            object.insert(key.to_string(), Value::Array(Vec::new()));
        }
    }

    if object.get("raw").is_none_or(Value::is_null) {
        object.insert("raw".to_string(), Value::String(raw_preview(original_text)));
    }

    match serde_json::from_value(value) {
        Ok(result) => result,
        Err(e) => {
            tracing::warn!(error = %e, "Model JSON does not match the analysis shape");
            AnalysisResult::degraded(original_text, e.to_string())
        }
    }
}

/// Returns the body of a leading markdown code fence, with or without a
/// language tag. Anything after the closing fence is dropped. An unterminated
/// fence keeps everything after the opening line.
pub fn strip_code_fences(content: &str) -> &str {
    let trimmed = content.trim();
    if !trimmed.starts_with("```") {
        return trimmed;
    }

    CLOSED_FENCE
        .captures(trimmed)
        .or_else(|| OPEN_FENCE.captures(trimmed))
        .and_then(|c| c.name("body"))
        .map(|m| m.as_str().trim())
        .unwrap_or(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_language_tagged_fence() {
        let fenced = "```json\n{\"dates\": []}\n```";
        assert_eq!(strip_code_fences(fenced), "{\"dates\": []}");
    }

    #[test]
    fn strips_bare_fence() {
        let fenced = "```\n{\"a\": 1}\n```\n";
        assert_eq!(strip_code_fences(fenced), "{\"a\": 1}");
    }

    #[test]
    fn strips_single_line_fence() {
        assert_eq!(strip_code_fences("```json{\"a\": 1}```"), "{\"a\": 1}");
    }

    #[test]
    fn leaves_unfenced_content_alone() {
        assert_eq!(strip_code_fences("  {\"a\": 1} "), "{\"a\": 1}");
    }

    #[test]
    fn drops_prose_after_closing_fence() {
        let fenced = "```json\n{\"a\": 1}\n```\nHinweis: bitte prüfen.";
        assert_eq!(strip_code_fences(fenced), "{\"a\": 1}");
    }

    #[test]
    fn tolerates_missing_closing_fence() {
        assert_eq!(strip_code_fences("```json\n{\"a\": 1}"), "{\"a\": 1}");
    }
}
