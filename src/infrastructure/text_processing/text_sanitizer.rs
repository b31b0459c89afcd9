use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

// Only rejoins when the continuation is lowercase: "Kon-\ntrolle" but not "Vitamin-\nD".
static SOFT_HYPHEN_BREAK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?P<prefix>\p{L})-[ \t]*\r?\n[ \t]*(?P<suffix>\p{Ll})").unwrap()
});

/// Cleans a page of extracted PDF text: NFC-composes umlauts, drops control
/// characters, rejoins words split across lines and collapses whitespace while
/// keeping paragraph breaks.
pub fn sanitize_extracted_text(raw: &str) -> String {
    let composed: String = raw
        .nfc()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect();
    let rejoined = SOFT_HYPHEN_BREAK.replace_all(&composed, "$prefix$suffix");

    let mut result = String::with_capacity(rejoined.len());
    let mut pending_break: Option<&str> = None;

    for line in rejoined.lines() {
        let trimmed = line.trim();

        if trimmed.is_empty() {
            if !result.is_empty() {
                pending_break = Some("\n\n");
            }
            continue;
        }

        if let Some(separator) = pending_break.take() {
            result.push_str(separator);
        } else if !result.is_empty() {
            result.push('\n');
        }
        collapse_internal_whitespace(trimmed, &mut result);
    }

    result
}

fn collapse_internal_whitespace(line: &str, out: &mut String) {
    let mut prev_was_space = false;

    for ch in line.chars() {
        if ch.is_whitespace() {
            if !prev_was_space {
                out.push(' ');
                prev_was_space = true;
            }
        } else {
            out.push(ch);
            prev_was_space = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejoins_lowercase_hyphenation() {
        assert_eq!(
            sanitize_extracted_text("Kon-\ntrolle in 2 Wochen"),
            "Kontrolle in 2 Wochen"
        );
    }

    #[test]
    fn keeps_hyphen_before_capitalised_word() {
        assert_eq!(sanitize_extracted_text("Vitamin-\nD3"), "Vitamin-\nD3");
    }

    #[test]
    fn composes_decomposed_umlauts() {
        assert_eq!(sanitize_extracted_text("U\u{0308}belkeit"), "Übelkeit");
    }

    #[test]
    fn collapses_whitespace_and_keeps_paragraphs() {
        let raw = "  Patient   nimmt\tAspirin \n\n\n 100mg. \n";
        assert_eq!(sanitize_extracted_text(raw), "Patient nimmt Aspirin\n\n100mg.");
    }

    #[test]
    fn drops_control_characters() {
        assert_eq!(sanitize_extracted_text("Asp\u{0}irin"), "Aspirin");
    }

    #[test]
    fn blank_input_is_empty() {
        assert_eq!(sanitize_extracted_text(" \n \r\n "), "");
    }
}
