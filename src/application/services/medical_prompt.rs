pub const SYSTEM_PROMPT: &str = r#"Du bist ein medizinischer Assistent für Pflegedokumentation.
Extrahiere aus dem Text strukturierte Daten im JSON-Format:

{
  "dates": ["ISO-Datum", ...],
  "medications": [{"name": "string", "dose": "string"}, ...],
  "actions": [{"title": "string", "description": "string", "date": "ISO-Datum"}, ...],
  "followUps": [{"title": "string", "date": "ISO-Datum"}, ...]
}

REGELN:
1. Für jedes Medikament: erstelle action "Rezept für [Name] nachbestellen"
2. Für jeden Termin: erstelle action "Termin am [Datum] wahrnehmen"
3. Für Kontrollen/Nachsorge: erstelle action mit konkretem Titel
4. Datum im Format YYYY-MM-DD
5. Wenn keine Aktionen ableitbar: nutze "Dokument manuell prüfen"
6. "followUps" ist optional und nur für ausdrücklich genannte Nachsorgetermine

Beispiel Input: "Patient nimmt Aspirin 100mg. Kontrolle in 2 Wochen."
Beispiel Output:
{
  "dates": ["2025-12-07"],
  "medications": [{"name": "Aspirin", "dose": "100mg"}],
  "actions": [
    {"title": "Rezept für Aspirin nachbestellen", "description": "Bestand prüfen", "date": "2025-11-30"},
    {"title": "Kontrolltermin wahrnehmen", "description": "In 2 Wochen", "date": "2025-12-07"}
  ]
}

Gib NUR JSON zurück, keine Erklärungen."#;

const USER_PROMPT_PREFIX: &str = "Extrahiere Daten aus folgendem Text:\n\n";

/// User message for `text`, cut to at most `max_chars` characters.
pub fn build_user_prompt(text: &str, max_chars: usize) -> String {
    let truncated = truncate_chars(text, max_chars);
    format!("{USER_PROMPT_PREFIX}{truncated}")
}

fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_short_text_intact() {
        let prompt = build_user_prompt("Aspirin 100mg", 100);
        assert!(prompt.ends_with("Aspirin 100mg"));
    }

    #[test]
    fn truncates_on_char_boundary() {
        let prompt = build_user_prompt("Übelkeit", 2);
        assert!(prompt.ends_with("Üb"));
        assert!(!prompt.contains("elkeit"));
    }

    #[test]
    fn system_prompt_describes_required_fields() {
        for key in ["\"dates\"", "\"medications\"", "\"actions\"", "YYYY-MM-DD"] {
            assert!(SYSTEM_PROMPT.contains(key), "missing {key}");
        }
    }
}
