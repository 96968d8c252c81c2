//! Structured-record extraction from free-form narrator replies.
//!
//! The model is asked for a bare JSON object but routinely wraps it in
//! prose, code fences, or stray line breaks. Recovery is best-effort
//! text slicing, not a grammar: take the span from the first `{` to the
//! last `}` and try to parse it, once as-is and once with line breaks
//! stripped. The greedy span can cross several brace pairs if the reply
//! contains more than one JSON-like fragment.

use serde_json::Value;

use fabula_types::error::ExtractionError;
use fabula_types::story::StoryTurn;

/// Recover a [`StoryTurn`] from raw model output.
///
/// Fails with [`ExtractionError::NoJsonObject`] when no `{...}` span
/// exists, and with [`ExtractionError::MalformedReply`] when the span
/// does not parse (even after the cleanup retry) or parses to a value
/// without a `text` field. A missing `options` field is tolerated.
pub fn extract_story_turn(raw: &str) -> Result<StoryTurn, ExtractionError> {
    let start = raw.find('{').ok_or(ExtractionError::NoJsonObject)?;
    let end = raw.rfind('}').ok_or(ExtractionError::NoJsonObject)?;
    if end < start {
        return Err(ExtractionError::NoJsonObject);
    }
    let candidate = &raw[start..=end];

    let value: Value = match serde_json::from_str(candidate) {
        Ok(value) => value,
        Err(_) => {
            // Literal line breaks inside string values are the common
            // failure; strip them and retry once.
            let cleaned: String = candidate
                .chars()
                .filter(|c| *c != '\n' && *c != '\r')
                .collect();
            serde_json::from_str(&cleaned).map_err(|_| ExtractionError::MalformedReply)?
        }
    };

    if value.get("text").is_none() {
        return Err(ExtractionError::MalformedReply);
    }

    serde_json::from_value(value).map_err(|_| ExtractionError::MalformedReply)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_object_surrounded_by_noise() {
        let raw = r#"noise {"text":"ok","options":["a","b","c"]} trailing"#;
        let turn = extract_story_turn(raw).unwrap();
        assert_eq!(turn.text, "ok");
        assert_eq!(
            turn.options,
            Some(vec!["a".to_string(), "b".to_string(), "c".to_string()])
        );
    }

    #[test]
    fn test_no_braces_fails() {
        let err = extract_story_turn("no braces here").unwrap_err();
        assert!(matches!(err, ExtractionError::NoJsonObject));
    }

    #[test]
    fn test_closing_brace_before_opening_fails() {
        let err = extract_story_turn("} and later {").unwrap_err();
        assert!(matches!(err, ExtractionError::NoJsonObject));
    }

    #[test]
    fn test_line_breaks_inside_strings_recover_on_retry() {
        let raw = "{\"text\":\"a hall\nopens up\",\"options\":[\"go\",\"stay\",\"look\"]}";
        let turn = extract_story_turn(raw).unwrap();
        assert_eq!(turn.text, "a hallopens up");
    }

    #[test]
    fn test_multiline_object_parses() {
        let raw = "Here you go:\n{\n  \"text\": \"ok\",\n  \"options\": [\"a\", \"b\", \"c\"]\n}\nEnjoy!";
        let turn = extract_story_turn(raw).unwrap();
        assert_eq!(turn.text, "ok");
    }

    #[test]
    fn test_missing_text_field_fails() {
        let err = extract_story_turn(r#"{"options":["a","b","c"]}"#).unwrap_err();
        assert!(matches!(err, ExtractionError::MalformedReply));
    }

    #[test]
    fn test_missing_options_tolerated() {
        let turn = extract_story_turn(r#"{"text":"ok"}"#).unwrap();
        assert_eq!(turn.text, "ok");
        assert!(turn.options.is_none());
    }

    #[test]
    fn test_unparseable_span_fails() {
        let err = extract_story_turn("{definitely not json}").unwrap_err();
        assert!(matches!(err, ExtractionError::MalformedReply));
    }

    #[test]
    fn test_greedy_span_crosses_multiple_objects() {
        // Two complete objects: the span runs from the first `{` to the
        // LAST `}`, which is not valid JSON. The heuristic is greedy by
        // construction, so this fails rather than picking either object.
        let raw = r#"{"text":"one"} {"text":"two"}"#;
        let err = extract_story_turn(raw).unwrap_err();
        assert!(matches!(err, ExtractionError::MalformedReply));
    }
}
