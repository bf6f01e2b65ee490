//!
//! Submission Parser
//!
//! Stored drafts arrive as loosely shaped JSON objects written by several app versions. This
//! parser pulls out the answer body and the optional note a student left for the teacher, so the
//! marking entry points only ever see a [`StudentSubmission`].

use crate::error::MarkerError;
use crate::traits::parser::Parser;
use crate::types::StudentSubmission;
use serde_json::{Map, Value};

/// Keys that may hold the answer body, most specific first.
const TEXT_KEYS: [&str; 6] = ["content", "text", "answer", "body", "draft", "message"];

/// Keys that may hold the student's note.
const NOTE_KEYS: [&str; 5] = ["student_note", "studentnote", "student_notes", "note", "notes"];

/// Keys read from objects nested inside a text field.
const NESTED_TEXT_KEYS: [&str; 3] = ["text", "content", "value"];

fn non_empty(s: &str) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn nested_text(obj: &Map<String, Value>) -> Option<String> {
    NESTED_TEXT_KEYS
        .iter()
        .filter_map(|k| obj.get(*k).and_then(Value::as_str))
        .find_map(non_empty)
}

fn text_from_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => non_empty(s),
        Value::Array(items) => {
            let parts: Vec<String> = items
                .iter()
                .filter_map(|item| match item {
                    Value::String(s) => non_empty(s),
                    Value::Object(obj) => nested_text(obj),
                    _ => None,
                })
                .collect();
            non_empty(&parts.join("\n"))
        }
        Value::Object(obj) => nested_text(obj),
        _ => None,
    }
}

fn note_from_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => non_empty(s),
        other => non_empty(&other.to_string()),
    }
}

/// Parses a stored draft document into a [`StudentSubmission`].
pub struct SubmissionParser;

impl<'a> Parser<&'a Value, StudentSubmission> for SubmissionParser {
    fn parse(&self, input: &'a Value) -> Result<StudentSubmission, MarkerError> {
        let obj = input.as_object().ok_or_else(|| {
            MarkerError::InvalidJson("Submission document must be an object".to_string())
        })?;

        let text = TEXT_KEYS
            .iter()
            .filter_map(|k| obj.get(*k))
            .find_map(text_from_value)
            .unwrap_or_else(|| {
                obj.iter()
                    .filter(|(k, _)| !NOTE_KEYS.contains(&k.as_str()))
                    .filter_map(|(_, v)| v.as_str().and_then(non_empty))
                    .collect::<Vec<_>>()
                    .join("\n")
            });

        let note = NOTE_KEYS
            .iter()
            .filter_map(|k| obj.get(*k))
            .find_map(note_from_value);

        Ok(StudentSubmission { text, note })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use std::path::PathBuf;

    fn fixture(name: &str) -> Value {
        let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("src/test_files/submissions")
            .join(name);
        serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
    }

    #[test]
    fn test_preferred_key_wins() {
        let doc = json!({ "text": "2. B", "content": "  1. A  ", "title": "ignored" });
        let sub = SubmissionParser.parse(&doc).unwrap();
        assert_eq!(sub.text, "1. A");
        assert_eq!(sub.note, None);
    }

    #[test]
    fn test_empty_preferred_key_is_skipped() {
        let doc = json!({ "content": "   ", "answer": "1. C" });
        assert_eq!(SubmissionParser.parse(&doc).unwrap().text, "1. C");
    }

    #[test]
    fn test_list_and_nested_objects() {
        let doc = json!({
            "draft": ["Teil 1", { "text": "1. B" }, { "value": "2. A" }, 7, { "other": "x" }]
        });
        assert_eq!(SubmissionParser.parse(&doc).unwrap().text, "Teil 1\n1. B\n2. A");

        let doc = json!({ "body": { "content": "1. Richtig" } });
        assert_eq!(SubmissionParser.parse(&doc).unwrap().text, "1. Richtig");
    }

    #[test]
    fn test_fallback_joins_top_level_strings() {
        let doc = json!({ "a": "1. B", "b": 3, "c": "2. D", "note": "bitte prüfen" });
        let sub = SubmissionParser.parse(&doc).unwrap();
        assert_eq!(sub.text, "1. B\n2. D");
        assert_eq!(sub.note.as_deref(), Some("bitte prüfen"));
    }

    #[test]
    fn test_note_is_stringified() {
        let doc = json!({ "content": "1. A", "student_note": null, "notes": 42 });
        assert_eq!(SubmissionParser.parse(&doc).unwrap().note.as_deref(), Some("42"));
    }

    #[test]
    fn test_non_object_is_rejected() {
        let err = SubmissionParser.parse(&json!(["1. A"])).unwrap_err();
        assert!(matches!(err, MarkerError::InvalidJson(_)));
    }

    #[test]
    fn test_stored_draft_fixture() {
        let sub = SubmissionParser.parse(&fixture("draft_teil.json")).unwrap();
        assert!(sub.text.starts_with("Teil 1"));
        assert_eq!(sub.note.as_deref(), Some("Teil 2 war schwer."));
    }
}
