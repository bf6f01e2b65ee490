//!
//! Grouped Reference Documents
//!
//! The answers dictionary maps each assignment id to a document such as
//!
//! ```json
//! {
//!   "format": "objective",
//!   "answer_url": "https://example.org/key.pdf",
//!   "answers": { "teil1": { "1": "A", "2": "B" }, "teil2": { "1": "D" } }
//! }
//! ```
//!
//! Teil groups are flattened into one global numbering: groups in natural order (`teil2` before
//! `teil10`), entries in natural key order inside each group, and every kept entry takes the next
//! index starting at 1. Local numbers inside a group are discarded. Without groups, the number in
//! each answer key is used as-is.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use super::answer_text;
use crate::error::MarkerError;
use crate::traits::parser::Parser;
use crate::traits::reference_source::ReferenceSource;
use crate::types::{AnswerFormat, ReferenceEntry};
use crate::utilities::file_loader::{first_existing, load_json_file};
use crate::utilities::natural_order::{first_number, natural_cmp};

fn is_teil_key(key: &str) -> bool {
    key.get(..4).is_some_and(|p| p.eq_ignore_ascii_case("teil"))
}

/// The answer-bearing part of a document: its `answers` object, or the `answer*` keys at the top.
fn answer_fields(doc: &Map<String, Value>) -> Vec<(&str, &Value)> {
    if let Some(Value::Object(answers)) = doc.get("answers") {
        return answers.iter().map(|(k, v)| (k.as_str(), v)).collect();
    }
    doc.iter()
        .filter(|(k, _)| {
            let lower = k.to_lowercase();
            lower.starts_with("answer") && lower != "answer_url" && lower != "answers"
        })
        .map(|(k, v)| (k.as_str(), v))
        .collect()
}

fn flatten_groups(
    assignment_id: &str,
    mut groups: Vec<(&str, &Map<String, Value>)>,
) -> BTreeMap<u32, String> {
    groups.sort_by(|a, b| natural_cmp(a.0, b.0));

    let mut answers = BTreeMap::new();
    let mut next: u32 = 1;
    for (teil, group) in groups {
        let mut entries: Vec<(&String, &Value)> = group.iter().collect();
        entries.sort_by(|a, b| natural_cmp(a.0, b.0));
        for (key, value) in entries {
            match answer_text(value) {
                Some(text) => {
                    answers.insert(next, text);
                    next += 1;
                }
                None => debug!(assignment_id, teil, key = %key, "skipping blank reference entry"),
            }
        }
    }
    answers
}

fn number_by_key(assignment_id: &str, mut fields: Vec<(&str, &Value)>) -> BTreeMap<u32, String> {
    fields.sort_by(|a, b| natural_cmp(a.0, b.0));

    let mut answers = BTreeMap::new();
    for (key, value) in fields {
        let Some(index) = first_number(key).filter(|n| *n > 0) else {
            warn!(assignment_id, key, "reference key has no question number");
            continue;
        };
        let Some(text) = answer_text(value) else {
            continue;
        };
        if answers.contains_key(&index) {
            warn!(assignment_id, key, index, "duplicate reference index ignored");
            continue;
        }
        answers.insert(index, text);
    }
    answers
}

/// Parses one `(assignment_id, document)` pair into a [`ReferenceEntry`].
pub struct DocumentParser;

impl<'a> Parser<(&'a str, &'a Value), ReferenceEntry> for DocumentParser {
    fn parse(&self, input: (&'a str, &'a Value)) -> Result<ReferenceEntry, MarkerError> {
        let (assignment_id, doc) = input;
        let doc = doc.as_object().ok_or_else(|| {
            MarkerError::InvalidJson(format!("Reference for '{assignment_id}' must be an object"))
        })?;

        let fields = answer_fields(doc);
        let groups: Vec<(&str, &Map<String, Value>)> = fields
            .iter()
            .filter(|(k, _)| is_teil_key(k))
            .filter_map(|(k, v)| v.as_object().map(|g| (*k, g)))
            .collect();

        let answers = if groups.is_empty() {
            number_by_key(assignment_id, fields)
        } else {
            let loose = fields.len() - groups.len();
            if loose > 0 {
                warn!(assignment_id, loose, "ignoring answers outside teil groups");
            }
            flatten_groups(assignment_id, groups)
        };

        let answer_url = doc
            .get("answer_url")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .map(str::to_string);

        let format = doc
            .get("format")
            .and_then(Value::as_str)
            .map(AnswerFormat::from_tag)
            .unwrap_or_default();

        Ok(ReferenceEntry {
            assignment_id: assignment_id.to_string(),
            format,
            answers,
            answer_url,
        })
    }
}

/// The answers dictionary: assignment id to reference document.
#[derive(Debug, Clone, Default)]
pub struct AnswersDictionary {
    entries: Map<String, Value>,
}

impl AnswersDictionary {
    pub fn new(entries: Map<String, Value>) -> Self {
        Self { entries }
    }

    /// Wraps an already-parsed dictionary. The top level must be an object.
    pub fn from_value(value: Value) -> Result<Self, MarkerError> {
        match value {
            Value::Object(entries) => Ok(Self::new(entries)),
            _ => Err(MarkerError::InvalidJson(
                "Answers dictionary must be an object".to_string(),
            )),
        }
    }

    pub fn load(path: &Path) -> Result<Self, MarkerError> {
        let dict = Self::from_value(load_json_file(path)?)?;
        info!(path = %path.display(), assignments = dict.len(), "loaded answers dictionary");
        Ok(dict)
    }

    /// Loads the first candidate that exists. No candidate on disk means an empty dictionary.
    pub fn load_first_existing(candidates: &[PathBuf]) -> Result<Self, MarkerError> {
        match first_existing(candidates) {
            Some(path) => Self::load(path),
            None => {
                warn!(?candidates, "no answers dictionary found");
                Ok(Self::default())
            }
        }
    }

    /// Loads from the configured locations (see `util::paths::answers_dictionary_candidates`).
    pub fn load_default() -> Result<Self, MarkerError> {
        Self::load_first_existing(&util::paths::answers_dictionary_candidates())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ReferenceSource for AnswersDictionary {
    fn assignments(&self) -> Result<Vec<String>, MarkerError> {
        let mut ids: Vec<String> = self.entries.keys().cloned().collect();
        ids.sort_by(|a, b| natural_cmp(a, b));
        Ok(ids)
    }

    fn reference(&self, assignment_id: &str) -> Result<ReferenceEntry, MarkerError> {
        match self.entries.get(assignment_id) {
            Some(doc) => DocumentParser.parse((assignment_id, doc)),
            None => Ok(ReferenceEntry::empty(assignment_id)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use serial_test::serial;
    use std::fs;
    use tempfile::TempDir;
    use util::config::AppConfig;
    use util::test_helpers::setup_test_storage_root;

    fn fixture_path() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("src/test_files/reference/answers_dictionary.json")
    }

    fn answers(entry: &ReferenceEntry) -> Vec<(u32, &str)> {
        entry.answers.iter().map(|(k, v)| (*k, v.as_str())).collect()
    }

    #[test]
    fn test_teil_groups_flatten_in_natural_order() {
        let doc = json!({
            "answers": {
                "teil1": { "1": "A", "2": "B" },
                "teil10": { "1": "C" },
                "teil2": { "1": "D" }
            }
        });
        let entry = DocumentParser.parse(("A1 1.1", &doc)).unwrap();
        assert_eq!(answers(&entry), vec![(1, "A"), (2, "B"), (3, "D"), (4, "C")]);
        assert_eq!(entry.format, AnswerFormat::Essay);
        assert_eq!(entry.answer_url, None);
    }

    #[test]
    fn test_group_entries_use_natural_key_order_and_skip_blanks() {
        let doc = json!({
            "answers": {
                "Teil1": { "10": "J", "2": "B", "1": "A", "3": "nan", "4": null },
                "teil2": { "1": 5, "2": false, "3": { "nested": "x" } }
            }
        });
        let entry = DocumentParser.parse(("id", &doc)).unwrap();
        assert_eq!(
            answers(&entry),
            vec![(1, "A"), (2, "B"), (3, "J"), (4, "5"), (5, "false")]
        );
    }

    #[test]
    fn test_plain_answers_use_key_numbers() {
        let doc = json!({
            "format": "Objective",
            "answer_url": "  https://example.org/key.pdf ",
            "answers": { "q3": "C", "q1": "A", "intro": "x", "q0": "Z" }
        });
        let entry = DocumentParser.parse(("id", &doc)).unwrap();
        assert_eq!(answers(&entry), vec![(1, "A"), (3, "C")]);
        assert!(entry.is_objective());
        assert_eq!(entry.answer_url.as_deref(), Some("https://example.org/key.pdf"));
    }

    #[test]
    fn test_duplicate_numbers_keep_first_in_natural_order() {
        let doc = json!({ "answers": { "q1b": "second", "q1a": "first" } });
        let entry = DocumentParser.parse(("id", &doc)).unwrap();
        assert_eq!(answers(&entry), vec![(1, "first")]);
    }

    #[test]
    fn test_top_level_answer_keys() {
        let doc = json!({ "answer1": "B", "answer2": "None", "answer_url": "u", "title": "x" });
        let entry = DocumentParser.parse(("id", &doc)).unwrap();
        assert_eq!(answers(&entry), vec![(1, "B")]);
        assert_eq!(entry.answer_url.as_deref(), Some("u"));
    }

    #[test]
    fn test_non_object_document_is_invalid() {
        let err = DocumentParser.parse(("id", &json!("1. A"))).unwrap_err();
        assert!(matches!(err, MarkerError::InvalidJson(_)));
    }

    #[test]
    fn test_dictionary_lookup_and_listing() {
        let dict = AnswersDictionary::load(&fixture_path()).unwrap();
        assert_eq!(
            dict.assignments().unwrap(),
            vec!["A1 Hören 1.1", "A1 Lesen 2.1", "A1 Lesen 10.1", "A1 Schreiben 1.1"]
        );

        let entry = dict.reference("A1 Hören 1.1").unwrap();
        assert_eq!(
            answers(&entry),
            vec![(1, "B"), (2, "A"), (3, "Richtig"), (4, "Falsch"), (5, "größer")]
        );
        assert!(entry.is_objective());

        let unknown = dict.reference("B2 9.9").unwrap();
        assert!(unknown.is_empty());
        assert_eq!(unknown.assignment_id, "B2 9.9");
    }

    #[test]
    fn test_load_first_existing() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.json");
        let empty = AnswersDictionary::load_first_existing(&[missing.clone()]).unwrap();
        assert!(empty.is_empty());

        let present = dir.path().join("answers_dictionary.json");
        fs::write(&present, r#"{"A1 0.1": {"answers": {"1": "A"}}}"#).unwrap();
        let dict = AnswersDictionary::load_first_existing(&[missing, present]).unwrap();
        assert_eq!(dict.len(), 1);
    }

    #[test]
    fn test_dictionary_must_be_object() {
        let err = AnswersDictionary::from_value(json!([1, 2])).unwrap_err();
        assert!(matches!(err, MarkerError::InvalidJson(_)));
    }

    #[test]
    #[serial]
    fn test_load_default_uses_storage_root() {
        AppConfig::reset();
        let root = setup_test_storage_root();
        let dict = AnswersDictionary::load_default().unwrap();
        assert!(dict.is_empty());

        let data = root.path().join("data");
        fs::create_dir_all(&data).unwrap();
        fs::copy(fixture_path(), data.join("answers_dictionary.json")).unwrap();
        let dict = AnswersDictionary::load_default().unwrap();
        assert_eq!(dict.len(), 4);
        AppConfig::reset();
    }

    #[test]
    #[serial]
    fn test_load_default_prefers_configured_path() {
        AppConfig::reset();
        let _root = setup_test_storage_root();
        AppConfig::set_answers_dictionary_path(fixture_path().to_string_lossy().to_string());
        let dict = AnswersDictionary::load_default().unwrap();
        assert!(!dict.reference("A1 Lesen 10.1").unwrap().is_empty());
        AppConfig::reset();
    }
}
