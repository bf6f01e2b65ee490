//! # Reference Loader
//!
//! Answer keys come from two shapes of source:
//! - [`sheet`]: a tabular export with one row per assignment and `answerK` columns.
//! - [`document`]: the answers dictionary, where each assignment maps to a document whose
//!   `answers` may be split into `teil` groups.
//!
//! Both implement [`ReferenceSource`] and produce a [`ReferenceEntry`] keyed by global index.

pub mod document;
pub mod sheet;

use crate::error::MarkerError;
use crate::traits::reference_source::ReferenceSource;
use crate::types::ReferenceEntry;
use serde_json::Value;
use tracing::{debug, info};

pub use document::{AnswersDictionary, DocumentParser};
pub use sheet::{SheetRowParser, SheetTable};

/// Looks up `assignment_id` in `source`.
///
/// An unknown id gives an empty entry; only unreadable sources are errors.
pub fn load_reference<S: ReferenceSource + ?Sized>(
    source: &S,
    assignment_id: &str,
) -> Result<ReferenceEntry, MarkerError> {
    let entry = source.reference(assignment_id)?;
    if entry.is_empty() {
        info!(assignment_id, "no reference answers found");
    } else {
        debug!(assignment_id, answers = entry.len(), "loaded reference");
    }
    Ok(entry)
}

/// Natural-sorted assignment ids known to `source`.
pub fn list_assignments<S: ReferenceSource + ?Sized>(source: &S) -> Result<Vec<String>, MarkerError> {
    source.assignments()
}

/// Text of a reference cell, or `None` when the cell holds no answer.
///
/// Numbers and booleans are written out; `nan` and `none` count as blank.
pub(crate) fn answer_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return None,
    };
    if text.is_empty() || text.eq_ignore_ascii_case("nan") || text.eq_ignore_ascii_case("none") {
        None
    } else {
        Some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use std::path::PathBuf;

    fn test_file(rel: &str) -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("src/test_files").join(rel)
    }

    #[test]
    fn test_list_assignments_through_both_sources() {
        let dict = AnswersDictionary::load(&test_file("reference/answers_dictionary.json")).unwrap();
        assert_eq!(
            list_assignments(&dict).unwrap(),
            vec!["A1 Hören 1.1", "A1 Lesen 2.1", "A1 Lesen 10.1", "A1 Schreiben 1.1"]
        );

        let records: Value = serde_json::from_str(
            &fs::read_to_string(test_file("reference/sheet_records.json")).unwrap(),
        )
        .unwrap();
        let sheet = SheetTable::from_records(&records).unwrap();
        assert_eq!(list_assignments(&sheet).unwrap(), vec!["A1 2.1", "A1 2.2", "A1 10.1"]);

        let no_ids = SheetTable::new(vec!["answer1".into()], vec![vec!["B".into()]]);
        assert!(matches!(list_assignments(&no_ids), Err(MarkerError::MissingColumn(_))));
    }

    #[test]
    fn test_answer_text() {
        assert_eq!(answer_text(&json!("  B ")), Some("B".to_string()));
        assert_eq!(answer_text(&json!(3)), Some("3".to_string()));
        assert_eq!(answer_text(&json!(true)), Some("true".to_string()));
        assert_eq!(answer_text(&json!("NaN")), None);
        assert_eq!(answer_text(&json!("None")), None);
        assert_eq!(answer_text(&json!("   ")), None);
        assert_eq!(answer_text(&json!(null)), None);
        assert_eq!(answer_text(&json!({"a": 1})), None);
        assert_eq!(answer_text(&json!(["A"])), None);
    }
}
