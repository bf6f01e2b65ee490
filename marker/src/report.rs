//! # Score Record Module
//!
//! The shape a marking result takes when it is written to a results sheet or store.
//!
//! ## JSON Output Example
//!
//! ```json
//! {
//!   "assignment": "A1 Hören 1.1",
//!   "score": 80,
//!   "feedback": "Good effort for A1 objectives—you answered 4 of 5 correctly. ...",
//!   "correct": 4,
//!   "total": 5,
//!   "wrong": [ { "index": 5, "expected": "größer", "given": "grosser" } ],
//!   "link": "https://example.org/keys/a1-hoeren-1-1.pdf"
//! }
//! ```
//!
//! ## Design Notes
//!
//! - There are no timestamps or record ids here. The store that persists the record owns those.
//! - `link` releases the answer key only once the student reaches the pass mark.

use serde::Serialize;

use crate::types::{ReferenceEntry, ScoreResult, WrongItem};

/// One persisted marking outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreRecord {
    pub assignment: String,
    /// Percent, `0..=100`.
    pub score: u32,
    pub feedback: String,
    pub correct: u32,
    pub total: u32,
    pub wrong: Vec<WrongItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl ScoreRecord {
    /// Builds the record for `result`, attaching the key's `answer_url` when
    /// `result.percent >= pass_mark`.
    pub fn new(result: &ScoreResult, reference: &ReferenceEntry, pass_mark: u32) -> Self {
        let link = if result.percent >= pass_mark {
            reference.answer_url.clone()
        } else {
            None
        };

        ScoreRecord {
            assignment: reference.assignment_id.clone(),
            score: result.percent,
            feedback: result.feedback.clone(),
            correct: result.correct,
            total: result.total,
            wrong: result.wrong.clone(),
            link,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn reference() -> ReferenceEntry {
        let mut entry = ReferenceEntry::empty("A1 0.1");
        entry.answers.insert(1, "A".into());
        entry.answers.insert(2, "B".into());
        entry.answer_url = Some("https://example.org/key.pdf".into());
        entry
    }

    fn result(percent: u32) -> ScoreResult {
        ScoreResult {
            correct: 1,
            total: 2,
            percent,
            wrong: vec![WrongItem::new(2, "B", "")],
            feedback: "Check 2.".into(),
        }
    }

    #[test]
    fn test_record_serialization() {
        let record = ScoreRecord::new(&result(50), &reference(), 60);
        let value: Value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["assignment"], "A1 0.1");
        assert_eq!(value["score"], 50);
        assert_eq!(value["correct"], 1);
        assert_eq!(value["total"], 2);
        assert_eq!(value["wrong"][0]["expected"], "B");
        assert_eq!(value["wrong"][0]["given"], "");
        assert_eq!(value["feedback"], "Check 2.");
        assert!(value.get("link").is_none());
    }

    #[test]
    fn test_link_released_at_pass_mark() {
        let record = ScoreRecord::new(&result(60), &reference(), 60);
        assert_eq!(record.link.as_deref(), Some("https://example.org/key.pdf"));

        let record = ScoreRecord::new(&result(59), &reference(), 60);
        assert_eq!(record.link, None);
    }
}
