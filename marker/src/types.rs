//! # Types Module
//!
//! Value objects passed between the loader, parser, scorer and feedback stages. They are created
//! per marking call and never mutated afterwards.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Placeholder shown to teachers when an assignment has no usable key.
pub const NO_REFERENCE_TEXT: &str = "No reference answers found.";

/// What kind of work an assignment expects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnswerFormat {
    #[default]
    Essay,
    Objective,
}

impl AnswerFormat {
    /// Reads the free-form `format` cell/field. Anything other than `objective` is an essay.
    pub fn from_tag(tag: &str) -> Self {
        if tag.trim().eq_ignore_ascii_case("objective") {
            AnswerFormat::Objective
        } else {
            AnswerFormat::Essay
        }
    }
}

/// Expected answers for one assignment, keyed by global question index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceEntry {
    pub assignment_id: String,
    pub format: AnswerFormat,
    pub answers: BTreeMap<u32, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer_url: Option<String>,
}

impl ReferenceEntry {
    pub fn empty(assignment_id: impl Into<String>) -> Self {
        Self {
            assignment_id: assignment_id.into(),
            format: AnswerFormat::Essay,
            answers: BTreeMap::new(),
            answer_url: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_objective(&self) -> bool {
        self.format == AnswerFormat::Objective
    }

    /// The key as teachers read it: `"<n>. <answer>"` per line.
    pub fn reference_text(&self) -> String {
        if self.answers.is_empty() {
            return NO_REFERENCE_TEXT.to_string();
        }
        self.answers
            .iter()
            .map(|(n, v)| format!("{n}. {v}"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A student's free-form answer body plus the optional note left alongside it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentSubmission {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Student tokens keyed by global index. The first token seen for an index wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedAnswers {
    answers: BTreeMap<u32, String>,
}

impl ParsedAnswers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `token` under `index` unless the index already has a value.
    /// Returns whether the token was stored.
    pub fn insert_first(&mut self, index: u32, token: impl Into<String>) -> bool {
        match self.answers.entry(index) {
            std::collections::btree_map::Entry::Occupied(_) => false,
            std::collections::btree_map::Entry::Vacant(slot) => {
                slot.insert(token.into());
                true
            }
        }
    }

    pub fn get(&self, index: u32) -> Option<&str> {
        self.answers.get(&index).map(String::as_str)
    }

    /// Highest index issued so far, `0` when empty.
    pub fn max_index(&self) -> u32 {
        self.answers.keys().next_back().copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &str)> {
        self.answers.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// `"<n>. <token>"` per line, ascending; empty string when nothing was parsed.
    pub fn to_numbered_text(&self) -> String {
        self.iter()
            .map(|(n, v)| format!("{n}. {v}"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// One missed reference item, with the original (display) spellings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WrongItem {
    pub index: u32,
    pub expected: String,
    pub given: String,
}

impl WrongItem {
    pub fn new(index: u32, expected: impl Into<String>, given: impl Into<String>) -> Self {
        Self {
            index,
            expected: expected.into(),
            given: given.into(),
        }
    }

    /// What the student wrote, or `—` when the item was left out.
    pub fn given_display(&self) -> &str {
        if self.given.is_empty() { "—" } else { &self.given }
    }
}

/// Raw scorer outcome before feedback is attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tally {
    pub correct: u32,
    pub total: u32,
    pub wrong: Vec<WrongItem>,
}

impl Tally {
    /// Every reference item answered correctly. An empty reference is never perfect.
    pub fn is_perfect(&self) -> bool {
        self.wrong.is_empty() && self.correct > 0 && self.correct == self.total
    }
}

/// Outcome of one marking call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub correct: u32,
    pub total: u32,
    #[serde(rename = "score")]
    pub percent: u32,
    pub wrong: Vec<WrongItem>,
    pub feedback: String,
}
