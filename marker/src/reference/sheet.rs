//!
//! Tabular Reference Sheets
//!
//! One row per assignment. The key lives in `answerK` columns (`answer1`, `Answer 2`,
//! `answer_3`, ...); `answer_url` and `format` are optional. Column names are matched
//! case-insensitively with whitespace and underscores ignored.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use tracing::warn;

use super::answer_text;
use crate::error::MarkerError;
use crate::traits::parser::Parser;
use crate::traits::reference_source::ReferenceSource;
use crate::types::{AnswerFormat, ReferenceEntry};
use crate::utilities::natural_order::natural_cmp;

static ANSWER_COLUMN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^answer([0-9]+)$").expect("valid regex"));

const ASSIGNMENT_COLUMNS: [&str; 2] = ["assignment", "assignment_id"];
const URL_COLUMNS: [&str; 1] = ["answer_url"];
const FORMAT_COLUMNS: [&str; 1] = ["format"];

/// Lowercased with whitespace and underscores removed.
fn normalize_header(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace() && *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

fn cell_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn find_in(headers: &[String], candidates: &[&str]) -> Option<usize> {
    candidates.iter().find_map(|candidate| {
        let wanted = normalize_header(candidate);
        headers.iter().position(|h| normalize_header(h) == wanted)
    })
}

/// A row-oriented sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SheetTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl SheetTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// Builds a table from a JSON array of flat objects, the shape a CSV export
    /// deserializes to. Headers are collected in first-seen order.
    pub fn from_records(records: &Value) -> Result<Self, MarkerError> {
        let items = records
            .as_array()
            .ok_or_else(|| MarkerError::InvalidJson("Sheet records must be an array".to_string()))?;

        let mut headers: Vec<String> = Vec::new();
        for item in items {
            let obj = item.as_object().ok_or_else(|| {
                MarkerError::InvalidJson("Sheet record must be an object".to_string())
            })?;
            for key in obj.keys() {
                if !headers.contains(key) {
                    headers.push(key.clone());
                }
            }
        }

        let rows = items
            .iter()
            .filter_map(Value::as_object)
            .map(|obj| {
                headers
                    .iter()
                    .map(|h| obj.get(h).map(cell_string).unwrap_or_default())
                    .collect()
            })
            .collect();

        Ok(Self::new(headers, rows))
    }

    /// Index of the first header matching any candidate.
    pub fn find_column(&self, candidates: &[&str]) -> Result<usize, MarkerError> {
        find_in(&self.headers, candidates)
            .ok_or_else(|| MarkerError::MissingColumn(candidates.join(", ")))
    }

    fn cell(&self, row: &[String], col: usize) -> String {
        row.get(col).map(|c| c.trim().to_string()).unwrap_or_default()
    }
}

/// Parses one sheet row, given its assignment id and the sheet headers.
pub struct SheetRowParser;

impl<'a> Parser<(&'a str, &'a [String], &'a [String]), ReferenceEntry> for SheetRowParser {
    fn parse(
        &self,
        input: (&'a str, &'a [String], &'a [String]),
    ) -> Result<ReferenceEntry, MarkerError> {
        let (assignment_id, headers, row) = input;
        let mut answers = BTreeMap::new();

        for (col, header) in headers.iter().enumerate() {
            let normalized = normalize_header(header);
            let Some(caps) = ANSWER_COLUMN.captures(&normalized) else {
                continue;
            };
            let Some(index) = caps[1].parse::<u32>().ok().filter(|n| *n > 0) else {
                continue;
            };
            let Some(text) = row.get(col).and_then(|c| answer_text(&Value::String(c.clone())))
            else {
                continue;
            };
            if answers.contains_key(&index) {
                warn!(assignment_id, header = %header, "duplicate answer column ignored");
                continue;
            }
            answers.insert(index, text);
        }

        let optional = |candidates: &[&str]| {
            find_in(headers, candidates)
                .and_then(|col| row.get(col))
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty())
        };

        Ok(ReferenceEntry {
            assignment_id: assignment_id.to_string(),
            format: optional(&FORMAT_COLUMNS[..])
                .map(|f| AnswerFormat::from_tag(&f))
                .unwrap_or_default(),
            answers,
            answer_url: optional(&URL_COLUMNS[..]),
        })
    }
}

impl ReferenceSource for SheetTable {
    fn assignments(&self) -> Result<Vec<String>, MarkerError> {
        let col = self.find_column(&ASSIGNMENT_COLUMNS)?;
        let mut ids: Vec<String> = Vec::new();
        for row in &self.rows {
            let id = self.cell(row, col);
            if !id.is_empty() && !ids.contains(&id) {
                ids.push(id);
            }
        }
        ids.sort_by(|a, b| natural_cmp(a, b));
        Ok(ids)
    }

    fn reference(&self, assignment_id: &str) -> Result<ReferenceEntry, MarkerError> {
        let col = self.find_column(&ASSIGNMENT_COLUMNS)?;
        let wanted = assignment_id.trim();
        match self.rows.iter().find(|row| self.cell(row, col) == wanted) {
            Some(row) => {
                SheetRowParser.parse((assignment_id, self.headers.as_slice(), row.as_slice()))
            }
            None => Ok(ReferenceEntry::empty(assignment_id)),
        }
    }
}
