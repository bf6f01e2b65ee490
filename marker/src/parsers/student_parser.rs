//!
//! Student Answer Parser
//!
//! Turns a free-form answer sheet into `{global index -> raw token}`.
//!
//! Students number answers locally inside each test section ("Teil 1", "Teil 2", ...), mix answers
//! with prose, and sometimes put several answers on one line. The parser walks the text line by
//! line:
//!
//! 1. A line that is exactly `Teil <n>` starts a new section: later local numbers are shifted by
//!    the highest global index issued so far.
//! 2. A line of the form `[q]<n>[.):=-] <answer>` yields one pair, unless the answer part itself
//!    starts another answer (`1. A  3. D`, `1. A; 2. B`). Ordinals such as `Am 3. Mai` stay in
//!    the answer.
//! 3. Otherwise the line is scanned for anchors (digit runs) and the text after each anchor up to
//!    the next one supplies the token. [`ParseMode`] decides which anchors count.
//!
//! Every emitted index comes from a literal digit run in the input, and the first token seen for
//! an index wins.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::types::ParsedAnswers;
pub use util::marking_config::ParseMode;

static SECTION_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^teil\s*[0-9]+$").expect("valid regex"));

static FULL_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*(?:q\s*)?([0-9]+)\b\s*[.):=\-]?\s*(.+?)\s*$").expect("valid regex")
});

static ANCHOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:q\s*)?([0-9]+)\s*([.):=\-]*)\s*").expect("valid regex")
});

static TOKEN_SPLIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[,|;/\s]+").expect("valid regex"));

const TOKEN_PUNCT: &[char] = &['(', ')', '[', ']', '{', '}', '.', ':', '=', ',', ';'];

/// A digit run the parser may read as a question number.
#[derive(Debug, Clone)]
struct Anchor {
    local: String,
    start: usize,
    end: usize,
    /// Written like a question number (`3.`, `3)`, `q3:`) rather than a digit inside prose.
    numbered: bool,
}

fn find_anchors(line: &str) -> Vec<Anchor> {
    ANCHOR
        .captures_iter(line)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let digits = caps.get(1)?;
            let sep = caps.get(2)?;

            let preceded = line[..whole.start()]
                .chars()
                .next_back()
                .is_none_or(|c| c.is_whitespace() || matches!(c, '(' | '['));
            let followed = line[sep.end()..]
                .chars()
                .next()
                .is_none_or(char::is_whitespace);

            Some(Anchor {
                local: digits.as_str().to_string(),
                start: whole.start(),
                end: whole.end(),
                numbered: !sep.as_str().is_empty() && preceded && followed,
            })
        })
        .collect()
}

/// Whether a numbered anchor inside a full-line answer begins a new answer.
///
/// Ordinals and dates (`Am 3. Mai`, `im 2. Stock`) stay part of the answer. The anchor counts
/// only when it is set apart from the text before it: by two or more spaces, by `;` or `|`, or
/// by a comma or single space after a one-token answer when its number is higher (`A, 2. B`).
fn starts_another_answer(line_local: &str, rest: &str, anchor: &Anchor) -> bool {
    if !anchor.numbered || anchor.start == 0 {
        return false;
    }
    let before = &rest[..anchor.start];
    let gap = before.len() - before.trim_end().len();
    if gap >= 2 {
        return true;
    }

    let text = before.trim_end();
    if text.ends_with([';', '|']) {
        return true;
    }

    let token = text.trim_end_matches(',');
    let single_token = !token.is_empty() && !token.contains(char::is_whitespace);
    let higher = match (line_local.parse::<u64>(), anchor.local.parse::<u64>()) {
        (Ok(line), Ok(next)) => next > line,
        _ => false,
    };
    single_token && higher && (text.ends_with(',') || token.chars().count() == 1)
}

fn clean_token(raw: &str) -> &str {
    raw.trim_matches(|c: char| c.is_whitespace() || TOKEN_PUNCT.contains(&c))
}

/// Applies the section offset. `None` when the number does not fit.
fn global_index(local: &str, offset: u32) -> Option<u32> {
    let local: u32 = local.parse().ok()?;
    if offset > 0 {
        local.checked_add(offset)
    } else {
        Some(local)
    }
}

/// Parses free-form student text into [`ParsedAnswers`].
#[derive(Debug, Clone, Copy)]
pub struct StudentParser {
    mode: ParseMode,
}

impl Default for StudentParser {
    fn default() -> Self {
        Self::new(ParseMode::FirstAnchor)
    }
}

impl StudentParser {
    pub fn new(mode: ParseMode) -> Self {
        Self { mode }
    }

    /// The variant used for marking.
    pub fn first_anchor() -> Self {
        Self::new(ParseMode::FirstAnchor)
    }

    /// The variant used for renumbered dumps.
    pub fn line_greedy() -> Self {
        Self::new(ParseMode::LineGreedy)
    }

    pub fn mode(&self) -> ParseMode {
        self.mode
    }

    /// Parses `text`. Never fails: unparseable input gives an empty map.
    pub fn parse(&self, text: &str) -> ParsedAnswers {
        let mut parsed = ParsedAnswers::new();
        let mut offset: u32 = 0;

        for raw_line in text.lines() {
            let line = raw_line.trim();
            if line.is_empty() {
                continue;
            }

            if SECTION_MARKER.is_match(line) {
                offset = parsed.max_index();
                debug!(offset, "section marker");
                continue;
            }

            if let Some((local, rest)) = self.full_line_pair(line) {
                let token = clean_token(rest);
                if !token.is_empty() {
                    if let Some(global) = global_index(local, offset) {
                        parsed.insert_first(global, token);
                    }
                }
                continue;
            }

            self.parse_anchors(line, offset, &mut parsed);
        }

        debug!(
            mode = ?self.mode,
            answers = parsed.len(),
            "parsed student submission"
        );
        parsed
    }

    /// Splits `"<n>. <rest>"`, refusing lines whose rest starts a further answer.
    fn full_line_pair<'l>(&self, line: &'l str) -> Option<(&'l str, &'l str)> {
        let caps = FULL_LINE.captures(line)?;
        let local = caps.get(1)?.as_str();
        let rest = caps.get(2)?.as_str();

        let holds_more_answers = find_anchors(rest)
            .iter()
            .any(|a| starts_another_answer(local, rest, a));
        if holds_more_answers {
            return None;
        }
        Some((local, rest))
    }

    fn parse_anchors(&self, line: &str, offset: u32, parsed: &mut ParsedAnswers) {
        let anchors = self.select_anchors(find_anchors(line));

        for (i, anchor) in anchors.iter().enumerate() {
            let end = anchors.get(i + 1).map_or(line.len(), |next| next.start);
            if end <= anchor.end {
                continue;
            }
            let chunk = line[anchor.end..end].trim();
            if chunk.is_empty() {
                continue;
            }
            let first_piece = TOKEN_SPLIT.split(chunk).next().unwrap_or("");
            let token = clean_token(first_piece);
            if token.is_empty() {
                continue;
            }
            if let Some(global) = global_index(&anchor.local, offset) {
                parsed.insert_first(global, token);
            }
        }
    }

    fn select_anchors(&self, anchors: Vec<Anchor>) -> Vec<Anchor> {
        match self.mode {
            ParseMode::LineGreedy => anchors,
            ParseMode::FirstAnchor => {
                let numbered: Vec<Anchor> = anchors.iter().filter(|a| a.numbered).cloned().collect();
                if numbered.is_empty() {
                    anchors.into_iter().take(1).collect()
                } else {
                    numbered
                }
            }
        }
    }
}
