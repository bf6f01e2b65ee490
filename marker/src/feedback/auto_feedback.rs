//! # AutoFeedback Strategy
//!
//! Builds a single line of feedback that lands inside a word window (40–60 words by default):
//!
//! 1. An opening sentence with the level and the `correct of total` count.
//! 2. `Check these items: ...` listing the first missed items, as many as fit the upper bound.
//! 3. Study tips appended in order until the lower bound is reached (at most two passes).
//! 4. If a custom configuration still overshoots, whole trailing sentences are dropped.
//!
//! Words are counted with [`count_words`].

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use super::{PERFECT_MESSAGE, format_item};
use crate::traits::feedback::Feedback;
use crate::types::Tally;
use crate::utilities::word_count::count_words;
use util::marking_config::FeedbackOptions;

static SENTENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^.?!]*[.?!]+").expect("valid regex"));

const TIP_PASSES: usize = 2;

/// Word-bounded automatic feedback.
#[derive(Debug, Clone, Default)]
pub struct AutoFeedback {
    pub options: FeedbackOptions,
}

impl AutoFeedback {
    pub fn new(options: FeedbackOptions) -> Self {
        Self { options }
    }
}

impl Feedback for AutoFeedback {
    fn assemble_feedback(&self, tally: &Tally) -> String {
        compose(tally, &self.options)
    }
}

/// Composes feedback for `tally` under `options`.
pub fn compose(tally: &Tally, options: &FeedbackOptions) -> String {
    if tally.is_perfect() {
        return PERFECT_MESSAGE.to_string();
    }

    let seed = format!(
        "Good effort for {} objectives—you answered {} of {} correctly.",
        options.level_label, tally.correct, tally.total
    );
    let mut parts = vec![seed];

    if let Some(check) = check_sentence(tally, options, count_words(&parts[0])) {
        parts.push(check);
    }

    let mut words = count_words(&parts.join(" "));
    'passes: for _ in 0..TIP_PASSES {
        for tip in &options.tips {
            if words >= options.min_words {
                break 'passes;
            }
            parts.push(tip.clone());
            words += count_words(tip);
        }
    }

    let text = parts.join(" ");
    let text = trim_to_max(&text, options.max_words);
    debug!(words = count_words(&text), wrong = tally.wrong.len(), "composed feedback");
    text
}

/// The longest `Check these items: ...` sentence that keeps the text within `max_words`.
fn check_sentence(tally: &Tally, options: &FeedbackOptions, seed_words: usize) -> Option<String> {
    let render = |items: &[String]| format!("Check these items: {}.", items.join(", "));

    let mut listed: Vec<String> = Vec::new();
    for item in tally.wrong.iter().take(options.max_listed_items) {
        listed.push(format_item(item));
        if seed_words + count_words(&render(&listed)) > options.max_words {
            listed.pop();
            break;
        }
    }

    (!listed.is_empty()).then(|| render(&listed))
}

/// Drops trailing sentences while over `max_words` and more than one sentence remains.
fn trim_to_max(text: &str, max_words: usize) -> String {
    if count_words(text) <= max_words {
        return text.to_string();
    }

    let mut sentences: Vec<&str> = SENTENCE.find_iter(text).map(|m| m.as_str()).collect();
    let consumed: usize = sentences.iter().map(|s| s.len()).sum();
    let tail = &text[consumed..];
    if !tail.trim().is_empty() {
        sentences.push(tail);
    }

    while sentences.len() > 1 && count_words(&sentences.concat()) > max_words {
        sentences.pop();
    }
    sentences.concat().trim().to_string()
}
