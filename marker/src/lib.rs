//! # Marker Library
//!
//! This crate provides the core logic for automatically marking objective German exercises
//! (multiple choice, richtig/falsch, single-word gaps). It loads an answer key, parses a
//! student's free-form answer sheet into globally numbered answers, compares the two and writes
//! a short feedback line.
//!
//! ## Key Concepts
//! - **Reference**: the answer key, loaded from a sheet row or a grouped answers-dictionary
//!   document ([`reference`]). Teil groups are flattened into one global numbering.
//! - **Student parser**: reads `Teil` markers, numbered lines and in-line anchors
//!   ([`parsers::student_parser`]).
//! - **Comparators**: pluggable token comparison; canonical by default ([`comparators`]).
//! - **Feedback**: pluggable strategies, word-bounded by default ([`feedback`]).
//! - **MarkingJob**: ties the pieces together for one submission.
//!
//! Marking is synchronous and total: every call returns a [`ScoreResult`], and only the
//! reference adapters can fail.

pub mod comparators;
pub mod error;
pub mod feedback;
pub mod parsers;
pub mod reference;
pub mod report;
pub mod scorer;
pub mod traits;
pub mod types;
pub mod utilities;

use crate::comparators::canonical_comparator::CanonicalComparator;
use crate::comparators::exact_comparator::ExactComparator;
use crate::error::MarkerError;
use crate::feedback::auto_feedback::AutoFeedback;
use crate::feedback::summary_feedback::SummaryFeedback;
use crate::parsers::student_parser::{ParseMode, StudentParser};
use crate::report::ScoreRecord;
use crate::traits::comparator::AnswerComparator;
use crate::traits::feedback::Feedback;
use crate::traits::reference_source::ReferenceSource;
use crate::types::{ReferenceEntry, ScoreResult};

use tracing::{debug, info};
use util::marking_config::{ComparisonScheme, FeedbackScheme, MarkingConfig};

/// Represents a marking job for a single student submission.
///
/// # Fields
/// - `student_text`: The free-form answer body.
/// - `reference`: The answer key, already flattened to global indices.
/// - `parser`: Student parser variant (first-anchor by default).
/// - `comparator`: Strategy for comparing tokens (canonical by default).
/// - `feedback`: Strategy for the feedback line (word-bounded auto feedback by default).
/// - `pass_mark`: Percent at which [`MarkingJob::record`] releases the answer link.
pub struct MarkingJob<'a> {
    student_text: &'a str,
    reference: &'a ReferenceEntry,
    parser: StudentParser,
    comparator: Box<dyn AnswerComparator + 'a>,
    feedback: Box<dyn Feedback + 'a>,
    pass_mark: u32,
}

impl<'a> MarkingJob<'a> {
    /// Create a new marking job with the default configuration.
    pub fn new(student_text: &'a str, reference: &'a ReferenceEntry) -> Self {
        Self {
            student_text,
            reference,
            parser: StudentParser::first_anchor(),
            comparator: Box::new(CanonicalComparator),
            feedback: Box::new(AutoFeedback::default()),
            pass_mark: MarkingConfig::default_config().marking.pass_mark,
        }
    }

    /// Apply a per-assignment [`MarkingConfig`]: parser variant, comparison scheme,
    /// feedback scheme and options, and pass mark.
    pub fn with_config(mut self, config: &MarkingConfig) -> Self {
        self.parser = StudentParser::new(config.marking.parse_mode);
        self.comparator = match config.marking.comparison {
            ComparisonScheme::Canonical => Box::new(CanonicalComparator),
            ComparisonScheme::Exact => Box::new(ExactComparator),
        };
        self.feedback = match config.marking.feedback_scheme {
            FeedbackScheme::Auto => Box::new(AutoFeedback::new(config.feedback.clone())),
            FeedbackScheme::Summary => Box::new(SummaryFeedback {
                max_listed_items: config.feedback.max_listed_items,
            }),
        };
        self.pass_mark = config.marking.pass_mark;
        self
    }

    pub fn with_parse_mode(mut self, mode: ParseMode) -> Self {
        self.parser = StudentParser::new(mode);
        self
    }

    /// Set a custom comparator strategy for this marking job.
    pub fn with_comparator<C: AnswerComparator + 'a>(mut self, comparator: C) -> Self {
        self.comparator = Box::new(comparator);
        self
    }

    /// Set a custom feedback strategy for this marking job.
    pub fn with_feedback<F: Feedback + 'a>(mut self, feedback: F) -> Self {
        self.feedback = Box::new(feedback);
        self
    }

    /// Run the marking process.
    ///
    /// # Steps
    /// 1. Parses the student text into globally numbered answers.
    /// 2. Scores them against the reference with the configured comparator.
    /// 3. Computes the percent (round half to even) and the feedback line.
    pub fn mark(self) -> ScoreResult {
        let parsed = self.parser.parse(self.student_text);
        let tally = scorer::score(&self.reference.answers, &parsed, self.comparator.as_ref());
        let percent = scorer::percent(tally.correct, tally.total);
        let feedback = self.feedback.assemble_feedback(&tally);

        info!(
            assignment_id = %self.reference.assignment_id,
            correct = tally.correct,
            total = tally.total,
            percent,
            "marked submission"
        );

        ScoreResult {
            correct: tally.correct,
            total: tally.total,
            percent,
            wrong: tally.wrong,
            feedback,
        }
    }

    /// Mark and shape the outcome for persistence.
    pub fn record(self) -> ScoreRecord {
        let reference = self.reference;
        let pass_mark = self.pass_mark;
        let result = self.mark();
        ScoreRecord::new(&result, reference, pass_mark)
    }
}

/// Looks up the answer key for `assignment_id`. An unknown id gives an empty entry.
pub fn load_reference<S: ReferenceSource + ?Sized>(
    source: &S,
    assignment_id: &str,
) -> Result<ReferenceEntry, MarkerError> {
    reference::load_reference(source, assignment_id)
}

/// Marks `student_text` against `reference` with the default configuration.
///
/// # Example
///
/// ```
/// use marker::types::ReferenceEntry;
///
/// let mut reference = ReferenceEntry::empty("A1 Lesen 1.1");
/// reference.answers.insert(1, "größer".to_string());
/// reference.answers.insert(2, "ja".to_string());
///
/// let result = marker::mark("1) groesser\n2) JA", &reference);
/// assert_eq!((result.correct, result.total, result.percent), (2, 2, 100));
/// assert_eq!(result.feedback, "Great job — all correct!");
/// ```
pub fn mark(student_text: &str, reference: &ReferenceEntry) -> ScoreResult {
    MarkingJob::new(student_text, reference).mark()
}

/// Renumbers a free-form submission into `"<n>. <token>"` lines, ascending, using the
/// line-greedy parser. Returns an empty string when nothing could be parsed.
pub fn globalize(student_text: &str) -> String {
    let parsed = StudentParser::line_greedy().parse(student_text);
    debug!(answers = parsed.len(), "globalized submission");
    parsed.to_numbered_text()
}
