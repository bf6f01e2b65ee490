//! # Feedback Strategies Module
//!
//! This module provides pluggable feedback strategies for the marker system.
//! Each strategy implements the [`Feedback`](crate::traits::feedback::Feedback) trait and turns a
//! scorer [`Tally`](crate::types::Tally) into one line of text for the student.
//!
//! ## Available Strategies
//!
//! - [`auto_feedback`]: Word-bounded feedback (40–60 words by default) naming the missed items and
//!   padding with study tips.
//! - [`summary_feedback`]: A short "check these" line without word bounds.
//! - [`manual_feedback`]: A teacher-written comment used verbatim.
//!
//! All strategies answer a perfect tally with [`PERFECT_MESSAGE`].

pub mod auto_feedback;
pub mod manual_feedback;
pub mod summary_feedback;

use crate::types::WrongItem;

/// Feedback for a tally with every reference item correct.
pub const PERFECT_MESSAGE: &str = "Great job — all correct!";

/// `"<k>→<expected> (you wrote <given or —>)"`
pub fn format_item(item: &WrongItem) -> String {
    format!(
        "{}→{} (you wrote {})",
        item.index,
        item.expected,
        item.given_display()
    )
}
