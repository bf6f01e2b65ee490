//!
//! # Feedback Trait
//!
//! This module defines the [`Feedback`] trait, implemented by the strategies in
//! [`crate::feedback`] (word-bounded auto feedback, one-line summary, teacher-written comment).
//!

use crate::types::Tally;

/// A trait for pluggable feedback strategies in the marker system.
///
/// Feedback is total: every tally, including the one for an empty key, yields a string.
pub trait Feedback: Send + Sync {
    fn assemble_feedback(&self, tally: &Tally) -> String;
}
