//! # Comparators
//!
//! Strategies for deciding whether a student token matches the reference token. All comparators
//! implement [`AnswerComparator`](crate::traits::comparator::AnswerComparator), so the marking job
//! can swap them per assignment.
//!
//! The available comparators are:
//! - [`canonical_comparator`]: compares canonical forms (letter options, umlauts, yes/no synonyms).
//! - [`exact_comparator`]: trimmed, case-sensitive equality.

pub mod canonical_comparator;
pub mod exact_comparator;
