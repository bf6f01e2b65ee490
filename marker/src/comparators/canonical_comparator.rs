//! The default comparator: two tokens match iff their canonical forms are equal.

use crate::traits::comparator::AnswerComparator;
use crate::utilities::canonical::same_answer;

/// Compares tokens after [`canonicalize`](crate::utilities::canonical::canonicalize), so `b`
/// matches `B`, `groesser` matches `größer` and `JA` matches `ja`.
///
/// There is no partial credit: near-misses such as `grosser` for `größer` still fail.
#[derive(Debug, Default, Clone, Copy)]
pub struct CanonicalComparator;

impl AnswerComparator for CanonicalComparator {
    fn matches(&self, expected: &str, given: &str) -> bool {
        same_answer(expected, given)
    }
}
