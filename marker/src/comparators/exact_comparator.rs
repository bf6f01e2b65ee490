//! A comparator that only accepts the key as written, apart from surrounding whitespace.

use crate::traits::comparator::AnswerComparator;

/// Trimmed, case-sensitive equality.
///
/// Useful for spelling exercises where `groesser` must not pass for `größer`.
/// A skipped item (empty token) never matches.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExactComparator;

impl AnswerComparator for ExactComparator {
    fn matches(&self, expected: &str, given: &str) -> bool {
        let given = given.trim();
        !given.is_empty() && expected.trim() == given
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match() {
        let cmp = ExactComparator;
        assert!(cmp.matches("größer", " größer "));
    }

    #[test]
    fn test_variants_rejected() {
        let cmp = ExactComparator;
        assert!(!cmp.matches("größer", "groesser"));
        assert!(!cmp.matches("B", "b"));
        assert!(!cmp.matches("ja", "JA"));
    }

    #[test]
    fn test_empty_never_matches() {
        let cmp = ExactComparator;
        assert!(!cmp.matches("", ""));
        assert!(!cmp.matches("A", ""));
    }
}
