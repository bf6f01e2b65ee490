//! # Scorer Module
//!
//! Compares a reference key against parsed student answers. Reference keys are walked in
//! ascending order; a missing student answer counts as wrong with an empty `given`. The
//! comparison is delegated to an [`AnswerComparator`], and the wrong list keeps the original
//! spellings for display.

use std::collections::BTreeMap;

use crate::traits::comparator::AnswerComparator;
use crate::types::{ParsedAnswers, Tally, WrongItem};

/// Tallies `parsed` against `reference`.
///
/// `total` is `max(1, |reference|)`, so an empty key yields `0 of 1` with no wrong items.
///
/// # Example
///
/// ```
/// use std::collections::BTreeMap;
/// use marker::comparators::canonical_comparator::CanonicalComparator;
/// use marker::scorer::score;
/// use marker::types::ParsedAnswers;
///
/// let reference = BTreeMap::from([(1, "größer".to_string()), (2, "B".to_string())]);
/// let mut parsed = ParsedAnswers::new();
/// parsed.insert_first(1, "groesser");
///
/// let tally = score(&reference, &parsed, &CanonicalComparator);
/// assert_eq!((tally.correct, tally.total), (1, 2));
/// assert_eq!(tally.wrong[0].index, 2);
/// assert_eq!(tally.wrong[0].given, "");
/// ```
pub fn score(
    reference: &BTreeMap<u32, String>,
    parsed: &ParsedAnswers,
    comparator: &dyn AnswerComparator,
) -> Tally {
    let total = u32::try_from(reference.len()).unwrap_or(u32::MAX).max(1);
    let mut correct = 0;
    let mut wrong = Vec::new();

    for (&index, expected) in reference {
        let given = parsed.get(index).unwrap_or("");
        if comparator.matches(expected, given) {
            correct += 1;
        } else {
            wrong.push(WrongItem::new(index, expected.as_str(), given));
        }
    }

    Tally {
        correct,
        total,
        wrong,
    }
}

/// `100 * correct / total` rounded half to even, within `0..=100`.
pub fn percent(correct: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    let numerator = 100 * u64::from(correct.min(total));
    let total = u64::from(total);
    let (quotient, remainder) = (numerator / total, numerator % total);

    let rounded = match (2 * remainder).cmp(&total) {
        std::cmp::Ordering::Greater => quotient + 1,
        std::cmp::Ordering::Equal if quotient % 2 == 1 => quotient + 1,
        _ => quotient,
    };
    rounded.min(100) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comparators::canonical_comparator::CanonicalComparator;
    use crate::comparators::exact_comparator::ExactComparator;

    fn reference(items: &[(u32, &str)]) -> BTreeMap<u32, String> {
        items.iter().map(|(k, v)| (*k, v.to_string())).collect()
    }

    fn parsed(items: &[(u32, &str)]) -> ParsedAnswers {
        let mut p = ParsedAnswers::new();
        for (k, v) in items {
            p.insert_first(*k, *v);
        }
        p
    }

    #[test]
    fn test_partial_and_missing() {
        let r = reference(&[(1, "A"), (2, "B"), (3, "C")]);
        let s = parsed(&[(1, "a"), (3, "D"), (9, "extra")]);
        let tally = score(&r, &s, &CanonicalComparator);
        assert_eq!(tally.correct, 1);
        assert_eq!(tally.total, 3);
        assert_eq!(
            tally.wrong,
            vec![WrongItem::new(2, "B", ""), WrongItem::new(3, "C", "D")]
        );
    }

    #[test]
    fn test_empty_reference() {
        let tally = score(&BTreeMap::new(), &parsed(&[(1, "A")]), &CanonicalComparator);
        assert_eq!((tally.correct, tally.total), (0, 1));
        assert!(tally.wrong.is_empty());
    }

    #[test]
    fn test_comparator_is_pluggable() {
        let r = reference(&[(1, "größer")]);
        let s = parsed(&[(1, "groesser")]);
        assert_eq!(score(&r, &s, &CanonicalComparator).correct, 1);
        assert_eq!(score(&r, &s, &ExactComparator).correct, 0);
    }

    #[test]
    fn test_sparse_reference_keys() {
        let r = reference(&[(2, "B"), (7, "ja")]);
        let s = parsed(&[(7, "Yes"), (2, "b")]);
        let tally = score(&r, &s, &CanonicalComparator);
        assert_eq!((tally.correct, tally.total), (2, 2));
    }

    #[test]
    fn test_percent() {
        assert_eq!(percent(1, 3), 33);
        assert_eq!(percent(2, 3), 67);
        assert_eq!(percent(4, 4), 100);
        assert_eq!(percent(0, 1), 0);
        assert_eq!(percent(0, 0), 0);
        assert_eq!(percent(9, 3), 100);
    }

    #[test]
    fn test_percent_ties_round_to_even() {
        // 100 * 1 / 8 = 12.5, 100 * 3 / 8 = 37.5
        assert_eq!(percent(1, 8), 12);
        assert_eq!(percent(3, 8), 38);
        // 100 * 1 / 40 = 2.5
        assert_eq!(percent(1, 40), 2);
    }
}
