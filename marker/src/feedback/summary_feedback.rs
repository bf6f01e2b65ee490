//! Short summary feedback: one "check these" line and a fixed tip, no word bounds.

use super::{PERFECT_MESSAGE, format_item};
use crate::traits::feedback::Feedback;
use crate::types::Tally;

const SUMMARY_TIP: &str =
    "Tip: match section numbering (Teil), read each stem carefully, and watch umlauts (ä/ö/ü).";

#[derive(Debug, Clone)]
pub struct SummaryFeedback {
    pub max_listed_items: usize,
}

impl Default for SummaryFeedback {
    fn default() -> Self {
        Self { max_listed_items: 6 }
    }
}

impl Feedback for SummaryFeedback {
    fn assemble_feedback(&self, tally: &Tally) -> String {
        if tally.is_perfect() {
            return PERFECT_MESSAGE.to_string();
        }

        let items: Vec<String> = tally
            .wrong
            .iter()
            .take(self.max_listed_items)
            .map(format_item)
            .collect();

        if items.is_empty() {
            format!("Keep going. {SUMMARY_TIP}")
        } else {
            format!("Keep going. Check these: {}. {SUMMARY_TIP}", items.join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::WrongItem;

    #[test]
    fn test_summary_lists_items() {
        let tally = Tally {
            correct: 1,
            total: 3,
            wrong: vec![WrongItem::new(2, "B", ""), WrongItem::new(3, "C", "D")],
        };
        assert_eq!(
            SummaryFeedback::default().assemble_feedback(&tally),
            "Keep going. Check these: 2→B (you wrote —), 3→C (you wrote D). \
             Tip: match section numbering (Teil), read each stem carefully, and watch umlauts (ä/ö/ü)."
        );
    }

    #[test]
    fn test_summary_perfect_and_empty() {
        let perfect = Tally { correct: 2, total: 2, wrong: vec![] };
        assert_eq!(SummaryFeedback::default().assemble_feedback(&perfect), PERFECT_MESSAGE);

        let empty = Tally { correct: 0, total: 1, wrong: vec![] };
        assert!(SummaryFeedback::default().assemble_feedback(&empty).starts_with("Keep going. Tip:"));
    }

    #[test]
    fn test_summary_respects_cap() {
        let tally = Tally {
            correct: 0,
            total: 4,
            wrong: (1..=4).map(|k| WrongItem::new(k, "A", "B")).collect(),
        };
        let fb = SummaryFeedback { max_listed_items: 2 }.assemble_feedback(&tally);
        assert!(fb.contains("2→A"));
        assert!(!fb.contains("3→A"));
    }
}
