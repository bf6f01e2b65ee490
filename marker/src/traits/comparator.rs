/// AnswerComparator is a strategy trait for comparing one student token against the key.
///
/// Implementations must be pure: the same pair always yields the same verdict, so marking
/// stays deterministic and submissions can be marked in parallel.
pub trait AnswerComparator: Send + Sync {
    /// `expected` is the raw reference value, `given` the raw student token
    /// (empty when the student skipped the item).
    fn matches(&self, expected: &str, given: &str) -> bool;
}
