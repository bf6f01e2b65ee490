use once_cell::sync::Lazy;
use regex::Regex;

// `\w` is Unicode-aware, so ÄÖÜäöüß are word characters.
static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w+(?:'[A-Za-z]+)?").expect("valid regex"));

/// Counts words the way the feedback bounds are measured: maximal runs of word
/// characters, with an optional `'s`-style suffix folded into the same word.
pub fn count_words(s: &str) -> usize {
    WORD.find_iter(s).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_words() {
        assert_eq!(count_words(""), 0);
        assert_eq!(count_words("Good effort for A1 objectives—you answered 3 of 4 correctly."), 11);
        assert_eq!(count_words("2→B (you wrote —)"), 4);
        assert_eq!(count_words("don't double-check B/C"), 5);
        assert_eq!(count_words("Use umlauts (ä/ö/ü) and verify meaning before choosing."), 10);
    }
}
