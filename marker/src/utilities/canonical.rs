//! Token canonicalization.
//!
//! Students write `b`, `B)`, `größer`, `groesser`, `JA` or `yes` for answers the key records as
//! `B`, `größer` and `ja`. [`canonicalize`] maps all of these to one comparison form. The result is
//! only ever compared, never shown back to anyone.

use once_cell::sync::Lazy;
use regex::Regex;

static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w]+").expect("valid regex"));

const TRUE_SYNONYMS: [&str; 6] = ["t", "true", "ja", "j", "y", "yes"];
const FALSE_SYNONYMS: [&str; 5] = ["f", "false", "nein", "n", "no"];

fn letter_option(s: &str) -> Option<String> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if matches!(c.to_ascii_uppercase(), 'A'..='D') => {
            Some(c.to_ascii_uppercase().to_string())
        }
        _ => None,
    }
}

fn boolean_token(s: &str) -> Option<&'static str> {
    if TRUE_SYNONYMS.contains(&s) {
        Some("true")
    } else if FALSE_SYNONYMS.contains(&s) {
        Some("false")
    } else {
        None
    }
}

/// Lowercases and spells umlauts and `ß` out in ASCII.
pub fn fold_umlauts(s: &str) -> String {
    s.to_lowercase()
        .replace('ä', "ae")
        .replace('ö', "oe")
        .replace('ü', "ue")
        .replace('ß', "ss")
}

/// Maps an answer token to its comparison form.
///
/// Single letters `A`–`D` become uppercase options, yes/no and true/false synonyms (German and
/// English) become `true`/`false`, everything else is folded to lowercase ASCII umlaut spelling
/// with non-word characters removed. `canonicalize(canonicalize(x)) == canonicalize(x)`.
pub fn canonicalize(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    if let Some(letter) = letter_option(trimmed) {
        return letter;
    }

    let folded = fold_umlauts(trimmed);
    if let Some(b) = boolean_token(&folded) {
        return b.to_string();
    }

    let stripped = NON_WORD.replace_all(&folded, "").into_owned();
    // Stripping can expose an option or synonym ("b)", "ja!"), classify again to stay a fixed point.
    if let Some(letter) = letter_option(&stripped) {
        return letter;
    }
    if let Some(b) = boolean_token(&stripped) {
        return b.to_string();
    }
    stripped
}

/// Two tokens are the same answer iff their canonical forms match.
pub fn same_answer(expected: &str, given: &str) -> bool {
    canonicalize(expected) == canonicalize(given)
}
