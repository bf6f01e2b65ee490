//! Natural ordering: `teil2` sorts before `teil10`, `answer9` before `answer10`.

use once_cell::sync::Lazy;
use regex::Regex;
use std::cmp::Ordering;

static RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]+|[^0-9]+").expect("valid regex"));

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum KeyPart {
    Number(u64),
    Text(String),
}

/// Splits `s` into alternating digit and non-digit runs. Text runs are lowercased;
/// digit runs too long for `u64` saturate.
pub fn natural_key(s: &str) -> Vec<KeyPart> {
    RUNS.find_iter(s)
        .map(|m| {
            let run = m.as_str();
            if run.as_bytes()[0].is_ascii_digit() {
                KeyPart::Number(run.parse().unwrap_or(u64::MAX))
            } else {
                KeyPart::Text(run.to_lowercase())
            }
        })
        .collect()
}

/// Total order: natural key first, raw string as tie-break.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    natural_key(a)
        .cmp(&natural_key(b))
        .then_with(|| a.cmp(b))
}

/// First run of ASCII digits in `s`, if it fits in a `u32`.
pub fn first_number(s: &str) -> Option<u32> {
    let start = s.find(|c: char| c.is_ascii_digit())?;
    let digits: String = s[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}
