//! Total field extractors
//!
//! Every function here accepts a possibly missing node (or plain text) and
//! always returns a value. Absence maps to the field's sentinel: `""` for text
//! and `0` for numbers. Only ASCII digits count as digits.

use crate::extract::node::Node;
use regex::Regex;
use std::sync::OnceLock;

static POSTAL_CODE: OnceLock<Regex> = OnceLock::new();

fn postal_code_pattern() -> &'static Regex {
    POSTAL_CODE.get_or_init(|| {
        Regex::new(r"[0-9]{3}\s[0-9]{2}").expect("valid postal code pattern")
    })
}

/// Trimmed text of `node`, fragments joined with `separator`
pub fn text<N: Node>(node: Option<&N>, separator: &str) -> String {
    node.map(|n| n.text_with(separator).trim().to_string())
        .unwrap_or_default()
}

/// Every digit in the text of `node` read as one integer
pub fn integer<N: Node>(node: Option<&N>) -> u64 {
    node.map(|n| digits(&n.text_with(""))).unwrap_or(0)
}

/// Trimmed value of attribute `name`, or `""` if the node or attribute is missing
pub fn attribute<N: Node>(node: Option<&N>, name: &str) -> String {
    node.and_then(|n| n.attribute(name))
        .map(|value| value.trim().to_string())
        .unwrap_or_default()
}

/// Concatenates all ASCII digits in `text` and parses them
///
/// Returns 0 when there are no digits or the number does not fit in a `u64`.
///
/// ```
/// use bazos_scout::extract::fields::digits;
///
/// assert_eq!(digits("1 234 Kč"), 1234);
/// assert_eq!(digits("Dohodou"), 0);
/// ```
pub fn digits(text: &str) -> u64 {
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();
    digits.parse().unwrap_or(0)
}

/// First `NNN NN` postal code found in `text`, or `""`
pub fn postal_code(text: &str) -> String {
    postal_code_pattern()
        .find(text)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// `text` with every digit and period removed, trimmed
///
/// Used for labels rendered inline with a number, like the currency next to a
/// price or the town next to its postal code.
pub fn complement(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_ascii_digit() && *c != '.')
        .collect::<String>()
        .trim()
        .to_string()
}

/// Only the digits and periods of `text`, as used by posted dates
pub fn date_chars(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect()
}
