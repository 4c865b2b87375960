//! Template filters
//!
//! `pluralize` picks a singular or plural suffix from a count-like value, in
//! the manner of Django's filter of the same name:
//!
//! ```
//! use settings_updater::filters::{pluralize, Suffixes};
//! use settings_updater::tree::Node;
//!
//! assert_eq!(pluralize(&Node::from(1), Suffixes::default()), "");
//! assert_eq!(pluralize(&Node::from(2), "es"), "es");
//! assert_eq!(pluralize(&Node::from(2), ("y", "ies")), "ies");
//! ```

use crate::tree::{Node, Scalar};

/// Singular and plural suffixes for [`pluralize`].
///
/// A single `&str` sets the plural suffix and leaves the singular one empty;
/// a pair sets both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Suffixes<'a> {
    pub singular: &'a str,
    pub plural: &'a str,
}

impl Default for Suffixes<'_> {
    fn default() -> Self {
        Self {
            singular: "",
            plural: "s",
        }
    }
}

impl<'a> From<&'a str> for Suffixes<'a> {
    fn from(plural: &'a str) -> Self {
        Self {
            singular: "",
            plural,
        }
    }
}

impl<'a> From<(&'a str, &'a str)> for Suffixes<'a> {
    fn from((singular, plural): (&'a str, &'a str)) -> Self {
        Self { singular, plural }
    }
}

/// Return the plural suffix unless `value` amounts to exactly one.
///
/// Values with no meaningful count (null, non-numeric strings, tagged values)
/// get the singular suffix.
pub fn pluralize<'a>(value: &Node, suffixes: impl Into<Suffixes<'a>>) -> &'a str {
    let suffixes = suffixes.into();
    match count_of(value) {
        Some(n) if n != 1 => suffixes.plural,
        _ => suffixes.singular,
    }
}

fn count_of(value: &Node) -> Option<i128> {
    match value {
        Node::Sequence(items) => Some(items.len() as i128),
        Node::Mapping(map) => Some(map.len() as i128),
        Node::Scalar(Scalar::Bool(b)) => Some(i128::from(*b)),
        Node::Scalar(Scalar::Number(n)) => {
            if let Some(i) = n.as_i64() {
                Some(i128::from(i))
            } else if let Some(u) = n.as_u64() {
                Some(i128::from(u))
            } else {
                n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i128)
            }
        }
        Node::Scalar(Scalar::String(s)) => parse_integer(s),
        Node::Scalar(Scalar::Null) | Node::Scalar(Scalar::Tagged(_)) => None,
    }
}

/// Integer literal with optional sign and `_` between digits.
fn parse_integer(s: &str) -> Option<i128> {
    let s = s.trim();
    let (negative, digits) = match s.as_bytes().first()? {
        b'-' => (true, &s[1..]),
        b'+' => (false, &s[1..]),
        _ => (false, s),
    };
    if digits.is_empty()
        || digits.starts_with('_')
        || digits.ends_with('_')
        || digits.contains("__")
        || !digits.chars().all(|c| c.is_ascii_digit() || c == '_')
    {
        return None;
    }
    // Saturate on overflow; any such magnitude is plural anyway.
    let magnitude = digits
        .chars()
        .filter(char::is_ascii_digit)
        .try_fold(0i128, |acc, c| {
            acc.checked_mul(10)?.checked_add(i128::from(c as u8 - b'0'))
        })
        .unwrap_or(i128::MAX);
    Some(if negative { -magnitude } else { magnitude })
}
