use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EsValue {
    Integer(i64),
    String(String),
}

impl EsValue {
    /// Equality used by `if` conjuncts: same value, or same rendered text.
    pub fn loosely_equals(&self, other: &EsValue) -> bool {
        self == other || self.to_string() == other.to_string()
    }
}

impl fmt::Display for EsValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(value) => write!(f, "{}", value),
            Self::String(value) => f.write_str(value),
        }
    }
}

impl From<i64> for EsValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<&str> for EsValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for EsValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

/// Parses a decimal integer with an optional leading `-`.
pub fn parse_integer_literal(text: &str) -> Option<i64> {
    let digits = text.strip_prefix('-').unwrap_or(text);
    if digits.is_empty() || !digits.chars().all(|ch| ch.is_ascii_digit()) {
        return None;
    }
    text.parse::<i64>().ok()
}

/// Returns the inner text of a literal bounded by a matching `"` or `'` pair.
pub fn strip_quotes(text: &str) -> Option<&str> {
    let bytes = text.as_bytes();
    if bytes.len() < 2 {
        return None;
    }
    let first = bytes[0];
    if (first == b'"' || first == b'\'') && bytes[bytes.len() - 1] == first {
        Some(&text[1..text.len() - 1])
    } else {
        None
    }
}

pub fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
}
