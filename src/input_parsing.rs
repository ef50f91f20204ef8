//! Value helpers the generated form applies to free-text union fields.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

/// Letters, digits, whitespace, `-` and `_` only.
static IDENTIFIER_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9_\s-]+$").expect("identifier pattern is a valid regex"));

/// Text typed into a field that accepts a number or a string.
///
/// Valid JSON is taken as is (so `3` and `2.5` become numbers); anything
/// else, including the empty string, stays a string.
pub fn parse_number_or_string(text: &str) -> Value {
    if text.is_empty() {
        return Value::String(String::new());
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

/// Text typed into a field that holds arbitrary JSON.
///
/// Empty text means no value. Text that is not JSON is still accepted when
/// it looks like a plain identifier (at least one letter, no JSON
/// punctuation); otherwise the JSON error is returned.
pub fn parse_json_or_identifier(text: &str) -> Result<Option<Value>, serde_json::Error> {
    if text.is_empty() {
        return Ok(None);
    }
    match serde_json::from_str(text) {
        Ok(value) => Ok(Some(value)),
        Err(_) if is_identifier(text) => Ok(Some(Value::String(text.to_string()))),
        Err(err) => Err(err),
    }
}

fn is_identifier(text: &str) -> bool {
    text.chars().any(|c| c.is_ascii_alphabetic()) && IDENTIFIER_CHARS.is_match(text)
}
