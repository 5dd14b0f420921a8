//! Stateless classification of values and raw text.

use crate::core::value::Value;

/// True if `text` has at least one non-whitespace character.
pub fn has_text(text: &str) -> bool {
    !text.trim().is_empty()
}

/// True iff `value` is text with at least one non-whitespace character.
///
/// Every non-text variant (including `Null`) has no content.
pub fn has_content(value: &Value) -> bool {
    match value {
        Value::Text(text) => has_text(text),
        Value::Null
        | Value::Bool(_)
        | Value::Number(_)
        | Value::Sequence(_)
        | Value::Record(_)
        | Value::Pattern(_) => false,
    }
}

pub fn no_content(value: &Value) -> bool {
    !has_content(value)
}

/// True if `value` can serve as a scan target: a compiled pattern, or text
/// with content (any non-blank string is accepted as an ad hoc pattern).
pub fn looks_like_pattern(value: &Value) -> bool {
    match value {
        Value::Pattern(_) => true,
        other => has_content(other),
    }
}

/// True only for key/value records; scalars, sequences, and patterns are not.
pub fn is_plain_record(value: &Value) -> bool {
    matches!(value, Value::Record(_))
}
