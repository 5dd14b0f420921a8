//! Scalar-to-record promotion and delimited-field decomposition.
//!
//! Both operate on any [`Record`] property, not only variables.

use crate::core::delimiters::Separator;
use crate::core::predicates::is_plain_record;
use crate::core::value::{Record, Value};

/// Sub-field that archives the scalar a property held before promotion.
pub const DEFAULT_VALUE_KEY: &str = "_value";

/// Make `container[key]` a record.
///
/// - Absent: inserts an empty record, returns `false`.
/// - Already a record: untouched, returns `true`.
/// - Anything else: replaced by a record holding the old value under
///   `value_key` (unless it was `Null`), returns `true`.
pub fn promote_to_record(container: &mut Record, key: &str, value_key: &str) -> bool {
    let Some(slot) = container.get_mut(key) else {
        container.insert(key.to_string(), Value::Record(Record::new()));
        return false;
    };

    if !is_plain_record(slot) {
        let previous = std::mem::take(slot);
        let mut record = Record::new();
        if !previous.is_null() {
            record.insert(value_key.to_string(), previous);
        }
        *slot = Value::Record(record);
    }

    true
}

/// Promote `container[key]` and decompose its archived text into fields.
///
/// A property that did not exist gets every field declared as `Null` and
/// returns `false`. Otherwise the archived `_value` is split on `delimiter`
/// and assigned to `field_names` in order: surplus values are dropped, and
/// fields left without a value are removed. The archive itself is kept.
/// A record with no text archive is left as it is, so repeating a split on a
/// later turn keeps the declared shape and whatever was assigned into it.
pub fn split_into_fields<S: AsRef<str>>(
    container: &mut Record,
    key: &str,
    delimiter: &Separator,
    field_names: &[S],
) -> bool {
    let existed = promote_to_record(container, key, DEFAULT_VALUE_KEY);
    let Some(record) = container.get_mut(key).and_then(Value::as_record_mut) else {
        return existed;
    };

    if !existed {
        for field in field_names {
            record.insert(field.as_ref().to_string(), Value::Null);
        }
        return false;
    }

    let values: Vec<String> = match record.get(DEFAULT_VALUE_KEY) {
        Some(Value::Text(archived)) => delimiter
            .split(archived)
            .into_iter()
            .map(str::to_string)
            .collect(),
        _ => return true,
    };

    let mut values = values.into_iter();
    for field in field_names {
        match values.next() {
            Some(value) => {
                record.insert(field.as_ref().to_string(), Value::Text(value));
            }
            None => {
                record.remove(field.as_ref());
            }
        }
    }

    true
}
