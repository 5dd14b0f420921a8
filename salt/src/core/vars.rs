//! Binding staged DSV fields to variables, plus variable mutators.

use tracing::debug;

use crate::core::delimiters::{Delimiters, Separator};
use crate::core::state::State;
use crate::core::transform::split_into_fields;
use crate::core::value::{Record, Value};
use crate::error::{Result, SaltError};

/// Assign the staged block's fields to `names`, left to right.
///
/// Names past the last field are removed from `vars`; fields past the last
/// name are ignored. Fails with [`SaltError::MissingDsv`] when nothing was
/// extracted.
pub fn bind_variables(names: &str, state: &mut State, delimiters: &Delimiters) -> Result<()> {
    let block = state.dsv.as_deref().ok_or(SaltError::MissingDsv)?;
    let values: Vec<String> = delimiters
        .dsv_field
        .split(block)
        .into_iter()
        .map(str::to_string)
        .collect();
    let names = delimiters.split_names(names);
    debug!(names = names.len(), values = values.len(), "binding variables");

    let mut values = values.into_iter();
    for name in names {
        match values.next() {
            Some(value) => {
                state.vars.insert(name.to_string(), Value::Text(value));
            }
            None => {
                state.vars.remove(name);
            }
        }
    }
    Ok(())
}

/// Decompose variable `name` into the fields listed in `field_names`.
///
/// Returns `false` when the variable did not exist (its fields are declared
/// as `Null`).
pub fn split_variable(
    name: &str,
    delimiter: &Separator,
    field_names: &str,
    state: &mut State,
    delimiters: &Delimiters,
) -> bool {
    let fields = delimiters.split_names(field_names);
    split_into_fields(&mut state.vars, name, delimiter, fields.as_slice())
}

/// Set every variable in `names` to a clone of `value`.
pub fn set_variables(names: &str, value: &Value, state: &mut State, delimiters: &Delimiters) {
    set_variables_with(names, |_, _| value.clone(), state, delimiters);
}

/// Set every variable in `names` to what `factory` computes for it.
///
/// The factory sees the variables as assigned so far and the name being set.
pub fn set_variables_with<F>(names: &str, mut factory: F, state: &mut State, delimiters: &Delimiters)
where
    F: FnMut(&Record, &str) -> Value,
{
    for name in delimiters.split_names(names) {
        let value = factory(&state.vars, name);
        state.vars.insert(name.to_string(), value);
    }
}

/// True if every name in `names` is a key in `vars`, whatever its value.
pub fn variables_exist(names: &str, state: &State, delimiters: &Delimiters) -> bool {
    delimiters
        .split_names(names)
        .into_iter()
        .all(|name| state.vars.contains_key(name))
}
