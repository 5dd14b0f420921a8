//! Reconstituting stored command bodies and calling them.
//!
//! A descriptor is turned back into something callable on every invocation:
//! template bodies are compiled into a fresh environment, native bodies are
//! looked up by key in a [`NativeTable`]. Nothing is cached between calls.

use std::collections::{BTreeMap, HashMap};

use anyhow::{bail, ensure};
use minijinja::Environment;
use tracing::{debug, warn};

use crate::core::state::{CallbackSource, State};
use crate::core::value::Value;
use crate::error::{Result, SaltError};

/// Native command body. Receives the state and the positional arguments.
pub type NativeFn = fn(&mut State, &[String]) -> anyhow::Result<Value>;

/// Natives available to every runtime.
static BUILTINS: &[(&str, NativeFn)] = &[
    ("set", builtin_set),
    ("unset", builtin_unset),
    ("echo", builtin_echo),
];

/// Keys to native command bodies, rebuilt at process start.
#[derive(Debug, Clone, Default)]
pub struct NativeTable {
    entries: HashMap<String, NativeFn>,
}

impl NativeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Table preloaded with the `set`, `unset`, and `echo` builtins.
    pub fn with_builtins() -> Self {
        let mut table = Self::new();
        for (key, native) in BUILTINS {
            table.insert(key, *native);
        }
        table
    }

    /// Register `native` under `key`, returning any body it replaced.
    pub fn insert(&mut self, key: &str, native: NativeFn) -> Option<NativeFn> {
        self.entries.insert(key.to_string(), native)
    }

    pub fn get(&self, key: &str) -> Option<NativeFn> {
        self.entries.get(key).copied()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Registered keys in lexicographic order.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}

/// Run the command registered as `name` with positional `args`.
pub fn invoke_command(
    name: &str,
    args: &[String],
    state: &mut State,
    natives: &NativeTable,
) -> Result<Value> {
    let descriptor = state
        .commands
        .get(name)
        .cloned()
        .ok_or_else(|| SaltError::UnknownCommand(name.to_string()))?;
    debug!(name, args = ?args, "invoking command");

    match descriptor.callback_source {
        CallbackSource::Template { source } => {
            render_template(name, &descriptor.args, &source, args, state)
        }
        CallbackSource::Native { key } => {
            let native = natives
                .get(&key)
                .ok_or_else(|| SaltError::CorruptDescriptor {
                    name: name.to_string(),
                    reason: format!("no native body registered under key '{key}'"),
                })?;
            native(state, args).map_err(|err| {
                warn!(name, error = %err, "native command failed");
                SaltError::CommandFailed {
                    name: name.to_string(),
                    message: format!("{err:#}"),
                }
            })
        }
    }
}

/// Compile `source` and render it with each declared argument bound by name.
///
/// `args` (the full positional list) and `vars` are always in scope; a
/// declared argument with the same name shadows them.
fn render_template(
    name: &str,
    declared: &[String],
    source: &str,
    args: &[String],
    state: &State,
) -> Result<Value> {
    let env = Environment::new();
    let template = env
        .template_from_str(source)
        .map_err(|err| SaltError::CorruptDescriptor {
            name: name.to_string(),
            reason: err.to_string(),
        })?;

    let mut context: BTreeMap<&str, minijinja::Value> = BTreeMap::new();
    context.insert("args", minijinja::Value::from_serialize(args));
    context.insert("vars", minijinja::Value::from_serialize(&state.vars));
    for (arg_name, arg) in declared.iter().zip(args) {
        context.insert(arg_name.as_str(), minijinja::Value::from(arg.as_str()));
    }

    let rendered = template
        .render(context)
        .map_err(|err| SaltError::CommandFailed {
            name: name.to_string(),
            message: err.to_string(),
        })?;
    Ok(Value::Text(rendered))
}

fn builtin_set(state: &mut State, args: &[String]) -> anyhow::Result<Value> {
    let [name, value, ..] = args else {
        bail!("set expects a variable name and a value");
    };
    ensure!(!name.trim().is_empty(), "set expects a non-empty variable name");
    state.vars.insert(name.clone(), Value::text(value.as_str()));
    Ok(Value::text(value.as_str()))
}

fn builtin_unset(state: &mut State, args: &[String]) -> anyhow::Result<Value> {
    let Some(name) = args.first() else {
        bail!("unset expects a variable name");
    };
    Ok(Value::Bool(state.vars.remove(name).is_some()))
}

fn builtin_echo(_state: &mut State, args: &[String]) -> anyhow::Result<Value> {
    Ok(Value::Text(args.join(" ")))
}
