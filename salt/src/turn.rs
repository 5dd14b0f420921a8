//! One processing turn over host-supplied text.
//!
//! A turn stages the DSV block, optionally binds it, then runs every
//! invocation found in the text. Command failures are recorded per command
//! so a single bad command never aborts the rest of the turn.

use tracing::{debug, info, warn};

use crate::core::commands::scan_invocations;
use crate::core::delimiters::Delimiters;
use crate::core::dsv::{Extraction, extract_block};
use crate::core::state::State;
use crate::core::value::Value;
use crate::core::vars::bind_variables;
use crate::error::Result;
use crate::invoke::{NativeTable, invoke_command};

/// Process-wide defaults owned by the host: delimiters and native bodies.
#[derive(Debug, Clone)]
pub struct Runtime {
    pub delimiters: Delimiters,
    pub natives: NativeTable,
}

impl Default for Runtime {
    fn default() -> Self {
        Self {
            delimiters: Delimiters::default(),
            natives: NativeTable::with_builtins(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TurnOptions {
    /// Variable names to bind when this turn's text carries a block.
    pub bind: Option<String>,
}

/// Outcome of one command run during a turn.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandRun {
    pub name: String,
    pub args: Vec<String>,
    pub result: std::result::Result<Value, String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TurnReport {
    pub extraction: Extraction,
    /// True if variables were bound from this turn's block.
    pub bound: bool,
    /// Commands in the order they appeared in the text.
    pub commands: Vec<CommandRun>,
}

impl TurnReport {
    pub fn failures(&self) -> impl Iterator<Item = &CommandRun> {
        self.commands.iter().filter(|run| run.result.is_err())
    }

    pub fn has_failures(&self) -> bool {
        self.failures().next().is_some()
    }
}

/// Run one turn over `text` against `state`.
///
/// Binding only happens when this turn's text carried a block, so a block
/// staged on an earlier turn is never re-bound.
pub fn process_turn(
    text: &str,
    state: &mut State,
    runtime: &Runtime,
    options: &TurnOptions,
) -> Result<TurnReport> {
    let extraction = extract_block(text, state, &runtime.delimiters);

    let mut bound = false;
    if let Some(names) = options.bind.as_deref() {
        if extraction.is_extracted() {
            bind_variables(names, state, &runtime.delimiters)?;
            bound = true;
        } else {
            debug!(outcome = ?extraction, "skipping variable binding");
        }
    }

    let invocations = scan_invocations(text, state, &runtime.delimiters);
    let mut commands = Vec::with_capacity(invocations.len());
    for invocation in invocations {
        let result = invoke_command(&invocation.name, &invocation.args, state, &runtime.natives)
            .map_err(|err| {
                warn!(name = %invocation.name, error = %err, "command failed during turn");
                err.to_string()
            });
        commands.push(CommandRun {
            name: invocation.name,
            args: invocation.args,
            result,
        });
    }

    info!(
        extraction = ?extraction,
        bound,
        commands = commands.len(),
        "turn processed"
    );
    Ok(TurnReport {
        extraction,
        bound,
        commands,
    })
}
