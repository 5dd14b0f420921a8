//! State load/save helpers with schema validation.
//!
//! The state file is the host's value-only persistence between turns.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use jsonschema::validator_for;
use serde_json::Value;
use tracing::debug;

use crate::core::state::State;

/// Load and validate state from disk.
pub fn load_state(schema_path: &Path, state_path: &Path) -> Result<State> {
    debug!(path = %state_path.display(), "loading state");
    let contents = fs::read_to_string(state_path)
        .with_context(|| format!("read state {}", state_path.display()))?;
    let value: Value = serde_json::from_str(&contents)
        .with_context(|| format!("parse state {}", state_path.display()))?;
    validate_schema(schema_path, &value)?;
    let state: State = serde_json::from_value(value)
        .with_context(|| format!("deserialize state {}", state_path.display()))?;
    debug!(
        vars = state.vars.len(),
        commands = state.commands.len(),
        staged = state.dsv.is_some(),
        "state loaded"
    );
    Ok(state)
}

/// Atomically write state to disk (temp file + rename).
pub fn write_state(state_path: &Path, state: &State) -> Result<()> {
    debug!(path = %state_path.display(), vars = state.vars.len(), "writing state");
    let mut buf = serde_json::to_string_pretty(state).context("serialize state")?;
    buf.push('\n');
    super::write_atomic(state_path, &buf)
}

fn validate_schema(schema_path: &Path, state: &Value) -> Result<()> {
    let schema_contents = fs::read_to_string(schema_path)
        .with_context(|| format!("read schema {}", schema_path.display()))?;
    let schema_value: Value = serde_json::from_str(&schema_contents)
        .with_context(|| format!("parse schema {}", schema_path.display()))?;
    let compiled =
        validator_for(&schema_value).map_err(|err| anyhow!("invalid schema: {}", err))?;
    if !compiled.is_valid(state) {
        let messages = compiled
            .iter_errors(state)
            .map(|err| err.to_string())
            .collect::<Vec<_>>();
        return Err(anyhow!(
            "state schema validation failed: {}",
            messages.join("; ")
        ));
    }
    Ok(())
}
