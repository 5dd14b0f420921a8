//! The persistent state root handed to every operation.
//!
//! The host owns the root and reloads it from JSON between turns, so every
//! field here must stay plain data.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::value::Record;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct State {
    /// Variable name to text, null, or structured record.
    pub vars: Record,
    /// Registered commands by name.
    pub commands: BTreeMap<String, CommandDescriptor>,
    /// Raw block staged by the most recent successful extraction.
    #[serde(rename = "DSV", skip_serializing_if = "Option::is_none")]
    pub dsv: Option<String>,
    /// Reserved for the host.
    pub memory: Record,
    /// Reserved for the host.
    pub data: Record,
}

/// Persisted form of a registered command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandDescriptor {
    /// Declared argument names, in positional order.
    pub args: Vec<String>,
    pub callback_source: CallbackSource,
}

/// Command body in a form that survives a value-only round trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum CallbackSource {
    /// Template text, compiled afresh on every invocation.
    Template { source: String },
    /// Key into the native table assembled at process start.
    Native { key: String },
}

impl CallbackSource {
    pub fn template(source: impl Into<String>) -> Self {
        Self::Template {
            source: source.into(),
        }
    }

    pub fn native(key: impl Into<String>) -> Self {
        Self::Native { key: key.into() }
    }
}
