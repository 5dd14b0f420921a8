//! Error types for caller-contract violations and corrupted descriptors.
//!
//! Routine absence (no block in the text, text that names no command) is
//! reported through return values, never through [`SaltError`].

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SaltError>;

#[derive(Debug, Error)]
pub enum SaltError {
    /// Variables were bound before any block was extracted.
    #[error("no DSV block staged in state; extract a block before binding variables")]
    MissingDsv,

    /// No descriptor is registered under the invoked name.
    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    /// A stored command body cannot be turned back into something callable.
    #[error("command '{name}' has a corrupt descriptor: {reason}")]
    CorruptDescriptor { name: String, reason: String },

    /// The command body ran and reported a failure.
    #[error("command '{name}' failed: {message}")]
    CommandFailed { name: String, message: String },

    /// A configured delimiter pattern does not compile.
    #[error("invalid delimiter pattern: {0}")]
    InvalidDelimiter(#[from] regex::Error),
}
