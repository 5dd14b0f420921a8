//! Deterministic, pure logic for variables and commands.
//!
//! Core modules are free of I/O. They operate on an explicitly passed
//! [`state::State`] and return deterministic outputs suitable for tests.

pub mod commands;
pub mod delimiters;
pub mod dsv;
pub mod predicates;
pub mod state;
pub mod transform;
pub mod value;
pub mod vars;
