//! Persistent variables and invokable commands embedded in narrative text.
//!
//! A host re-reads free-form text every turn and keeps a [`State`] root in a
//! value-only format between turns. This crate turns delimiter-fenced value
//! blocks into bound variables, and turns command lines into calls of bodies
//! that were stored as plain data.
//!
//! - **[`core`]**: Pure, deterministic logic (values, predicates, DSV
//!   extraction and binding, the command registry). No I/O.
//! - **[`invoke`]**: Reconstitution of stored command bodies at call time.
//! - **[`turn`]**: One host turn: extract, bind, invoke every command.
//! - **[`io`]**: Host-side persistence (config, state file, scaffolding).
//!
//! # Example
//!
//! ```
//! use salt::core::commands::{parse_invocation, register_command};
//! use salt::core::delimiters::Delimiters;
//! use salt::core::dsv::extract_block;
//! use salt::core::state::{CallbackSource, State};
//! use salt::core::value::Value;
//! use salt::core::vars::bind_variables;
//! use salt::invoke::{NativeTable, invoke_command};
//!
//! let delimiters = Delimiters::default();
//! let mut state = State::default();
//!
//! assert!(extract_block("!!!a::b::c\n", &mut state, &delimiters).is_extracted());
//! bind_variables("x y z", &mut state, &delimiters).unwrap();
//! assert_eq!(state.vars["y"], Value::text("b"));
//!
//! register_command("greet", "name", CallbackSource::template("hi {{ name }}"), &mut state, &delimiters);
//! let call = parse_invocation("> greet  World", &state, &delimiters).unwrap();
//! let out = invoke_command(&call.name, &call.args, &mut state, &NativeTable::new()).unwrap();
//! assert_eq!(out, Value::text("hi World"));
//! ```

pub mod core;
pub mod error;
pub mod exit_codes;
pub mod invoke;
pub mod io;
pub mod logging;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
pub mod turn;

pub use crate::core::state::State;
pub use crate::error::{Result, SaltError};
