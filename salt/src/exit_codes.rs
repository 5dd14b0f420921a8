//! Stable exit codes for `salt` CLI commands.

/// Command succeeded.
pub const OK: i32 = 0;
/// Invalid layout, config, state, or arguments.
pub const INVALID: i32 = 1;
/// `salt turn --bind` found no usable DSV block in the text.
pub const NO_BLOCK: i32 = 2;
/// A command failed during `salt turn` or `salt invoke`.
pub const COMMAND_FAILED: i32 = 3;
