//! Command registration and parsing of invocations out of free text.
//!
//! Parsing never fails: a line that does not start with the command prefix,
//! or that names an unregistered command, is simply not an invocation.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::core::delimiters::Delimiters;
use crate::core::predicates::has_text;
use crate::core::state::{CallbackSource, CommandDescriptor, State};

/// Two or more whitespace characters separate arguments; one does not.
static ARGUMENT_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s{2,}").expect("argument separator regex"));

/// A parsed request to run a registered command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub name: String,
    pub descriptor: CommandDescriptor,
    pub args: Vec<String>,
}

/// Store a command under `name`, replacing any previous descriptor.
pub fn register_command(
    name: &str,
    arg_names: &str,
    callback: CallbackSource,
    state: &mut State,
    delimiters: &Delimiters,
) {
    let args: Vec<String> = delimiters
        .split_names(arg_names)
        .into_iter()
        .map(str::to_string)
        .collect();
    debug!(name, args = ?args, "registering command");
    state.commands.insert(
        name.to_string(),
        CommandDescriptor {
            args,
            callback_source: callback,
        },
    );
}

/// Remove a command. Returns whether it was registered.
pub fn unregister_command(name: &str, state: &mut State) -> bool {
    state.commands.remove(name).is_some()
}

/// Parse one line of text as an invocation of a registered command.
pub fn parse_invocation(text: &str, state: &State, delimiters: &Delimiters) -> Option<Invocation> {
    let body = text
        .trim()
        .strip_prefix(delimiters.command_prefix.as_str())?
        .trim_start();

    let (name, remainder) = match body.find(char::is_whitespace) {
        Some(split_at) => body.split_at(split_at),
        None => (body, ""),
    };
    if name.is_empty() {
        return None;
    }

    let Some(descriptor) = state.commands.get(name) else {
        debug!(name, "ignoring unregistered command");
        return None;
    };

    Some(Invocation {
        name: name.to_string(),
        descriptor: descriptor.clone(),
        args: split_arguments(remainder),
    })
}

/// Parse every line of `text`, keeping the invocations in order.
pub fn scan_invocations(text: &str, state: &State, delimiters: &Delimiters) -> Vec<Invocation> {
    text.lines()
        .filter_map(|line| parse_invocation(line, state, delimiters))
        .collect()
}

fn split_arguments(text: &str) -> Vec<String> {
    ARGUMENT_SEPARATOR
        .split(text.trim())
        .filter(|arg| has_text(arg))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with_greet() -> State {
        let mut state = State::default();
        register_command(
            "greet",
            "name",
            CallbackSource::template("hi {{ name }}"),
            &mut state,
            &Delimiters::default(),
        );
        state
    }

    fn parse(text: &str, state: &State) -> Option<Invocation> {
        parse_invocation(text, state, &Delimiters::default())
    }

    #[test]
    fn register_stores_args_and_source() {
        let state = state_with_greet();
        let descriptor = &state.commands["greet"];
        assert_eq!(descriptor.args, vec!["name"]);
        assert_eq!(
            descriptor.callback_source,
            CallbackSource::template("hi {{ name }}")
        );
    }

    #[test]
    fn register_overwrites_existing_descriptor() {
        let mut state = state_with_greet();
        register_command(
            "greet",
            "first, last",
            CallbackSource::native("echo"),
            &mut state,
            &Delimiters::default(),
        );
        assert_eq!(state.commands.len(), 1);
        assert_eq!(state.commands["greet"].args, vec!["first", "last"]);
    }

    #[test]
    fn parse_registered_command_with_argument() {
        let state = state_with_greet();
        let invocation = parse("> greet  World", &state).expect("invocation");
        assert_eq!(invocation.name, "greet");
        assert_eq!(invocation.descriptor, state.commands["greet"]);
        assert_eq!(invocation.args, vec!["World"]);
    }

    #[test]
    fn single_spaces_stay_inside_arguments() {
        let state = state_with_greet();
        let invocation = parse(">greet  the old king   a  b ", &state).expect("invocation");
        assert_eq!(invocation.args, vec!["the old king", "a", "b"]);
    }

    #[test]
    fn command_without_arguments_parses() {
        let state = state_with_greet();
        let invocation = parse("  > greet  ", &state).expect("invocation");
        assert!(invocation.args.is_empty());
    }

    #[test]
    fn unknown_command_is_no_match() {
        let state = state_with_greet();
        assert_eq!(parse("> nope arg", &state), None);
    }

    #[test]
    fn text_without_prefix_is_no_match() {
        let state = state_with_greet();
        assert_eq!(parse("greet  World", &state), None);
        assert_eq!(parse(">", &state), None);
        assert_eq!(parse("", &state), None);
    }

    #[test]
    fn scan_finds_invocations_line_by_line() {
        let state = state_with_greet();
        let text = "The bard arrives.\n> greet  Ana\n> quote  not registered\n> greet  Bo\n";
        let found = scan_invocations(text, &state, &Delimiters::default());
        let args: Vec<&str> = found.iter().map(|inv| inv.args[0].as_str()).collect();
        assert_eq!(args, vec!["Ana", "Bo"]);
    }

    #[test]
    fn unregister_removes_descriptor() {
        let mut state = state_with_greet();
        assert!(unregister_command("greet", &mut state));
        assert!(!unregister_command("greet", &mut state));
        assert_eq!(parse("> greet  x", &state), None);
    }
}
