//! CLI tests for `salt` subcommands.
//!
//! Spawns the salt binary inside an initialized scratch host and verifies
//! exit codes and the persisted state.

use std::process::{Command, Output};

use salt::core::value::Value;
use salt::exit_codes;
use salt::test_support::TestHost;

fn salt(host: &TestHost, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_salt"))
        .current_dir(host.root())
        .args(args)
        .output()
        .expect("run salt")
}

#[test]
fn turn_binds_and_invokes_registered_command() {
    let host = TestHost::new().expect("host");

    let register = salt(
        &host,
        &["register", "greet", "--args", "name", "--template", "hi {{ name }}"],
    );
    assert_eq!(register.status.code(), Some(exit_codes::OK));

    let text = host
        .write_text("scene.txt", "!!!a::b::c\n> greet  World\n")
        .expect("write scene");
    let turn = salt(
        &host,
        &["turn", text.to_str().expect("utf-8 path"), "--bind", "x y z"],
    );
    assert_eq!(turn.status.code(), Some(exit_codes::OK));
    let stdout = String::from_utf8_lossy(&turn.stdout);
    assert!(stdout.contains("command: greet ok hi World"), "{stdout}");

    let state = host.load().expect("load state");
    assert_eq!(state.vars["x"], Value::text("a"));
    assert_eq!(state.vars["z"], Value::text("c"));
}

#[test]
fn clear_drops_staged_block() {
    let host = TestHost::new().expect("host");
    let text = host
        .write_text("scene.txt", "!!!a::b\n")
        .expect("write scene");
    let turn = salt(&host, &["turn", text.to_str().expect("utf-8 path")]);
    assert_eq!(turn.status.code(), Some(exit_codes::OK));
    assert_eq!(host.load().expect("load state").dsv.as_deref(), Some("a::b"));

    let clear = salt(&host, &["clear"]);
    assert_eq!(clear.status.code(), Some(exit_codes::OK));
    assert!(String::from_utf8_lossy(&clear.stdout).contains("clear: staged=true"));
    assert!(host.load().expect("load state").dsv.is_none());

    let again = salt(&host, &["clear"]);
    assert!(String::from_utf8_lossy(&again.stdout).contains("clear: staged=false"));
}

#[test]
fn turn_without_block_exits_with_no_block_code() {
    let host = TestHost::new().expect("host");
    let text = host
        .write_text("scene.txt", "Just prose today.\n")
        .expect("write scene");

    let turn = salt(&host, &["turn", text.to_str().expect("utf-8 path"), "--bind", "x"]);
    assert_eq!(turn.status.code(), Some(exit_codes::NO_BLOCK));
}

#[test]
fn invoke_native_persists_mutation() {
    let host = TestHost::new().expect("host");
    let register = salt(&host, &["register", "set", "--args", "name value", "--native", "set"]);
    assert_eq!(register.status.code(), Some(exit_codes::OK));

    let invoke = salt(&host, &["invoke", "set", "mood", "calm"]);
    assert_eq!(invoke.status.code(), Some(exit_codes::OK));
    assert_eq!(String::from_utf8_lossy(&invoke.stdout).trim(), "calm");

    let state = host.load().expect("load state");
    assert_eq!(state.vars["mood"], Value::text("calm"));
}

#[test]
fn invoke_unknown_command_exits_with_command_failed() {
    let host = TestHost::new().expect("host");
    let invoke = salt(&host, &["invoke", "nope"]);
    assert_eq!(invoke.status.code(), Some(exit_codes::COMMAND_FAILED));
    assert!(String::from_utf8_lossy(&invoke.stderr).contains("unknown command 'nope'"));
}

#[test]
fn register_rejects_unknown_native_key() {
    let host = TestHost::new().expect("host");
    let register = salt(&host, &["register", "fly", "--native", "levitate"]);
    assert_eq!(register.status.code(), Some(exit_codes::INVALID));
    assert!(host.load().expect("load state").commands.is_empty());
}
