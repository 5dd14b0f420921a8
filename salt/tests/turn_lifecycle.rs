//! Multi-turn harness tests with persistence between turns.
//!
//! Every turn reloads the state from `.salt/state.json`, processes text, and
//! writes the state back, the way a host runs between invocations.

use salt::core::delimiters::Separator;
use salt::core::dsv::Extraction;
use salt::core::state::State;
use salt::core::value::Value;
use salt::core::vars::{split_variable, variables_exist};
use salt::test_support::{TestHost, with_native, with_template};
use salt::turn::{Runtime, TurnOptions, TurnReport, process_turn};

fn run_turn(host: &TestHost, text: &str, bind: Option<&str>) -> (State, TurnReport) {
    let runtime = Runtime::default();
    let mut state = host.load().expect("load state");
    let options = TurnOptions {
        bind: bind.map(str::to_string),
    };
    let report = process_turn(text, &mut state, &runtime, &options).expect("turn");
    host.save(&state).expect("save state");
    (state, report)
}

/// Full lifecycle: register commands, bind a block, decompose a variable,
/// and invoke commands across reloads.
///
/// Turn sequence:
/// 1. Setup: register `greet` (template) and `set` (native), persist.
/// 2. Turn 1: block `Mara/ranger::12` bound to `hero hp`, `greet` runs.
/// 3. Between turns: `hero` split into `name class`, persisted.
/// 4. Turn 2: no block; `set` changes `hp`, `greet` sees record fields.
/// 5. Turn 3: new block rebinds `hp`; unknown command text is ignored.
#[test]
fn variables_and_commands_survive_reloads() {
    let host = TestHost::new().expect("host");
    let runtime = Runtime::default();

    let mut state = host.load().expect("load");
    with_template(
        &mut state,
        "greet",
        "who",
        "{{ who }} greets {{ vars.hero.name if vars.hero.name else vars.hero }}",
    );
    with_native(&mut state, "set", "name value", "set");
    host.save(&state).expect("save");

    // Turn 1
    let (state, report) = run_turn(
        &host,
        "The gate creaks open.\n!!!Mara/ranger::12\n> greet  The guard\n",
        Some("hero hp"),
    );
    assert_eq!(report.extraction, Extraction::Extracted);
    assert!(report.bound);
    assert_eq!(state.vars["hero"], Value::text("Mara/ranger"));
    assert_eq!(state.vars["hp"], Value::text("12"));
    assert_eq!(
        report.commands[0].result,
        Ok(Value::text("The guard greets Mara/ranger"))
    );

    // Between turns: the host decomposes `hero`.
    let mut state = host.load().expect("load");
    assert!(split_variable(
        "hero",
        &Separator::literal("/"),
        "name class",
        &mut state,
        &runtime.delimiters,
    ));
    host.save(&state).expect("save");

    // Turn 2
    let (state, report) = run_turn(
        &host,
        "Night falls.\n> set  hp  9\n> greet  An owl\n",
        Some("hero hp"),
    );
    assert_eq!(report.extraction, Extraction::NoBlock);
    assert!(!report.bound);
    assert_eq!(state.vars["hp"], Value::text("9"));
    assert_eq!(report.commands.len(), 2);
    assert_eq!(report.commands[1].result, Ok(Value::text("An owl greets Mara")));
    let hero = state.vars["hero"].as_record().expect("hero record");
    assert_eq!(hero["class"], Value::text("ranger"));

    // Turn 3
    let (state, report) = run_turn(
        &host,
        "!!!Mara/ranger::7\n> dance  wildly\n",
        Some("hero hp"),
    );
    assert!(report.bound);
    assert!(report.commands.is_empty());
    assert_eq!(state.vars["hp"], Value::text("7"));
    assert_eq!(state.dsv.as_deref(), Some("Mara/ranger::7"));
    assert!(variables_exist("hero, hp", &state, &runtime.delimiters));
}

/// A corrupt descriptor fails its own invocation and nothing else.
#[test]
fn corrupt_descriptor_is_isolated_per_command() {
    let host = TestHost::new().expect("host");

    let mut state = host.load().expect("load");
    with_template(&mut state, "broken", "", "{{ unclosed");
    with_native(&mut state, "ghost", "", "not-a-builtin");
    with_native(&mut state, "echo", "words", "echo");
    host.save(&state).expect("save");

    let (_, report) = run_turn(&host, "> broken\n> ghost\n> echo  still  here\n", None);
    assert_eq!(report.commands.len(), 3);
    assert_eq!(report.failures().count(), 2);
    assert_eq!(report.commands[2].result, Ok(Value::text("still here")));
    let ghost_error = report.commands[1].result.clone().expect_err("ghost fails");
    assert!(ghost_error.contains("corrupt descriptor"));
}

/// An empty block does not clobber the block staged on an earlier turn.
#[test]
fn empty_block_keeps_previous_staging() {
    let host = TestHost::new().expect("host");

    let (_, first) = run_turn(&host, "!!!a::b\n", Some("x y"));
    assert!(first.bound);

    let (state, second) = run_turn(&host, "!!! :: \n", Some("x y"));
    assert_eq!(second.extraction, Extraction::Empty);
    assert!(!second.bound);
    assert_eq!(state.dsv.as_deref(), Some("a::b"));
    assert_eq!(state.vars["y"], Value::text("b"));
}
