//! Host harness for the salt substrate.
//!
//! Owns the one state instance for a project (`.salt/state.json`), loads it
//! before every command and persists it afterwards.

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing::debug;

use salt::core::commands::{register_command, unregister_command};
use salt::core::dsv::clear_block;
use salt::core::state::{CallbackSource, State};
use salt::core::value::Value;
use salt::exit_codes;
use salt::invoke::{NativeTable, invoke_command};
use salt::io::config::load_config;
use salt::io::init::{InitOptions, SaltPaths, init_workspace};
use salt::io::state_store::{load_state, write_state};
use salt::logging;
use salt::turn::{Runtime, TurnOptions, process_turn};

#[derive(Parser)]
#[command(
    name = "salt",
    version,
    about = "Persistent variables and commands embedded in narrative text"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create `.salt/` with an empty state, its schema, and default config.
    Init {
        /// Overwrite existing files.
        #[arg(short, long)]
        force: bool,
    },
    /// Check config and state against the schema.
    Validate,
    /// Process one turn of text (a file path, or `-` for stdin).
    Turn {
        text: PathBuf,
        /// Variable names to bind from the text's DSV block.
        #[arg(long)]
        bind: Option<String>,
    },
    /// Register (or replace) a command.
    Register {
        name: String,
        /// Argument names, separated like variable name lists.
        #[arg(long, default_value = "")]
        args: String,
        /// Template body, rendered with the arguments bound by name.
        #[arg(long, conflicts_with = "native", required_unless_present = "native")]
        template: Option<String>,
        /// Key of a built-in native body.
        #[arg(long)]
        native: Option<String>,
    },
    /// Remove a registered command.
    Unregister { name: String },
    /// Drop the staged DSV block so the next bind needs a fresh extraction.
    Clear,
    /// Invoke a registered command with positional arguments.
    Invoke {
        name: String,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
}

fn main() {
    logging::init();
    match run() {
        Ok(code) => process::exit(code),
        Err(err) => {
            eprintln!("{:#}", err);
            process::exit(exit_codes::INVALID);
        }
    }
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    let root = std::env::current_dir().context("resolve current directory")?;
    match cli.command {
        Command::Init { force } => cmd_init(&root, force),
        Command::Validate => cmd_validate(&root),
        Command::Turn { text, bind } => cmd_turn(&root, &text, bind),
        Command::Register {
            name,
            args,
            template,
            native,
        } => cmd_register(&root, &name, &args, template, native),
        Command::Unregister { name } => cmd_unregister(&root, &name),
        Command::Clear => cmd_clear(&root),
        Command::Invoke { name, args } => cmd_invoke(&root, &name, &args),
    }
}

/// Loaded project: paths, runtime built from config, and the state root.
struct Host {
    paths: SaltPaths,
    runtime: Runtime,
    state: State,
}

impl Host {
    fn open(root: &Path) -> Result<Self> {
        let paths = SaltPaths::new(root);
        let config = load_config(&paths.config_path).context("load config.toml")?;
        let runtime = Runtime {
            delimiters: config.delimiters()?,
            natives: NativeTable::with_builtins(),
        };
        let state =
            load_state(&paths.schema_path, &paths.state_path).context("load state.json")?;
        Ok(Self {
            paths,
            runtime,
            state,
        })
    }

    fn save(&self) -> Result<()> {
        write_state(&self.paths.state_path, &self.state).context("write state.json")
    }
}

fn cmd_init(root: &Path, force: bool) -> Result<i32> {
    let paths = init_workspace(root, &InitOptions { force })?;
    println!("init: {}", paths.salt_dir.display());
    Ok(exit_codes::OK)
}

fn cmd_validate(root: &Path) -> Result<i32> {
    let host = Host::open(root)?;
    println!(
        "validate: vars={} commands={}",
        host.state.vars.len(),
        host.state.commands.len()
    );
    Ok(exit_codes::OK)
}

fn cmd_turn(root: &Path, text_path: &Path, bind: Option<String>) -> Result<i32> {
    let mut host = Host::open(root)?;
    let text = read_text(text_path)?;
    let options = TurnOptions { bind };

    let report = process_turn(&text, &mut host.state, &host.runtime, &options)?;
    host.save()?;

    println!("turn: extraction={:?} bound={}", report.extraction, report.bound);
    for run in &report.commands {
        match &run.result {
            Ok(value) => println!("command: {} ok {}", run.name, render_value(value)),
            Err(message) => println!("command: {} error {}", run.name, message),
        }
    }

    if report.has_failures() {
        return Ok(exit_codes::COMMAND_FAILED);
    }
    if options.bind.is_some() && !report.extraction.is_extracted() {
        return Ok(exit_codes::NO_BLOCK);
    }
    Ok(exit_codes::OK)
}

fn cmd_register(
    root: &Path,
    name: &str,
    args: &str,
    template: Option<String>,
    native: Option<String>,
) -> Result<i32> {
    let mut host = Host::open(root)?;
    let callback = match (template, native) {
        (Some(source), _) => CallbackSource::template(source),
        (None, Some(key)) => {
            if !host.runtime.natives.contains(&key) {
                bail!(
                    "unknown native key '{}' (available: {})",
                    key,
                    host.runtime.natives.keys().join(", ")
                );
            }
            CallbackSource::native(key)
        }
        (None, None) => bail!("register needs --template or --native"),
    };

    register_command(
        name,
        args,
        callback,
        &mut host.state,
        &host.runtime.delimiters,
    );
    host.save()?;
    println!("register: {}", name);
    Ok(exit_codes::OK)
}

fn cmd_unregister(root: &Path, name: &str) -> Result<i32> {
    let mut host = Host::open(root)?;
    if !unregister_command(name, &mut host.state) {
        bail!("command '{}' is not registered", name);
    }
    host.save()?;
    println!("unregister: {}", name);
    Ok(exit_codes::OK)
}

fn cmd_clear(root: &Path) -> Result<i32> {
    let mut host = Host::open(root)?;
    let staged = clear_block(&mut host.state).is_some();
    host.save()?;
    println!("clear: staged={}", staged);
    Ok(exit_codes::OK)
}

fn cmd_invoke(root: &Path, name: &str, args: &[String]) -> Result<i32> {
    let mut host = Host::open(root)?;
    match invoke_command(name, args, &mut host.state, &host.runtime.natives) {
        Ok(value) => {
            host.save()?;
            println!("{}", render_value(&value));
            Ok(exit_codes::OK)
        }
        Err(err) => {
            eprintln!("{}", err);
            Ok(exit_codes::COMMAND_FAILED)
        }
    }
}

fn read_text(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        debug!("reading turn text from stdin");
        return std::io::read_to_string(std::io::stdin()).context("read stdin");
    }
    fs::read_to_string(path).with_context(|| format!("read {}", path.display()))
}

/// Text is printed raw; everything else as compact JSON.
fn render_value(value: &Value) -> String {
    match value {
        Value::Text(text) => text.clone(),
        other => serde_json::to_string(other).unwrap_or_else(|err| format!("<{err}>")),
    }
}
