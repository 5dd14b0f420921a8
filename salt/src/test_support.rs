//! Test-only helpers for building states and scratch hosts.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::TempDir;

use crate::core::commands::register_command;
use crate::core::delimiters::Delimiters;
use crate::core::state::{CallbackSource, State};
use crate::io::init::{InitOptions, SaltPaths, init_workspace};
use crate::io::state_store::{load_state, write_state};

/// Register a template command using the default delimiters.
pub fn with_template(state: &mut State, name: &str, args: &str, source: &str) {
    register_command(
        name,
        args,
        CallbackSource::template(source),
        state,
        &Delimiters::default(),
    );
}

/// Register a native command using the default delimiters.
pub fn with_native(state: &mut State, name: &str, args: &str, key: &str) {
    register_command(
        name,
        args,
        CallbackSource::native(key),
        state,
        &Delimiters::default(),
    );
}

/// Scratch directory with an initialized `.salt/` layout.
pub struct TestHost {
    dir: TempDir,
    pub paths: SaltPaths,
}

impl TestHost {
    pub fn new() -> Result<Self> {
        let dir = tempfile::tempdir().context("create tempdir")?;
        let paths = init_workspace(dir.path(), &InitOptions { force: false })?;
        Ok(Self { dir, paths })
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn load(&self) -> Result<State> {
        load_state(&self.paths.schema_path, &self.paths.state_path)
    }

    pub fn save(&self, state: &State) -> Result<()> {
        write_state(&self.paths.state_path, state)
    }

    /// Write `text` to a file under the host root and return its path.
    pub fn write_text(&self, name: &str, text: &str) -> Result<PathBuf> {
        let path = self.root().join(name);
        fs::write(&path, text).with_context(|| format!("write {}", path.display()))?;
        Ok(path)
    }
}
