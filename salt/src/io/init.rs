//! Initialization helpers for `.salt/` scaffolding.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};

use super::config::{SaltConfig, write_config};
use super::state_store::write_state;
use crate::core::state::State;

pub const STATE_SCHEMA: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../schemas/state/v1.schema.json"
));

/// All canonical paths within `.salt/` for a project root.
#[derive(Debug, Clone)]
pub struct SaltPaths {
    pub root: PathBuf,
    pub salt_dir: PathBuf,
    pub state_path: PathBuf,
    pub schema_path: PathBuf,
    pub config_path: PathBuf,
}

impl SaltPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let salt_dir = root.join(".salt");
        Self {
            root: root.clone(),
            salt_dir: salt_dir.clone(),
            state_path: salt_dir.join("state.json"),
            schema_path: salt_dir.join("schema.json"),
            config_path: salt_dir.join("config.toml"),
        }
    }
}

/// Options for `init_workspace`.
#[derive(Debug, Clone)]
pub struct InitOptions {
    /// If true, overwrite existing salt-owned files.
    pub force: bool,
}

/// Create `.salt/` scaffolding in `root`: empty state, schema, default config.
///
/// Fails if `.salt/` already exists unless `options.force` is set.
pub fn init_workspace(root: &Path, options: &InitOptions) -> Result<SaltPaths> {
    let paths = SaltPaths::new(root);
    if paths.salt_dir.exists() && !options.force {
        return Err(anyhow!(
            "salt init: .salt already exists (use --force to overwrite)"
        ));
    }
    if paths.salt_dir.exists() && !paths.salt_dir.is_dir() {
        return Err(anyhow!("salt init: .salt exists but is not a directory"));
    }

    fs::create_dir_all(&paths.salt_dir)
        .with_context(|| format!("create directory {}", paths.salt_dir.display()))?;
    fs::write(&paths.schema_path, STATE_SCHEMA)
        .with_context(|| format!("write file {}", paths.schema_path.display()))?;
    write_config(&paths.config_path, &SaltConfig::default())?;
    write_state(&paths.state_path, &State::default())?;

    Ok(paths)
}
