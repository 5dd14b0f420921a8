//! Delimiter configuration stored under `.salt/config.toml`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::core::delimiters::{
    DEFAULT_COMMAND_PREFIX, DEFAULT_DSV_FIELD, DEFAULT_DSV_PREFIX, DEFAULT_DSV_TERMINATOR,
    DEFAULT_NAME_LIST, Delimiters, Separator,
};

/// Host configuration (TOML).
///
/// Missing fields default to the stock delimiters, so an empty file is valid.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct SaltConfig {
    pub dsv: DsvConfig,
    pub command: CommandConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DsvConfig {
    /// Marks the start of a block.
    pub prefix: String,
    /// Literal separator between block fields.
    pub field: String,
    /// Marks the end of a block.
    pub terminator: String,
    /// Regular expression splitting variable name lists.
    pub name_list: String,
}

impl Default for DsvConfig {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_DSV_PREFIX.to_string(),
            field: DEFAULT_DSV_FIELD.to_string(),
            terminator: DEFAULT_DSV_TERMINATOR.to_string(),
            name_list: DEFAULT_NAME_LIST.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CommandConfig {
    /// Marks a command invocation line.
    pub prefix: String,
}

impl Default for CommandConfig {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_COMMAND_PREFIX.to_string(),
        }
    }
}

impl SaltConfig {
    pub fn validate(&self) -> Result<()> {
        for (label, value) in [
            ("dsv.prefix", &self.dsv.prefix),
            ("dsv.field", &self.dsv.field),
            ("dsv.terminator", &self.dsv.terminator),
            ("dsv.name_list", &self.dsv.name_list),
            ("command.prefix", &self.command.prefix),
        ] {
            if value.is_empty() {
                return Err(anyhow!("{label} must be non-empty"));
            }
        }
        if self.dsv.prefix == self.dsv.terminator {
            return Err(anyhow!("dsv.prefix and dsv.terminator must differ"));
        }
        Separator::pattern(&self.dsv.name_list)
            .with_context(|| format!("dsv.name_list {:?}", self.dsv.name_list))?;
        Ok(())
    }

    /// Build the runtime delimiter set.
    pub fn delimiters(&self) -> Result<Delimiters> {
        self.validate()?;
        Ok(Delimiters {
            dsv_prefix: self.dsv.prefix.clone(),
            dsv_field: Separator::literal(self.dsv.field.as_str()),
            dsv_terminator: self.dsv.terminator.clone(),
            name_list: Separator::pattern(&self.dsv.name_list)?,
            command_prefix: self.command.prefix.clone(),
        })
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `SaltConfig::default()`.
pub fn load_config(path: &Path) -> Result<SaltConfig> {
    if !path.exists() {
        return Ok(SaltConfig::default());
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: SaltConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Atomically write config to disk (temp file + rename).
pub fn write_config(path: &Path, cfg: &SaltConfig) -> Result<()> {
    cfg.validate()?;
    let mut buf = toml::to_string_pretty(cfg).context("serialize config toml")?;
    buf.push('\n');
    super::write_atomic(path, &buf)
}
