//! Delimiter set shared by DSV extraction, binding, and command parsing.

use crate::core::value::Pattern;
use crate::error::Result;

/// How a piece of text is cut into fields.
#[derive(Debug, Clone, PartialEq)]
pub enum Separator {
    Literal(String),
    Pattern(Pattern),
}

impl Separator {
    pub fn literal(text: impl Into<String>) -> Self {
        Self::Literal(text.into())
    }

    /// Compile `source` as a regex separator.
    ///
    /// Fails with [`SaltError::InvalidDelimiter`](crate::error::SaltError::InvalidDelimiter).
    pub fn pattern(source: &str) -> Result<Self> {
        Ok(Self::Pattern(Pattern::new(source)?))
    }

    /// Split `text`, keeping empty segments (so `"::"` on `"::"` yields two).
    pub fn split<'a>(&self, text: &'a str) -> Vec<&'a str> {
        match self {
            Self::Literal(separator) => text.split(separator.as_str()).collect(),
            Self::Pattern(pattern) => pattern.regex().split(text).collect(),
        }
    }
}

/// Delimiters in effect for one runtime.
#[derive(Debug, Clone, PartialEq)]
pub struct Delimiters {
    /// Marks the start of a DSV block.
    pub dsv_prefix: String,
    /// Splits a DSV block into positional fields.
    pub dsv_field: Separator,
    /// Marks the end of a DSV block.
    pub dsv_terminator: String,
    /// Splits a variable or argument name list into names.
    pub name_list: Separator,
    /// Marks a command invocation line.
    pub command_prefix: String,
}

pub const DEFAULT_DSV_PREFIX: &str = "!!!";
pub const DEFAULT_DSV_FIELD: &str = "::";
pub const DEFAULT_DSV_TERMINATOR: &str = "\n";
pub const DEFAULT_NAME_LIST: &str = r"[\s,]+";
pub const DEFAULT_COMMAND_PREFIX: &str = ">";

impl Default for Delimiters {
    fn default() -> Self {
        Self {
            dsv_prefix: DEFAULT_DSV_PREFIX.to_string(),
            dsv_field: Separator::literal(DEFAULT_DSV_FIELD),
            dsv_terminator: DEFAULT_DSV_TERMINATOR.to_string(),
            name_list: Separator::Pattern(
                Pattern::new(DEFAULT_NAME_LIST).expect("default name list pattern is valid"),
            ),
            command_prefix: DEFAULT_COMMAND_PREFIX.to_string(),
        }
    }
}

impl Delimiters {
    /// Split a name list, dropping empty names left by leading or trailing
    /// separators.
    pub fn split_names<'a>(&self, names: &'a str) -> Vec<&'a str> {
        self.name_list
            .split(names)
            .into_iter()
            .filter(|name| !name.is_empty())
            .collect()
    }
}
