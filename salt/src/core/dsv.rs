//! Locating and staging a DSV block embedded in free text.

use tracing::debug;

use crate::core::delimiters::Delimiters;
use crate::core::predicates::has_text;
use crate::core::state::State;

/// Result of scanning text for a DSV block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extraction {
    /// Block found and staged in `state.dsv`.
    Extracted,
    /// Text carries no block prefix.
    NoBlock,
    /// Prefix found but no terminator after it.
    Unterminated,
    /// Block present but every field is blank.
    Empty,
}

impl Extraction {
    pub fn is_extracted(self) -> bool {
        matches!(self, Self::Extracted)
    }
}

/// Find the first block in `text` and stage its raw content in `state.dsv`.
///
/// Only [`Extraction::Extracted`] writes to the state.
pub fn extract_block(text: &str, state: &mut State, delimiters: &Delimiters) -> Extraction {
    let outcome = locate_block(text, delimiters);
    match outcome {
        Ok(block) => {
            debug!(block, "dsv block extracted");
            state.dsv = Some(block.to_string());
            Extraction::Extracted
        }
        Err(miss) => {
            debug!(outcome = ?miss, "no dsv block staged");
            miss
        }
    }
}

fn locate_block<'a>(text: &'a str, delimiters: &Delimiters) -> Result<&'a str, Extraction> {
    let prefix = delimiters.dsv_prefix.as_str();
    let prefix_at = text.find(prefix).ok_or(Extraction::NoBlock)?;
    let start = prefix_at + prefix.len();

    let end = text[start..]
        .find(delimiters.dsv_terminator.as_str())
        .map(|offset| start + offset)
        .ok_or(Extraction::Unterminated)?;

    let block = &text[start..end];
    if !delimiters
        .dsv_field
        .split(block)
        .into_iter()
        .any(has_text)
    {
        return Err(Extraction::Empty);
    }
    Ok(block)
}

/// Drop the staged block so later binding needs a fresh extraction.
pub fn clear_block(state: &mut State) -> Option<String> {
    state.dsv.take()
}
