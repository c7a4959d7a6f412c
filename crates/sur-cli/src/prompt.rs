//! Interactive prompts with `dialoguer`.

use dialoguer::{Confirm, Input};
use sur_core::{Error, Result};
use sur_repository::Prompt;
use tracing::debug;

/// Asks on the controlling terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalPrompt {
    /// Answer every question with yes.
    pub assume_yes: bool,
}

/// Parse a whitespace- or comma-separated list of 1-based positions.
/// Tokens that are not numbers are ignored.
pub fn parse_order(answer: &str) -> Vec<usize> {
    answer
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter_map(|t| t.parse().ok())
        .collect()
}

fn prompt_error(e: &dialoguer::Error) -> Error {
    debug!(error = %e, "prompt interrupted");
    Error::Aborted
}

impl Prompt for TerminalPrompt {
    fn confirm(&self, question: &str, details: &[String]) -> Result<bool> {
        for line in details {
            crate::output::status(line);
        }
        if self.assume_yes {
            return Ok(true);
        }

        Confirm::new()
            .with_prompt(question)
            .default(false)
            .interact()
            .map_err(|e| prompt_error(&e))
    }

    fn order(&self, items: &[String]) -> Result<Vec<usize>> {
        for (i, item) in items.iter().enumerate() {
            crate::output::text(&format!("{:>3}) {item}", i + 1));
        }

        let answer: String = Input::new()
            .with_prompt("New order (e.g. 3 1 2, empty to keep)")
            .allow_empty(true)
            .interact_text()
            .map_err(|e| prompt_error(&e))?;
        Ok(parse_order(&answer))
    }
}
