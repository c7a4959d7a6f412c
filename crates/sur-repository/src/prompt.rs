//! Interactive decisions delegated to the caller.

use sur_core::Result;

/// Asks the user.
pub trait Prompt {
    /// Ask a yes/no question after showing `details`.
    fn confirm(&self, question: &str, details: &[String]) -> Result<bool>;

    /// Ask for a new order of `items`.
    ///
    /// Returns 1-based positions into `items`, first slot first. An empty
    /// answer leaves everything as it is.
    fn order(&self, items: &[String]) -> Result<Vec<usize>>;
}

/// Non-interactive prompt: declines every question.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoPrompt;

impl Prompt for NoPrompt {
    fn confirm(&self, _question: &str, _details: &[String]) -> Result<bool> {
        Ok(false)
    }

    fn order(&self, _items: &[String]) -> Result<Vec<usize>> {
        Ok(Vec::new())
    }
}
