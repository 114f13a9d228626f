use std::fmt;

/// Failures of the prompting loops
#[derive(Debug, Clone, PartialEq)]
pub enum PromptError {
    /// A bounded collector ran out of attempts without valid input
    RetriesExhausted { field: String, attempts: usize },

    /// A menu was offered with nothing to choose from
    EmptyMenu(String),
}

impl fmt::Display for PromptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PromptError::RetriesExhausted { field, attempts } => {
                write!(
                    f,
                    "No valid value for '{}' after {} attempt(s)",
                    field, attempts
                )
            }
            PromptError::EmptyMenu(title) => {
                write!(f, "Nothing to choose from: {}", title)
            }
        }
    }
}

impl std::error::Error for PromptError {}
