use std::fmt;

/// Errors raised while walking or compiling a provider schema
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaError {
    /// A path step is not declared in the current object's properties
    MissingProperty { step: String, path: Vec<String> },

    /// A union was reached but no option label was left to pick a branch
    MissingOption { position: usize, path: Vec<String> },

    /// No union alternative carries the requested title
    NoMatchingOption { label: String, available: Vec<String> },

    /// Strict policy found a keyword outside the draft-7 vocabulary
    UnknownKeyword(String),

    /// The sub-schema could not be compiled by the validator
    Compile(String),

    /// The schema document itself is malformed
    Malformed(String),
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaError::MissingProperty { step, path } => {
                write!(
                    f,
                    "Missing property '{}' while resolving path '{}'",
                    step,
                    path.join(".")
                )
            }
            SchemaError::MissingOption { position, path } => {
                write!(
                    f,
                    "No schema option given for union #{} on path '{}'",
                    position + 1,
                    path.join(".")
                )
            }
            SchemaError::NoMatchingOption { label, available } => {
                write!(
                    f,
                    "No matching schema option '{}' (available: {})",
                    label,
                    available.join(", ")
                )
            }
            SchemaError::UnknownKeyword(keyword) => {
                write!(f, "Unknown schema keyword '{}'", keyword)
            }
            SchemaError::Compile(msg) => {
                write!(f, "Failed to compile schema: {}", msg)
            }
            SchemaError::Malformed(msg) => {
                write!(f, "Malformed schema: {}", msg)
            }
        }
    }
}

impl std::error::Error for SchemaError {}
