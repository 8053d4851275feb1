use thiserror::Error;

/// The single failure kind a parser can report: what it wanted to see and
/// what it actually saw, both as human-readable descriptions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("expected {expected}, but found {found}")]
pub struct ParseError {
    pub expected: String,
    pub found: String,
}

impl ParseError {
    pub fn new(expected: impl Into<String>, found: impl Into<String>) -> Self {
        ParseError {
            expected: expected.into(),
            found: found.into(),
        }
    }
}

/// Renders the head of `input` for a `found` description: the next character
/// in quotes, or `end of input` when there is nothing left.
pub(crate) fn found_in(input: &str) -> String {
    match input.chars().next() {
        Some(c) => format!("'{c}'"),
        None => String::from("end of input"),
    }
}
