//! Error types.
//!
//! Hypothesis failure is ordinary control flow inside the grammar and never
//! shows up here. These are the conditions a caller can actually observe.

use thiserror::Error;

/// Errors raised while loading lexicon entries from text.
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum LexiconError {
    /// A line did not have the `word | categories | features | value` shape.
    #[error("line {line}: malformed entry: {reason}")]
    Malformed { line: usize, reason: String },

    /// A category name is not one the engine knows.
    #[error("line {line}: unknown category '{name}'")]
    UnknownCategory { line: usize, name: String },

    /// A feature name is not one the engine knows.
    #[error("line {line}: unknown feature '{name}'")]
    UnknownFeature { line: usize, name: String },

    /// The numeric value column did not parse.
    #[error("line {line}: invalid numeric value '{value}'")]
    InvalidValue { line: usize, value: String },

    /// Reading the lexicon file failed.
    #[error("IO error: {0}")]
    Io(String),
}

impl From<std::io::Error> for LexiconError {
    fn from(err: std::io::Error) -> Self {
        LexiconError::Io(err.to_string())
    }
}

/// Errors raised by the pretty-printer.
///
/// An illegal pattern means the lexicon data is wrong, so callers should treat
/// it as fatal rather than skip the word.
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum PrettyError {
    /// The pattern contains a character other than `A`, `a` or `_`.
    #[error("illegal capitalization pattern '{pattern}' for '{word}': bad character '{bad}'")]
    IllegalPattern { word: String, pattern: String, bad: char },

    /// The pattern length does not match the word length.
    #[error("capitalization pattern '{pattern}' has {expected} positions but '{word}' has {actual} characters")]
    LengthMismatch { word: String, pattern: String, expected: usize, actual: usize },
}
