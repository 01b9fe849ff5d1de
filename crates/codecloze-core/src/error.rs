//! Error types for codecloze-core.

use thiserror::Error;

/// Errors that can occur while formatting a snippet.
#[derive(Error, Debug)]
pub enum FormatError {
    /// The language tag is not one of the supported highlighters.
    #[error("{tag} is not an available language. Acceptable languages are: {}", supported.join(", "))]
    UnsupportedLanguage {
        tag: String,
        supported: Vec<&'static str>,
    },

    /// A custom marker grammar produced a pattern the regex engine rejected.
    #[error("Invalid cloze marker grammar: {0}")]
    Grammar(#[from] regex::Error),
}

/// Result type for formatting operations.
pub type FormatResult<T> = Result<T, FormatError>;
