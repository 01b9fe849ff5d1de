//! Supported source languages.

use crate::error::FormatError;
use std::fmt;
use std::str::FromStr;

/// A language the built-in highlighter knows how to tokenize.
///
/// The set is closed: adding a language means adding a lexer for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Python,
    JavaScript,
    Bash,
    Html,
    Scheme,
    Java,
}

impl Language {
    /// Every supported language, in the order they are listed to users.
    pub const ALL: [Language; 6] = [
        Language::Python,
        Language::JavaScript,
        Language::Bash,
        Language::Html,
        Language::Scheme,
        Language::Java,
    ];

    /// The tag used on the command line and as the container CSS class.
    pub fn tag(self) -> &'static str {
        match self {
            Language::Python => "python",
            Language::JavaScript => "javascript",
            Language::Bash => "bash",
            Language::Html => "html",
            Language::Scheme => "scheme",
            Language::Java => "java",
        }
    }

    /// All accepted tags.
    pub fn supported_tags() -> Vec<&'static str> {
        Self::ALL.iter().map(|lang| lang.tag()).collect()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Language {
    type Err = FormatError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|lang| lang.tag() == tag)
            .ok_or_else(|| FormatError::UnsupportedLanguage {
                tag: tag.to_string(),
                supported: Self::supported_tags(),
            })
    }
}
