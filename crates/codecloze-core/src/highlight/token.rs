//! Token kinds and their CSS classes.

/// Kind of a lexical unit.
///
/// Class names follow the short names of Pygments' `HtmlFormatter`, so any
/// stylesheet written for Pygments output styles cards produced here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Spaces, tabs and newlines
    Whitespace,
    /// Bare text (markup text content)
    Text,
    /// Line or block comments
    Comment,
    /// String and character literals
    String,
    /// Numeric literals
    Number,
    /// Reserved words
    Keyword,
    /// Constant keywords (true, None, null, #t)
    Constant,
    /// Built-in type names
    Type,
    /// Built-in functions and commands
    Builtin,
    /// Identifiers
    Name,
    /// Shell variables ($HOME, ${x})
    Variable,
    /// Markup tag names
    Tag,
    /// Markup attribute names
    Attribute,
    /// Character entities (&amp;)
    Entity,
    /// Operators
    Operator,
    /// Brackets, separators, delimiters
    Punctuation,
    /// Unrecognized text
    Other,
}

impl TokenKind {
    /// CSS class for this kind, or `None` for text emitted without a wrapper.
    pub fn css_class(self) -> Option<&'static str> {
        match self {
            TokenKind::Whitespace | TokenKind::Text => None,
            TokenKind::Comment => Some("c"),
            TokenKind::String => Some("s"),
            TokenKind::Number => Some("m"),
            TokenKind::Keyword => Some("k"),
            TokenKind::Constant => Some("kc"),
            TokenKind::Type => Some("kt"),
            TokenKind::Builtin => Some("nb"),
            TokenKind::Name => Some("n"),
            TokenKind::Variable => Some("nv"),
            TokenKind::Tag => Some("nt"),
            TokenKind::Attribute => Some("na"),
            TokenKind::Entity => Some("ni"),
            TokenKind::Operator => Some("o"),
            TokenKind::Punctuation => Some("p"),
            TokenKind::Other => Some("err"),
        }
    }
}

/// A token with its byte range in the source and its kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub start: usize,
    pub end: usize,
    pub kind: TokenKind,
}

/// Merge runs of adjacent tokens of the same kind into a single token.
///
/// `.{{` lexes as three punctuation tokens but renders as one element, which is
/// the shape the cloze grammar expects.
pub fn merge_adjacent(tokens: Vec<Token>) -> Vec<Token> {
    let mut merged: Vec<Token> = Vec::with_capacity(tokens.len());
    for token in tokens {
        match merged.last_mut() {
            Some(last) if last.kind == token.kind && last.end == token.start => {
                last.end = token.end;
            }
            _ => merged.push(token),
        }
    }
    merged
}
