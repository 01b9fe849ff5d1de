//! Lexer for HTML snippets.
//!
//! Markup needs one bit of state (inside a tag or not), so it does not use the
//! shared pattern table. Text content is left bare, which means a cloze marker
//! written in text content never gets split in the first place.

use super::token::{Token, TokenKind};
use once_cell::sync::Lazy;
use regex::Regex;

static TEXT_PATTERNS: Lazy<Vec<(Regex, TokenKind)>> = Lazy::new(|| {
    vec![
        (Regex::new(r"^<!--(?s:.)*?-->").unwrap(), TokenKind::Comment),
        (Regex::new(r"^<!--(?s:.)*").unwrap(), TokenKind::Comment),
        (Regex::new(r"^<![^>]*>").unwrap(), TokenKind::Comment),
        (
            Regex::new(r"^&(#[0-9]+|#[xX][0-9a-fA-F]+|[A-Za-z][A-Za-z0-9]*);").unwrap(),
            TokenKind::Entity,
        ),
        (Regex::new(r"^[^<&]+").unwrap(), TokenKind::Text),
    ]
});

static TAG_OPEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(</?)([A-Za-z][A-Za-z0-9:-]*)").unwrap());

static TAG_PATTERNS: Lazy<Vec<(Regex, TokenKind)>> = Lazy::new(|| {
    vec![
        (Regex::new(r"^\s+").unwrap(), TokenKind::Whitespace),
        (Regex::new(r#"^"[^"]*"?"#).unwrap(), TokenKind::String),
        (Regex::new(r"^'[^']*'?").unwrap(), TokenKind::String),
        (Regex::new(r"^=").unwrap(), TokenKind::Operator),
        (Regex::new(r#"^[^\s=/>"']+"#).unwrap(), TokenKind::Attribute),
    ]
});

static TAG_CLOSE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^/?>").unwrap());

/// Tokenize an HTML snippet.
pub fn tokenize(input: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut pos = 0;
    let mut in_tag = false;

    while pos < input.len() {
        let remaining = &input[pos..];

        if in_tag {
            if let Some(m) = TAG_CLOSE.find(remaining) {
                push_token(&mut tokens, pos, m.len(), TokenKind::Punctuation);
                pos += m.len();
                in_tag = false;
                continue;
            }
            if let Some((len, kind)) = first_match(&TAG_PATTERNS, remaining) {
                push_token(&mut tokens, pos, len, kind);
                pos += len;
                continue;
            }
        } else {
            if let Some(caps) = TAG_OPEN.captures(remaining)
                && let (Some(bracket), Some(name)) = (caps.get(1), caps.get(2))
            {
                push_token(&mut tokens, pos, bracket.len(), TokenKind::Punctuation);
                push_token(&mut tokens, pos + name.start(), name.len(), TokenKind::Tag);
                pos += name.end();
                in_tag = true;
                continue;
            }
            if let Some((len, kind)) = first_match(&TEXT_PATTERNS, remaining) {
                push_token(&mut tokens, pos, len, kind);
                pos += len;
                continue;
            }
        }

        // Stray `<`, `&`, or `/` inside a tag
        let next_pos = remaining
            .char_indices()
            .nth(1)
            .map(|(i, _)| pos + i)
            .unwrap_or(input.len());
        let kind = if in_tag {
            TokenKind::Other
        } else {
            TokenKind::Text
        };
        push_token(&mut tokens, pos, next_pos - pos, kind);
        pos = next_pos;
    }

    tokens
}

fn push_token(tokens: &mut Vec<Token>, start: usize, len: usize, kind: TokenKind) {
    tokens.push(Token {
        start,
        end: start + len,
        kind,
    });
}

fn first_match(patterns: &[(Regex, TokenKind)], text: &str) -> Option<(usize, TokenKind)> {
    patterns.iter().find_map(|(pattern, kind)| {
        pattern
            .find(text)
            .filter(|m| m.start() == 0 && !m.is_empty())
            .map(|m| (m.len(), *kind))
    })
}
