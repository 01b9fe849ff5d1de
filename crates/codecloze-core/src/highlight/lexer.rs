//! Regex-table tokenizer shared by the programming-language lexers.
//!
//! Each language is a list of anchored patterns tried in priority order at the
//! current position; the first non-empty match wins. Identifiers are then
//! reclassified against the language's word lists.

use super::token::{Token, TokenKind};
use regex::Regex;
use std::collections::HashSet;

/// Lexing rules for one language.
pub struct LexerRules {
    /// Anchored patterns, checked in order.
    pub patterns: Vec<(Regex, TokenKind)>,
    pub keywords: HashSet<&'static str>,
    pub constants: HashSet<&'static str>,
    pub types: HashSet<&'static str>,
    pub builtins: HashSet<&'static str>,
}

impl LexerRules {
    /// Compile a pattern table. Every pattern must start with `^`.
    pub fn new(patterns: &[(&str, TokenKind)]) -> Self {
        LexerRules {
            patterns: patterns
                .iter()
                .map(|(pattern, kind)| (Regex::new(pattern).unwrap(), *kind))
                .collect(),
            keywords: HashSet::new(),
            constants: HashSet::new(),
            types: HashSet::new(),
            builtins: HashSet::new(),
        }
    }

    pub fn keywords(mut self, words: &[&'static str]) -> Self {
        self.keywords.extend(words);
        self
    }

    pub fn constants(mut self, words: &[&'static str]) -> Self {
        self.constants.extend(words);
        self
    }

    pub fn types(mut self, words: &[&'static str]) -> Self {
        self.types.extend(words);
        self
    }

    pub fn builtins(mut self, words: &[&'static str]) -> Self {
        self.builtins.extend(words);
        self
    }

    /// Classify an identifier as keyword, constant, type, builtin, or name.
    fn classify_identifier(&self, text: &str) -> TokenKind {
        if self.keywords.contains(text) {
            TokenKind::Keyword
        } else if self.constants.contains(text) {
            TokenKind::Constant
        } else if self.types.contains(text) {
            TokenKind::Type
        } else if self.builtins.contains(text) {
            TokenKind::Builtin
        } else {
            TokenKind::Name
        }
    }
}

/// Tokenize source code with the given rules.
///
/// Tokens cover the input exactly, in order, with no gaps.
pub fn tokenize(input: &str, rules: &LexerRules) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < input.len() {
        let remaining = &input[pos..];
        let mut matched = false;

        for (pattern, kind) in &rules.patterns {
            if let Some(m) = pattern.find(remaining)
                && m.start() == 0
                && !m.is_empty()
            {
                let text = &remaining[..m.len()];
                let final_kind = if *kind == TokenKind::Name {
                    rules.classify_identifier(text)
                } else {
                    *kind
                };

                tokens.push(Token {
                    start: pos,
                    end: pos + m.len(),
                    kind: final_kind,
                });
                pos += m.len();
                matched = true;
                break;
            }
        }

        // If no pattern matched, consume one character as Other
        if !matched {
            let next_pos = input[pos..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| pos + i)
                .unwrap_or(input.len());
            tokens.push(Token {
                start: pos,
                end: next_pos,
                kind: TokenKind::Other,
            });
            pos = next_pos;
        }
    }

    tokens
}
