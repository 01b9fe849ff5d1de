//! Syntax highlighting to HTML.
//!
//! The cloze pass only relies on the [`Highlight`] contract: tokens wrapped in
//! `<span class="...">` elements inside one container element, with the class
//! names described by [`Highlight::marker_grammar`]. [`BuiltinHighlighter`] is
//! the default backend and produces the same shape as Pygments'
//! `HtmlFormatter`, so Pygments stylesheets apply unchanged.

mod lexer;
mod markup;
mod rules;
mod token;

pub use token::{Token, TokenKind};

use crate::cloze::MarkerGrammar;
use crate::language::Language;

/// Opening of the default container, before language annotation.
pub const CONTAINER_OPEN: &str = r#"<div class="highlight"><pre><span></span>"#;
/// Closing of the default container.
pub const CONTAINER_CLOSE: &str = "</pre></div>\n";

/// A highlighting backend.
pub trait Highlight {
    /// Render `code` as tokenized HTML wrapped in a container element.
    fn highlight(&self, code: &str, language: Language) -> String;

    /// Class names this backend uses for the tokens a cloze marker lexes into.
    fn marker_grammar(&self) -> MarkerGrammar {
        MarkerGrammar::default()
    }
}

/// Regex-based highlighter emitting Pygments-compatible markup.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinHighlighter;

impl Highlight for BuiltinHighlighter {
    fn highlight(&self, code: &str, language: Language) -> String {
        let source = normalize_newlines(code);
        let tokens = tokenize(&source, language);
        render(&source, &tokens)
    }
}

/// Tokenize `source`, merging adjacent tokens of the same kind.
pub fn tokenize(source: &str, language: Language) -> Vec<Token> {
    let tokens = match rules::for_language(language) {
        Some(rules) => lexer::tokenize(source, rules),
        None => markup::tokenize(source),
    };
    token::merge_adjacent(tokens)
}

/// Strip surrounding blank lines and end with exactly one newline.
fn normalize_newlines(code: &str) -> String {
    let mut source = code.trim_matches(|c| c == '\n' || c == '\r').to_string();
    source.push('\n');
    source
}

/// Render tokens as escaped HTML inside the default container.
fn render(source: &str, tokens: &[Token]) -> String {
    let mut html = String::with_capacity(source.len() * 3 + CONTAINER_OPEN.len());
    html.push_str(CONTAINER_OPEN);

    for token in tokens {
        let text = html_escape::encode_text(&source[token.start..token.end]);
        match token.kind.css_class() {
            Some(class) => {
                html.push_str(r#"<span class=""#);
                html.push_str(class);
                html.push_str(r#"">"#);
                html.push_str(&text);
                html.push_str("</span>");
            }
            None => html.push_str(&text),
        }
    }

    html.push_str(CONTAINER_CLOSE);
    html
}
