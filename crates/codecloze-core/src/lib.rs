//! Syntax-highlight code snippets for flashcards without breaking cloze markers.
//!
//! Formatting runs three steps over one string:
//! 1. highlight the code into `<span>`-tokenized HTML,
//! 2. reconcile cloze markers (`{{c1::answer::hint}}`) the highlighter split
//!    across token elements,
//! 3. add the language tag to the container element's classes.
//!
//! # Example
//!
//! ```
//! let html = codecloze_core::format("obj.{{c1::field}};", "java").unwrap();
//! assert!(html.starts_with(r#"<div class="highlight java">"#));
//! assert!(html.contains(r#"<span class="p">.</span>{{c1::<span class="n">field</span>}}<span class="p">;</span>"#));
//!
//! assert!(codecloze_core::format("x", "cobol").is_err());
//! ```

pub mod cloze;
pub mod container;
mod error;
pub mod highlight;
mod language;

pub use cloze::{ClozeMarker, ClozeReconciler, MarkerGrammar};
pub use error::{FormatError, FormatResult};
pub use highlight::{BuiltinHighlighter, Highlight};
pub use language::Language;

/// Highlighter plus the cloze grammar that matches its output.
#[derive(Debug, Clone)]
pub struct CardFormatter<H = BuiltinHighlighter> {
    highlighter: H,
    reconciler: ClozeReconciler,
}

impl CardFormatter<BuiltinHighlighter> {
    pub fn new() -> Self {
        CardFormatter {
            highlighter: BuiltinHighlighter,
            reconciler: ClozeReconciler::default(),
        }
    }
}

impl Default for CardFormatter<BuiltinHighlighter> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: Highlight> CardFormatter<H> {
    /// Use another highlighting backend, compiling the grammar it reports.
    pub fn with_highlighter(highlighter: H) -> FormatResult<Self> {
        let reconciler = highlighter.marker_grammar().compile()?;
        Ok(CardFormatter {
            highlighter,
            reconciler,
        })
    }

    /// Format `code` as card HTML.
    pub fn format(&self, code: &str, language: Language) -> String {
        let highlighted = self.highlighter.highlight(code, language);
        let reconciled = self.reconciler.reconcile(&highlighted);
        container::annotate_container(&reconciled, language.tag())
    }

    /// Format `code`, parsing the language tag first.
    ///
    /// An unknown tag fails before anything is highlighted.
    pub fn format_tag(&self, code: &str, tag: &str) -> FormatResult<String> {
        let language: Language = tag.parse()?;
        Ok(self.format(code, language))
    }
}

/// Format `code` with the built-in highlighter.
pub fn format(code: &str, language: &str) -> FormatResult<String> {
    CardFormatter::new().format_tag(code, language)
}
