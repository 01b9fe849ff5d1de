//! Cloze marker reconciliation.
//!
//! A highlighter has no idea that `{{c1::x}}` is one unit, so it splits the
//! marker across several token elements:
//!
//! ```text
//! <span class="p">.{{</span><span class="n">c1</span><span class="p">::</span>
//! <span class="n">x</span><span class="p">}};</span>
//! ```
//!
//! [`ClozeReconciler::reconcile`] finds those sequences and rewrites each one as
//! a literal marker, keeping the body's markup and re-wrapping any punctuation
//! that was fused onto the delimiters:
//!
//! ```text
//! <span class="p">.</span>{{c1::<span class="n">x</span>}}<span class="p">;</span>
//! ```
//!
//! Anything that does not match the grammar, including malformed markers, is
//! copied through unchanged.

mod marker;

pub use marker::{BoundaryPunctuation, ClozeMarker};

use crate::error::FormatResult;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::ops::Range;

static DEFAULT_RECONCILER: Lazy<ClozeReconciler> = Lazy::new(|| {
    MarkerGrammar::default()
        .compile()
        .expect("default cloze grammar is a valid pattern")
});

/// Cloze numbers start at 1; leading zeros are tolerated.
const INDEX: &str = "0*[1-9][0-9]*";

/// Class names of the token elements a cloze marker is split into.
///
/// This is the only place the reconciler depends on a highlighter's naming
/// convention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerGrammar {
    /// Class of `{{`, `::` and `}}` elements.
    pub punctuation_class: String,
    /// Class of the `cN` element.
    pub name_class: String,
}

impl Default for MarkerGrammar {
    fn default() -> Self {
        MarkerGrammar {
            punctuation_class: "p".to_string(),
            name_class: "n".to_string(),
        }
    }
}

impl MarkerGrammar {
    pub fn new(punctuation_class: impl Into<String>, name_class: impl Into<String>) -> Self {
        MarkerGrammar {
            punctuation_class: punctuation_class.into(),
            name_class: name_class.into(),
        }
    }

    fn element_open(class: &str) -> String {
        regex::escape(&format!(r#"<span class="{}">"#, class))
    }

    /// Everything after the `{{` of a marker.
    fn tail(&self) -> String {
        let p = Self::element_open(&self.punctuation_class);
        let n = Self::element_open(&self.name_class);
        let close = regex::escape("</span>");
        let (p, n, close) = (p.as_str(), n.as_str(), close.as_str());

        [
            close,
            // <n>cINDEX</n>
            n,
            "c(?P<index>",
            INDEX,
            ")",
            close,
            "(?:",
            // <p>::BODYPUNCT</p>
            p,
            r"::(?P<body_punct>[^<}:]*)",
            close,
            r"(?P<body>.*?)",
            // optional <p>PUNCT::PUNCT</p>HINT
            "(?:",
            p,
            r"(?P<body_trailing>[^<:{}]*)::(?P<hint_punct>[^<:{}]*)",
            close,
            r"(?P<hint>.*?))?",
            // <p>INNER}}OUTER</p>
            p,
            r"(?P<inner>[^<]*?)\}\}(?P<outer>[^<]*)",
            close,
            "|",
            // empty body: <p>::INNER}}OUTER</p>
            p,
            r"::(?P<fused_inner>[^<:{}]*?)\}\}(?P<fused_outer>[^<]*)",
            close,
            ")",
        ]
        .concat()
    }

    /// Build the detection pattern: a marker whose `{{` ends a punctuation element.
    fn pattern(&self) -> String {
        let p = Self::element_open(&self.punctuation_class);
        format!(r"(?s){}(?P<lead>[^<]*?)\{{\{{{}", p, self.tail())
    }

    /// A marker opening at the start of the haystack, inside an element whose
    /// beginning closed the previous marker (`}}.{{`).
    fn chained_pattern(&self) -> String {
        format!(r"(?s)^\{{\{{{}", self.tail())
    }

    /// `{{</span><n>cN</n>`: evidence that a second marker opens inside a match.
    fn opening_pattern(&self) -> String {
        let n = Self::element_open(&self.name_class);
        let close = regex::escape("</span>");
        [r"\{\{", close.as_str(), n.as_str(), "c", INDEX, close.as_str()].concat()
    }

    /// Compile the grammar into a reconciler.
    pub fn compile(&self) -> FormatResult<ClozeReconciler> {
        Ok(ClozeReconciler {
            pattern: Regex::new(&self.pattern())?,
            chained: Regex::new(&self.chained_pattern())?,
            opening: Regex::new(&self.opening_pattern())?,
            punctuation_class: self.punctuation_class.clone(),
        })
    }
}

/// Compiled form of a [`MarkerGrammar`].
#[derive(Debug, Clone)]
pub struct ClozeReconciler {
    pattern: Regex,
    chained: Regex,
    opening: Regex,
    punctuation_class: String,
}

impl Default for ClozeReconciler {
    fn default() -> Self {
        DEFAULT_RECONCILER.clone()
    }
}

/// An accepted match, before its outer punctuation is split.
struct Candidate<'a> {
    range: Range<usize>,
    marker: ClozeMarker<'a>,
    /// Byte offset of the outer trailing punctuation in the scanned markup.
    outer_start: usize,
}

impl ClozeReconciler {
    /// Every well-formed marker in `html`, left to right, non-overlapping.
    pub fn markers<'a>(&self, html: &'a str) -> Vec<ClozeMarker<'a>> {
        let mut markers = Vec::new();
        self.scan(html, |_, marker| markers.push(marker));
        markers
    }

    /// Rewrite every split marker in `html` as a literal marker.
    pub fn reconcile(&self, html: &str) -> String {
        let mut out = String::with_capacity(html.len());
        let mut copied = 0;
        let mut count = 0;

        self.scan(html, |range, marker| {
            out.push_str(&html[copied..range.start]);
            marker.write_html(&mut out, &self.punctuation_class);
            copied = range.end;
            count += 1;
        });
        out.push_str(&html[copied..]);

        log::debug!("Reconciled {} cloze marker(s)", count);
        out
    }

    /// Call `found` with the byte range and parts of each accepted marker.
    ///
    /// When the outer punctuation of a marker holds the `{{` of the next one,
    /// as in `}}.{{`, the marker ends before that `{{` and the next marker
    /// starts there, so both are rewritten.
    fn scan<'a>(&self, html: &'a str, mut found: impl FnMut(Range<usize>, ClozeMarker<'a>)) {
        let mut next = self.find(html, 0, false);
        while let Some(Candidate {
            range,
            mut marker,
            outer_start,
        }) = next
        {
            let mut end = range.end;
            next = None;

            let outer = marker.boundary.outer_trailing;
            if let Some(offset) = outer.find("{{")
                && let Some(following) = self.find(html, outer_start + offset, true)
            {
                marker.boundary.outer_trailing = &outer[..offset];
                end = outer_start + offset;
                next = Some(following);
            }

            found(range.start..end, marker);
            if next.is_none() {
                next = self.find(html, end, false);
            }
        }
    }

    /// The first accepted match at or after `from`.
    ///
    /// With `chained`, the match must open exactly at `from`. A match whose
    /// body or hint contains another marker opening started at an unterminated
    /// `{{cN::`; it is skipped and searching resumes inside it, so the later
    /// marker is still found.
    fn find<'a>(&self, html: &'a str, mut from: usize, chained: bool) -> Option<Candidate<'a>> {
        let regex = if chained { &self.chained } else { &self.pattern };
        while from < html.len() {
            let caps = regex.captures(&html[from..])?;
            let whole = caps.get(0)?;
            let marker = marker_from_captures(&caps);

            let dangling = self.opening.is_match(marker.body)
                || marker.hint.is_some_and(|hint| self.opening.is_match(hint));
            if dangling {
                if chained {
                    return None;
                }
                log::debug!(
                    "Skipping unterminated cloze opening at byte {}",
                    from + whole.start()
                );
                from += whole.start() + 1;
                continue;
            }

            let outer = caps.name("outer").or_else(|| caps.name("fused_outer"))?;
            return Some(Candidate {
                range: from + whole.start()..from + whole.end(),
                marker,
                outer_start: from + outer.start(),
            });
        }
        None
    }
}

fn marker_from_captures<'a>(caps: &Captures<'a>) -> ClozeMarker<'a> {
    let group = |names: &[&str]| {
        names
            .iter()
            .find_map(|name| caps.name(name))
            .map_or("", |m| m.as_str())
    };
    ClozeMarker {
        index: group(&["index"]),
        body: group(&["body"]),
        hint: caps.name("hint").map(|m| m.as_str()),
        boundary: BoundaryPunctuation {
            leading: group(&["lead"]),
            body_leading: group(&["body_punct"]),
            body_trailing: group(&["body_trailing"]),
            hint_leading: group(&["hint_punct"]),
            inner_trailing: group(&["inner", "fused_inner"]),
            outer_trailing: group(&["outer", "fused_outer"]),
        },
    }
}

/// Reconcile with the default (Pygments class name) grammar.
pub fn reconcile(html: &str) -> String {
    DEFAULT_RECONCILER.reconcile(html)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(text: &str) -> String {
        format!(r#"<span class="p">{}</span>"#, text)
    }

    fn n(text: &str) -> String {
        format!(r#"<span class="n">{}</span>"#, text)
    }

    /// Highlighted form of `{{cINDEX::` with `lead` fused before `{{`.
    fn opening(lead: &str, index: &str) -> String {
        format!("{}{}{}", p(&format!("{}{{{{", lead)), n(&format!("c{}", index)), p("::"))
    }

    #[test]
    fn test_simple_marker() {
        let html = format!("{}{}{}", opening("", "1"), n("hello"), p("}}"));
        insta::assert_snapshot!(reconcile(&html), @r#"{{c1::<span class="n">hello</span>}}"#);
    }

    #[test]
    fn test_marker_with_hint() {
        let html = format!(
            "{}{}{}{} {}{}",
            opening("", "2"),
            n("answer"),
            p("::"),
            n("hint"),
            n("text"),
            p("}}")
        );
        insta::assert_snapshot!(
            reconcile(&html),
            @r#"{{c2::<span class="n">answer</span>::<span class="n">hint</span> <span class="n">text</span>}}"#
        );
    }

    #[test]
    fn test_boundary_punctuation() {
        let html = format!("{}{}{}{}", n("foo"), opening(".", "1"), n("bar"), p("}};"));
        insta::assert_snapshot!(
            reconcile(&html),
            @r#"<span class="n">foo</span><span class="p">.</span>{{c1::<span class="n">bar</span>}}<span class="p">;</span>"#
        );
    }

    #[test]
    fn test_inner_and_outer_trailing_kept_apart() {
        let html = format!("{}{}{}", opening("", "1"), n("f"), p("()}});"));
        assert_eq!(
            reconcile(&html),
            format!("{{{{c1::{}{}}}}}{}", n("f"), p("()"), p(");"))
        );
    }

    #[test]
    fn test_punctuation_fused_after_separator() {
        let html = format!(
            "{}{}{}{}{}",
            p("{{"),
            n("c1"),
            p("::("),
            n("a"),
            p(")}}")
        );
        assert_eq!(
            reconcile(&html),
            format!("{{{{c1::{}{}{}}}}}", p("("), n("a"), p(")"))
        );
    }

    #[test]
    fn test_empty_body() {
        let html = format!("{}{}", opening("", "4"), p("}}"));
        assert_eq!(reconcile(&html), "{{c4::}}");
    }

    #[test]
    fn test_two_markers_in_order() {
        let between = format!(" {} ", n("and"));
        let html = format!(
            "{}{}{}{}{}{}{}",
            opening("", "1"),
            n("a"),
            p("}}"),
            between,
            opening("", "2"),
            n("b"),
            p("}}")
        );
        let expected = format!("{{{{c1::{}}}}}{}{{{{c2::{}}}}}", n("a"), between, n("b"));
        assert_eq!(reconcile(&html), expected);

        let markers = DEFAULT_RECONCILER.markers(&html);
        let indexes: Vec<_> = markers.iter().map(|m| m.index).collect();
        assert_eq!(indexes, vec!["1", "2"]);
    }

    #[test]
    fn test_clean_input_untouched() {
        let html = format!("{}{}{}", n("x"), p("{"), p("}"));
        assert_eq!(reconcile(&html), html);
    }

    #[test]
    fn test_reconcile_is_idempotent() {
        let html = format!("{}{}{}", opening(".", "1"), n("bar"), p("}};"));
        let once = reconcile(&html);
        assert_eq!(reconcile(&once), once);
    }

    #[test]
    fn test_non_numeric_index_passes_through() {
        let html = format!("{}{}{}{}", p("{{"), n("cx"), p("::"), p("}}"));
        assert_eq!(reconcile(&html), html);
    }

    #[test]
    fn test_unterminated_marker_does_not_swallow_next() {
        let dangling = format!("{}{}", opening("", "1"), n("a"));
        let html = format!("{} {}{}{}", dangling, opening("", "2"), n("b"), p("}}"));
        assert_eq!(
            reconcile(&html),
            format!("{} {{{{c2::{}}}}}", dangling, n("b"))
        );
    }

    #[test]
    fn test_marker_fields() {
        let html = format!("{}{}{}{}{}", opening("(", "7"), n("x"), p("::"), n("h"), p("}})"));
        let markers = DEFAULT_RECONCILER.markers(&html);
        assert_eq!(markers.len(), 1);
        let marker = markers[0];
        assert_eq!(marker.number(), Some(7));
        assert_eq!(marker.body, n("x"));
        assert_eq!(marker.hint, Some(n("h").as_str()));
        assert_eq!(marker.boundary.leading, "(");
        assert_eq!(marker.boundary.outer_trailing, ")");
        assert_eq!(marker.to_string(), format!("{{{{c7::{}::{}}}}}", n("x"), n("h")));
    }

    #[test]
    fn test_custom_grammar_classes() {
        let reconciler = MarkerGrammar::new("tok-punct", "tok-name").compile().unwrap();
        let html = concat!(
            r#"<span class="tok-punct">{{</span><span class="tok-name">c1</span>"#,
            r#"<span class="tok-punct">::</span>x<span class="tok-punct">}};</span>"#
        );
        assert_eq!(
            reconciler.reconcile(html),
            r#"{{c1::x}}<span class="tok-punct">;</span>"#
        );
        // Pygments class names are not recognised by this grammar
        let pygments = format!("{}{}{}", opening("", "1"), n("x"), p("}}"));
        assert_eq!(reconciler.reconcile(&pygments), pygments);
    }

    #[test]
    fn test_markers_joined_by_dot() {
        let html = format!(
            "{}{}{}{}{}{}{}",
            opening("", "1"),
            n("obj"),
            p("}}.{{"),
            n("c2"),
            p("::"),
            n("method"),
            p("}}()")
        );
        insta::assert_snapshot!(
            reconcile(&html),
            @r#"{{c1::<span class="n">obj</span>}}<span class="p">.</span>{{c2::<span class="n">method</span>}}<span class="p">()</span>"#
        );
    }

    #[test]
    fn test_markers_joined_by_paren_and_adjacent() {
        let html = format!(
            "{}{}{}{}{}{}{}{}{}{}",
            opening("(", "1"),
            n("a"),
            p("}}({{"),
            n("c2"),
            p("::"),
            n("b"),
            p("}}{{"),
            n("c3"),
            p("::"),
            format!("{}{}", n("c"), p("}}));"))
        );
        let expected = format!(
            "{}{{{{c1::{}}}}}{}{{{{c2::{}}}}}{{{{c3::{}}}}}{}",
            p("("),
            n("a"),
            p("("),
            n("b"),
            n("c"),
            p("));")
        );
        assert_eq!(reconcile(&html), expected);

        let indexes: Vec<_> = DEFAULT_RECONCILER
            .markers(&html)
            .iter()
            .map(|m| m.index)
            .collect();
        assert_eq!(indexes, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_trailing_braces_without_marker_stay_fused() {
        let html = format!("{}{}{}{}", opening("", "1"), n("a"), p("}}.{{"), n("x"));
        assert_eq!(
            reconcile(&html),
            format!("{{{{c1::{}}}}}{}{}", n("a"), p(".{{"), n("x"))
        );
    }

    #[test]
    fn test_hint_separator_fused_with_punctuation() {
        let html = format!(
            "{}{}{}{}{}",
            opening("", "1"),
            n("f"),
            p("()::"),
            n("hint"),
            p("}}")
        );
        insta::assert_snapshot!(
            reconcile(&html),
            @r#"{{c1::<span class="n">f</span><span class="p">()</span>::<span class="n">hint</span>}}"#
        );
    }

    #[test]
    fn test_punctuation_fused_after_hint_separator() {
        let html = format!(
            "{}{}{}{}{}",
            opening("", "1"),
            n("x"),
            p("::("),
            n("y"),
            p(")}}")
        );
        assert_eq!(
            reconcile(&html),
            format!("{{{{c1::{}::{}{}{}}}}}", n("x"), p("("), n("y"), p(")"))
        );
    }

    #[test]
    fn test_empty_body_with_fused_closing() {
        let html = format!("{}{}{}", p("{{"), n("c3"), p("::}};"));
        assert_eq!(reconcile(&html), format!("{{{{c3::}}}}{}", p(";")));

        let markers = DEFAULT_RECONCILER.markers(&html);
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].body, "");
        assert_eq!(markers[0].hint, None);
    }

    #[test]
    fn test_zero_index_passes_through() {
        let html = format!("{}{}{}", opening("", "0"), n("x"), p("}}"));
        assert_eq!(reconcile(&html), html);

        let html = format!("{}{}{}", opening("", "01"), n("x"), p("}}"));
        assert_eq!(reconcile(&html), format!("{{{{c01::{}}}}}", n("x")));
    }
}
