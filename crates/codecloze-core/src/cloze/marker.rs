//! A cloze marker recovered from highlighted markup.

use std::fmt;

/// Punctuation the highlighter fused onto a marker's delimiters.
///
/// Each field is raw (already escaped) text; empty means nothing was fused.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoundaryPunctuation<'a> {
    /// Before `{{`, e.g. the `.` in `obj.{{c1::x}}`.
    pub leading: &'a str,
    /// After the `::` that opens the body, e.g. the `(` in `{{c1::(a)}}`.
    pub body_leading: &'a str,
    /// Before the hint separator, e.g. the `()` in `{{c1::f()::hint}}`.
    pub body_trailing: &'a str,
    /// After the hint separator, e.g. the `(` in `{{c1::x::(y)}}`.
    pub hint_leading: &'a str,
    /// Before `}}`, e.g. the `()` in `{{c1::f()}}`.
    pub inner_trailing: &'a str,
    /// After `}}`, e.g. the `;` in `{{c1::x}};`.
    pub outer_trailing: &'a str,
}

/// One `{{cN::body::hint}}` marker.
///
/// `body` and `hint` borrow the highlighted markup verbatim, so any token
/// elements inside them keep their classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClozeMarker<'a> {
    /// The digits after `c`, as written.
    pub index: &'a str,
    pub body: &'a str,
    pub hint: Option<&'a str>,
    pub boundary: BoundaryPunctuation<'a>,
}

impl ClozeMarker<'_> {
    /// The cloze number, if it fits in a `u32`.
    pub fn number(&self) -> Option<u32> {
        self.index.parse().ok()
    }

    /// Write the marker and its re-wrapped boundary punctuation.
    ///
    /// Leading punctuation goes before `{{`, outer trailing punctuation after
    /// `}}`; the other groups stay inside the marker at the position they were
    /// captured. Every delimiter, including the hint `::`, is written as
    /// plain text.
    pub fn write_html(&self, out: &mut String, punctuation_class: &str) {
        push_punctuation(out, punctuation_class, self.boundary.leading);
        out.push_str("{{c");
        out.push_str(self.index);
        out.push_str("::");
        push_punctuation(out, punctuation_class, self.boundary.body_leading);
        out.push_str(self.body);
        if let Some(hint) = self.hint {
            push_punctuation(out, punctuation_class, self.boundary.body_trailing);
            out.push_str("::");
            push_punctuation(out, punctuation_class, self.boundary.hint_leading);
            out.push_str(hint);
        }
        push_punctuation(out, punctuation_class, self.boundary.inner_trailing);
        out.push_str("}}");
        push_punctuation(out, punctuation_class, self.boundary.outer_trailing);
    }
}

impl fmt::Display for ClozeMarker<'_> {
    /// The marker alone, without boundary punctuation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{{c{}::{}", self.index, self.body)?;
        if let Some(hint) = self.hint {
            write!(f, "::{}", hint)?;
        }
        f.write_str("}}")
    }
}

/// Emit `text` as a standalone punctuation element; nothing when empty.
fn push_punctuation(out: &mut String, class: &str, text: &str) {
    if text.is_empty() {
        return;
    }
    out.push_str(r#"<span class=""#);
    out.push_str(class);
    out.push_str(r#"">"#);
    out.push_str(text);
    out.push_str("</span>");
}
