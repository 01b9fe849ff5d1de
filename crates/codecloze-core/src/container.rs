//! Language annotation of the container element.
//!
//! The root element of highlighted output gets the `highlight` class and the
//! language tag, so card stylesheets can target `.highlight.python`. The edit
//! is made on the located root element's `class` attribute rather than by
//! replacing a known default container string, so a backend that emits a
//! different container still gets annotated.

use once_cell::sync::Lazy;
use regex::Regex;

/// Class every container carries.
pub const CONTAINER_CLASS: &str = "highlight";

static CLASS_ATTRIBUTE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"\sclass\s*=\s*(?:"([^"]*)"|'([^']*)')"#).unwrap());

// The root element must open the output; leading text means there is none.
static ROOT_TAG_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*<[A-Za-z][A-Za-z0-9-]*").unwrap());

/// Add `highlight` and `language_class` to the root element's class list.
///
/// Classes already present are not repeated. Output with no root element is
/// wrapped in a new `<div>`.
pub fn annotate_container(html: &str, language_class: &str) -> String {
    let Some(name) = ROOT_TAG_NAME.find(html) else {
        log::debug!("No container element found; wrapping output");
        return format!(
            r#"<div class="{} {}">{}</div>"#,
            CONTAINER_CLASS, language_class, html
        );
    };
    let tag_end = find_tag_end(html, name.end());
    let tag = &html[name.end()..tag_end];

    if let Some(caps) = CLASS_ATTRIBUTE.captures(tag)
        && let Some(value) = caps.get(1).or_else(|| caps.get(2))
    {
        let existing: Vec<&str> = value.as_str().split_whitespace().collect();
        let missing: Vec<&str> = [CONTAINER_CLASS, language_class]
            .into_iter()
            .filter(|class| !existing.contains(class))
            .collect();
        if missing.is_empty() {
            return html.to_string();
        }

        let insert_at = name.end() + value.end();
        let mut addition = missing.join(" ");
        if !value.as_str().trim().is_empty() {
            addition.insert(0, ' ');
        }
        let mut result = String::with_capacity(html.len() + addition.len());
        result.push_str(&html[..insert_at]);
        result.push_str(&addition);
        result.push_str(&html[insert_at..]);
        return result;
    }

    let mut result = String::with_capacity(html.len() + 32);
    result.push_str(&html[..name.end()]);
    result.push_str(&format!(
        r#" class="{} {}""#,
        CONTAINER_CLASS, language_class
    ));
    result.push_str(&html[name.end()..]);
    result
}

/// Byte offset of the `>` closing the start tag, skipping quoted values.
fn find_tag_end(html: &str, from: usize) -> usize {
    let mut quote = None;
    for (offset, c) in html[from..].char_indices() {
        match (quote, c) {
            (None, '"' | '\'') => quote = Some(c),
            (Some(q), _) if c == q => quote = None,
            (None, '>') => return from + offset,
            _ => {}
        }
    }
    html.len()
}
