//! Visible-text rendering over `scraper` element trees.
//!
//! Shared by the listing and detail extractors so both see the same notion of
//! "text": whitespace inside text nodes is collapsed the way a browser would,
//! while `<br>` and block-level boundaries become line breaks.

use scraper::{ElementRef, Node};

const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "dd", "div", "dl", "dt", "fieldset",
    "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "header",
    "hr", "li", "main", "nav", "ol", "p", "pre", "section", "table", "tbody", "td", "tfoot",
    "th", "thead", "tr", "ul",
];

const INVISIBLE_ELEMENTS: &[&str] = &["script", "style", "template", "noscript"];

/// Renders the text under `root`.
///
/// `skip` is called for every descendant element in document order; when it
/// returns `true` the element and its subtree are left out of the output.
/// Callers use it both to exclude subtrees and to collect them.
pub(crate) fn render_text<F>(root: ElementRef<'_>, mut skip: F) -> String
where
    F: FnMut(ElementRef<'_>) -> bool,
{
    let mut out = String::new();
    push_children(root, &mut skip, &mut out);
    out
}

fn push_children<F>(element: ElementRef<'_>, skip: &mut F, out: &mut String)
where
    F: FnMut(ElementRef<'_>) -> bool,
{
    for child in element.children() {
        match child.value() {
            Node::Text(text) => {
                out.extend(text.chars().map(|c| if c.is_whitespace() { ' ' } else { c }));
            }
            Node::Element(_) => {
                let Some(child_element) = ElementRef::wrap(child) else {
                    continue;
                };
                if skip(child_element) {
                    continue;
                }
                let name = child_element.value().name();
                if INVISIBLE_ELEMENTS.contains(&name) {
                    continue;
                }
                if name == "br" {
                    out.push('\n');
                } else if BLOCK_ELEMENTS.contains(&name) {
                    out.push('\n');
                    push_children(child_element, skip, out);
                    out.push('\n');
                } else {
                    push_children(child_element, skip, out);
                }
            }
            _ => {}
        }
    }
}

/// Full text of `element` on a single line.
pub(crate) fn inline_text(element: ElementRef<'_>) -> String {
    collapse_whitespace(&render_text(element, |_| false))
}

/// Collapses every whitespace run (line breaks included) to one space and trims.
pub(crate) fn collapse_whitespace(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Splits rendered text into its non-empty lines, each collapsed and trimmed.
pub(crate) fn text_lines(rendered: &str) -> Vec<String> {
    rendered
        .lines()
        .map(collapse_whitespace)
        .filter(|line| !line.is_empty())
        .collect()
}
