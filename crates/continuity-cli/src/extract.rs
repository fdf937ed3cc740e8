//! Static element extraction from a saved HTML snapshot.
//!
//! This is a lightweight stand-in for a browser-driven extractor: it parses
//! the markup as-is, runs no scripts, and judges visibility only from
//! markup (`hidden`, `aria-hidden`, inline `display:none` /
//! `visibility:hidden`, `input[type=hidden]`). Stylesheets are ignored.
//!
//! Elements are emitted in document order, which the detector relies on.

use kuchiki::traits::TendrilSink;
use kuchiki::{ElementData, NodeRef};
use tracing::debug;

use continuity_core::{ElementKind, UiElement};

/// Attributes copied onto each element record.
const CAPTURED_ATTRIBUTES: &[&str] = &["id", "class", "href", "name", "type"];

/// Tags captured as plain text blocks.
const TEXT_TAGS: &[&str] = &["p", "span", "li", "label", "h1", "h2", "h3", "h4", "small"];

/// Extract UI element records from an HTML document.
pub fn extract_html(html: &str) -> Vec<UiElement> {
    let document = kuchiki::parse_html().one(html);
    let mut elements = Vec::new();

    for node in document.descendants() {
        let Some(element) = node.as_element() else {
            continue;
        };
        let Some(kind) = element_kind(&node, element) else {
            continue;
        };

        let text = match kind {
            ElementKind::Input => input_text(element),
            ElementKind::Text => block_text(&node),
            _ => normalize_text(&node.text_contents()),
        };

        // Empty paragraphs and spans carry nothing; empty controls still count
        if kind == ElementKind::Text && text.is_empty() {
            continue;
        }

        let mut record = UiElement::new(kind, text);
        record.visible = !is_hidden(&node);

        let attrs = element.attributes.borrow();
        for name in CAPTURED_ATTRIBUTES {
            if let Some(value) = attrs.get(*name) {
                record.attributes.insert(name.to_string(), Some(value.to_string()));
            }
        }

        elements.push(record);
    }

    debug!(count = elements.len(), "Extracted elements from HTML snapshot");
    elements
}

fn tag_name(element: &ElementData) -> &str {
    element.name.local.as_ref()
}

fn element_kind(node: &NodeRef, element: &ElementData) -> Option<ElementKind> {
    match tag_name(element) {
        "button" => Some(ElementKind::Button),
        "a" => Some(ElementKind::Link),
        "input" => Some(ElementKind::Input),
        tag if TEXT_TAGS.contains(&tag) && !inside_captured(node) => Some(ElementKind::Text),
        _ => None,
    }
}

/// Text blocks nested in a control or another text block were already
/// captured through their container.
fn inside_captured(node: &NodeRef) -> bool {
    node.ancestors().any(|ancestor| {
        ancestor
            .as_element()
            .map(|el| {
                let tag = tag_name(el);
                is_control(el) || TEXT_TAGS.contains(&tag)
            })
            .unwrap_or(false)
    })
}

/// Text of a block, leaving out the controls inside it. Those controls are
/// emitted as elements of their own and must not be counted twice.
fn block_text(node: &NodeRef) -> String {
    let mut raw = String::new();
    collect_block_text(node, &mut raw);
    normalize_text(&raw)
}

fn collect_block_text(node: &NodeRef, out: &mut String) {
    for child in node.children() {
        if let Some(text) = child.as_text() {
            out.push_str(&text.borrow());
        } else if let Some(element) = child.as_element() {
            if is_control(element) {
                out.push(' ');
            } else {
                collect_block_text(&child, out);
            }
        }
    }
}

fn is_control(element: &ElementData) -> bool {
    matches!(tag_name(element), "button" | "a" | "input")
}

fn input_text(element: &ElementData) -> String {
    let attrs = element.attributes.borrow();
    let raw = attrs
        .get("value")
        .filter(|v| !v.trim().is_empty())
        .or_else(|| attrs.get("placeholder"))
        .unwrap_or("");
    normalize_text(raw)
}

/// Collapse whitespace, trim, lowercase.
fn normalize_text(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn is_hidden(node: &NodeRef) -> bool {
    node.inclusive_ancestors()
        .any(|n| n.as_element().map(hides_itself).unwrap_or(false))
}

fn hides_itself(element: &ElementData) -> bool {
    let attrs = element.attributes.borrow();

    if attrs.contains("hidden") {
        return true;
    }

    if attrs
        .get("aria-hidden")
        .map(|v| v.trim().eq_ignore_ascii_case("true"))
        .unwrap_or(false)
    {
        return true;
    }

    if tag_name(element) == "input"
        && attrs
            .get("type")
            .map(|t| t.eq_ignore_ascii_case("hidden"))
            .unwrap_or(false)
    {
        return true;
    }

    if let Some(style) = attrs.get("style") {
        let compact: String = style
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_ascii_lowercase();
        if compact.contains("display:none") || compact.contains("visibility:hidden") {
            return true;
        }
    }

    false
}
