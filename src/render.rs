//! Preparation of arbitrary CMS text values for the rich-text painter.
//!
//! A field may hold a plain string, a portable-text document, a single block,
//! or some other object. [`prepare_rich_text`] decides which it is and
//! returns either linkified inline text or a linkified document.

use serde::Serialize;
use serde_json::Value;

use crate::content::portable::parse_document;
use crate::content::{is_truthy, plain_text, Entry};
use crate::segmenter::{linkify_plain_text, linkify_portable_text, Linkified};

/// Text ready for the rendering layer
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum RenderedText {
    /// Falsy value - render nothing
    Nothing,
    Inline(Linkified),
    Document(Vec<Entry>),
}

impl RenderedText {
    pub fn is_nothing(&self) -> bool {
        matches!(self, RenderedText::Nothing)
    }
}

/// Classify a text value and linkify the email addresses inside it
pub fn prepare_rich_text(value: &Value, key_prefix: &str) -> RenderedText {
    if !is_truthy(value) {
        return RenderedText::Nothing;
    }

    if let Value::String(text) = value {
        return RenderedText::Inline(linkify_plain_text(text, key_prefix));
    }

    match as_portable_document(value) {
        Some(document) => RenderedText::Document(linkify_portable_text(&document)),
        None => RenderedText::Inline(linkify_plain_text(&plain_text(value), key_prefix)),
    }
}

/// Arrays are documents; a lone block (or any typed node with children) is wrapped into one
fn as_portable_document(value: &Value) -> Option<Vec<Entry>> {
    if value.is_array() {
        return parse_document(value);
    }

    let object = value.as_object()?;
    let kind = object.get("_type");
    let is_block = kind.and_then(Value::as_str) == Some("block");
    let is_typed_parent = kind.is_some_and(is_truthy) && object.get("children").is_some_and(Value::is_array);

    (is_block || is_typed_parent).then(|| vec![Entry::from_value(value)])
}

/// Attributes a link annotation renders with
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkAttrs {
    pub href: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rel: Option<&'static str>,
}

/// Absolute http(s) links open in a new tab; everything else stays in place
pub fn mark_link_attrs(href: Option<&str>) -> LinkAttrs {
    let href = href.filter(|href| !href.is_empty()).unwrap_or("#");

    if href.starts_with("http") {
        LinkAttrs {
            href: href.to_string(),
            target: Some("_blank"),
            rel: Some("noopener noreferrer"),
        }
    } else {
        LinkAttrs { href: href.to_string(), target: None, rel: None }
    }
}
