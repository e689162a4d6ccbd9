//! Portable-text document model.
//!
//! Blocks and spans are parsed leniently: anything that does not look like a
//! block (or a span inside one) is kept verbatim as [`Entry::Other`] /
//! [`Child::Other`] so a rewritten document keeps every entry it was given.
//! Unknown fields ride along in `extra` and are written back unchanged, and
//! wrong-typed `_key` values or malformed mark definitions are kept raw.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::lenient;

/// `_type` of a link annotation
pub const LINK_MARK_TYPE: &str = "link";

/// Discriminator accepting only `"_type": "block"`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockTag {
    #[serde(rename = "block")]
    Block,
}

/// Discriminator accepting only `"_type": "span"`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpanTag {
    #[serde(rename = "span")]
    Span,
}

/// One top-level entry of a portable-text document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Entry {
    Block(Block),
    /// Images, embeds and malformed blocks
    Other(Value),
}

/// A text block with its spans and block-level mark definitions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    #[serde(rename = "_type")]
    pub tag: BlockTag,
    /// Raw `_key`; see [`Block::key_str`]
    #[serde(rename = "_key", default, deserialize_with = "lenient::raw", skip_serializing_if = "Option::is_none")]
    pub key: Option<Value>,
    pub children: Vec<Child>,
    #[serde(rename = "markDefs", default, deserialize_with = "lenient::list")]
    pub mark_defs: Vec<MarkDefEntry>,
    /// style, listItem, level and anything else the CMS adds
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One child of a block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Child {
    Span(Span),
    /// Inline objects and spans without string text
    Other(Value),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Span {
    #[serde(rename = "_type")]
    pub tag: SpanTag,
    #[serde(rename = "_key", default, deserialize_with = "lenient::raw", skip_serializing_if = "Option::is_none")]
    pub key: Option<Value>,
    pub text: String,
    /// Decorator names (`strong`, `em`) and annotation keys into `markDefs`
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub marks: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One entry of a block's `markDefs`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MarkDefEntry {
    Def(MarkDef),
    /// Anything that is not a well-typed definition, written back as given
    Other(Value),
}

impl MarkDefEntry {
    /// The definition when it is a typed `link` annotation
    pub fn as_link(&self) -> Option<&MarkDef> {
        match self {
            MarkDefEntry::Def(mark_def) if mark_def.is_link() => Some(mark_def),
            _ => None,
        }
    }

    pub fn key(&self) -> Option<&str> {
        match self {
            MarkDefEntry::Def(mark_def) => mark_def.key.as_deref(),
            MarkDefEntry::Other(value) => value.get("_key").and_then(Value::as_str),
        }
    }
}

/// Block-level annotation definition referenced from span marks by key
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MarkDef {
    #[serde(rename = "_key", default, deserialize_with = "lenient::strict_string", skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(rename = "_type", default, deserialize_with = "lenient::strict_string", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "lenient::strict_string", skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MarkDef {
    /// New link annotation
    pub fn link(key: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            kind: Some(LINK_MARK_TYPE.to_string()),
            href: Some(href.into()),
            extra: Map::new(),
        }
    }

    pub fn is_link(&self) -> bool {
        self.kind.as_deref() == Some(LINK_MARK_TYPE)
    }
}

impl Block {
    /// `_key` when it is a string; other types count as absent
    pub fn key_str(&self) -> Option<&str> {
        self.key.as_ref().and_then(Value::as_str)
    }
}

impl Span {
    pub fn key_str(&self) -> Option<&str> {
        self.key.as_ref().and_then(Value::as_str)
    }

    /// Copy of this span with new key, text and marks; every other field is kept
    pub fn derive(&self, key: String, text: &str, marks: Vec<String>) -> Self {
        Self {
            tag: self.tag,
            key: Some(Value::String(key)),
            text: text.to_string(),
            marks,
            extra: self.extra.clone(),
        }
    }
}

impl Entry {
    /// Classify one JSON entry; never fails
    pub fn from_value(value: &Value) -> Self {
        serde_json::from_value(value.clone()).unwrap_or_else(|_| Entry::Other(value.clone()))
    }

    pub fn as_block(&self) -> Option<&Block> {
        match self {
            Entry::Block(block) => Some(block),
            Entry::Other(_) => None,
        }
    }
}

/// Parse a JSON array as a document; `None` when the value is not an array
pub fn parse_document(value: &Value) -> Option<Vec<Entry>> {
    value.as_array().map(|items| items.iter().map(Entry::from_value).collect())
}
