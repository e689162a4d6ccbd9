//! Plain-text extraction over every value shape the CMS produces.
//!
//! A [`RichValue`] is classified once from JSON; [`extract_text`] is then a
//! total match over the variants and never fails.

use serde::Deserialize;
use serde_json::{Map, Number, Value};

use super::normalization::collapse_whitespace;

/// Any CMS value that can be shown as text
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(from = "Value")]
pub enum RichValue {
    /// null or absent
    #[default]
    Empty,
    /// A JSON string
    Text(String),
    /// A number or boolean, already in string form
    Scalar(String),
    /// An ordered sequence, e.g. a portable-text document
    Sequence(Vec<RichValue>),
    /// An object; only the fields that take part in extraction are kept
    Node(Box<RichNode>),
}

/// Text-bearing fields of an object, in extraction precedence order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RichNode {
    /// Span text
    pub text: Option<String>,
    /// Slug value
    pub current: Option<String>,
    pub label: Option<String>,
    pub title: Option<String>,
    pub children: Option<Vec<RichValue>>,
}

impl RichNode {
    fn from_map(map: &Map<String, Value>) -> Self {
        let string_field = |name: &str| map.get(name).and_then(Value::as_str).map(str::to_string);

        Self {
            text: string_field("text"),
            current: string_field("current"),
            label: string_field("label"),
            title: string_field("title"),
            children: map
                .get("children")
                .and_then(Value::as_array)
                .map(|children| children.iter().map(RichValue::from).collect()),
        }
    }

    fn extract(&self) -> String {
        // WHY: spans carry `text` while slugs carry `current`; order must not change
        if let Some(text) = &self.text {
            return text.clone();
        }
        if let Some(current) = &self.current {
            return current.clone();
        }
        if let Some(label) = &self.label {
            return label.clone();
        }
        if let Some(title) = &self.title {
            return title.clone();
        }
        match &self.children {
            Some(children) => join_extracted(children, ""),
            None => String::new(),
        }
    }
}

impl RichValue {
    /// Borrow the string when this value is a JSON string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            RichValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, RichValue::Empty)
    }
}

impl From<&Value> for RichValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => RichValue::Empty,
            Value::String(text) => RichValue::Text(text.clone()),
            Value::Bool(flag) => RichValue::Scalar(flag.to_string()),
            Value::Number(number) => RichValue::Scalar(number_text(number)),
            Value::Array(items) => RichValue::Sequence(items.iter().map(RichValue::from).collect()),
            Value::Object(map) => RichValue::Node(Box::new(RichNode::from_map(map))),
        }
    }
}

impl From<Value> for RichValue {
    fn from(value: Value) -> Self {
        RichValue::from(&value)
    }
}

impl From<&str> for RichValue {
    fn from(text: &str) -> Self {
        RichValue::Text(text.to_string())
    }
}

/// Integral floats print without a fractional part, the way the site shows them
fn number_text(number: &Number) -> String {
    match number.as_f64() {
        Some(value) if number.is_f64() && value.is_finite() && value.fract() == 0.0 => {
            format!("{value:.0}")
        }
        _ => number.to_string(),
    }
}

fn join_extracted(items: &[RichValue], separator: &str) -> String {
    items
        .iter()
        .map(extract_text)
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
        .trim()
        .to_string()
}

/// Flatten any value to a string; unknown shapes yield ""
pub fn extract_text(value: &RichValue) -> String {
    match value {
        RichValue::Empty => String::new(),
        RichValue::Text(text) | RichValue::Scalar(text) => text.clone(),
        RichValue::Sequence(items) => join_extracted(items, " "),
        RichValue::Node(node) => node.extract(),
    }
}

/// Extracted text with whitespace runs collapsed and ends trimmed
pub fn normalize_text(value: &RichValue) -> String {
    collapse_whitespace(&extract_text(value))
}
