// WHY: Content model shared by every normalizer - CMS values arrive as loosely shaped JSON
// and are classified once into closed enums so later passes match instead of probing

use serde_json::Value;

pub mod lenient;
pub mod normalization;
pub mod portable;
pub mod rich_value;

// Re-export core types
pub use normalization::{collapse_whitespace, collapse_whitespace_into, comparison_key, squeeze_whitespace_into};
pub use portable::{Block, BlockTag, Child, Entry, MarkDef, MarkDefEntry, Span, SpanTag, LINK_MARK_TYPE};
pub use rich_value::{extract_text, normalize_text, RichNode, RichValue};

/// JavaScript-style truthiness of a CMS value
/// WHY: the CMS leaves unset fields as null, "" or false interchangeably; all of them mean "absent"
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Plain text of an arbitrary CMS value
pub fn plain_text(value: &Value) -> String {
    extract_text(&RichValue::from(value))
}
