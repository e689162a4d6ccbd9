// WHY: CMS exports are only loosely typed - a wrong-typed field must degrade to its default
// instead of failing the whole document

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::debug;

/// Keep a field only when it is a JSON string
pub fn string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(text) => Ok(Some(text)),
        _ => Ok(None),
    }
}

/// Keep any present value, null included, so it is written back verbatim
pub fn raw<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Require a string when the field is present
/// WHY: a mismatch fails the enclosing struct so the caller can keep it as a raw value
pub fn strict_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(Some)
}

/// Parse a nested object when its shape fits; null or a mismatch gives `None`
pub fn optional<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        value => match serde_json::from_value(value) {
            Ok(parsed) => Ok(Some(parsed)),
            Err(err) => {
                debug!("Ignoring malformed field: {}", err);
                Ok(None)
            }
        },
    }
}

/// Keep only the string entries of an array field; anything else becomes empty
pub fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(text) => Some(text),
                _ => None,
            })
            .collect()),
        _ => Ok(Vec::new()),
    }
}

/// Deserialize each array entry independently, dropping entries that do not fit
pub fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(items
            .into_iter()
            .filter_map(|item| match serde_json::from_value(item) {
                Ok(parsed) => Some(parsed),
                Err(err) => {
                    debug!("Dropping malformed list entry: {}", err);
                    None
                }
            })
            .collect()),
        _ => Ok(Vec::new()),
    }
}
