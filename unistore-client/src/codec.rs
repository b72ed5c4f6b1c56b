//! Text encoding of stored values.
//!
//! Every value goes through JSON on the way in. On the way out anything that
//! is not valid JSON is handed back as the raw string, so entries written by
//! other scripts stay readable.

use serde::Serialize;
use serde_json::Value;

use crate::error::Result;

pub fn serialize<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string(value)?)
}

/// Decodes raw stored text.
///
/// Returns `None` for a missing entry and for empty text, which is the
/// "undefined" case callers cannot tell apart from a missing key.
pub fn deserialize(raw: Option<&str>) -> Option<Value> {
    let raw = raw?;

    match serde_json::from_str(raw) {
        Ok(value) => Some(value),
        Err(_) if raw.is_empty() => None,
        Err(_) => Some(Value::String(raw.to_string())),
    }
}
