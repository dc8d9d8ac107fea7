//! JSON text layer: parsing input documents and serializing results.
//!
//! Both operations speak in [`Value`]s so failures travel the same way as
//! engine failures: as an invalid marker carrying the parser's message.

use std::collections::BTreeMap;

use serde_json::Map;

use crate::value::Value;

/// Serialization flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PrintFlags {
    /// Indented, multi-line output instead of a single line.
    pub pretty: bool,
    /// Emit object members ordered by key.
    pub sort_keys: bool,
}

impl PrintFlags {
    /// Single-line output in source order.
    pub const COMPACT: PrintFlags = PrintFlags {
        pretty: false,
        sort_keys: false,
    };

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn with_sort_keys(mut self, sort_keys: bool) -> Self {
        self.sort_keys = sort_keys;
        self
    }
}

/// Parse JSON text.
///
/// Returns an invalid value carrying the parser's message when `text` is
/// not a single well-formed JSON document.
pub fn parse(text: &str) -> Value {
    match serde_json::from_str::<serde_json::Value>(text) {
        Ok(json) => Value::Json(json),
        Err(e) => Value::invalid_with_msg(format!("{} (while parsing '{}')", e, preview(text))),
    }
}

/// Serialize `value` to JSON text, consuming it.
///
/// On success the result is a JSON string value holding the text. An
/// invalid input is passed through unchanged.
pub fn serialize(value: Value, flags: PrintFlags) -> Value {
    let json = match value.into_json() {
        Ok(json) => json,
        Err(msg) => return Value::Invalid(msg),
    };
    let json = if flags.sort_keys { sort_keys(json) } else { json };

    let text = if flags.pretty {
        serde_json::to_string_pretty(&json)
    } else {
        serde_json::to_string(&json)
    };
    match text {
        Ok(text) => Value::Json(serde_json::Value::String(text)),
        Err(e) => Value::invalid_with_msg(e.to_string()),
    }
}

/// Sort object keys recursively.
fn sort_keys(json: serde_json::Value) -> serde_json::Value {
    match json {
        serde_json::Value::Object(obj) => {
            // BTreeMap orders by key; the Map keeps that order on collect
            let sorted: BTreeMap<String, serde_json::Value> =
                obj.into_iter().map(|(k, v)| (k, sort_keys(v))).collect();
            serde_json::Value::Object(sorted.into_iter().collect::<Map<_, _>>())
        }
        serde_json::Value::Array(arr) => {
            serde_json::Value::Array(arr.into_iter().map(sort_keys).collect())
        }
        other => other,
    }
}

/// Leading part of the input for diagnostics.
fn preview(text: &str) -> &str {
    const MAX: usize = 32;
    match text.char_indices().nth(MAX) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}
