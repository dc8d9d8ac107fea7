//! Per-request options.
//!
//! Options can be built in code with the `with_*` methods or deserialized
//! from a host-supplied map. Deserialization follows dynamic-language
//! truthiness: `null` (or a missing key) selects the default, `false` is
//! false, and every other value is true. Unknown keys are ignored.

use serde::{Deserialize, Deserializer, Serialize};

/// Options controlling output shape for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestOptions {
    /// Emit string results unquoted (jq `-r`). Default: false.
    #[serde(deserialize_with = "truthy_default_false")]
    pub raw_output: bool,

    /// Single-line output; `false` pretty-prints. Default: true.
    #[serde(deserialize_with = "truthy_default_true")]
    pub compact_output: bool,

    /// Sort object keys (jq `-S`). Default: false.
    #[serde(deserialize_with = "truthy_default_false")]
    pub sort_keys: bool,

    /// Return every result instead of only the first. Default: false.
    #[serde(deserialize_with = "truthy_default_false")]
    pub multiple_outputs: bool,
}

impl Default for RequestOptions {
    fn default() -> Self {
        RequestOptions {
            raw_output: false,
            compact_output: true,
            sort_keys: false,
            multiple_outputs: false,
        }
    }
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_raw_output(mut self, raw_output: bool) -> Self {
        self.raw_output = raw_output;
        self
    }

    pub fn with_compact_output(mut self, compact_output: bool) -> Self {
        self.compact_output = compact_output;
        self
    }

    pub fn with_sort_keys(mut self, sort_keys: bool) -> Self {
        self.sort_keys = sort_keys;
        self
    }

    pub fn with_multiple_outputs(mut self, multiple_outputs: bool) -> Self {
        self.multiple_outputs = multiple_outputs;
        self
    }

    /// Read options from a JSON object such as `{"raw_output": true}`.
    ///
    /// `null` is accepted and yields the defaults. Any other non-object
    /// value is rejected.
    pub fn from_json(options: &serde_json::Value) -> Result<Self, serde_json::Error> {
        match options {
            serde_json::Value::Null => Ok(Self::default()),
            serde_json::Value::Object(_) => Self::deserialize(options),
            other => Err(serde::de::Error::custom(format!(
                "options must be an object, got {}",
                other
            ))),
        }
    }
}

fn truthy<'de, D: Deserializer<'de>>(deserializer: D, default: bool) -> Result<bool, D::Error> {
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Null => default,
        serde_json::Value::Bool(b) => b,
        _ => true,
    })
}

fn truthy_default_false<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    truthy(deserializer, false)
}

fn truthy_default_true<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    truthy(deserializer, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let options = RequestOptions::default();
        assert!(!options.raw_output);
        assert!(options.compact_output);
        assert!(!options.sort_keys);
        assert!(!options.multiple_outputs);
    }

    #[test]
    fn test_from_empty_object() {
        assert_eq!(
            RequestOptions::from_json(&json!({})).unwrap(),
            RequestOptions::default()
        );
        assert_eq!(
            RequestOptions::from_json(&json!(null)).unwrap(),
            RequestOptions::default()
        );
    }

    #[test]
    fn test_from_booleans() {
        let options = RequestOptions::from_json(&json!({
            "raw_output": true,
            "compact_output": false,
            "sort_keys": true,
            "multiple_outputs": true,
        }))
        .unwrap();
        assert_eq!(
            options,
            RequestOptions::default()
                .with_raw_output(true)
                .with_compact_output(false)
                .with_sort_keys(true)
                .with_multiple_outputs(true)
        );
    }

    #[test]
    fn test_truthiness_coercion() {
        let options = RequestOptions::from_json(&json!({
            "raw_output": 0,
            "sort_keys": "",
            "multiple_outputs": [],
        }))
        .unwrap();
        assert!(options.raw_output);
        assert!(options.sort_keys);
        assert!(options.multiple_outputs);
    }

    #[test]
    fn test_null_keeps_defaults() {
        let options = RequestOptions::from_json(&json!({
            "raw_output": null,
            "compact_output": null,
        }))
        .unwrap();
        assert!(!options.raw_output);
        assert!(options.compact_output);
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let options = RequestOptions::from_json(&json!({"colour": true, "sort_keys": true})).unwrap();
        assert!(options.sort_keys);
    }

    #[test]
    fn test_non_object_rejected() {
        assert!(RequestOptions::from_json(&json!([true])).is_err());
        assert!(RequestOptions::from_json(&json!("raw_output")).is_err());
    }
}
