//! Turning engine results into host-visible text.

use crate::error::{Error, Result, SERIALIZE_FAILED};
use crate::json::{self, PrintFlags};
use crate::options::RequestOptions;
use crate::value::Value;

/// Output formatting configuration, the subset of [`RequestOptions`] that
/// shapes a single result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputConfig {
    /// Emit string results unquoted.
    pub raw: bool,
    /// Single-line output.
    pub compact: bool,
    /// Sort object keys.
    pub sort_keys: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            raw: false,
            compact: true,
            sort_keys: false,
        }
    }
}

impl OutputConfig {
    pub fn from_options(options: &RequestOptions) -> Self {
        OutputConfig {
            raw: options.raw_output,
            compact: options.compact_output,
            sort_keys: options.sort_keys,
        }
    }

    fn print_flags(&self) -> PrintFlags {
        PrintFlags::COMPACT
            .with_pretty(!self.compact)
            .with_sort_keys(self.sort_keys)
    }
}

/// Format one result, consuming it.
///
/// Raw mode returns a string's content directly; everything else goes
/// through the JSON serializer.
pub fn format(value: Value, config: &OutputConfig) -> Result<String> {
    if config.raw {
        if let Value::Json(serde_json::Value::String(s)) = value {
            return Ok(s);
        }
    }

    match json::serialize(value, config.print_flags()) {
        Value::Json(serde_json::Value::String(text)) => Ok(text),
        other => {
            tracing::debug!(kind = %other.kind(), "serializer returned a non-text value");
            Err(Error::Runtime(SERIALIZE_FAILED.to_string()))
        }
    }
}
