//! Values passed between the JSON layer, the engine and the formatter.
//!
//! A [`Value`] is either a JSON document or an invalid marker that may carry
//! a diagnostic message. Values are linear: the type is deliberately not
//! `Clone`, and every operation that transforms or disposes of a value takes
//! it by move. Inspecting a value goes through `&self`; if a caller needs a
//! second owned copy it must ask for one with [`Value::duplicate`].

use core::fmt;

/// A JSON value, or an invalid marker with an optional message.
#[derive(Debug, PartialEq)]
pub enum Value {
    /// A well-formed JSON value.
    Json(serde_json::Value),
    /// An invalid marker. `None` means "no message", which the engine uses
    /// to signal the end of a result stream.
    Invalid(Option<String>),
}

/// The kind of a [`Value`], available without consuming it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
    Invalid,
}

impl ValueKind {
    /// jq-style type name.
    pub fn name(self) -> &'static str {
        match self {
            ValueKind::Null => "null",
            ValueKind::Bool => "boolean",
            ValueKind::Number => "number",
            ValueKind::String => "string",
            ValueKind::Array => "array",
            ValueKind::Object => "object",
            ValueKind::Invalid => "invalid",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Value {
    /// An invalid marker with no message.
    pub fn invalid() -> Self {
        Value::Invalid(None)
    }

    /// An invalid marker carrying `message`.
    pub fn invalid_with_msg(message: impl Into<String>) -> Self {
        Value::Invalid(Some(message.into()))
    }

    /// Borrowing kind check.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Json(serde_json::Value::Null) => ValueKind::Null,
            Value::Json(serde_json::Value::Bool(_)) => ValueKind::Bool,
            Value::Json(serde_json::Value::Number(_)) => ValueKind::Number,
            Value::Json(serde_json::Value::String(_)) => ValueKind::String,
            Value::Json(serde_json::Value::Array(_)) => ValueKind::Array,
            Value::Json(serde_json::Value::Object(_)) => ValueKind::Object,
            Value::Invalid(_) => ValueKind::Invalid,
        }
    }

    /// Whether this is a JSON value rather than an invalid marker.
    pub fn is_valid(&self) -> bool {
        matches!(self, Value::Json(_))
    }

    /// Whether this is an invalid marker that carries a message.
    pub fn has_message(&self) -> bool {
        matches!(self, Value::Invalid(Some(_)))
    }

    /// Borrow the string content if this is a JSON string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Json(serde_json::Value::String(s)) => Some(s),
            _ => None,
        }
    }

    /// Explicitly produce a second owned value equal to this one.
    ///
    /// This is the only way to obtain a copy; plain moves are the norm.
    pub fn duplicate(&self) -> Self {
        match self {
            Value::Json(json) => Value::Json(json.clone()),
            Value::Invalid(msg) => Value::Invalid(msg.clone()),
        }
    }

    /// Consume the value, yielding the message of an invalid marker.
    ///
    /// Returns `None` for valid values and for invalid markers without a
    /// message.
    pub fn into_message(self) -> Option<String> {
        match self {
            Value::Invalid(msg) => msg,
            Value::Json(_) => None,
        }
    }

    /// Consume the value, yielding the JSON document or the invalid
    /// marker's message.
    pub fn into_json(self) -> Result<serde_json::Value, Option<String>> {
        match self {
            Value::Json(json) => Ok(json),
            Value::Invalid(msg) => Err(msg),
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        Value::Json(json)
    }
}
