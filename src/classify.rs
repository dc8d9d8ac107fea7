//! Mapping failed pipeline values onto the error taxonomy.
//!
//! Parse, compile and evaluation failures all arrive as a [`Value`]; the
//! stage only decides which [`ErrorKind`] is reported.

use crate::error::{Error, ErrorKind, INVALID_JSON, SYNTAX_ERROR, UNKNOWN_ERROR};
use crate::value::Value;

/// Build the error for a failed value, consuming it.
///
/// An invalid marker with a message reports that message. Anything else,
/// including a valid value passed here by mistake, reports
/// `"Unknown error"`.
pub fn classify(value: Value, kind: ErrorKind) -> Error {
    classify_or(value, kind, UNKNOWN_ERROR)
}

/// Like [`classify`] but with a stage-specific fallback message.
pub fn classify_or(value: Value, kind: ErrorKind, fallback: &str) -> Error {
    match value {
        Value::Invalid(Some(msg)) => kind.with_message(msg),
        _ => kind.with_message(fallback),
    }
}

/// Error for a filter that failed to compile.
pub(crate) fn compile_failure(diagnostic: Value) -> Error {
    classify_or(diagnostic, ErrorKind::Compile, SYNTAX_ERROR)
}

/// Error for JSON input that failed to parse.
pub(crate) fn parse_failure(invalid: Value) -> Error {
    classify_or(invalid, ErrorKind::Parse, INVALID_JSON)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_message_is_used() {
        let err = classify(Value::invalid_with_msg("bad thing"), ErrorKind::Runtime);
        assert_eq!(err, Error::Runtime("bad thing".into()));
    }

    #[test]
    fn test_missing_message_falls_back() {
        let err = classify(Value::invalid(), ErrorKind::Parse);
        assert_eq!(err, Error::Parse(UNKNOWN_ERROR.into()));
    }

    #[test]
    fn test_valid_value_falls_back() {
        let err = classify(Value::Json(json!("not an error")), ErrorKind::Compile);
        assert_eq!(err, Error::Compile(UNKNOWN_ERROR.into()));
    }

    #[test]
    fn test_stage_fallbacks() {
        assert_eq!(
            compile_failure(Value::invalid()),
            Error::Compile(SYNTAX_ERROR.into())
        );
        assert_eq!(
            parse_failure(Value::invalid()),
            Error::Parse(INVALID_JSON.into())
        );
        assert_eq!(
            parse_failure(Value::invalid_with_msg("EOF")),
            Error::Parse("EOF".into())
        );
    }
}
