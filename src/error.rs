//! Error taxonomy surfaced at the host boundary.
//!
//! Every failure of a request maps to one [`Error`] variant. The variants are
//! all "kinds of" the same base error, so a caller can either match the
//! specific stage that failed or treat any of them uniformly.

use thiserror::Error;

/// Message used when the engine could not be allocated.
pub(crate) const INIT_FAILED: &str = "Failed to initialize jq";

/// Message used when a filter fails to compile without a diagnostic.
pub(crate) const SYNTAX_ERROR: &str = "Syntax error in jq filter";

/// Message used when the JSON input is rejected without a diagnostic.
pub(crate) const INVALID_JSON: &str = "Invalid JSON input";

/// Message used when a failure carries no usable diagnostic at all.
pub(crate) const UNKNOWN_ERROR: &str = "Unknown error";

/// Message used when a result cannot be serialized back to JSON text.
pub(crate) const SERIALIZE_FAILED: &str = "Failed to convert result to JSON";

/// Errors returned by [`filter`](crate::filter) and
/// [`validate_filter`](crate::validate_filter).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The JSON input text is not well-formed JSON.
    #[error("{0}")]
    Parse(String),

    /// The filter source fails to compile.
    #[error("{0}")]
    Compile(String),

    /// Evaluation failed after the filter compiled and the input parsed, or
    /// a result could not be serialized.
    #[error("{0}")]
    Runtime(String),

    /// Engine allocation failure or any other unclassified condition.
    #[error("{0}")]
    Init(String),
}

/// The category of an [`Error`], without its message.
///
/// [`ErrorKind::Base`] is the common ancestor: [`ErrorKind::is_a`] treats
/// every kind as an instance of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed JSON input.
    Parse,
    /// Filter compilation failure.
    Compile,
    /// Evaluation or serialization failure.
    Runtime,
    /// The base kind, also used for unclassified failures.
    Base,
}

impl ErrorKind {
    /// Build an error of this kind carrying `message`.
    pub fn with_message(self, message: impl Into<String>) -> Error {
        let message = message.into();
        match self {
            ErrorKind::Parse => Error::Parse(message),
            ErrorKind::Compile => Error::Compile(message),
            ErrorKind::Runtime => Error::Runtime(message),
            ErrorKind::Base => Error::Init(message),
        }
    }

    /// Whether an error of kind `self` would be caught by a handler for
    /// `other`.
    pub fn is_a(self, other: ErrorKind) -> bool {
        other == ErrorKind::Base || self == other
    }

    /// Short lowercase label, as used in CLI diagnostics.
    pub fn label(self) -> &'static str {
        match self {
            ErrorKind::Parse => "parse",
            ErrorKind::Compile => "compile",
            ErrorKind::Runtime => "runtime",
            ErrorKind::Base => "jq",
        }
    }
}

impl Error {
    /// The kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Parse(_) => ErrorKind::Parse,
            Error::Compile(_) => ErrorKind::Compile,
            Error::Runtime(_) => ErrorKind::Runtime,
            Error::Init(_) => ErrorKind::Base,
        }
    }

    /// The human-readable message.
    pub fn message(&self) -> &str {
        match self {
            Error::Parse(m) | Error::Compile(m) | Error::Runtime(m) | Error::Init(m) => m,
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = core::result::Result<T, E>;
