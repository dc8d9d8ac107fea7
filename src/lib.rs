//! # jqfilter
//!
//! Run jq filters against JSON text and get JSON text back.
//!
//! Each call compiles the filter in a fresh, isolated engine, evaluates it
//! against one input document, formats the results, and tears the engine
//! down before returning. Failures are reported as one of three specific
//! [`Error`] kinds (parse, compile, runtime) or the base kind.
//!
//! ## Quick Start
//!
//! ```
//! use jqfilter::{filter, Output, RequestOptions};
//!
//! let out = filter(r#"{"name":"Alice","age":30}"#, ".name", &RequestOptions::default()).unwrap();
//! assert_eq!(out, Output::Single(r#""Alice""#.to_string()));
//!
//! let raw = RequestOptions::default().with_raw_output(true);
//! let out = filter(r#"{"name":"Alice"}"#, ".name", &raw).unwrap();
//! assert_eq!(out.as_single(), Some("Alice"));
//!
//! let all = RequestOptions::default().with_multiple_outputs(true);
//! let out = filter("[1,2,3]", ".[]", &all).unwrap();
//! assert_eq!(out.into_multiple(), vec!["1", "2", "3"]);
//! ```
//!
//! ## Options
//!
//! | option | effect | default |
//! |---|---|---|
//! | `raw_output` | emit unquoted string content | false |
//! | `compact_output` | single-line instead of pretty-printed JSON | true |
//! | `sort_keys` | sort object keys in output | false |
//! | `multiple_outputs` | return all results instead of only the first | false |
//!
//! ## Engines
//!
//! The default engine is [`JaqEngine`]. Other backends implement [`Engine`]
//! and are used through [`filter_with`] and [`validate_filter_with`].
//!
//! ## Thread safety
//!
//! There is no shared state between calls. Concurrent calls from several
//! threads each get their own engine.

pub mod classify;
pub mod engine;
pub mod error;
pub mod format;
pub mod json;
pub mod options;
pub mod session;
pub mod value;

pub use engine::{Engine, JaqEngine, ResultStream};
pub use error::{Error, ErrorKind, Result};
pub use format::OutputConfig;
pub use options::RequestOptions;
pub use session::{Output, Session, State};
pub use value::{Value, ValueKind};

/// Apply `filter_expr` to the JSON document `json`.
///
/// Returns [`Output::Single`] with the first result (or `"null"` when the
/// filter produces nothing), or [`Output::Multiple`] with every result when
/// `options.multiple_outputs` is set.
///
/// # Errors
///
/// - [`Error::Compile`] if the filter does not compile
/// - [`Error::Parse`] if `json` is not valid JSON
/// - [`Error::Runtime`] if evaluation fails
/// - [`Error::Init`] if the engine cannot be created
pub fn filter(json: &str, filter_expr: &str, options: &RequestOptions) -> Result<Output> {
    filter_with::<JaqEngine>(json, filter_expr, options)
}

/// [`filter`] with an explicit engine backend.
pub fn filter_with<E: Engine>(
    json: &str,
    filter_expr: &str,
    options: &RequestOptions,
) -> Result<Output> {
    let mut session = Session::<E>::create()?;
    session.compile(filter_expr)?;
    session.run(json, options)
}

/// Check that `filter_expr` compiles, without evaluating it.
///
/// # Errors
///
/// [`Error::Compile`] if the filter does not compile, [`Error::Init`] if the
/// engine cannot be created.
pub fn validate_filter(filter_expr: &str) -> Result<()> {
    validate_filter_with::<JaqEngine>(filter_expr)
}

/// [`validate_filter`] with an explicit engine backend.
pub fn validate_filter_with<E: Engine>(filter_expr: &str) -> Result<()> {
    let mut session = Session::<E>::create()?;
    session.compile(filter_expr)
}
