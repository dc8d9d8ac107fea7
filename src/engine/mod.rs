//! The filter-language engine boundary.
//!
//! An [`Engine`] is one isolated, compile-and-run context. It is created per
//! request, compiles exactly one program, and is torn down by `Drop` when the
//! request ends. Evaluating the program produces a [`ResultStream`] that is
//! pulled one [`Value`] at a time.
//!
//! The default backend is [`JaqEngine`].

mod jaq;

pub use self::jaq::JaqEngine;

use crate::value::Value;

/// A compile-and-run context for one filter program.
///
/// Dropping the engine releases everything it owns; no explicit destroy
/// call exists.
pub trait Engine: Sized {
    /// Allocate a fresh instance, or `None` if the backend cannot start.
    fn create() -> Option<Self>;

    /// Compile `source` into this instance's program.
    ///
    /// On failure returns the engine's diagnostic, normally an invalid value
    /// carrying a message.
    fn compile(&mut self, source: &str) -> Result<(), Value>;

    /// Start evaluating the compiled program against `input`, consuming it.
    fn start(&mut self, input: Value) -> ResultStream<'_>;
}

/// Raw output of a backend: `Ok` for a result, `Err` for an evaluation
/// error message.
pub type RawResults<'a> = Box<dyn Iterator<Item = Result<serde_json::Value, String>> + 'a>;

/// The ordered results of one evaluation.
///
/// [`next_result`](ResultStream::next_result) yields valid values until the
/// stream terminates with an invalid marker: `Invalid(None)` at a normal end,
/// `Invalid(Some(msg))` on error. Once terminated, the stream only yields
/// `Invalid(None)`.
pub struct ResultStream<'a> {
    results: Option<RawResults<'a>>,
    pulled: usize,
}

impl<'a> ResultStream<'a> {
    pub fn new(results: RawResults<'a>) -> Self {
        ResultStream {
            results: Some(results),
            pulled: 0,
        }
    }

    /// A stream that terminates immediately with `terminal`.
    pub fn terminated(terminal: Value) -> Self {
        let results: RawResults<'a> = match terminal.into_message() {
            Some(msg) => Box::new(core::iter::once(Err(msg))),
            None => Box::new(core::iter::empty()),
        };
        Self::new(results)
    }

    /// Pull the next value.
    pub fn next_result(&mut self) -> Value {
        let Some(results) = self.results.as_mut() else {
            return Value::invalid();
        };
        match results.next() {
            Some(Ok(json)) => {
                self.pulled += 1;
                tracing::trace!(index = self.pulled - 1, "result pulled");
                Value::Json(json)
            }
            Some(Err(msg)) => {
                self.results = None;
                Value::Invalid(Some(msg))
            }
            None => {
                self.results = None;
                Value::invalid()
            }
        }
    }

    /// Number of valid values yielded so far.
    pub fn pulled(&self) -> usize {
        self.pulled
    }

    /// Whether the stream has produced its terminal marker.
    pub fn is_terminated(&self) -> bool {
        self.results.is_none()
    }
}

impl core::fmt::Debug for ResultStream<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ResultStream")
            .field("pulled", &self.pulled)
            .field("terminated", &self.is_terminated())
            .finish()
    }
}
