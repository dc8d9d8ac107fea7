//! One request's evaluation from engine creation to teardown.
//!
//! A [`Session`] owns exactly one engine and moves through
//! `Created -> Compiled -> InputParsed -> Evaluating -> Done | Failed`.
//! The engine is released when the session is dropped, which happens on
//! every exit path, including every early error return.

use crate::classify;
use crate::engine::{Engine, ResultStream};
use crate::error::{Error, ErrorKind, Result, INIT_FAILED};
use crate::format::{self, OutputConfig};
use crate::json;
use crate::options::RequestOptions;
use crate::value::Value;

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Created,
    Compiled,
    InputParsed,
    Evaluating,
    Done,
    Failed,
}

/// The result of a successful [`filter`](crate::filter) call.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(untagged)]
pub enum Output {
    /// Single-output mode: the first result, or `"null"` if there was none.
    Single(String),
    /// Multiple-output mode: every result, in production order.
    Multiple(Vec<String>),
}

impl Output {
    /// The text of a single-output result.
    pub fn as_single(&self) -> Option<&str> {
        match self {
            Output::Single(text) => Some(text),
            Output::Multiple(_) => None,
        }
    }

    /// All result texts; a single result becomes a one-element list.
    pub fn into_multiple(self) -> Vec<String> {
        match self {
            Output::Single(text) => vec![text],
            Output::Multiple(texts) => texts,
        }
    }

    /// Number of result texts.
    pub fn len(&self) -> usize {
        match self {
            Output::Single(_) => 1,
            Output::Multiple(texts) => texts.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate over result texts.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        let texts: &[String] = match self {
            Output::Single(text) => core::slice::from_ref(text),
            Output::Multiple(texts) => texts,
        };
        texts.iter().map(String::as_str)
    }
}

/// Per-request owner of one engine instance.
pub struct Session<E: Engine> {
    engine: E,
    state: State,
}

impl<E: Engine> Session<E> {
    /// Allocate the engine.
    pub fn create() -> Result<Self> {
        let engine = E::create().ok_or_else(|| {
            tracing::debug!("engine allocation failed");
            Error::Init(INIT_FAILED.to_string())
        })?;
        tracing::debug!("engine created");
        Ok(Session {
            engine,
            state: State::Created,
        })
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// Compile the filter source.
    pub fn compile(&mut self, filter: &str) -> Result<()> {
        debug_assert_eq!(self.state, State::Created);
        match self.engine.compile(filter) {
            Ok(()) => {
                self.state = State::Compiled;
                Ok(())
            }
            Err(diagnostic) => {
                self.state = State::Failed;
                let err = classify::compile_failure(diagnostic);
                tracing::debug!(error = %err, "filter failed to compile");
                Err(err)
            }
        }
    }

    /// Parse `json`, evaluate the compiled filter against it, and format the
    /// results. Consumes the session; the engine is torn down before this
    /// returns.
    pub fn run(mut self, json: &str, options: &RequestOptions) -> Result<Output> {
        debug_assert_eq!(self.state, State::Compiled);

        let input = json::parse(json);
        if !input.is_valid() {
            self.state = State::Failed;
            let err = classify::parse_failure(input);
            tracing::debug!(error = %err, "input failed to parse");
            return Err(err);
        }
        self.state = State::InputParsed;

        let config = OutputConfig::from_options(options);
        self.state = State::Evaluating;
        let mut stream = self.engine.start(input);
        let outcome = if options.multiple_outputs {
            collect_all(&mut stream, &config).map(Output::Multiple)
        } else {
            first(&mut stream, &config).map(Output::Single)
        };
        drop(stream);

        self.state = match outcome {
            Ok(_) => State::Done,
            Err(ref err) => {
                tracing::debug!(error = %err, "evaluation failed");
                State::Failed
            }
        };
        outcome
    }
}

impl<E: Engine> Drop for Session<E> {
    fn drop(&mut self) {
        tracing::debug!(state = ?self.state, "engine torn down");
    }
}

impl<E: Engine> core::fmt::Debug for Session<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Session").field("state", &self.state).finish()
    }
}

/// Single-output mode: pull exactly one value.
fn first(stream: &mut ResultStream<'_>, config: &OutputConfig) -> Result<String> {
    match stream.next_result() {
        value @ Value::Json(_) => format::format(value, config),
        terminal if terminal.has_message() => {
            Err(classify::classify(terminal, ErrorKind::Runtime))
        }
        // an empty stream reads the same as a `null` result
        _ => Ok("null".to_string()),
    }
}

/// Multiple-output mode: drain the stream. Partial results are discarded if
/// it ends in an error.
fn collect_all(stream: &mut ResultStream<'_>, config: &OutputConfig) -> Result<Vec<String>> {
    let mut results = Vec::new();
    loop {
        match stream.next_result() {
            value @ Value::Json(_) => results.push(format::format(value, config)?),
            terminal if terminal.has_message() => {
                return Err(classify::classify(terminal, ErrorKind::Runtime));
            }
            _ => return Ok(results),
        }
    }
}
