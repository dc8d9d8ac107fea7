//! Engine backend built on the `jaq` filter interpreter.
//!
//! Programs are compiled against jaq's standard library plus its JSON
//! natives. Input and output cross the boundary as `serde_json` values.

use core::fmt::Debug;

use jaq_core::compile::Undefined;
use jaq_core::load::{self, Arena, File, Loader};
use jaq_core::{Compiler, Ctx, Native, RcIter};
use jaq_json::Val;

use super::{Engine, ResultStream};
use crate::value::Value;

type Filter = jaq_core::Filter<Native<Val>>;

/// No `input`/`inputs` are available to programs; each request evaluates a
/// single document.
type NoInputs = RcIter<core::iter::Empty<Result<Val, String>>>;

/// `inputs` stays empty, while `input` fails like jq does without an input
/// callback.
const INPUT_DEFS: &str = r#"def input: first(inputs, error("No more inputs"));"#;

/// Longest source excerpt quoted in a syntax error.
const EXCERPT_LEN: usize = 24;

/// A jaq compile-and-run context.
pub struct JaqEngine {
    filter: Option<Filter>,
    inputs: NoInputs,
}

impl Engine for JaqEngine {
    fn create() -> Option<Self> {
        Some(JaqEngine {
            filter: None,
            inputs: RcIter::new(core::iter::empty()),
        })
    }

    fn compile(&mut self, source: &str) -> Result<(), Value> {
        let prelude = jaq_std::defs()
            .chain(jaq_json::defs())
            .chain(load::parse(INPUT_DEFS, |p| p.defs()).into_iter().flatten());
        let loader = Loader::new(prelude);
        let arena = Arena::default();
        let program = File {
            code: source,
            path: (),
        };

        let modules = loader
            .load(&arena, program)
            .map_err(|errs| diagnostic(errs.into_iter().flat_map(|(_, err)| load_messages(err))))?;
        let filter = Compiler::default()
            .with_funs(jaq_std::funs().chain(jaq_json::funs()))
            .compile(modules)
            .map_err(|errs| {
                diagnostic(
                    errs.into_iter()
                        .flat_map(|(_, undefined)| undefined)
                        .map(|(name, kind)| undefined_message(name, kind)),
                )
            })?;

        self.filter = Some(filter);
        Ok(())
    }

    fn start(&mut self, input: Value) -> ResultStream<'_> {
        let json = match input.into_json() {
            Ok(json) => json,
            Err(msg) => return ResultStream::terminated(Value::Invalid(msg)),
        };
        let Some(filter) = self.filter.as_ref() else {
            return ResultStream::terminated(Value::invalid_with_msg("no program compiled"));
        };

        let ctx = Ctx::new([], &self.inputs);
        let results = filter
            .run((ctx, Val::from(json)))
            .map(|result| result.map(serde_json::Value::from).map_err(|e| e.to_string()));
        ResultStream::new(Box::new(results))
    }
}

impl Debug for JaqEngine {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("JaqEngine")
            .field("compiled", &self.filter.is_some())
            .finish()
    }
}

/// Join messages into one diagnostic value.
fn diagnostic(messages: impl Iterator<Item = String>) -> Value {
    let messages: Vec<String> = messages.collect();
    if messages.is_empty() {
        Value::invalid()
    } else {
        Value::invalid_with_msg(messages.join("; "))
    }
}

fn load_messages(err: load::Error<&str>) -> Vec<String> {
    match err {
        load::Error::Io(errs) => errs
            .into_iter()
            .map(|(path, e)| format!("cannot load module {}: {}", path, e))
            .collect(),
        load::Error::Lex(errs) => errs
            .into_iter()
            .map(|(expect, rest)| syntax_message(expect.as_str(), rest))
            .collect(),
        load::Error::Parse(errs) => errs
            .into_iter()
            .map(|(expect, rest)| syntax_message(expect.as_str(), rest))
            .collect(),
    }
}

/// `rest` is the unconsumed source at the point of failure.
fn syntax_message(expected: &str, rest: &str) -> String {
    let line = rest.lines().next().unwrap_or("").trim_end();
    if line.is_empty() {
        return format!("syntax error: expected {}, found end of input", expected);
    }
    let excerpt: String = line.chars().take(EXCERPT_LEN).collect();
    format!("syntax error: expected {}, found '{}'", expected, excerpt)
}

fn undefined_message(name: &str, kind: Undefined) -> String {
    match kind {
        Undefined::Filter(arity) => format!("undefined filter {}/{}", name, arity),
        other => format!("undefined {} {}", other.as_str(), name),
    }
}
