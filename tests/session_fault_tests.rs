//! Fault-injection tests for the evaluation session.
//!
//! A scripted engine records how often it is created, started and torn down,
//! so every exit path can be checked for exactly-once teardown.

use std::cell::{Cell, RefCell};

use jqfilter::{
    filter_with, validate_filter_with, Engine, Error, ErrorKind, Output, RequestOptions,
    ResultStream, Value,
};
use serde_json::json;

/// What the next scripted engine will do.
#[derive(Default)]
struct Script {
    fail_create: bool,
    compile_error: Option<Value>,
    results: Vec<Result<serde_json::Value, String>>,
}

thread_local! {
    static SCRIPT: RefCell<Script> = RefCell::new(Script::default());
    static CREATED: Cell<usize> = const { Cell::new(0) };
    static STARTED: Cell<usize> = const { Cell::new(0) };
    static TORN_DOWN: Cell<usize> = const { Cell::new(0) };
}

fn bump(counter: &'static std::thread::LocalKey<Cell<usize>>) {
    counter.with(|c| c.set(c.get() + 1));
}

fn count(counter: &'static std::thread::LocalKey<Cell<usize>>) -> usize {
    counter.with(Cell::get)
}

struct ScriptedEngine {
    compile_error: Option<Value>,
    results: Vec<Result<serde_json::Value, String>>,
}

impl Engine for ScriptedEngine {
    fn create() -> Option<Self> {
        let script = SCRIPT.with(|s| std::mem::take(&mut *s.borrow_mut()));
        if script.fail_create {
            return None;
        }
        bump(&CREATED);
        Some(ScriptedEngine {
            compile_error: script.compile_error,
            results: script.results,
        })
    }

    fn compile(&mut self, _source: &str) -> Result<(), Value> {
        match self.compile_error.take() {
            Some(diagnostic) => Err(diagnostic),
            None => Ok(()),
        }
    }

    fn start(&mut self, input: Value) -> ResultStream<'_> {
        assert!(input.is_valid(), "session started with invalid input");
        bump(&STARTED);
        ResultStream::new(Box::new(std::mem::take(&mut self.results).into_iter()))
    }
}

impl Drop for ScriptedEngine {
    fn drop(&mut self) {
        bump(&TORN_DOWN);
    }
}

/// Install the next script and reset the counters.
fn script(script: Script) {
    SCRIPT.with(|s| *s.borrow_mut() = script);
    for counter in [&CREATED, &STARTED, &TORN_DOWN] {
        counter.with(|c| c.set(0));
    }
}

fn run(json: &str, options: RequestOptions) -> Result<Output, Error> {
    filter_with::<ScriptedEngine>(json, ".", &options)
}

fn all() -> RequestOptions {
    RequestOptions::default().with_multiple_outputs(true)
}

fn assert_torn_down_once() {
    assert_eq!(count(&CREATED), 1, "engine created");
    assert_eq!(count(&TORN_DOWN), 1, "engine torn down");
}

#[test]
fn test_success_tears_down_once() {
    script(Script {
        results: vec![Ok(json!(1)), Ok(json!(2))],
        ..Script::default()
    });
    assert_eq!(
        run("null", all()),
        Ok(Output::Multiple(vec!["1".into(), "2".into()]))
    );
    assert_torn_down_once();
    assert_eq!(count(&STARTED), 1);
}

#[test]
fn test_compile_failure_tears_down_once_and_never_starts() {
    script(Script {
        compile_error: Some(Value::invalid_with_msg("unexpected token")),
        ..Script::default()
    });
    assert_eq!(
        run("null", RequestOptions::default()),
        Err(Error::Compile("unexpected token".into()))
    );
    assert_torn_down_once();
    assert_eq!(count(&STARTED), 0);
}

#[test]
fn test_compile_failure_without_message() {
    script(Script {
        compile_error: Some(Value::invalid()),
        ..Script::default()
    });
    assert_eq!(
        run("null", RequestOptions::default()),
        Err(Error::Compile("Syntax error in jq filter".into()))
    );
    assert_torn_down_once();
}

#[test]
fn test_parse_failure_tears_down_once_and_never_starts() {
    script(Script::default());
    let err = run("{", RequestOptions::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Parse);
    assert_torn_down_once();
    assert_eq!(count(&STARTED), 0);
}

#[test]
fn test_mid_stream_failure_tears_down_once() {
    script(Script {
        results: vec![Ok(json!(1)), Err("boom".into()), Ok(json!(3))],
        ..Script::default()
    });
    assert_eq!(run("null", all()), Err(Error::Runtime("boom".into())));
    assert_torn_down_once();
}

#[test]
fn test_single_mode_error_first() {
    script(Script {
        results: vec![Err("first pull failed".into())],
        ..Script::default()
    });
    assert_eq!(
        run("null", RequestOptions::default()),
        Err(Error::Runtime("first pull failed".into()))
    );
    assert_torn_down_once();
}

#[test]
fn test_single_mode_stops_after_first_value() {
    script(Script {
        results: vec![Ok(json!("a")), Err("never pulled".into())],
        ..Script::default()
    });
    assert_eq!(
        run("null", RequestOptions::default()),
        Ok(Output::Single(r#""a""#.into()))
    );
    assert_torn_down_once();
}

#[test]
fn test_single_mode_empty_stream() {
    script(Script::default());
    assert_eq!(
        run("null", RequestOptions::default()),
        Ok(Output::Single("null".into()))
    );
    assert_torn_down_once();
}

#[test]
fn test_create_failure_is_base_error() {
    script(Script {
        fail_create: true,
        ..Script::default()
    });
    let err = run("null", RequestOptions::default()).unwrap_err();
    assert_eq!(err, Error::Init("Failed to initialize jq".into()));
    assert_eq!(err.kind(), ErrorKind::Base);
    assert_eq!(count(&CREATED), 0);
    assert_eq!(count(&TORN_DOWN), 0);
}

#[test]
fn test_validate_tears_down_once_and_never_starts() {
    script(Script::default());
    assert_eq!(validate_filter_with::<ScriptedEngine>(".a"), Ok(()));
    assert_torn_down_once();
    assert_eq!(count(&STARTED), 0);
}

#[test]
fn test_validate_failure_tears_down_once() {
    script(Script {
        compile_error: Some(Value::invalid_with_msg("bad")),
        ..Script::default()
    });
    assert_eq!(
        validate_filter_with::<ScriptedEngine>(".a"),
        Err(Error::Compile("bad".into()))
    );
    assert_torn_down_once();
}

#[test]
fn test_each_request_gets_its_own_engine() {
    for _ in 0..3 {
        script(Script {
            results: vec![Ok(json!(true))],
            ..Script::default()
        });
        assert_eq!(
            run("null", RequestOptions::default()),
            Ok(Output::Single("true".into()))
        );
        assert_torn_down_once();
    }
}
