//! Execution of the `run` and `validate` subcommands.

use anyhow::{Context, Result};
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use jqfilter::{Error, ErrorKind, Output, RequestOptions};

use super::{RunCommand, ValidateCommand};

/// Exit codes matching jq behavior
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const GENERIC_ERROR: i32 = 1;
    pub const INPUT_ERROR: i32 = 2; // input could not be parsed
    pub const COMPILE_ERROR: i32 = 3; // jq program compile error
    pub const RUNTIME_ERROR: i32 = 5; // error raised during evaluation
}

/// Exit code for a failed request.
fn exit_code(kind: ErrorKind) -> i32 {
    match kind {
        ErrorKind::Parse => exit_codes::INPUT_ERROR,
        ErrorKind::Compile => exit_codes::COMPILE_ERROR,
        ErrorKind::Runtime => exit_codes::RUNTIME_ERROR,
        ErrorKind::Base => exit_codes::GENERIC_ERROR,
    }
}

fn report(err: &Error) -> i32 {
    eprintln!("jqfilter: {} error: {}", err.kind().label(), err);
    exit_code(err.kind())
}

/// Whether an environment flag is set to `1` or `true`.
fn env_flag(name: &str) -> bool {
    std::env::var(name)
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

fn options_from_args(args: &RunCommand) -> RequestOptions {
    RequestOptions::default()
        .with_raw_output(args.raw_output)
        .with_compact_output(args.compact_output || !args.pretty)
        .with_sort_keys(args.sort_keys || env_flag("JQFILTER_SORT_KEYS"))
        .with_multiple_outputs(args.all)
}

fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read input: {}", path.display())),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            Ok(buf)
        }
    }
}

/// Run the filter and print each result on its own line.
/// Returns the exit code.
pub fn run(args: RunCommand) -> Result<i32> {
    let input = read_input(args.file.as_deref())?;
    let options = options_from_args(&args);

    let output = match jqfilter::filter(&input, &args.filter, &options) {
        Ok(output) => output,
        Err(err) => return Ok(report(&err)),
    };

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    match &output {
        Output::Single(text) => writeln!(out, "{}", text)?,
        Output::Multiple(texts) => {
            for text in texts {
                writeln!(out, "{}", text)?;
            }
        }
    }
    out.flush()?;

    Ok(exit_codes::SUCCESS)
}

/// Compile the filter only. Prints `true` on success.
pub fn validate(args: ValidateCommand) -> i32 {
    match jqfilter::validate_filter(&args.filter) {
        Ok(()) => {
            println!("true");
            exit_codes::SUCCESS
        }
        Err(err) => report(&err),
    }
}
