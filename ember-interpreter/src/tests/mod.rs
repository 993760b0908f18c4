//! Acceptance tests for the Ember interpreter
//!
//! These tests drive the full lexer → parser → evaluator pipeline through an
//! [`Interpreter`](crate::Interpreter) session with a buffered console.

pub mod test_acceptance_collections;
pub mod test_acceptance_printing;

use crate::{Console, Interpreter, InterpreterError, InterpreterOptions, RuntimeError, Value};

/// Run `source` in a fresh session, returning the result and captured output
pub(crate) fn run_capturing(source: &str) -> (Result<Value, InterpreterError>, String) {
    let console = Console::buffer();
    let mut interpreter = Interpreter::with_options(InterpreterOptions {
        console: console.clone(),
        ..InterpreterOptions::default()
    });
    let result = interpreter.run(source);
    (result, console.contents())
}

pub(crate) fn eval(source: &str) -> Value {
    match run_capturing(source).0 {
        Ok(value) => value,
        Err(error) => panic!("Expected {source:?} to evaluate, got: {error:?}"),
    }
}

pub(crate) fn output_of(source: &str) -> String {
    let (result, output) = run_capturing(source);
    if let Err(error) = result {
        panic!("Expected {source:?} to evaluate, got: {error:?}");
    }
    output
}

pub(crate) fn runtime_error(source: &str) -> RuntimeError {
    match run_capturing(source).0 {
        Err(InterpreterError::Runtime(error)) => error,
        other => panic!("Expected runtime error for {source:?}, got: {other:?}"),
    }
}
