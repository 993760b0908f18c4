//! Ember Interpreter
//!
//! Tree-walking evaluator for Ember programs parsed by `ember-parser`.
//!
//! Evaluation runs against a chain of lexical scopes rooted in a global
//! environment seeded with `true`, `false`, `null`, `print` and `println`.
//! Values are dynamically typed; binary operators require both operands to
//! share a runtime type.

// Allow clippy lints for development
#![allow(clippy::result_large_err)]

pub mod builtins;
pub mod console;
pub mod environment;
pub mod error;
pub mod evaluator;
pub mod interpreter;
pub mod stack;
pub mod value;

// Include tests directory with all test modules
#[cfg(test)]
#[path = "tests/mod.rs"]
pub mod tests;

// Re-export public API
pub use console::Console;
pub use environment::{Binding, Environment};
pub use error::{InterpreterError, RuntimeError};
pub use evaluator::{Evaluator, DEFAULT_MAX_CALL_DEPTH};
pub use interpreter::{Interpreter, InterpreterOptions};
pub use value::{FunctionValue, NativeFunction, Value};

/// Run `source` once against a fresh global environment writing to stdout
pub fn run(source: &str) -> Result<Value, InterpreterError> {
    Interpreter::new().run(source)
}
