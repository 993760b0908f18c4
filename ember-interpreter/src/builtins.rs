//! Built-in globals for the Ember interpreter.
//!
//! The global scope starts out with the boolean and null constants plus the
//! two print primitives.

use crate::console::Console;
use crate::environment::Environment;
use crate::error::Result;
use crate::value::{NativeFunction, Value};

/// Names every fresh global scope is seeded with
pub const GLOBAL_NAMES: [&str; 5] = ["true", "false", "null", "print", "println"];

/// The seeded global bindings, in declaration order
pub fn globals() -> Vec<(&'static str, Value)> {
    vec![
        ("true", Value::Boolean(true)),
        ("false", Value::Boolean(false)),
        ("null", Value::Null),
        ("print", create_print_function()),
        ("println", create_println_function()),
    ]
}

pub fn is_global_name(name: &str) -> bool {
    GLOBAL_NAMES.contains(&name)
}

// I/O Functions

fn create_print_function() -> Value {
    Value::NativeFunction(NativeFunction {
        name: "print",
        call: builtin_print,
    })
}

fn create_println_function() -> Value {
    Value::NativeFunction(NativeFunction {
        name: "println",
        call: builtin_println,
    })
}

/// Print every argument separated by single spaces, without a newline
fn builtin_print(args: &[Value], _env: &Environment, console: &Console) -> Result<Value> {
    tracing::debug!(native = "print", args = args.len(), "calling native function");
    console.write(&join_arguments(args))?;
    Ok(Value::Null)
}

/// Print every argument separated by single spaces, then a newline
fn builtin_println(args: &[Value], _env: &Environment, console: &Console) -> Result<Value> {
    tracing::debug!(native = "println", args = args.len(), "calling native function");
    let mut line = join_arguments(args);
    line.push('\n');
    console.write(&line)?;
    Ok(Value::Null)
}

fn join_arguments(args: &[Value]) -> String {
    args.iter()
        .map(Value::to_display_string)
        .collect::<Vec<_>>()
        .join(" ")
}
