//! Interpreter sessions.
//!
//! An [`Interpreter`] owns one global environment and one console. Bindings
//! made by one `run` call stay visible to the next, which is what the REPL
//! builds on. Sessions share no state with each other.

use crate::console::Console;
use crate::environment::Environment;
use crate::error::{InterpreterError, Result};
use crate::evaluator::{Evaluator, DEFAULT_MAX_CALL_DEPTH};
use crate::value::Value;
use ember_parser::Program;

/// Knobs for embedding the interpreter
#[derive(Debug, Clone)]
pub struct InterpreterOptions {
    /// Where `print` and `println` write
    pub console: Console,
    /// Nested user function calls allowed before `StackOverflow`
    pub max_call_depth: usize,
}

impl Default for InterpreterOptions {
    fn default() -> Self {
        Self {
            console: Console::stdout(),
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
        }
    }
}

#[derive(Debug)]
pub struct Interpreter {
    globals: Environment,
    evaluator: Evaluator,
}

impl Interpreter {
    pub fn new() -> Self {
        Self::with_options(InterpreterOptions::default())
    }

    pub fn with_options(options: InterpreterOptions) -> Self {
        Self {
            globals: Environment::new_global(),
            evaluator: Evaluator::with_max_call_depth(options.console, options.max_call_depth),
        }
    }

    /// Tokenize, parse and evaluate `source` against this session's globals
    ///
    /// Nothing is evaluated if the source does not parse. Output written
    /// before a runtime error stays written.
    pub fn run(&mut self, source: &str) -> std::result::Result<Value, InterpreterError> {
        let program = ember_parser::parse_program(source)?;
        tracing::debug!(statements = program.statements.len(), "parsed program");
        Ok(self.evaluate_program(&program)?)
    }

    pub fn evaluate_program(&mut self, program: &Program) -> Result<Value> {
        self.evaluator.evaluate_program(program, &self.globals)
    }

    pub fn globals(&self) -> &Environment {
        &self.globals
    }

    pub fn console(&self) -> &Console {
        self.evaluator.console()
    }

    /// Names declared by user code, excluding the seeded globals
    pub fn user_bindings(&self) -> Vec<(String, Value)> {
        self.globals
            .local_bindings()
            .into_iter()
            .filter(|(name, _)| !crate::builtins::is_global_name(name))
            .map(|(name, binding)| (name, binding.value))
            .collect()
    }

    /// Throw away every user binding, keeping the console and options
    pub fn reset(&mut self) {
        tracing::debug!("resetting global environment");
        self.globals = Environment::new_global();
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}
