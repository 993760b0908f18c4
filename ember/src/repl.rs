//! REPL (Read-Eval-Print Loop) for the Ember interpreter
//!
//! Every line runs against one long-lived [`Interpreter`], so declarations
//! made earlier stay visible. Features:
//! - Multi-line input that continues while brackets are unbalanced
//! - `/help`, `/vars`, `/clear`, `/stats` and `/quit` commands
//! - miette error reports that point into the offending input
//! - History and line editing with rustyline

use crate::display::render_value;
use ember_interpreter::{Interpreter, InterpreterError, InterpreterOptions, Value};
use miette::Diagnostic;
use rustyline::{DefaultEditor, error::ReadlineError};
use std::io::IsTerminal;
use thiserror::Error;

/// Errors that can occur in the REPL
#[derive(Debug, Error, Diagnostic)]
pub enum ReplError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Interpreter(#[from] InterpreterError),

    #[error("Readline error: {source}")]
    #[diagnostic(code(ember::repl::readline))]
    Readline {
        #[from]
        source: ReadlineError,
    },

    #[error("{message}")]
    #[diagnostic(code(ember::repl::command), help("Type /help for available commands"))]
    Command { message: String },
}

/// REPL session that keeps one interpreter alive across inputs
pub struct ReplSession {
    interpreter: Interpreter,
    config: ReplConfig,
    stats: ReplStats,
}

/// REPL configuration options
#[derive(Debug, Clone)]
pub struct ReplConfig {
    /// Prompt string for input
    pub prompt: String,

    /// Prompt shown while a multi-line input is still open
    pub continuation_prompt: String,

    /// Enable history persistence
    pub persist_history: bool,

    /// History file path
    pub history_file: Option<String>,

    /// Colour results when stdout is a terminal
    pub colors: bool,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            prompt: "ember> ".to_string(),
            continuation_prompt: "...    ".to_string(),
            persist_history: true,
            history_file: Some(".ember_history".to_string()),
            colors: std::io::stdout().is_terminal(),
        }
    }
}

/// REPL session statistics
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReplStats {
    /// Inputs handed to the interpreter, successful or not
    pub inputs_evaluated: usize,

    /// Number of errors encountered
    pub errors_encountered: usize,

    /// Total REPL commands executed
    pub commands_executed: usize,
}

/// Result of evaluating a line in the REPL
#[derive(Debug)]
pub enum ReplResult {
    /// Value of the last statement of the input
    Value(Value),

    /// Executed a REPL command
    Command { message: String },

    /// Blank input, or input whose value is `null`
    Empty,

    /// Exit request
    Exit,
}

impl ReplSession {
    pub fn with_options(config: ReplConfig, options: InterpreterOptions) -> Self {
        Self {
            interpreter: Interpreter::with_options(options),
            config,
            stats: ReplStats::default(),
        }
    }

    /// Start the REPL main loop
    pub fn run(&mut self) -> Result<(), ReplError> {
        let mut editor = DefaultEditor::new()?;
        if self.config.persist_history {
            if let Some(history_file) = &self.config.history_file {
                // A missing history file just means a first session
                let _ = editor.load_history(history_file);
            }
        }

        self.print_welcome();

        while let Some(input) = self.read_input(&mut editor)? {
            match self.evaluate_line(&input) {
                Ok(ReplResult::Exit) => break,
                Ok(result) => self.display_result(result),
                Err(error) => self.display_error(error, &input),
            }
        }

        println!("Goodbye!");

        if self.config.persist_history {
            if let Some(history_file) = &self.config.history_file {
                editor.save_history(history_file)?;
            }
        }
        Ok(())
    }

    /// Read one complete input, prompting for continuation lines as needed
    ///
    /// Returns `None` at end of input.
    fn read_input(&self, editor: &mut DefaultEditor) -> Result<Option<String>, ReplError> {
        let mut input = String::new();

        loop {
            let prompt = if input.is_empty() {
                &self.config.prompt
            } else {
                &self.config.continuation_prompt
            };

            match editor.readline(prompt) {
                Ok(line) => {
                    if input.is_empty() && line.trim().is_empty() {
                        return Ok(Some(String::new()));
                    }

                    if !input.is_empty() {
                        input.push('\n');
                    }
                    input.push_str(&line);

                    if is_input_complete(&input) {
                        editor.add_history_entry(input.as_str())?;
                        return Ok(Some(input));
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    // Cancel whatever was being typed and start over
                    println!("^C");
                    return Ok(Some(String::new()));
                }
                Err(ReadlineError::Eof) => return Ok(None),
                Err(error) => return Err(error.into()),
            }
        }
    }

    /// Evaluate one complete input
    pub fn evaluate_line(&mut self, line: &str) -> Result<ReplResult, ReplError> {
        let trimmed = line.trim();

        if trimmed.is_empty() {
            return Ok(ReplResult::Empty);
        }

        if trimmed.starts_with('/') {
            return self.execute_command(trimmed);
        }

        self.stats.inputs_evaluated += 1;
        match self.interpreter.run(line) {
            Ok(Value::Null) => Ok(ReplResult::Empty),
            Ok(value) => Ok(ReplResult::Value(value)),
            Err(error) => {
                self.stats.errors_encountered += 1;
                Err(error.into())
            }
        }
    }

    fn execute_command(&mut self, command: &str) -> Result<ReplResult, ReplError> {
        self.stats.commands_executed += 1;

        let name = command.split_whitespace().next().unwrap_or_default();
        match name {
            "/help" | "/h" => Ok(ReplResult::Command {
                message: help_message(),
            }),

            "/vars" | "/variables" => Ok(ReplResult::Command {
                message: self.format_variables(),
            }),

            "/clear" => {
                self.interpreter.reset();
                Ok(ReplResult::Command {
                    message: "Variables cleared".to_string(),
                })
            }

            "/stats" => Ok(ReplResult::Command {
                message: self.format_stats(),
            }),

            "/quit" | "/q" | "/exit" => Ok(ReplResult::Exit),

            unknown => {
                self.stats.errors_encountered += 1;
                Err(ReplError::Command {
                    message: format!("Unknown command: {unknown}"),
                })
            }
        }
    }

    fn display_result(&self, result: ReplResult) {
        match result {
            ReplResult::Value(value) => println!("{}", render_value(&value, self.config.colors)),
            ReplResult::Command { message } => println!("{message}"),
            ReplResult::Empty | ReplResult::Exit => {}
        }
    }

    fn display_error(&self, error: ReplError, source_code: &str) {
        let named_source = miette::NamedSource::new("<repl>", source_code.to_string());
        let report = miette::Report::new(error).with_source_code(named_source);
        eprintln!("{report:?}");
    }

    fn print_welcome(&self) {
        println!("Ember REPL v{}", env!("CARGO_PKG_VERSION"));
        println!("Type /help for commands, /quit to exit");
        println!();
    }

    fn format_variables(&self) -> String {
        let bindings = self.interpreter.user_bindings();
        if bindings.is_empty() {
            return "No variables defined".to_string();
        }

        let mut lines = vec!["Variables:".to_string()];
        for (name, value) in bindings {
            lines.push(format!(
                "  {name} = {}",
                render_value(&value, self.config.colors)
            ));
        }
        lines.join("\n")
    }

    fn format_stats(&self) -> String {
        format!(
            r#"Session Statistics:
  Inputs evaluated: {}
  Variables bound: {}
  Errors encountered: {}
  Commands executed: {}"#,
            self.stats.inputs_evaluated,
            self.interpreter.user_bindings().len(),
            self.stats.errors_encountered,
            self.stats.commands_executed
        )
    }
}

fn help_message() -> String {
    r#"Ember REPL Commands:
  /help, /h           Show this help message
  /vars, /variables   List variables declared in this session
  /clear              Forget every declaration made in this session
  /stats              Show session statistics
  /quit, /q, /exit    Exit the REPL

Examples:
  1 + 2 * 3                   Evaluate an expression
  let xs = [1, 2, 3];         Declare a variable
  fn double(n) { n * 2 }      Declare a function
  println(double(xs[2]));     Call a function

Multi-line input continues while brackets are open:
  fn fact(n) {
      if (n < 2) { 1 } else { n * fact(n - 1) }
  }

Use Ctrl+C to cancel input, Ctrl+D to exit."#
        .to_string()
}

/// Whether every bracket opened in `input` has been closed
///
/// Brackets inside string literals do not count. An unterminated string keeps
/// the input open.
pub fn is_input_complete(input: &str) -> bool {
    let mut depth: i64 = 0;
    let mut in_string = false;

    for ch in input.chars() {
        match ch {
            '"' => in_string = !in_string,
            '{' | '[' | '(' if !in_string => depth += 1,
            '}' | ']' | ')' if !in_string => depth -= 1,
            _ => {}
        }
    }

    // Surplus closers are a syntax error for the parser to report
    depth <= 0 && !in_string
}
