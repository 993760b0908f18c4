use clap::{Parser, Subcommand};
use ember_interpreter::{DEFAULT_MAX_CALL_DEPTH, Interpreter, InterpreterOptions};
use miette::{Diagnostic, IntoDiagnostic, MietteHandlerOpts, NamedSource, Result, WrapErr};
use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Once;

mod display;
mod repl;
mod sexpr;

#[derive(Parser)]
#[command(
    name = "ember",
    version,
    about = "The Ember scripting language",
    long_about = "Ember is a small dynamically-typed scripting language with closures and collections.",
    before_help = format!("Ember Scripting Language v{}\n", env!("CARGO_PKG_VERSION"))
)]
struct Cli {
    /// Nested function calls allowed before a stack overflow error
    #[arg(long, global = true, value_name = "N", default_value_t = DEFAULT_MAX_CALL_DEPTH)]
    max_call_depth: usize,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run an Ember program
    Run {
        /// Source file to run (use '-' to read from stdin)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Print the value of the last statement after running
        #[arg(short, long)]
        print_result: bool,
    },

    /// Parse Ember source files and display their AST
    Parse {
        /// Source files to parse (use '-' to read from stdin)
        #[arg(required = true, value_name = "FILE")]
        files: Vec<PathBuf>,

        /// Show the full syntax tree with span information
        #[arg(short, long)]
        spans: bool,
    },

    /// Print the token stream of a source file, one token per line
    Tokens {
        /// Source file to scan (use '-' to read from stdin)
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Start an interactive session
    Repl,
}

fn main() {
    setup_miette_handler();
    init_tracing();

    let cli = Cli::parse();
    let options = InterpreterOptions {
        max_call_depth: cli.max_call_depth,
        ..InterpreterOptions::default()
    };

    let result = match cli.command {
        Some(Commands::Run { file, print_result }) => {
            handle_run_command(&file, print_result, options)
        }
        Some(Commands::Parse { files, spans }) => handle_parse_command(&files, spans),
        Some(Commands::Tokens { file }) => handle_tokens_command(&file),
        Some(Commands::Repl) => handle_repl_command(options),
        None => {
            // No subcommand provided, show help
            Cli::parse_from(["ember", "--help"]);
            Ok(())
        }
    };

    if let Err(report) = result {
        eprintln!("{report:?}");
        process::exit(1);
    }
}

/// Configure miette for error reporting
fn setup_miette_handler() {
    miette::set_hook(Box::new(|_| {
        Box::new(
            MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .color(true)
                .tab_width(4)
                .with_cause_chain()
                .build(),
        )
    }))
    .ok();
}

static TRACING_INIT: Once = Once::new();

/// Install a tracing subscriber when `RUST_LOG` is set
///
/// Enable with `RUST_LOG=ember_interpreter=debug` or `=trace` for call spans.
fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{EnvFilter, fmt, prelude::*};

        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .with(EnvFilter::from_default_env())
                .init();
        }
    });
}

fn handle_run_command(
    file: &Path,
    print_result: bool,
    options: InterpreterOptions,
) -> Result<()> {
    let (name, source) = read_source(file)?;
    tracing::debug!(file = %name, bytes = source.len(), "running program");

    let mut interpreter = Interpreter::with_options(options);
    let value = interpreter
        .run(&source)
        .map_err(|error| with_source(error, &name, &source))?;

    if print_result {
        println!("{}", display::render_value(&value, io::stdout().is_terminal()));
    }
    Ok(())
}

fn handle_parse_command(files: &[PathBuf], spans: bool) -> Result<()> {
    for file in files {
        let (name, source) = read_source(file)?;
        let program = ember_parser::parse_program(&source)
            .map_err(|error| with_source(error, &name, &source))?;

        if files.len() > 1 {
            println!("=== {name} ===");
        }
        if spans {
            println!("{program:#?}");
        } else {
            println!("{}", sexpr::format_program_as_sexpr(&program));
        }
    }
    Ok(())
}

fn handle_tokens_command(file: &Path) -> Result<()> {
    let (name, source) = read_source(file)?;
    let tokens =
        ember_parser::tokenize(&source).map_err(|error| with_source(error, &name, &source))?;

    for token in tokens {
        println!("{:>4}  {:<20} {}", token.line(), token.kind, token.text);
    }
    Ok(())
}

fn handle_repl_command(options: InterpreterOptions) -> Result<()> {
    let mut session = repl::ReplSession::with_options(repl::ReplConfig::default(), options);
    session.run()?;
    Ok(())
}

/// Read a source file, or stdin when the path is `-`
fn read_source(path: &Path) -> Result<(String, String)> {
    if path.as_os_str() == "-" {
        let mut source = String::new();
        io::stdin()
            .read_to_string(&mut source)
            .into_diagnostic()
            .wrap_err("Failed to read from stdin")?;
        return Ok(("<stdin>".to_string(), source));
    }

    let source = fs::read_to_string(path)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to read {}", path.display()))?;
    Ok((path.display().to_string(), source))
}

/// Attach the source text so labels render against it
fn with_source<E>(error: E, name: &str, source: &str) -> miette::Report
where
    E: Diagnostic + Send + Sync + 'static,
{
    miette::Report::new(error).with_source_code(NamedSource::new(name, source.to_string()))
}
