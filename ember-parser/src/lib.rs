// Ember Parser Library
// Hand-written lexer and recursive descent parser for the Ember language

#![allow(clippy::result_large_err)]

pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod stack;
pub mod token;

pub use ast::*;
pub use error::*;
pub use lexer::tokenize;
pub use parser::{parse, EmberParser};
pub use token::{Token, TokenCategory, TokenKind};

/// Tokenize and parse `source` into a program
pub fn parse_program(source: &str) -> Result<Program, SyntaxError> {
    let tokens = tokenize(source)?;
    Ok(parse(tokens)?)
}

/// Tokenize and parse `source` as a single expression
pub fn parse_expression(source: &str) -> Result<Expression, SyntaxError> {
    let tokens = tokenize(source)?;
    Ok(EmberParser::new(tokens).parse_standalone_expression()?)
}

// Version and metadata
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
#[path = "tests/mod.rs"]
pub mod tests;
