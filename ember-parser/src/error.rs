// Ember Parser Error Handling
// Lexical and syntax errors with miette integration

use crate::ast::Span;
use crate::token::Token;
use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

/// Error raised while turning source text into tokens
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum LexError {
    #[error("Unrecognized character '{character}' on line {line}")]
    #[diagnostic(
        code(ember::lex::unrecognized_character),
        help(
            "Source may only contain letters, digits, underscores, whitespace, double-quoted strings and operators"
        )
    )]
    UnrecognizedCharacter {
        character: char,
        line: usize,
        #[label("not a valid character here")]
        span: SourceSpan,
    },
}

impl LexError {
    pub fn unrecognized_character(character: char, span: Span) -> Self {
        LexError::UnrecognizedCharacter {
            character,
            line: span.line,
            span: span.into(),
        }
    }

    pub fn line(&self) -> usize {
        match self {
            LexError::UnrecognizedCharacter { line, .. } => *line,
        }
    }
}

/// Error raised while building the syntax tree; parsing stops at the first one
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Unexpected {found} on line {line}, expected {expected}")]
    #[diagnostic(
        code(ember::parse::unexpected_token),
        help("Expected {expected}")
    )]
    UnexpectedToken {
        expected: String,
        found: String,
        line: usize,
        #[label("found this")]
        span: SourceSpan,
    },

    #[error("Missing ';' after declaration of '{name}' on line {line}")]
    #[diagnostic(
        code(ember::parse::missing_semicolon),
        help("Variable declarations must end with a semicolon")
    )]
    MissingSemicolon {
        name: String,
        line: usize,
        #[label("expected ';' before this")]
        span: SourceSpan,
    },

    #[error("Constant '{name}' declared without a value on line {line}")]
    #[diagnostic(
        code(ember::parse::const_without_initializer),
        help("Give the constant a value: const {name} = ...;")
    )]
    ConstWithoutInitializer {
        name: String,
        line: usize,
        #[label("constant needs an initializer")]
        span: SourceSpan,
    },

    #[error("Invalid parameter {found} on line {line}")]
    #[diagnostic(
        code(ember::parse::invalid_parameter),
        help("Function parameters must be plain identifiers")
    )]
    InvalidParameter {
        found: String,
        line: usize,
        #[label("not an identifier")]
        span: SourceSpan,
    },

    #[error("Invalid integer literal '{literal}' on line {line}")]
    #[diagnostic(
        code(ember::parse::invalid_number),
        help("Integer literals must fit in a signed 64-bit integer")
    )]
    InvalidNumber {
        literal: String,
        line: usize,
        #[label("out of range")]
        span: SourceSpan,
    },
}

impl ParseError {
    pub fn unexpected_token(expected: impl Into<String>, found: &Token) -> Self {
        ParseError::UnexpectedToken {
            expected: expected.into(),
            found: found.describe(),
            line: found.line(),
            span: found.span.into(),
        }
    }

    pub fn missing_semicolon(name: &str, found: &Token) -> Self {
        ParseError::MissingSemicolon {
            name: name.to_string(),
            line: found.line(),
            span: found.span.into(),
        }
    }

    pub fn const_without_initializer(name: &str, span: Span) -> Self {
        ParseError::ConstWithoutInitializer {
            name: name.to_string(),
            line: span.line,
            span: span.into(),
        }
    }

    pub fn invalid_parameter(found: &Token) -> Self {
        ParseError::InvalidParameter {
            found: found.describe(),
            line: found.line(),
            span: found.span.into(),
        }
    }

    pub fn invalid_number(literal: &Token) -> Self {
        ParseError::InvalidNumber {
            literal: literal.text.clone(),
            line: literal.line(),
            span: literal.span.into(),
        }
    }

    pub fn line(&self) -> usize {
        match self {
            ParseError::UnexpectedToken { line, .. }
            | ParseError::MissingSemicolon { line, .. }
            | ParseError::ConstWithoutInitializer { line, .. }
            | ParseError::InvalidParameter { line, .. }
            | ParseError::InvalidNumber { line, .. } => *line,
        }
    }
}

/// Any failure on the way from source text to a syntax tree
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum SyntaxError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] ParseError),
}

impl SyntaxError {
    pub fn line(&self) -> usize {
        match self {
            SyntaxError::Lex(error) => error.line(),
            SyntaxError::Parse(error) => error.line(),
        }
    }
}

pub type LexResult<T> = Result<T, LexError>;
pub type ParseResult<T> = Result<T, ParseError>;
