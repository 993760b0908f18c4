//! Unit tests for the lexer and parser
//!
//! Each module covers one area of the grammar, driven through the public
//! `tokenize`, `parse_program` and `parse_expression` entry points.

pub mod test_lexer;
pub mod test_syntax_errors;
