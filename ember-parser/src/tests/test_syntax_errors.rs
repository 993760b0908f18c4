use crate::{parse_expression, parse_program, LexError, ParseError, SyntaxError};

fn parse_error(source: &str) -> ParseError {
    match parse_program(source) {
        Err(SyntaxError::Parse(error)) => error,
        other => panic!("Expected parse error for {source:?}, got: {other:?}"),
    }
}

#[test]
fn test_missing_semicolon_after_declaration() {
    match parse_error("let x = 1\nlet y = 2;") {
        ParseError::MissingSemicolon { name, line, .. } => {
            assert_eq!(name, "x");
            assert_eq!(line, 2);
        }
        other => panic!("Expected MissingSemicolon, got: {other:?}"),
    }
}

#[test]
fn test_missing_semicolon_at_end_of_input() {
    assert!(matches!(
        parse_error("let x = 1"),
        ParseError::MissingSemicolon { .. }
    ));
}

#[test]
fn test_const_without_initializer() {
    match parse_error("const x;") {
        ParseError::ConstWithoutInitializer { name, line, .. } => {
            assert_eq!(name, "x");
            assert_eq!(line, 1);
        }
        other => panic!("Expected ConstWithoutInitializer, got: {other:?}"),
    }
}

#[test]
fn test_invalid_parameter() {
    match parse_error("fn f(a, 1) {}") {
        ParseError::InvalidParameter { found, .. } => assert_eq!(found, "number 1"),
        other => panic!("Expected InvalidParameter, got: {other:?}"),
    }
}

#[test]
fn test_integer_literal_overflow() {
    match parse_error("9223372036854775808") {
        ParseError::InvalidNumber { literal, .. } => {
            assert_eq!(literal, "9223372036854775808")
        }
        other => panic!("Expected InvalidNumber, got: {other:?}"),
    }
}

#[test]
fn test_unexpected_token_reports_expectation_and_line() {
    match parse_error("let a = 1;\n\nlet = 2;") {
        ParseError::UnexpectedToken {
            expected,
            found,
            line,
            ..
        } => {
            assert_eq!(expected, "variable name after 'let'");
            assert_eq!(found, "operator '='");
            assert_eq!(line, 3);
        }
        other => panic!("Expected UnexpectedToken, got: {other:?}"),
    }
}

#[test]
fn test_unclosed_block() {
    match parse_error("if (true) { 1") {
        ParseError::UnexpectedToken { found, .. } => assert_eq!(found, "end of input"),
        other => panic!("Expected UnexpectedToken, got: {other:?}"),
    }
}

#[test]
fn test_if_requires_parenthesized_condition() {
    assert!(matches!(
        parse_error("if x { 1 }"),
        ParseError::UnexpectedToken { .. }
    ));
}

#[test]
fn test_object_keys_must_be_identifiers() {
    assert!(matches!(
        parse_error("let o = { 1: 2 };"),
        ParseError::UnexpectedToken { .. }
    ));
}

#[test]
fn test_stray_closing_brace() {
    assert!(matches!(parse_error("}"), ParseError::UnexpectedToken { .. }));
}

#[test]
fn test_lex_errors_surface_through_parse_program() {
    match parse_program("let x = 1 @ 2;") {
        Err(SyntaxError::Lex(LexError::UnrecognizedCharacter { character, .. })) => {
            assert_eq!(character, '@')
        }
        other => panic!("Expected lex error, got: {other:?}"),
    }
}

#[test]
fn test_standalone_expression_rejects_trailing_tokens() {
    assert!(parse_expression("1 2").is_err());
}

#[test]
fn test_syntax_error_line() {
    let error = parse_program("let a = 1;\nlet b = ;").unwrap_err();
    assert_eq!(error.line(), 2);
}
