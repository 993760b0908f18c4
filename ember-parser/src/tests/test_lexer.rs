use crate::{tokenize, LexError, Span, TokenCategory, TokenKind};
use pretty_assertions::assert_eq;

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source)
        .unwrap()
        .into_iter()
        .map(|token| token.kind)
        .collect()
}

#[test]
fn test_tokenize_simple_declaration() {
    let tokens = tokenize("let x = 5 + 3;").unwrap();
    let described: Vec<(TokenCategory, &str)> = tokens
        .iter()
        .map(|token| (token.category(), token.text.as_str()))
        .collect();

    assert_eq!(
        described,
        vec![
            (TokenCategory::Keyword, "let"),
            (TokenCategory::Identifier, "x"),
            (TokenCategory::Operator, "="),
            (TokenCategory::Number, "5"),
            (TokenCategory::Operator, "+"),
            (TokenCategory::Number, "3"),
            (TokenCategory::Punctuation, ";"),
            (TokenCategory::EndOfInput, ""),
        ]
    );

    let rendered: Vec<String> = tokens.iter().map(|token| token.to_string()).collect();
    assert_eq!(
        rendered,
        vec![
            "keyword(let)",
            "identifier(x)",
            "operator(=)",
            "number(5)",
            "operator(+)",
            "number(3)",
            "punctuation(;)",
            "end-of-input",
        ]
    );
}

#[test]
fn test_tokenize_empty_source_is_just_eof() {
    assert_eq!(kinds(""), vec![TokenKind::Eof]);
    assert_eq!(kinds("  \n\t\r\n "), vec![TokenKind::Eof]);
}

#[test]
fn test_keywords_and_identifiers() {
    assert_eq!(
        kinds("let const fn if else while lets _x while2"),
        vec![
            TokenKind::Let,
            TokenKind::Const,
            TokenKind::Fn,
            TokenKind::If,
            TokenKind::Else,
            TokenKind::While,
            TokenKind::Identifier,
            TokenKind::Identifier,
            TokenKind::Identifier,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_two_character_operators() {
    assert_eq!(
        kinds("== != <= >= = ! < >"),
        vec![
            TokenKind::EqualsEquals,
            TokenKind::NotEquals,
            TokenKind::LessThanOrEquals,
            TokenKind::GreaterThanOrEquals,
            TokenKind::Equals,
            TokenKind::Not,
            TokenKind::LessThan,
            TokenKind::GreaterThan,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_punctuation() {
    assert_eq!(
        kinds(". , : ; ( ) { } [ ]"),
        vec![
            TokenKind::Dot,
            TokenKind::Comma,
            TokenKind::Colon,
            TokenKind::Semicolon,
            TokenKind::OpenParen,
            TokenKind::CloseParen,
            TokenKind::OpenBrace,
            TokenKind::CloseBrace,
            TokenKind::OpenBracket,
            TokenKind::CloseBracket,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_number_followed_by_identifier_splits() {
    let tokens = tokenize("123abc").unwrap();
    assert_eq!(tokens[0].kind, TokenKind::Number);
    assert_eq!(tokens[0].text, "123");
    assert_eq!(tokens[1].kind, TokenKind::Identifier);
    assert_eq!(tokens[1].text, "abc");
}

#[test]
fn test_minus_is_never_part_of_a_number() {
    let tokens = tokenize("-5").unwrap();
    assert_eq!(tokens[0].kind, TokenKind::BinaryOperator);
    assert_eq!(tokens[0].text, "-");
    assert_eq!(tokens[1].kind, TokenKind::Number);
}

#[test]
fn test_string_token_text_is_unquoted() {
    let tokens = tokenize("\"hello world\"").unwrap();
    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].text, "hello world");
    assert_eq!(tokens[0].span, Span::new(0, 13, 1));
}

#[test]
fn test_strings_have_no_escapes() {
    let tokens = tokenize(r#""a\n""#).unwrap();
    assert_eq!(tokens[0].text, r"a\n");
}

#[test]
fn test_unterminated_string_runs_to_end_of_input() {
    let tokens = tokenize("\"abc\ndef").unwrap();
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].text, "abc\ndef");
    assert_eq!(tokens[1].kind, TokenKind::Eof);
    assert_eq!(tokens[1].line(), 2);
}

#[test]
fn test_line_numbers_advance_on_newlines() {
    let tokens = tokenize("a\nb\n\nc \"x\ny\" d").unwrap();
    let lines: Vec<usize> = tokens.iter().map(|token| token.line()).collect();
    assert_eq!(lines, vec![1, 2, 4, 4, 5, 5]);
}

#[test]
fn test_line_tracking_is_per_call() {
    tokenize("a\nb\nc").unwrap();
    let tokens = tokenize("z").unwrap();
    assert_eq!(tokens[0].line(), 1);
}

#[test]
fn test_unrecognized_character() {
    let error = tokenize("let x = 1;\nx # 2").unwrap_err();
    assert_eq!(error.line(), 2);
    match error {
        LexError::UnrecognizedCharacter { character, line, .. } => {
            assert_eq!(character, '#');
            assert_eq!(line, 2);
        }
    }
}

#[test]
fn test_non_ascii_letters_are_rejected() {
    let error = tokenize("é").unwrap_err();
    match error {
        LexError::UnrecognizedCharacter { character, .. } => assert_eq!(character, 'é'),
    }
}
