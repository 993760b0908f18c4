// Whole-program parsing tests
// Exercise the public API the interpreter and CLI depend on

use ember_parser::{ast::*, parse, parse_program, tokenize, TokenKind};

const COUNTER_PROGRAM: &str = r#"
const greeting = "hello";
let people = ["ada", "grace"];
let i = 0;

fn describe(person, index) {
    let record = { name: person, index, greeting };
    record
}

while (i < 2) {
    println(describe(people[i], i).name);
    i = i + 1;
}
"#;

#[test]
fn test_parse_full_program() {
    let program = parse_program(COUNTER_PROGRAM).unwrap();
    assert_eq!(program.statements.len(), 5);

    let kinds: Vec<&str> = program
        .statements
        .iter()
        .map(|statement| match &statement.kind {
            StatementKind::VarDeclaration(_) => "var",
            StatementKind::FunctionDeclaration(_) => "fn",
            StatementKind::If(_) => "if",
            StatementKind::While(_) => "while",
            StatementKind::Expression(_) => "expr",
        })
        .collect();
    assert_eq!(kinds, vec!["var", "var", "var", "fn", "while"]);

    let lines: Vec<usize> = program
        .statements
        .iter()
        .map(|statement| statement.span.line)
        .collect();
    assert_eq!(lines, vec![2, 3, 4, 6, 11]);
}

#[test]
fn test_parse_accepts_tokens_without_eof() {
    let mut tokens = tokenize("1 + 1").unwrap();
    assert_eq!(tokens.pop().map(|token| token.kind), Some(TokenKind::Eof));

    let program = parse(tokens).unwrap();
    assert_eq!(program.statements.len(), 1);
}

#[test]
fn test_parsing_is_deterministic() {
    let first = parse_program(COUNTER_PROGRAM).unwrap();
    let second = parse_program(COUNTER_PROGRAM).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_empty_program() {
    let program = parse_program("").unwrap();
    assert!(program.statements.is_empty());
}

#[test]
fn test_diagnostics_carry_codes() {
    use miette::Diagnostic;

    let error = parse_program("const x;").unwrap_err();
    let code = error.code().map(|code| code.to_string());
    assert_eq!(
        code.as_deref(),
        Some("ember::parse::const_without_initializer")
    );
}
