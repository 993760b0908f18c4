// Ember Lexer
// Single pass scanner turning source text into a token stream

use crate::ast::Span;
use crate::error::{LexError, LexResult};
use crate::token::{Token, TokenKind};

/// Scan `source` into tokens, always terminated by exactly one `Eof` token
///
/// Scanning stops at the first character that cannot start a token.
pub fn tokenize(source: &str) -> LexResult<Vec<Token>> {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();

    loop {
        let token = lexer.next_token()?;
        let eof = token.kind == TokenKind::Eof;
        tokens.push(token);
        if eof {
            break;
        }
    }

    Ok(tokens)
}

struct Lexer<'a> {
    input: &'a str,
    position: usize,
    line: usize,
}

impl<'a> Lexer<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            position: 0,
            line: 1,
        }
    }

    fn next_token(&mut self) -> LexResult<Token> {
        self.skip_whitespace();

        let start = self.position;
        let line = self.line;

        let Some(ch) = self.bump_char() else {
            return Ok(Token::new(TokenKind::Eof, "", Span::new(start, start, line)));
        };

        if ch == '"' {
            return Ok(self.read_string(start, line));
        }

        if is_ident_start(ch) {
            return Ok(self.read_identifier(start, line));
        }

        if ch.is_ascii_digit() {
            return Ok(self.read_number(start, line));
        }

        let kind = match ch {
            '+' | '-' | '*' | '/' | '%' => TokenKind::BinaryOperator,
            '=' if self.eat('=') => TokenKind::EqualsEquals,
            '=' => TokenKind::Equals,
            '!' if self.eat('=') => TokenKind::NotEquals,
            '!' => TokenKind::Not,
            '<' if self.eat('=') => TokenKind::LessThanOrEquals,
            '<' => TokenKind::LessThan,
            '>' if self.eat('=') => TokenKind::GreaterThanOrEquals,
            '>' => TokenKind::GreaterThan,
            '.' => TokenKind::Dot,
            ',' => TokenKind::Comma,
            ':' => TokenKind::Colon,
            ';' => TokenKind::Semicolon,
            '(' => TokenKind::OpenParen,
            ')' => TokenKind::CloseParen,
            '{' => TokenKind::OpenBrace,
            '}' => TokenKind::CloseBrace,
            '[' => TokenKind::OpenBracket,
            ']' => TokenKind::CloseBracket,
            other => {
                return Err(LexError::unrecognized_character(
                    other,
                    Span::new(start, self.position, line),
                ));
            }
        };

        Ok(self.token_from(kind, start, line))
    }

    fn token_from(&self, kind: TokenKind, start: usize, line: usize) -> Token {
        Token::new(
            kind,
            &self.input[start..self.position],
            Span::new(start, self.position, line),
        )
    }

    fn read_identifier(&mut self, start: usize, line: usize) -> Token {
        while self.peek_char().is_some_and(is_ident_continue) {
            self.bump_char();
        }

        let word = &self.input[start..self.position];
        let kind = TokenKind::keyword(word).unwrap_or(TokenKind::Identifier);
        self.token_from(kind, start, line)
    }

    fn read_number(&mut self, start: usize, line: usize) -> Token {
        while self.peek_char().is_some_and(|c| c.is_ascii_digit()) {
            self.bump_char();
        }

        self.token_from(TokenKind::Number, start, line)
    }

    // No escapes; an unterminated string runs to end of input.
    fn read_string(&mut self, start: usize, line: usize) -> Token {
        let content_start = self.position;
        let mut content_end = self.input.len();

        while let Some(c) = self.peek_char() {
            if c == '"' {
                content_end = self.position;
                self.bump_char();
                break;
            }
            self.bump_char();
        }

        Token::new(
            TokenKind::String,
            &self.input[content_start..content_end],
            Span::new(start, self.position, line),
        )
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek_char() {
            if !matches!(c, ' ' | '\t' | '\r' | '\n') {
                break;
            }
            self.bump_char();
        }
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek_char() == Some(expected) {
            self.bump_char();
            true
        } else {
            false
        }
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    fn bump_char(&mut self) -> Option<char> {
        let ch = self.peek_char()?;
        self.position += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
        }
        Some(ch)
    }
}

fn is_ident_start(c: char) -> bool {
    c == '_' || c.is_ascii_alphabetic()
}

fn is_ident_continue(c: char) -> bool {
    c == '_' || c.is_ascii_alphanumeric()
}
