// Ember Parser
// Recursive descent parser turning a token stream into a Program

use crate::ast::*;
use crate::error::{ParseError, ParseResult};
use crate::stack::ensure_sufficient_stack;
use crate::token::{Token, TokenKind};

mod collections;
mod control_flow;
mod declarations;
mod expressions;

/// Parse a complete token stream into a program
pub fn parse(tokens: Vec<Token>) -> ParseResult<Program> {
    EmberParser::new(tokens).parse_program()
}

/// Cursor over a token stream
///
/// The parser is fatal on the first malformed construct; there is no error
/// recovery. The token stream is guaranteed to end with an `Eof` token so
/// `current` never runs off the end.
pub struct EmberParser {
    tokens: Vec<Token>,
    cursor: usize,
    last_span: Span,
}

impl EmberParser {
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if !tokens.last().is_some_and(|token| token.kind == TokenKind::Eof) {
            let end = tokens.last().map(|token| token.span).unwrap_or_default();
            tokens.push(Token::new(
                TokenKind::Eof,
                "",
                Span::new(end.end, end.end, end.line.max(1)),
            ));
        }

        Self {
            tokens,
            cursor: 0,
            last_span: Span::default(),
        }
    }

    pub fn parse_program(mut self) -> ParseResult<Program> {
        let start = self.current().span;
        let mut statements = Vec::new();

        while !self.at_end() {
            statements.push(self.parse_statement()?);
        }

        let span = Span::new(start.start, self.current().span.end, start.line);
        Ok(Program { statements, span })
    }

    /// Parse a single expression that must span the whole token stream
    pub fn parse_standalone_expression(mut self) -> ParseResult<Expression> {
        let expression = self.parse_expression()?;
        if !self.at_end() {
            return Err(ParseError::unexpected_token("end of input", self.current()));
        }
        Ok(expression)
    }

    pub(crate) fn parse_statement(&mut self) -> ParseResult<Statement> {
        ensure_sufficient_stack(|| match self.current().kind {
            TokenKind::Let | TokenKind::Const => self.parse_var_declaration(),
            TokenKind::Fn => self.parse_function_declaration(),
            TokenKind::If => self.parse_if_statement(),
            TokenKind::While => self.parse_while_statement(),
            _ => self.parse_expression_statement(),
        })
    }

    fn parse_expression_statement(&mut self) -> ParseResult<Statement> {
        let expression = self.parse_expression()?;
        self.consume_semicolon();
        let span = self.span_from(expression.span);
        Ok(Statement::new(StatementKind::Expression(expression), span))
    }

    /// `{ statement* }`
    pub(crate) fn parse_block(&mut self, context: &str) -> ParseResult<Vec<Statement>> {
        self.expect(TokenKind::OpenBrace, &format!("'{{' to open {context}"))?;

        let mut statements = Vec::new();
        while !self.at_end() && !self.check(TokenKind::CloseBrace) {
            statements.push(self.parse_statement()?);
        }

        self.expect(TokenKind::CloseBrace, &format!("'}}' to close {context}"))?;
        Ok(statements)
    }

    pub(crate) fn expect_identifier(&mut self, expected: &str) -> ParseResult<Identifier> {
        if !self.check(TokenKind::Identifier) {
            return Err(ParseError::unexpected_token(expected, self.current()));
        }
        let token = self.advance();
        Ok(Identifier {
            name: token.text,
            span: token.span,
        })
    }

    pub(crate) fn expect(&mut self, kind: TokenKind, expected: &str) -> ParseResult<Token> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(ParseError::unexpected_token(expected, self.current()))
        }
    }

    pub(crate) fn consume_semicolon(&mut self) {
        if self.check(TokenKind::Semicolon) {
            self.advance();
        }
    }

    /// Span from `start` up to the end of the most recently consumed token
    pub(crate) fn span_from(&self, start: Span) -> Span {
        Span::new(start.start, self.last_span.end.max(start.end), start.line)
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.current().kind == kind
    }

    pub(crate) fn at_end(&self) -> bool {
        self.check(TokenKind::Eof)
    }

    pub(crate) fn current(&self) -> &Token {
        &self.tokens[self.cursor]
    }

    pub(crate) fn advance(&mut self) -> Token {
        let token = self.current().clone();
        if !self.at_end() {
            self.cursor += 1;
        }
        self.last_span = token.span;
        token
    }
}
