// Declaration parsing module
// Handles let/const bindings and named function declarations

use crate::ast::*;
use crate::error::{ParseError, ParseResult};
use crate::parser::EmberParser;
use crate::token::TokenKind;

impl EmberParser {
    /// `let name;`, `let name = expr;` or `const name = expr;`
    pub(crate) fn parse_var_declaration(&mut self) -> ParseResult<Statement> {
        let keyword = self.advance();
        let constant = keyword.kind == TokenKind::Const;
        let name = self.expect_identifier(&format!("variable name after '{}'", keyword.text))?;

        if self.check(TokenKind::Semicolon) {
            if constant {
                return Err(ParseError::const_without_initializer(
                    &name.name,
                    keyword.span.to(name.span),
                ));
            }
            self.advance();
            let span = self.span_from(keyword.span);
            return Ok(Statement::new(
                StatementKind::VarDeclaration(VarDeclaration {
                    name,
                    value: None,
                    constant,
                }),
                span,
            ));
        }

        self.expect(TokenKind::Equals, "'=' or ';' after variable name")?;
        let value = self.parse_expression()?;

        if !self.check(TokenKind::Semicolon) {
            return Err(ParseError::missing_semicolon(&name.name, self.current()));
        }
        self.advance();

        let span = self.span_from(keyword.span);
        Ok(Statement::new(
            StatementKind::VarDeclaration(VarDeclaration {
                name,
                value: Some(value),
                constant,
            }),
            span,
        ))
    }

    /// `fn name(a, b) { body }`
    pub(crate) fn parse_function_declaration(&mut self) -> ParseResult<Statement> {
        let keyword = self.advance();
        let name = self.expect_identifier("function name after 'fn'")?;

        self.expect(TokenKind::OpenParen, "'(' after function name")?;
        let parameters = self.parse_parameters()?;
        let body = self.parse_block("function body")?;

        let span = self.span_from(keyword.span);
        Ok(Statement::new(
            StatementKind::FunctionDeclaration(FunctionDeclaration {
                name,
                parameters,
                body,
            }),
            span,
        ))
    }

    // Assumes the opening '(' has been consumed; consumes the closing ')'.
    fn parse_parameters(&mut self) -> ParseResult<Vec<Identifier>> {
        let mut parameters = Vec::new();

        if self.check(TokenKind::CloseParen) {
            self.advance();
            return Ok(parameters);
        }

        loop {
            if !self.check(TokenKind::Identifier) {
                return Err(ParseError::invalid_parameter(self.current()));
            }
            let token = self.advance();
            parameters.push(Identifier {
                name: token.text,
                span: token.span,
            });

            if self.check(TokenKind::Comma) {
                self.advance();
                continue;
            }

            self.expect(TokenKind::CloseParen, "',' or ')' after parameter")?;
            return Ok(parameters);
        }
    }
}
