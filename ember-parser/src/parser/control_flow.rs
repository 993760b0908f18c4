// Control flow parsing module
// Handles if/else and while statements

use crate::ast::*;
use crate::error::ParseResult;
use crate::parser::EmberParser;
use crate::token::TokenKind;

impl EmberParser {
    /// `if (condition) { ... } [else { ... }]`
    pub(crate) fn parse_if_statement(&mut self) -> ParseResult<Statement> {
        let keyword = self.advance();
        let condition = self.parse_condition("if")?;
        let then_body = self.parse_block("if body")?;

        let else_body = if self.check(TokenKind::Else) {
            self.advance();
            self.parse_block("else body")?
        } else {
            Vec::new()
        };

        let span = self.span_from(keyword.span);
        Ok(Statement::new(
            StatementKind::If(IfStatement {
                condition,
                then_body,
                else_body,
            }),
            span,
        ))
    }

    /// `while (condition) { ... }`
    pub(crate) fn parse_while_statement(&mut self) -> ParseResult<Statement> {
        let keyword = self.advance();
        let condition = self.parse_condition("while")?;
        let body = self.parse_block("while body")?;

        let span = self.span_from(keyword.span);
        Ok(Statement::new(
            StatementKind::While(WhileStatement { condition, body }),
            span,
        ))
    }

    fn parse_condition(&mut self, keyword: &str) -> ParseResult<Expression> {
        self.expect(TokenKind::OpenParen, &format!("'(' after '{keyword}'"))?;
        let condition = self.parse_expression()?;
        self.expect(
            TokenKind::CloseParen,
            &format!("')' to close the {keyword} condition"),
        )?;
        Ok(condition)
    }
}
