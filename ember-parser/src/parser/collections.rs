// Collection parsing module
// Handles object literals, array literals and comma separated lists

use crate::ast::*;
use crate::error::ParseResult;
use crate::parser::EmberParser;
use crate::token::TokenKind;

impl EmberParser {
    /// `{ key: expr, shorthand, }`
    pub(crate) fn parse_object_literal(&mut self) -> ParseResult<Expression> {
        let open = self.expect(TokenKind::OpenBrace, "'{' to open object literal")?;
        let mut properties = Vec::new();

        while !self.at_end() && !self.check(TokenKind::CloseBrace) {
            let key = self.expect_identifier("property name")?;

            if self.check(TokenKind::Comma) {
                self.advance();
                properties.push(ObjectProperty {
                    span: key.span,
                    key,
                    value: None,
                });
                continue;
            }

            if self.check(TokenKind::CloseBrace) {
                properties.push(ObjectProperty {
                    span: key.span,
                    key,
                    value: None,
                });
                continue;
            }

            self.expect(TokenKind::Colon, "':' after property name")?;
            let value = self.parse_expression()?;
            let span = key.span.to(value.span);
            properties.push(ObjectProperty {
                key,
                value: Some(value),
                span,
            });

            if !self.check(TokenKind::CloseBrace) {
                self.expect(TokenKind::Comma, "',' or '}' after property value")?;
            }
        }

        self.expect(TokenKind::CloseBrace, "'}' to close object literal")?;
        let span = self.span_from(open.span);
        Ok(Expression::new(
            ExpressionKind::Object(ObjectLiteral { properties }),
            span,
        ))
    }

    /// `[a, b, c]`; the empty array `[]` is allowed
    pub(crate) fn parse_array_literal(&mut self) -> ParseResult<Expression> {
        let open = self.expect(TokenKind::OpenBracket, "'[' to open array literal")?;
        let elements = self.parse_comma_separated(TokenKind::CloseBracket, "array literal")?;
        let span = self.span_from(open.span);
        Ok(Expression::new(
            ExpressionKind::Array(ArrayLiteral { elements }),
            span,
        ))
    }

    /// Expressions separated by commas up to and including `close`
    ///
    /// Assumes the opening delimiter has already been consumed.
    pub(crate) fn parse_comma_separated(
        &mut self,
        close: TokenKind,
        context: &str,
    ) -> ParseResult<Vec<Expression>> {
        let mut items = Vec::new();

        if self.check(close) {
            self.advance();
            return Ok(items);
        }

        loop {
            items.push(self.parse_expression()?);

            if self.check(TokenKind::Comma) {
                self.advance();
                continue;
            }

            let closing = if close == TokenKind::CloseParen { ")" } else { "]" };
            self.expect(close, &format!("',' or '{closing}' in {context}"))?;
            return Ok(items);
        }
    }
}
