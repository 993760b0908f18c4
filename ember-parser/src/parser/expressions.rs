// Expression parsing module
// Precedence climbing from assignment down to primary expressions

use crate::ast::*;
use crate::error::{ParseError, ParseResult};
use crate::parser::EmberParser;
use crate::stack::ensure_sufficient_stack;
use crate::token::TokenKind;

impl EmberParser {
    /// Entry point for any expression; assignment binds loosest
    pub(crate) fn parse_expression(&mut self) -> ParseResult<Expression> {
        self.parse_assignment()
    }

    // Right associative: `a = b = c` parses as `a = (b = c)`.
    fn parse_assignment(&mut self) -> ParseResult<Expression> {
        ensure_sufficient_stack(|| self.parse_assignment_inner())
    }

    fn parse_assignment_inner(&mut self) -> ParseResult<Expression> {
        let target = self.parse_object_expression()?;

        if !self.check(TokenKind::Equals) {
            return Ok(target);
        }
        self.advance();

        let value = self.parse_assignment()?;
        let span = target.span.to(value.span);
        Ok(Expression::new(
            ExpressionKind::Assignment(Assignment {
                target: Box::new(target),
                value: Box::new(value),
            }),
            span,
        ))
    }

    fn parse_object_expression(&mut self) -> ParseResult<Expression> {
        if self.check(TokenKind::OpenBrace) {
            self.parse_object_literal()
        } else {
            self.parse_comparison()
        }
    }

    fn parse_comparison(&mut self) -> ParseResult<Expression> {
        let mut left = self.parse_unary()?;

        while self.current().kind.is_comparison() {
            let operator = comparison_operator(self.advance().kind);
            let right = self.parse_unary()?;
            let span = left.span.to(right.span);
            left = Expression::new(
                ExpressionKind::Comparison(ComparisonOperation {
                    left: Box::new(left),
                    operator,
                    right: Box::new(right),
                }),
                span,
            );
        }

        Ok(left)
    }

    // The operand of `!` is an additive expression, so `!a == b` is `(!a) == b`.
    fn parse_unary(&mut self) -> ParseResult<Expression> {
        if !self.check(TokenKind::Not) {
            return self.parse_additive();
        }

        let operator_token = self.advance();
        let operand = self.parse_additive()?;
        let span = operator_token.span.to(operand.span);
        Ok(Expression::new(
            ExpressionKind::UnaryOp(UnaryOperation {
                operator: UnaryOperator::Not,
                operand: Box::new(operand),
            }),
            span,
        ))
    }

    fn parse_additive(&mut self) -> ParseResult<Expression> {
        let mut left = self.parse_multiplicative()?;

        while let Some(operator) = self.binary_operator_matching(BinaryOperator::is_additive) {
            self.advance();
            let right = self.parse_multiplicative()?;
            left = binary(left, operator, right);
        }

        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> ParseResult<Expression> {
        let mut left = self.parse_postfix()?;

        while let Some(operator) = self.binary_operator_matching(|op| !op.is_additive()) {
            self.advance();
            let right = self.parse_postfix()?;
            left = binary(left, operator, right);
        }

        Ok(left)
    }

    fn binary_operator_matching(
        &self,
        predicate: impl Fn(BinaryOperator) -> bool,
    ) -> Option<BinaryOperator> {
        let token = self.current();
        if token.kind != TokenKind::BinaryOperator {
            return None;
        }
        BinaryOperator::from_symbol(&token.text).filter(|op| predicate(*op))
    }

    /// A primary followed by any chain of `.name`, `[expr]` and `(args)`
    fn parse_postfix(&mut self) -> ParseResult<Expression> {
        let mut expression = self.parse_primary()?;

        loop {
            match self.current().kind {
                TokenKind::Dot => {
                    self.advance();
                    let property = self.parse_primary()?;
                    expression = member(expression, property, false, self.last_span);
                }
                TokenKind::OpenBracket => {
                    self.advance();
                    let property = self.parse_expression()?;
                    self.expect(TokenKind::CloseBracket, "']' after index expression")?;
                    expression = member(expression, property, true, self.last_span);
                }
                TokenKind::OpenParen => {
                    self.advance();
                    let arguments =
                        self.parse_comma_separated(TokenKind::CloseParen, "argument list")?;
                    let span = expression.span.to(self.last_span);
                    expression = Expression::new(
                        ExpressionKind::Call(FunctionCall {
                            callee: Box::new(expression),
                            arguments,
                        }),
                        span,
                    );
                }
                _ => return Ok(expression),
            }
        }
    }

    fn parse_primary(&mut self) -> ParseResult<Expression> {
        let token = self.current().clone();

        match token.kind {
            TokenKind::Identifier => {
                self.advance();
                Ok(Expression::new(
                    ExpressionKind::Identifier(Identifier {
                        name: token.text,
                        span: token.span,
                    }),
                    token.span,
                ))
            }
            TokenKind::Number => {
                self.advance();
                let value = token
                    .text
                    .parse::<i64>()
                    .map_err(|_| ParseError::invalid_number(&token))?;
                Ok(Expression::new(
                    ExpressionKind::Integer(IntegerLiteral { value }),
                    token.span,
                ))
            }
            TokenKind::String => {
                self.advance();
                Ok(Expression::new(
                    ExpressionKind::String(StringLiteral { value: token.text }),
                    token.span,
                ))
            }
            TokenKind::OpenParen => {
                self.advance();
                let inner = self.parse_expression()?;
                self.expect(TokenKind::CloseParen, "')' to close parenthesized expression")?;
                Ok(inner)
            }
            TokenKind::OpenBracket => self.parse_array_literal(),
            _ => Err(ParseError::unexpected_token("an expression", &token)),
        }
    }
}

fn comparison_operator(kind: TokenKind) -> ComparisonOperator {
    match kind {
        TokenKind::EqualsEquals => ComparisonOperator::Equal,
        TokenKind::NotEquals => ComparisonOperator::NotEqual,
        TokenKind::LessThan => ComparisonOperator::Less,
        TokenKind::GreaterThan => ComparisonOperator::Greater,
        TokenKind::LessThanOrEquals => ComparisonOperator::LessEqual,
        _ => ComparisonOperator::GreaterEqual,
    }
}

fn binary(left: Expression, operator: BinaryOperator, right: Expression) -> Expression {
    let span = left.span.to(right.span);
    Expression::new(
        ExpressionKind::BinaryOp(BinaryOperation {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        }),
        span,
    )
}

fn member(object: Expression, property: Expression, computed: bool, end: Span) -> Expression {
    let span = object.span.to(end);
    Expression::new(
        ExpressionKind::Member(MemberAccess {
            object: Box::new(object),
            property: Box::new(property),
            computed,
        }),
        span,
    )
}
