//! The expression engine.
//!
//! Four precedence layers, loosest first:
//!
//! * `expr`: leading `NOT` / `!`, then `OR` / `||`, `XOR`, `AND` / `&&`
//! * `booleanPrimary`: `IS [NOT] ...`, `<=>`, comparisons, `cmp ALL|ANY (subquery)`
//! * `predicate`: one of `IN`, `BETWEEN`, `SOUNDS LIKE`, `LIKE`, `REGEXP`
//! * `bitExpr`: `|`, `&`, shifts, `+ -`, `* / DIV`, `% MOD`, `^`
//!
//! Terms (`simpleExpr`) sit below `bitExpr`. Every binary layer is an
//! iterative precedence-climbing loop, so there is no left recursion.

use super::error::Result;
use super::precedence::{NOT_PRECEDENCE, bit_op, comparison_op, logical_op, prefix_op};
use super::Parser;
use crate::ast::{
    BinaryOp, CastTarget, ColumnRef, Expr, ExprKind, FunctionCall, IsPredicate, Quantifier,
    UnaryOp, WhenClause,
};
use crate::lexer::{Keyword, TokenKind};

impl Parser<'_> {
    /// Parses an expression at the loosest layer.
    ///
    /// Each nesting level passes once through every rule of the chain below;
    /// shapes off that path are parsed in functions of their own.
    pub(super) fn parse_expr(&mut self) -> Result<Expr> {
        self.deepen()?;
        let expr = self.parse_logical(0);
        self.set_depth(self.depth() - 1);
        expr
    }

    fn parse_logical(&mut self, min_precedence: u8) -> Result<Expr> {
        let mut left = if self.check_keyword(Keyword::Not) || self.check(TokenKind::Bang) {
            self.parse_logical_not()?
        } else {
            self.parse_boolean_primary()?
        };

        let outer = self.depth();
        while let Some((op, precedence)) = logical_op(self.peek(0)) {
            if precedence < min_precedence {
                break;
            }
            self.advance();
            self.deepen()?;
            let right = self.parse_logical(precedence + 1)?;
            left = Expr::binary(left, op, right);
        }
        self.set_depth(outer);

        Ok(left)
    }

    /// A leading `NOT` or `!`, which covers a whole comparison.
    fn parse_logical_not(&mut self) -> Result<Expr> {
        let start = self.start();
        self.advance();
        let operand = self.nested(|p| p.parse_logical(NOT_PRECEDENCE))?;
        Ok(Expr::new(
            ExprKind::Unary {
                op: UnaryOp::Not,
                operand: Box::new(operand),
            },
            self.span_from(start),
        ))
    }

    fn parse_boolean_primary(&mut self) -> Result<Expr> {
        let start = self.start();
        let left = self.parse_predicate()?;
        let kind = self.peek(0);
        let compared = kind.is_keyword(Keyword::Is)
            || kind == TokenKind::NullSafeEq
            || comparison_op(kind).is_some();
        if compared {
            self.parse_comparisons(left, start)
        } else {
            Ok(left)
        }
    }

    /// Folds `IS [NOT] ...`, `<=>` and comparisons onto `left`.
    fn parse_comparisons(&mut self, mut left: Expr, start: usize) -> Result<Expr> {
        let outer = self.depth();
        loop {
            let kind = self.peek(0);
            if kind.is_keyword(Keyword::Is) {
                self.advance();
                self.deepen()?;
                let negated = self.eat_keyword(Keyword::Not);
                let predicate = match self.expect_one_of(&[
                    Keyword::True,
                    Keyword::False,
                    Keyword::Unknown,
                    Keyword::Null,
                ])? {
                    Keyword::True => IsPredicate::True,
                    Keyword::False => IsPredicate::False,
                    Keyword::Unknown => IsPredicate::Unknown,
                    _ => IsPredicate::Null,
                };
                left = Expr::new(
                    ExprKind::IsCheck {
                        subject: Box::new(left),
                        predicate,
                        negated,
                    },
                    self.span_from(start),
                );
            } else if kind == TokenKind::NullSafeEq {
                self.advance();
                self.deepen()?;
                let right = self.parse_predicate()?;
                left = Expr::binary(left, BinaryOp::NullSafeEq, right);
            } else if let Some(op) = comparison_op(kind) {
                self.advance();
                self.deepen()?;
                if let Some(quantifier) = self.quantifier_ahead() {
                    self.advance();
                    let query = self.parse_parenthesized(Self::parse_subquery)?;
                    left = Expr::new(
                        ExprKind::QuantifiedComparison {
                            left: Box::new(left),
                            op,
                            quantifier,
                            query: Box::new(query),
                        },
                        self.span_from(start),
                    );
                } else {
                    let right = self.parse_predicate()?;
                    left = Expr::binary(left, op, right);
                }
            } else {
                break;
            }
        }
        self.set_depth(outer);

        Ok(left)
    }

    /// `ALL|ANY|SOME` directly followed by `( SELECT`.
    fn quantifier_ahead(&self) -> Option<Quantifier> {
        let quantifier = match self.peek(0) {
            TokenKind::Keyword(Keyword::All) => Quantifier::All,
            TokenKind::Keyword(Keyword::Any | Keyword::Some) => Quantifier::Any,
            _ => return None,
        };
        let subquery = self.peek(1) == TokenKind::LeftParen && self.peek_keyword(2, Keyword::Select);
        subquery.then_some(quantifier)
    }

    fn parse_predicate(&mut self) -> Result<Expr> {
        let start = self.start();
        let subject = self.parse_bit_expr(0)?;

        let negated = self.check_keyword(Keyword::Not)
            && matches!(
                self.peek(1),
                TokenKind::Keyword(
                    Keyword::In | Keyword::Between | Keyword::Like | Keyword::Regexp | Keyword::Rlike
                )
            );
        let predicate = negated
            || matches!(
                self.peek(0),
                TokenKind::Keyword(
                    Keyword::In
                        | Keyword::Between
                        | Keyword::Sounds
                        | Keyword::Like
                        | Keyword::Regexp
                        | Keyword::Rlike
                )
            );
        if predicate {
            self.parse_predicate_tail(subject, negated, start)
        } else {
            Ok(subject)
        }
    }

    /// One of `IN`, `BETWEEN`, `SOUNDS LIKE`, `LIKE` or `REGEXP` after its
    /// subject, with the optional `NOT` still ahead.
    fn parse_predicate_tail(&mut self, subject: Expr, negated: bool, start: usize) -> Result<Expr> {
        if negated {
            self.advance();
        }

        let kind = match self.peek(0) {
            TokenKind::Keyword(Keyword::In) => {
                self.advance();
                self.expect(TokenKind::LeftParen)?;
                let kind = if self.check_keyword(Keyword::Select) {
                    ExprKind::InSubquery {
                        subject: Box::new(subject),
                        query: Box::new(self.parse_subquery()?),
                        negated,
                    }
                } else {
                    ExprKind::InList {
                        subject: Box::new(subject),
                        items: self.parse_comma_separated(Self::parse_expr)?,
                        negated,
                    }
                };
                self.expect(TokenKind::RightParen)?;
                kind
            }
            TokenKind::Keyword(Keyword::Between) => {
                self.advance();
                let low = self.parse_bit_expr(0)?;
                self.expect_keyword(Keyword::And)?;
                let high = self.nested(Self::parse_predicate)?;
                ExprKind::Between {
                    subject: Box::new(subject),
                    low: Box::new(low),
                    high: Box::new(high),
                    negated,
                }
            }
            TokenKind::Keyword(Keyword::Sounds) => {
                self.advance();
                self.expect_keyword(Keyword::Like)?;
                ExprKind::SoundsLike {
                    subject: Box::new(subject),
                    pattern: Box::new(self.parse_bit_expr(0)?),
                }
            }
            TokenKind::Keyword(Keyword::Like) => {
                self.advance();
                let pattern = self.parse_bit_expr(0)?;
                let escape = if self.eat_keyword(Keyword::Escape) {
                    Some(Box::new(self.parse_bit_expr(0)?))
                } else {
                    None
                };
                ExprKind::Like {
                    subject: Box::new(subject),
                    pattern: Box::new(pattern),
                    escape,
                    negated,
                }
            }
            TokenKind::Keyword(Keyword::Regexp | Keyword::Rlike) => {
                self.advance();
                ExprKind::Regexp {
                    subject: Box::new(subject),
                    pattern: Box::new(self.parse_bit_expr(0)?),
                    negated,
                }
            }
            _ => {
                return Err(self.error_expected(&[
                    TokenKind::Keyword(Keyword::In),
                    TokenKind::Keyword(Keyword::Between),
                    TokenKind::Keyword(Keyword::Like),
                    TokenKind::Keyword(Keyword::Regexp),
                ]))
            }
        };

        Ok(Expr::new(kind, self.span_from(start)))
    }

    /// Precedence climbing over the bitwise and arithmetic operators.
    pub(super) fn parse_bit_expr(&mut self, min_precedence: u8) -> Result<Expr> {
        let mut left = self.parse_simple_expr()?;

        let outer = self.depth();
        while let Some((op, precedence)) = bit_op(self.peek(0)) {
            if precedence < min_precedence {
                break;
            }
            self.advance();
            self.deepen()?;
            let right = self.parse_bit_expr(precedence + 1)?;
            left = Expr::binary(left, op, right);
        }
        self.set_depth(outer);

        Ok(left)
    }

    /// Collated terms joined by `&&`, which binds tighter than any operator
    /// above this layer.
    pub(super) fn parse_simple_expr(&mut self) -> Result<Expr> {
        let mut left = self.parse_collated_term()?;

        let outer = self.depth();
        while self.eat(TokenKind::AndAnd) {
            self.deepen()?;
            let right = self.parse_collated_term()?;
            left = Expr::binary(left, BinaryOp::And, right);
        }
        self.set_depth(outer);

        Ok(left)
    }

    fn parse_collated_term(&mut self) -> Result<Expr> {
        let start = self.start();
        let term = self.parse_term()?;
        if self.check_keyword(Keyword::Collate) {
            self.parse_collations(term, start)
        } else {
            Ok(term)
        }
    }

    /// Wraps `expr` in each of the `COLLATE name` suffixes that follow it.
    fn parse_collations(&mut self, mut expr: Expr, start: usize) -> Result<Expr> {
        let outer = self.depth();
        while self.eat_keyword(Keyword::Collate) {
            self.deepen()?;
            let collation = self.parse_collation_name()?;
            expr = Expr::new(
                ExprKind::Collate {
                    expr: Box::new(expr),
                    collation,
                },
                self.span_from(start),
            );
        }
        self.set_depth(outer);

        Ok(expr)
    }

    fn parse_term(&mut self) -> Result<Expr> {
        let kind = self.peek(0);

        if let Some(op) = prefix_op(kind) {
            return self.parse_prefixed(op);
        }
        if kind == TokenKind::Question {
            return self.parse_parameter();
        }
        if self.check_literal() {
            return self.parse_literal();
        }

        match kind {
            TokenKind::LeftParen => self.parse_parenthesized_term(),
            TokenKind::Keyword(kw) if Self::is_current_time_keyword(kw) => {
                self.parse_current_time()
            }
            TokenKind::Keyword(Keyword::Exists) => self.parse_exists(),
            TokenKind::Keyword(Keyword::Row) if self.peek(1) == TokenKind::LeftParen => {
                self.parse_row()
            }
            TokenKind::Keyword(Keyword::Case) => self.parse_case(),
            TokenKind::Keyword(Keyword::Cast) if self.peek(1) == TokenKind::LeftParen => {
                self.parse_cast()
            }
            TokenKind::Keyword(kw) if kw.names_function() && self.peek(1) == TokenKind::LeftParen => {
                self.parse_function_call()
            }
            _ if kind.is_identifier_like() => {
                if self.peek(1) == TokenKind::LeftParen {
                    self.parse_function_call()
                } else {
                    self.parse_column_ref()
                }
            }
            _ => Err(self.error_unexpected("expression")),
        }
    }

    /// `-x`, `+x`, `~x` or `!x`, binding tighter than any binary operator.
    fn parse_prefixed(&mut self, op: UnaryOp) -> Result<Expr> {
        let start = self.start();
        self.advance();
        let operand = self.nested(Self::parse_collated_term)?;
        Ok(Expr::new(
            ExprKind::Unary {
                op,
                operand: Box::new(operand),
            },
            self.span_from(start),
        ))
    }

    fn parse_parameter(&mut self) -> Result<Expr> {
        let start = self.start();
        self.advance();
        let index = self.next_parameter();
        Ok(Expr::new(ExprKind::Parameter(index), self.span_from(start)))
    }

    fn parse_exists(&mut self) -> Result<Expr> {
        let start = self.start();
        self.expect_keyword(Keyword::Exists)?;
        let query = self.parse_parenthesized(Self::parse_subquery)?;
        Ok(Expr::new(
            ExprKind::Exists(Box::new(query)),
            self.span_from(start),
        ))
    }

    fn parse_row(&mut self) -> Result<Expr> {
        let start = self.start();
        self.expect_keyword(Keyword::Row)?;
        let items = self.parse_parenthesized(|p| p.parse_comma_separated(Self::parse_expr))?;
        Ok(Expr::new(ExprKind::Row(items), self.span_from(start)))
    }

    /// `( SELECT ... )`, `( expr )` or `( expr, expr, ... )`.
    fn parse_parenthesized_term(&mut self) -> Result<Expr> {
        let start = self.start();
        self.expect(TokenKind::LeftParen)?;

        if self.check_keyword(Keyword::Select) {
            return self.parse_subquery_term(start);
        }

        let first = self.parse_expr()?;
        if self.check(TokenKind::Comma) {
            return self.parse_row_items(first, start);
        }
        self.expect(TokenKind::RightParen)?;
        Ok(first)
    }

    fn parse_subquery_term(&mut self, start: usize) -> Result<Expr> {
        let query = self.parse_subquery()?;
        self.expect(TokenKind::RightParen)?;
        Ok(Expr::new(
            ExprKind::Subquery(Box::new(query)),
            self.span_from(start),
        ))
    }

    /// The rest of `( first, expr, ... )` after `first`.
    fn parse_row_items(&mut self, first: Expr, start: usize) -> Result<Expr> {
        let mut items = vec![first];
        while self.eat(TokenKind::Comma) {
            items.push(self.parse_expr()?);
        }
        self.expect(TokenKind::RightParen)?;
        Ok(Expr::new(ExprKind::Row(items), self.span_from(start)))
    }

    fn parse_function_call(&mut self) -> Result<Expr> {
        let start = self.start();
        let name = self.advance().lexeme.clone();
        self.expect(TokenKind::LeftParen)?;

        let distinct = self.eat_keyword(Keyword::Distinct);
        let args = if self.check(TokenKind::RightParen) {
            vec![]
        } else if self.check(TokenKind::Star) {
            let star = self.start();
            self.advance();
            vec![Expr::new(
                ExprKind::Wildcard { table: None },
                self.span_from(star),
            )]
        } else {
            self.parse_comma_separated(Self::parse_expr)?
        };
        self.expect(TokenKind::RightParen)?;

        Ok(Expr::new(
            ExprKind::Function(FunctionCall {
                name,
                args,
                distinct,
            }),
            self.span_from(start),
        ))
    }

    /// `name`, `table.name`, `schema.table.name` or `table.*`.
    fn parse_column_ref(&mut self) -> Result<Expr> {
        let start = self.start();
        let mut parts = vec![self.expect_identifier()?];

        while parts.len() < 3 && self.check(TokenKind::Dot) {
            self.advance();
            if parts.len() == 1 && self.eat(TokenKind::Star) {
                return Ok(Expr::new(
                    ExprKind::Wildcard {
                        table: parts.pop(),
                    },
                    self.span_from(start),
                ));
            }
            parts.push(self.expect_name_part()?);
        }

        let name = parts.pop().unwrap_or_default();
        let table = parts.pop();
        let schema = parts.pop();
        Ok(Expr::new(
            ExprKind::Column(ColumnRef {
                schema,
                table,
                name,
            }),
            self.span_from(start),
        ))
    }

    /// A qualified name part after `.`, where reserved words are allowed.
    fn expect_name_part(&mut self) -> Result<String> {
        if matches!(self.peek(0), TokenKind::Identifier | TokenKind::Keyword(_)) {
            Ok(self.advance().lexeme.clone())
        } else {
            Err(self.error_unexpected("identifier"))
        }
    }

    fn parse_case(&mut self) -> Result<Expr> {
        let start = self.start();
        self.expect_keyword(Keyword::Case)?;

        let operand = if self.check_keyword(Keyword::When) {
            None
        } else {
            Some(Box::new(self.parse_expr()?))
        };

        let mut when_clauses = Vec::new();
        while self.eat_keyword(Keyword::When) {
            let condition = self.parse_expr()?;
            self.expect_keyword(Keyword::Then)?;
            let result = self.parse_expr()?;
            when_clauses.push(WhenClause { condition, result });
        }
        if when_clauses.is_empty() {
            return Err(self.error_expected(&[TokenKind::Keyword(Keyword::When)]));
        }

        let else_result = if self.eat_keyword(Keyword::Else) {
            Some(Box::new(self.parse_expr()?))
        } else {
            None
        };
        self.expect_keyword(Keyword::End)?;

        Ok(Expr::new(
            ExprKind::Case {
                operand,
                when_clauses,
                else_result,
            },
            self.span_from(start),
        ))
    }

    fn parse_cast(&mut self) -> Result<Expr> {
        let start = self.start();
        self.expect_keyword(Keyword::Cast)?;
        self.expect(TokenKind::LeftParen)?;
        let expr = self.parse_expr()?;
        self.expect_keyword(Keyword::As)?;

        let target = match self.peek(0) {
            TokenKind::Keyword(Keyword::Signed) => {
                self.advance();
                self.eat_integer_keyword();
                CastTarget::Signed
            }
            TokenKind::Keyword(Keyword::Unsigned) => {
                self.advance();
                self.eat_integer_keyword();
                CastTarget::Unsigned
            }
            _ => CastTarget::DataType(self.parse_data_type()?),
        };
        self.expect(TokenKind::RightParen)?;

        Ok(Expr::new(
            ExprKind::Cast {
                expr: Box::new(expr),
                target,
            },
            self.span_from(start),
        ))
    }

    fn eat_integer_keyword(&mut self) {
        if !self.eat_keyword(Keyword::Integer) {
            self.eat_keyword(Keyword::Int);
        }
    }
}
