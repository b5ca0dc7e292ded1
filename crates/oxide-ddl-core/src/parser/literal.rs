//! Terminal productions: literals, charset and collation names, and the
//! niladic current-time functions.

use super::error::Result;
use super::Parser;
use crate::ast::{Expr, ExprKind, FunctionCall, Literal, TemporalKind, UnaryOp};
use crate::lexer::{Keyword, TokenKind};

/// Converts a number lexeme into a literal. Integers that fit in an `i64`
/// become `Integer`; everything else is kept as written.
pub(super) fn number_literal(lexeme: &str) -> Literal {
    if lexeme.bytes().all(|b| b.is_ascii_digit()) {
        if let Ok(value) = lexeme.parse::<i64>() {
            return Literal::Integer(value);
        }
    }
    Literal::Decimal(lexeme.to_string())
}

impl Parser<'_> {
    /// Whether the current token starts a literal.
    pub(super) fn check_literal(&self) -> bool {
        match self.peek(0) {
            TokenKind::Number
            | TokenKind::String
            | TokenKind::HexNumber
            | TokenKind::BitNumber
            | TokenKind::LeftBrace
            | TokenKind::Keyword(Keyword::True | Keyword::False | Keyword::Null) => true,
            TokenKind::Keyword(Keyword::Date | Keyword::Time | Keyword::Timestamp) => {
                self.peek(1) == TokenKind::String
            }
            TokenKind::Identifier => self.charset_introducer_ahead(),
            _ => false,
        }
    }

    /// `_charset` directly followed by a string, hex or bit literal.
    fn charset_introducer_ahead(&self) -> bool {
        self.current().lexeme.starts_with('_')
            && matches!(
                self.peek(1),
                TokenKind::String | TokenKind::HexNumber | TokenKind::BitNumber
            )
    }

    /// Parses a literal value.
    pub(super) fn parse_literal(&mut self) -> Result<Expr> {
        let start = self.start();

        let literal = match self.peek(0) {
            TokenKind::Number => {
                let literal = number_literal(&self.current().lexeme);
                self.advance();
                literal
            }
            TokenKind::Keyword(Keyword::True) => {
                self.advance();
                Literal::Boolean(true)
            }
            TokenKind::Keyword(Keyword::False) => {
                self.advance();
                Literal::Boolean(false)
            }
            TokenKind::Keyword(Keyword::Null) => {
                self.advance();
                Literal::Null
            }
            TokenKind::String | TokenKind::HexNumber | TokenKind::BitNumber => {
                self.parse_text_literal(None)?
            }
            TokenKind::Identifier if self.charset_introducer_ahead() => {
                let charset = self.advance().lexeme[1..].to_string();
                self.parse_text_literal(Some(charset))?
            }
            TokenKind::Keyword(kw @ (Keyword::Date | Keyword::Time | Keyword::Timestamp))
                if self.peek(1) == TokenKind::String =>
            {
                self.advance();
                let kind = match kw {
                    Keyword::Date => TemporalKind::Date,
                    Keyword::Time => TemporalKind::Time,
                    _ => TemporalKind::Timestamp,
                };
                Literal::Temporal {
                    kind,
                    value: self.parse_string()?,
                }
            }
            TokenKind::LeftBrace => {
                self.advance();
                let kind = self.expect_identifier()?;
                let value = self.parse_string()?;
                self.expect(TokenKind::RightBrace)?;
                Literal::OdbcEscape { kind, value }
            }
            _ => return Err(self.error_unexpected("literal")),
        };

        Ok(Expr::new(ExprKind::Literal(literal), self.span_from(start)))
    }

    /// String, hex or bit literal with an optional introducer already consumed.
    fn parse_text_literal(&mut self, charset: Option<String>) -> Result<Literal> {
        let token = self.current();
        let literal = match token.kind {
            TokenKind::String => Literal::String {
                value: token.lexeme.clone(),
                charset,
            },
            TokenKind::HexNumber => Literal::Hex {
                digits: token.lexeme.clone(),
                charset,
            },
            TokenKind::BitNumber => Literal::Bit {
                digits: token.lexeme.clone(),
                charset,
            },
            _ => {
                return Err(self.error_expected(&[
                    TokenKind::String,
                    TokenKind::HexNumber,
                    TokenKind::BitNumber,
                ]));
            }
        };
        self.advance();
        Ok(literal)
    }

    /// A signed number such as `-1` or `+2.5`, as a unary node over the literal.
    pub(super) fn parse_signed_number(&mut self) -> Result<Expr> {
        let start = self.start();
        let op = if self.eat(TokenKind::Minus) {
            Some(UnaryOp::Neg)
        } else if self.eat(TokenKind::Plus) {
            Some(UnaryOp::Plus)
        } else {
            None
        };
        if !self.check(TokenKind::Number) {
            return Err(self.error_expected(&[TokenKind::Number]));
        }
        let number = self.parse_literal()?;
        Ok(match op {
            Some(op) => Expr::new(
                ExprKind::Unary {
                    op,
                    operand: Box::new(number),
                },
                self.span_from(start),
            ),
            None => number,
        })
    }

    /// Keywords of the niladic current-time functions.
    pub(super) const fn is_current_time_keyword(keyword: Keyword) -> bool {
        keyword.is_current_time()
    }

    /// `CURRENT_TIMESTAMP`, `CURRENT_TIMESTAMP()` or `CURRENT_TIMESTAMP(n)`,
    /// and likewise for the other current-time keywords.
    pub(super) fn parse_current_time(&mut self) -> Result<Expr> {
        let start = self.start();
        let is_current_time = self
            .current()
            .as_keyword()
            .is_some_and(Self::is_current_time_keyword);
        if !is_current_time {
            return Err(self.error_unexpected("CURRENT_TIMESTAMP"));
        }
        let name = self.advance().lexeme.clone();

        let mut args = Vec::new();
        if self.eat(TokenKind::LeftParen) {
            if self.check(TokenKind::Number) {
                args.push(self.parse_literal()?);
            }
            self.expect(TokenKind::RightParen)?;
        }

        Ok(Expr::new(
            ExprKind::Function(FunctionCall {
                name,
                args,
                distinct: false,
            }),
            self.span_from(start),
        ))
    }

    /// A character set name: identifier, string, or `BINARY`.
    pub(super) fn parse_charset_name(&mut self) -> Result<String> {
        match self.peek(0) {
            TokenKind::String | TokenKind::Keyword(Keyword::Binary) => {
                Ok(self.advance().lexeme.clone())
            }
            kind if kind.is_identifier_like() => Ok(self.advance().lexeme.clone()),
            _ => Err(self.error_unexpected("character set name")),
        }
    }

    /// `CHARACTER SET name` or `CHARSET name`, if present.
    pub(super) fn parse_charset_clause(&mut self) -> Result<Option<String>> {
        if self.check_keyword(Keyword::Character) && self.peek_keyword(1, Keyword::Set) {
            self.advance();
            self.advance();
        } else if !self.eat_keyword(Keyword::Charset) {
            return Ok(None);
        }
        self.parse_charset_name().map(Some)
    }

    /// A collation name: identifier or string.
    pub(super) fn parse_collation_name(&mut self) -> Result<String> {
        match self.peek(0) {
            TokenKind::String => Ok(self.advance().lexeme.clone()),
            kind if kind.is_identifier_like() => Ok(self.advance().lexeme.clone()),
            _ => Err(self.error_unexpected("collation name")),
        }
    }
}
