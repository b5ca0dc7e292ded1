//! The SELECT subset used by subqueries and `CREATE TABLE ... SELECT`.

use super::error::Result;
use super::Parser;
use crate::ast::{
    Expr, ExprKind, JoinClause, JoinConstraint, JoinType, Limit, OrderBy, OrderDirection,
    SelectColumn, SelectQuantifier, SelectStatement, TableRef,
};
use crate::lexer::{Keyword, TokenKind};

impl Parser<'_> {
    /// Parses a SELECT one nesting level deeper.
    pub(super) fn parse_subquery(&mut self) -> Result<SelectStatement> {
        self.nested(Self::parse_select)
    }

    /// Parses a SELECT statement.
    pub(super) fn parse_select(&mut self) -> Result<SelectStatement> {
        self.expect_keyword(Keyword::Select)?;

        let quantifier = match self.peek(0) {
            TokenKind::Keyword(Keyword::All) => Some(SelectQuantifier::All),
            TokenKind::Keyword(Keyword::Distinct) => Some(SelectQuantifier::Distinct),
            TokenKind::Keyword(Keyword::Distinctrow) => Some(SelectQuantifier::Distinctrow),
            _ => None,
        };
        if quantifier.is_some() {
            self.advance();
        }

        let columns = self.parse_comma_separated(Self::parse_select_column)?;

        // FROM clause (optional for expressions like SELECT 1+1)
        let from = if self.eat_keyword(Keyword::From) {
            self.parse_comma_separated(Self::parse_table_ref)?
        } else {
            vec![]
        };

        let where_clause = if self.eat_keyword(Keyword::Where) {
            Some(self.parse_expr()?)
        } else {
            None
        };

        let group_by = if self.eat_keyword(Keyword::Group) {
            self.expect_keyword(Keyword::By)?;
            self.parse_comma_separated(Self::parse_expr)?
        } else {
            vec![]
        };

        let having = if self.eat_keyword(Keyword::Having) {
            Some(self.parse_expr()?)
        } else {
            None
        };

        let order_by = if self.eat_keyword(Keyword::Order) {
            self.expect_keyword(Keyword::By)?;
            self.parse_comma_separated(Self::parse_order_by_item)?
        } else {
            vec![]
        };

        let limit = if self.eat_keyword(Keyword::Limit) {
            Some(self.parse_limit()?)
        } else {
            None
        };

        Ok(SelectStatement {
            quantifier,
            columns,
            from,
            where_clause,
            group_by,
            having,
            order_by,
            limit,
        })
    }

    fn parse_select_column(&mut self) -> Result<SelectColumn> {
        let expr = if self.check(TokenKind::Star) {
            let start = self.start();
            self.advance();
            Expr::new(ExprKind::Wildcard { table: None }, self.span_from(start))
        } else {
            self.parse_expr()?
        };
        let alias = self.parse_optional_alias()?;
        Ok(SelectColumn { expr, alias })
    }

    /// Parses `[AS] alias`. A bare alias must be identifier-like, so clause
    /// keywords are never mistaken for one.
    fn parse_optional_alias(&mut self) -> Result<Option<String>> {
        if self.eat_keyword(Keyword::As) {
            if self.check(TokenKind::String) {
                return self.parse_string().map(Some);
            }
            Ok(Some(self.expect_identifier()?))
        } else if self.check_identifier() {
            Ok(Some(self.expect_identifier()?))
        } else {
            Ok(None)
        }
    }

    fn parse_table_ref(&mut self) -> Result<TableRef> {
        let mut table_ref = self.parse_table_factor()?;

        while let Some(join_type) = self.parse_join_type()? {
            let table = self.parse_table_factor()?;
            let constraint = if join_type == JoinType::Cross {
                None
            } else if self.eat_keyword(Keyword::On) {
                Some(JoinConstraint::On(self.parse_expr()?))
            } else if self.eat_keyword(Keyword::Using) {
                Some(JoinConstraint::Using(
                    self.parse_paren_identifier_list(false)?,
                ))
            } else {
                return Err(self.error_expected(&[
                    TokenKind::Keyword(Keyword::On),
                    TokenKind::Keyword(Keyword::Using),
                ]));
            };

            table_ref = TableRef::Join {
                left: Box::new(table_ref),
                join: Box::new(JoinClause {
                    join_type,
                    table,
                    constraint,
                }),
            };
        }

        Ok(table_ref)
    }

    /// A table name or a derived table, without joins.
    fn parse_table_factor(&mut self) -> Result<TableRef> {
        if self.check(TokenKind::LeftParen) && self.peek_keyword(1, Keyword::Select) {
            let query = self.parse_parenthesized(Self::parse_subquery)?;
            let alias = match self.parse_optional_alias()? {
                Some(alias) => alias,
                None => return Err(self.error_unexpected("derived table alias")),
            };
            return Ok(TableRef::Subquery {
                query: Box::new(query),
                alias,
            });
        }

        let name = self.parse_table_name()?;
        let alias = self.parse_optional_alias()?;
        Ok(TableRef::Table { name, alias })
    }

    /// Consumes a join operator, if one follows.
    fn parse_join_type(&mut self) -> Result<Option<JoinType>> {
        let join_type = match self.peek(0) {
            TokenKind::Keyword(Keyword::Join) => JoinType::Inner,
            TokenKind::Keyword(Keyword::Inner) => {
                self.advance();
                JoinType::Inner
            }
            TokenKind::Keyword(Keyword::Cross) => {
                self.advance();
                JoinType::Cross
            }
            TokenKind::Keyword(kw @ (Keyword::Left | Keyword::Right)) => {
                self.advance();
                self.eat_keyword(Keyword::Outer);
                if kw == Keyword::Left {
                    JoinType::Left
                } else {
                    JoinType::Right
                }
            }
            _ => return Ok(None),
        };
        self.expect_keyword(Keyword::Join)?;
        Ok(Some(join_type))
    }

    fn parse_order_by_item(&mut self) -> Result<OrderBy> {
        let expr = self.parse_expr()?;
        let direction = self.parse_order_direction();
        Ok(OrderBy { expr, direction })
    }

    /// Consumes `ASC` or `DESC`, if present.
    pub(super) fn parse_order_direction(&mut self) -> Option<OrderDirection> {
        if self.eat_keyword(Keyword::Asc) {
            Some(OrderDirection::Asc)
        } else if self.eat_keyword(Keyword::Desc) {
            Some(OrderDirection::Desc)
        } else {
            None
        }
    }

    /// `LIMIT count [OFFSET offset]` or `LIMIT offset, count`.
    fn parse_limit(&mut self) -> Result<Limit> {
        let first = self.parse_simple_expr()?;
        if self.eat(TokenKind::Comma) {
            let count = self.parse_simple_expr()?;
            return Ok(Limit {
                count,
                offset: Some(first),
            });
        }
        let offset = if self.eat_keyword(Keyword::Offset) {
            Some(self.parse_simple_expr()?)
        } else {
            None
        };
        Ok(Limit {
            count: first,
            offset,
        })
    }
}
