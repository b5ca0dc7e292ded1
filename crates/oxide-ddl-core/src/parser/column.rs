//! Column definitions: name, data type, then either a generation clause or
//! column options in any order.

use super::error::{ParseError, Result};
use super::Parser;
use crate::ast::{
    CheckConstraint, ColumnDefinition, ColumnFormat, ColumnOptions, ColumnPosition, DataType,
    Expr, GeneratedColumn, GeneratedStorage, Nullability, StorageMedium,
};
use crate::lexer::{Keyword, TokenKind};

impl Parser<'_> {
    /// Parses `name data_type [options | generation clause]`.
    pub(super) fn parse_column_definition(&mut self) -> Result<ColumnDefinition> {
        let start = self.start();
        let name = self.expect_identifier()?;
        let data_type = self.parse_data_type()?;

        let (options, generated) =
            if self.check_keyword(Keyword::Generated) || self.check_keyword(Keyword::As) {
                let (generated, options) = self.parse_generated_column()?;
                (options, Some(generated))
            } else {
                (self.parse_column_options(&data_type)?, None)
            };

        Ok(ColumnDefinition {
            name,
            data_type,
            options,
            generated,
            span: self.span_from(start),
        })
    }

    /// `[GENERATED ALWAYS] AS (expr) [VIRTUAL|STORED] [NOT NULL|NULL]
    /// [UNIQUE [KEY]] [[PRIMARY] KEY] [COMMENT 'text']`, in that order.
    fn parse_generated_column(&mut self) -> Result<(GeneratedColumn, ColumnOptions)> {
        if self.eat_keyword(Keyword::Generated) {
            self.expect_keyword(Keyword::Always)?;
        }
        self.expect_keyword(Keyword::As)?;
        let expr = self.parse_parenthesized(Self::parse_expr)?;

        let storage = if self.eat_keyword(Keyword::Virtual) {
            Some(GeneratedStorage::Virtual)
        } else if self.eat_keyword(Keyword::Stored) {
            Some(GeneratedStorage::Stored)
        } else {
            None
        };

        let mut options = ColumnOptions::default();
        if self.check_keyword(Keyword::Not) {
            self.advance();
            self.expect_keyword(Keyword::Null)?;
            options.nullability = Some(Nullability::NotNull);
        } else if self.eat_keyword(Keyword::Null) {
            options.nullability = Some(Nullability::Null);
        }
        if self.eat_keyword(Keyword::Unique) {
            self.eat_keyword(Keyword::Key);
            options.unique = true;
        }
        if self.eat_keyword(Keyword::Primary) {
            self.expect_keyword(Keyword::Key)?;
            options.primary_key = true;
        } else if self.eat_keyword(Keyword::Key) {
            options.primary_key = true;
        }
        if self.eat_keyword(Keyword::Comment) {
            options.comment = Some(self.parse_string()?);
        }

        Ok((GeneratedColumn { expr, storage }, options))
    }

    /// Column options in any order. A repeated option replaces the earlier one.
    fn parse_column_options(&mut self, data_type: &DataType) -> Result<ColumnOptions> {
        let mut options = ColumnOptions::default();

        loop {
            match self.peek(0) {
                TokenKind::Keyword(Keyword::Not) => {
                    self.advance();
                    self.expect_keyword(Keyword::Null)?;
                    options.nullability = Some(Nullability::NotNull);
                }
                TokenKind::Keyword(Keyword::Null) => {
                    self.advance();
                    options.nullability = Some(Nullability::Null);
                }
                TokenKind::Keyword(Keyword::Default) => {
                    self.advance();
                    options.default = Some(self.parse_default_value()?);
                }
                TokenKind::Keyword(Keyword::On) if self.peek_keyword(1, Keyword::Update) => {
                    self.require_support(data_type, data_type.supports_on_update())?;
                    self.advance();
                    self.advance();
                    options.on_update = Some(self.parse_current_time()?);
                }
                TokenKind::Keyword(Keyword::AutoIncrement) => {
                    self.require_support(data_type, data_type.supports_auto_increment())?;
                    self.advance();
                    options.auto_increment = true;
                }
                TokenKind::Keyword(Keyword::Unique) => {
                    self.advance();
                    self.eat_keyword(Keyword::Key);
                    options.unique = true;
                }
                TokenKind::Keyword(Keyword::Primary) => {
                    self.advance();
                    self.expect_keyword(Keyword::Key)?;
                    options.primary_key = true;
                }
                TokenKind::Keyword(Keyword::Key) => {
                    self.advance();
                    options.primary_key = true;
                }
                TokenKind::Keyword(Keyword::Comment) => {
                    self.advance();
                    options.comment = Some(self.parse_string()?);
                }
                TokenKind::Keyword(Keyword::ColumnFormat) => {
                    self.advance();
                    options.column_format = Some(
                        match self.expect_one_of(&[
                            Keyword::Fixed,
                            Keyword::Dynamic,
                            Keyword::Default,
                        ])? {
                            Keyword::Fixed => ColumnFormat::Fixed,
                            Keyword::Dynamic => ColumnFormat::Dynamic,
                            _ => ColumnFormat::Default,
                        },
                    );
                }
                TokenKind::Keyword(Keyword::Storage) => {
                    self.advance();
                    options.storage = Some(self.parse_storage_medium()?);
                }
                TokenKind::Keyword(Keyword::Collate) => {
                    self.require_support(data_type, data_type.supports_collation())?;
                    self.advance();
                    options.collation = Some(self.parse_collation_name()?);
                }
                TokenKind::Keyword(Keyword::Constraint | Keyword::Check) => {
                    options.check = Some(self.parse_column_check()?);
                }
                TokenKind::Keyword(Keyword::References) => {
                    options.references = Some(self.parse_reference_definition()?);
                }
                _ => return Ok(options),
            }
        }
    }

    fn require_support(&self, data_type: &DataType, supported: bool) -> Result<()> {
        if supported {
            Ok(())
        } else {
            Err(ParseError::unexpected(
                format!(
                    "column option supported by {}",
                    data_type.family().as_str()
                ),
                self.current(),
            ))
        }
    }

    /// The value after `DEFAULT`: a parenthesised expression, a signed
    /// number, a current-time function, or a literal.
    pub(super) fn parse_default_value(&mut self) -> Result<Expr> {
        match self.peek(0) {
            TokenKind::LeftParen => self.parse_parenthesized(Self::parse_expr),
            TokenKind::Plus | TokenKind::Minus => self.parse_signed_number(),
            TokenKind::Keyword(kw) if Self::is_current_time_keyword(kw) => {
                self.parse_current_time()
            }
            _ => self.parse_literal(),
        }
    }

    /// `DISK`, `MEMORY` or `DEFAULT`.
    pub(super) fn parse_storage_medium(&mut self) -> Result<StorageMedium> {
        Ok(
            match self.expect_one_of(&[Keyword::Disk, Keyword::Memory, Keyword::Default])? {
                Keyword::Disk => StorageMedium::Disk,
                Keyword::Memory => StorageMedium::Memory,
                _ => StorageMedium::Default,
            },
        )
    }

    /// `[CONSTRAINT [symbol]] CHECK (expr)` attached to a column.
    fn parse_column_check(&mut self) -> Result<CheckConstraint> {
        let name = if self.eat_keyword(Keyword::Constraint) && self.check_identifier() {
            Some(self.expect_identifier()?)
        } else {
            None
        };
        self.expect_keyword(Keyword::Check)?;
        let expr = self.parse_parenthesized(Self::parse_expr)?;
        Ok(CheckConstraint { name, expr })
    }

    /// `FIRST` or `AFTER column`, if present.
    pub(super) fn parse_column_position(&mut self) -> Result<Option<ColumnPosition>> {
        if self.eat_keyword(Keyword::First) {
            Ok(Some(ColumnPosition::First))
        } else if self.eat_keyword(Keyword::After) {
            Ok(Some(ColumnPosition::After(self.expect_identifier()?)))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{ExprKind, IntegerKind, Literal, ReferenceAction, UnaryOp};
    use crate::lexer::{Lexer, Token};
    use crate::parser::ParseErrorKind;

    fn tokens(sql: &str) -> Vec<Token> {
        Lexer::new(sql).tokenize()
    }

    fn parse(sql: &str) -> ColumnDefinition {
        let tokens = tokens(sql);
        let mut parser = Parser::new(&tokens);
        let column = parser.parse_column_definition().unwrap();
        assert!(parser.is_at_end(), "trailing tokens in {sql}");
        column
    }

    fn parse_err(sql: &str) -> Box<ParseError> {
        let tokens = tokens(sql);
        let mut parser = Parser::new(&tokens);
        parser.parse_column_definition().unwrap_err()
    }

    #[test]
    fn test_options_in_any_order() {
        let column = parse("id INT UNSIGNED AUTO_INCREMENT NOT NULL COMMENT 'pk' PRIMARY KEY");
        assert_eq!(column.name, "id");
        assert!(matches!(
            column.data_type,
            DataType::Integer {
                kind: IntegerKind::Int,
                unsigned: true,
                ..
            }
        ));
        assert!(column.options.auto_increment);
        assert!(column.options.is_not_null());
        assert!(column.options.primary_key);
        assert_eq!(column.options.comment.as_deref(), Some("pk"));
    }

    #[test]
    fn test_later_option_wins() {
        let column = parse("a INT NULL NOT NULL DEFAULT 1 DEFAULT 2");
        assert!(column.options.is_not_null());
        assert_eq!(column.options.default, Some(Expr::integer(2)));
    }

    #[test]
    fn test_default_values() {
        let negative = parse("a INT DEFAULT -1");
        assert_eq!(
            negative.options.default,
            Some(Expr::unary(UnaryOp::Neg, Expr::integer(1)))
        );

        let null = parse("a VARCHAR(20) DEFAULT NULL");
        assert_eq!(null.options.default, Some(Expr::literal(Literal::Null)));

        let expr = parse("a INT DEFAULT (1 + 2)");
        assert!(matches!(
            expr.options.default.map(|e| e.kind),
            Some(ExprKind::Binary { .. })
        ));
    }

    #[test]
    fn test_timestamp_defaults() {
        let column = parse(
            "updated_at TIMESTAMP(3) NOT NULL DEFAULT CURRENT_TIMESTAMP(3) ON UPDATE CURRENT_TIMESTAMP(3)",
        );
        assert!(matches!(
            column.options.default.map(|e| e.kind),
            Some(ExprKind::Function(_))
        ));
        assert!(column.options.on_update.is_some());
    }

    #[test]
    fn test_on_update_rejected_for_int() {
        let err = parse_err("a INT ON UPDATE CURRENT_TIMESTAMP");
        assert_eq!(err.kind, ParseErrorKind::UnexpectedToken);
        assert_eq!(err.expected_desc, "column option supported by integer");
    }

    #[test]
    fn test_auto_increment_rejected_for_varchar() {
        let err = parse_err("a VARCHAR(10) AUTO_INCREMENT");
        assert_eq!(err.kind, ParseErrorKind::UnexpectedToken);
        assert_eq!(err.found, TokenKind::Keyword(Keyword::AutoIncrement));
    }

    #[test]
    fn test_collate_option() {
        let column = parse("name TEXT NOT NULL COLLATE utf8mb4_bin");
        assert_eq!(column.options.collation.as_deref(), Some("utf8mb4_bin"));
        assert!(parse_err("a INT COLLATE utf8mb4_bin").expected_desc.contains("integer"));
    }

    #[test]
    fn test_generated_column() {
        let column = parse("total INT GENERATED ALWAYS AS (a + b) STORED NOT NULL UNIQUE KEY COMMENT 'sum'");
        let generated = column.generated.unwrap();
        assert_eq!(generated.storage, Some(GeneratedStorage::Stored));
        assert!(column.options.is_not_null());
        assert!(column.options.unique);
        assert_eq!(column.options.comment.as_deref(), Some("sum"));

        let short = parse("b INT AS (a * 2)");
        assert_eq!(short.generated.unwrap().storage, None);
    }

    #[test]
    fn test_inline_check_and_reference() {
        let column = parse(
            "owner_id INT CONSTRAINT positive CHECK (owner_id > 0) REFERENCES users (id) ON DELETE CASCADE",
        );
        assert_eq!(column.options.check.unwrap().name.as_deref(), Some("positive"));
        let reference = column.options.references.unwrap();
        assert_eq!(reference.on_delete, Some(ReferenceAction::Cascade));
    }

    #[test]
    fn test_storage_and_format() {
        let column = parse("a INT COLUMN_FORMAT DYNAMIC STORAGE MEMORY");
        assert_eq!(column.options.column_format, Some(ColumnFormat::Dynamic));
        assert_eq!(column.options.storage, Some(StorageMedium::Memory));
    }

    #[test]
    fn test_non_reserved_keyword_column_name() {
        assert_eq!(parse("status INT").name, "status");
        assert_eq!(parse("`order` INT").name, "order");
    }
}
