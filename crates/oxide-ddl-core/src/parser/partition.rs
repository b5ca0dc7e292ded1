//! `PARTITION BY` clauses and partition definitions.

use super::error::Result;
use super::Parser;
use crate::ast::{
    PartitionDefinition, PartitionMethod, PartitionOptions, PartitionTarget, PartitionValue,
    PartitionValues, SubpartitionBy, SubpartitionDefinition,
};
use crate::lexer::{Keyword, TokenKind};

impl Parser<'_> {
    /// `PARTITION BY method [PARTITIONS n] [SUBPARTITION BY ...] [(definitions)]`
    pub(super) fn parse_partition_by(&mut self) -> Result<PartitionOptions> {
        let start = self.start();
        self.expect_keyword(Keyword::Partition)?;
        self.expect_keyword(Keyword::By)?;

        let method = self.parse_partition_method(false)?;
        let partitions = if self.eat_keyword(Keyword::Partitions) {
            Some(self.parse_u64()?)
        } else {
            None
        };

        let subpartition = if self.check_keyword(Keyword::Subpartition) {
            self.advance();
            self.expect_keyword(Keyword::By)?;
            let method = self.parse_partition_method(true)?;
            let count = if self.eat_keyword(Keyword::Subpartitions) {
                Some(self.parse_u64()?)
            } else {
                None
            };
            Some(SubpartitionBy { method, count })
        } else {
            None
        };

        let definitions = if self.check(TokenKind::LeftParen) {
            self.parse_partition_definitions()?
        } else {
            vec![]
        };

        Ok(PartitionOptions {
            method,
            partitions,
            subpartition,
            definitions,
            span: self.span_from(start),
        })
    }

    /// A partitioning method. Subpartitions only allow `HASH` and `KEY`.
    fn parse_partition_method(&mut self, subpartition: bool) -> Result<PartitionMethod> {
        let linear = self.eat_keyword(Keyword::Linear);
        match self.peek(0) {
            TokenKind::Keyword(Keyword::Hash) => {
                self.advance();
                let expr = self.parse_parenthesized(Self::parse_expr)?;
                Ok(PartitionMethod::Hash { linear, expr })
            }
            TokenKind::Keyword(Keyword::Key) => {
                self.advance();
                let algorithm = if self.eat_keyword(Keyword::Algorithm) {
                    self.expect(TokenKind::Eq)?;
                    Some(self.parse_u32()?)
                } else {
                    None
                };
                let columns = self.parse_paren_identifier_list(true)?;
                Ok(PartitionMethod::Key {
                    linear,
                    algorithm,
                    columns,
                })
            }
            TokenKind::Keyword(kw @ (Keyword::Range | Keyword::List))
                if !linear && !subpartition =>
            {
                self.advance();
                let target = if self.eat_keyword(Keyword::Columns) {
                    PartitionTarget::Columns(self.parse_paren_identifier_list(false)?)
                } else {
                    PartitionTarget::Expr(self.parse_parenthesized(Self::parse_expr)?)
                };
                Ok(if kw == Keyword::Range {
                    PartitionMethod::Range(target)
                } else {
                    PartitionMethod::List(target)
                })
            }
            _ => {
                let mut expected = vec![
                    TokenKind::Keyword(Keyword::Hash),
                    TokenKind::Keyword(Keyword::Key),
                ];
                if !linear && !subpartition {
                    expected.push(TokenKind::Keyword(Keyword::Range));
                    expected.push(TokenKind::Keyword(Keyword::List));
                }
                Err(self.error_expected(&expected))
            }
        }
    }

    /// `(PARTITION ..., PARTITION ...)`
    pub(super) fn parse_partition_definitions(&mut self) -> Result<Vec<PartitionDefinition>> {
        self.parse_parenthesized(|p| p.parse_comma_separated(Self::parse_partition_definition))
    }

    fn parse_partition_definition(&mut self) -> Result<PartitionDefinition> {
        let start = self.start();
        self.expect_keyword(Keyword::Partition)?;
        let name = self.expect_identifier()?;

        let values = if self.eat_keyword(Keyword::Values) {
            Some(self.parse_partition_values()?)
        } else {
            None
        };
        let options = self.parse_partition_options()?;

        let subpartitions = if self.check(TokenKind::LeftParen) {
            self.parse_parenthesized(|p| {
                p.parse_comma_separated(Self::parse_subpartition_definition)
            })?
        } else {
            vec![]
        };

        Ok(PartitionDefinition {
            name,
            values,
            options,
            subpartitions,
            span: self.span_from(start),
        })
    }

    /// The part after `VALUES`: `LESS THAN (...)`, `LESS THAN MAXVALUE`, or `IN (...)`.
    fn parse_partition_values(&mut self) -> Result<PartitionValues> {
        if self.eat_keyword(Keyword::In) {
            let items =
                self.parse_parenthesized(|p| p.parse_comma_separated(Self::parse_expr))?;
            return Ok(PartitionValues::In(items));
        }

        self.expect_keyword(Keyword::Less)?;
        self.expect_keyword(Keyword::Than)?;
        if self.eat_keyword(Keyword::Maxvalue) {
            return Ok(PartitionValues::LessThan(vec![PartitionValue::MaxValue]));
        }
        let bounds = self.parse_parenthesized(|p| {
            p.parse_comma_separated(|p| {
                if p.eat_keyword(Keyword::Maxvalue) {
                    Ok(PartitionValue::MaxValue)
                } else {
                    p.parse_expr().map(PartitionValue::Expr)
                }
            })
        })?;
        Ok(PartitionValues::LessThan(bounds))
    }

    fn parse_subpartition_definition(&mut self) -> Result<SubpartitionDefinition> {
        let start = self.start();
        self.expect_keyword(Keyword::Subpartition)?;
        let name = self.expect_identifier()?;
        let options = self.parse_partition_options()?;
        Ok(SubpartitionDefinition {
            name,
            options,
            span: self.span_from(start),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Expr, TableOptionKind};
    use crate::lexer::{Lexer, Token};

    fn tokens(sql: &str) -> Vec<Token> {
        Lexer::new(sql).tokenize()
    }

    fn parse(sql: &str) -> PartitionOptions {
        let tokens = tokens(sql);
        let mut parser = Parser::new(&tokens);
        let options = parser.parse_partition_by().unwrap();
        assert!(parser.is_at_end(), "trailing tokens in {sql}");
        options
    }

    #[test]
    fn test_hash_partitions() {
        let options = parse("PARTITION BY LINEAR HASH (id) PARTITIONS 4");
        assert!(matches!(
            options.method,
            PartitionMethod::Hash { linear: true, .. }
        ));
        assert_eq!(options.partitions, Some(4));
        assert!(options.definitions.is_empty());
    }

    #[test]
    fn test_key_with_algorithm_and_empty_columns() {
        let options = parse("PARTITION BY KEY ALGORITHM = 2 ()");
        assert_eq!(
            options.method,
            PartitionMethod::Key {
                linear: false,
                algorithm: Some(2),
                columns: vec![],
            }
        );
    }

    #[test]
    fn test_range_definitions() {
        let options = parse(
            "PARTITION BY RANGE (YEAR(created)) (
                PARTITION p0 VALUES LESS THAN (2020) ENGINE = InnoDB,
                PARTITION p1 VALUES LESS THAN MAXVALUE COMMENT 'rest'
            )",
        );
        assert!(matches!(
            options.method,
            PartitionMethod::Range(PartitionTarget::Expr(_))
        ));
        assert_eq!(options.definitions.len(), 2);
        assert_eq!(
            options.definitions[0].values,
            Some(PartitionValues::LessThan(vec![PartitionValue::Expr(
                Expr::integer(2020)
            )]))
        );
        assert_eq!(options.definitions[0].options[0].kind, TableOptionKind::Engine);
        assert_eq!(
            options.definitions[1].values,
            Some(PartitionValues::LessThan(vec![PartitionValue::MaxValue]))
        );
    }

    #[test]
    fn test_list_columns() {
        let options = parse(
            "PARTITION BY LIST COLUMNS (region) (PARTITION east VALUES IN ('NY', 'MA'))",
        );
        assert_eq!(
            options.method,
            PartitionMethod::List(PartitionTarget::Columns(vec![String::from("region")]))
        );
        assert!(matches!(
            options.definitions[0].values,
            Some(PartitionValues::In(ref items)) if items.len() == 2
        ));
    }

    #[test]
    fn test_subpartitions() {
        let options = parse(
            "PARTITION BY RANGE COLUMNS (a, b) SUBPARTITION BY HASH (a) SUBPARTITIONS 2 (
                PARTITION p0 VALUES LESS THAN (10, MAXVALUE) (SUBPARTITION s0, SUBPARTITION s1 DATA DIRECTORY = '/x')
            )",
        );
        let subpartition = options.subpartition.unwrap();
        assert_eq!(subpartition.count, Some(2));
        let definition = &options.definitions[0];
        assert_eq!(definition.subpartitions.len(), 2);
        assert_eq!(definition.subpartitions[1].options.len(), 1);
    }

    #[test]
    fn test_subpartition_by_range_is_rejected() {
        let tokens = tokens("PARTITION BY HASH (a) SUBPARTITION BY RANGE (a)");
        let mut parser = Parser::new(&tokens);
        let err = parser.parse_partition_by().unwrap_err();
        assert_eq!(err.found, TokenKind::Keyword(Keyword::Range));
        assert_eq!(err.expected.len(), 2);
    }
}
