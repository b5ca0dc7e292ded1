//! The ALTER TABLE specification resolver.
//!
//! Many specifications share a leading keyword (`ADD` starts column, index,
//! constraint and partition clauses; `DROP` starts six different ones). The
//! resolver walks a priority-ordered table of alternatives and commits to
//! the first whose lookahead predicate matches. Only `ADD [COLUMN] (`
//! backtracks, between a column list and a single definition.

use tracing::trace;

use super::error::{ParseError, Result};
use super::Parser;
use crate::ast::{
    AlterSpecification, ColumnOrder, PartitionMaintenance, PartitionOperation, PartitionTargets,
};
use crate::lexer::{Keyword, TokenKind};

/// One ALTER TABLE clause shape.
struct Alternative {
    name: &'static str,
    applies: fn(&Parser<'_>) -> bool,
    parse: fn(&mut Parser<'_>) -> Result<AlterSpecification>,
}

/// Keywords that can start a specification, for error reporting.
const LEADING_KEYWORDS: &[Keyword] = &[
    Keyword::Add,
    Keyword::Algorithm,
    Keyword::Alter,
    Keyword::Change,
    Keyword::Modify,
    Keyword::Lock,
    Keyword::Drop,
    Keyword::Disable,
    Keyword::Enable,
    Keyword::Rename,
    Keyword::Order,
    Keyword::Convert,
    Keyword::Discard,
    Keyword::Import,
    Keyword::Truncate,
    Keyword::Analyze,
    Keyword::Check,
    Keyword::Optimize,
    Keyword::Rebuild,
    Keyword::Repair,
    Keyword::Coalesce,
    Keyword::Reorganize,
    Keyword::Exchange,
    Keyword::Remove,
    Keyword::Upgrade,
    Keyword::Force,
    Keyword::With,
    Keyword::Without,
    Keyword::Partition,
];

const MAINTENANCE_KEYWORDS: &[Keyword] = &[
    Keyword::Truncate,
    Keyword::Analyze,
    Keyword::Check,
    Keyword::Optimize,
    Keyword::Rebuild,
    Keyword::Repair,
];

fn keyword_then(p: &Parser<'_>, first: Keyword, second: Keyword) -> bool {
    p.check_keyword(first) && p.peek_keyword(1, second)
}

fn second_is_any(p: &Parser<'_>, first: Keyword, second: &[Keyword]) -> bool {
    p.check_keyword(first) && second.iter().any(|kw| p.peek_keyword(1, *kw))
}

static ALTERNATIVES: &[Alternative] = &[
    Alternative {
        name: "ADD PARTITION",
        applies: |p| keyword_then(p, Keyword::Add, Keyword::Partition),
        parse: |p| {
            p.advance();
            p.advance();
            let definitions = p.parse_partition_definitions()?;
            Ok(AlterSpecification::Partition(PartitionOperation::Add(
                definitions,
            )))
        },
    },
    Alternative {
        name: "ADD COLUMN",
        applies: |p| {
            p.check_keyword(Keyword::Add)
                && (p.peek_keyword(1, Keyword::Column)
                    || p.peek(1) == TokenKind::LeftParen
                    || p.peek(1).is_identifier_like())
        },
        parse: |p| p.parse_add_column(),
    },
    Alternative {
        name: "ADD INDEX",
        applies: |p| second_is_any(p, Keyword::Add, &[Keyword::Index, Keyword::Key]),
        parse: |p| {
            p.advance();
            p.parse_index_definition().map(AlterSpecification::AddIndex)
        },
    },
    Alternative {
        name: "ADD FULLTEXT|SPATIAL",
        applies: |p| second_is_any(p, Keyword::Add, &[Keyword::Fulltext, Keyword::Spatial]),
        parse: |p| {
            p.advance();
            p.parse_index_definition().map(AlterSpecification::AddIndex)
        },
    },
    Alternative {
        name: "ADD CONSTRAINT",
        applies: |p| {
            second_is_any(
                p,
                Keyword::Add,
                &[
                    Keyword::Constraint,
                    Keyword::Primary,
                    Keyword::Unique,
                    Keyword::Foreign,
                    Keyword::Check,
                ],
            )
        },
        parse: |p| {
            p.advance();
            p.parse_constraint_definition()
                .map(AlterSpecification::AddConstraint)
        },
    },
    Alternative {
        name: "ALGORITHM",
        applies: |p| p.check_keyword(Keyword::Algorithm),
        parse: |p| p.parse_algorithm_option().map(AlterSpecification::Algorithm),
    },
    Alternative {
        name: "ALTER COLUMN",
        applies: |p| p.check_keyword(Keyword::Alter),
        parse: |p| p.parse_alter_column(),
    },
    Alternative {
        name: "CHANGE COLUMN",
        applies: |p| p.check_keyword(Keyword::Change),
        parse: |p| {
            p.advance();
            p.eat_keyword(Keyword::Column);
            let old_name = p.expect_identifier()?;
            let column = p.parse_column_definition()?;
            let position = p.parse_column_position()?;
            Ok(AlterSpecification::ChangeColumn {
                old_name,
                column,
                position,
            })
        },
    },
    Alternative {
        name: "MODIFY COLUMN",
        applies: |p| p.check_keyword(Keyword::Modify),
        parse: |p| {
            p.advance();
            p.eat_keyword(Keyword::Column);
            let column = p.parse_column_definition()?;
            let position = p.parse_column_position()?;
            Ok(AlterSpecification::ModifyColumn { column, position })
        },
    },
    Alternative {
        name: "LOCK",
        applies: |p| p.check_keyword(Keyword::Lock),
        parse: |p| p.parse_lock_option().map(AlterSpecification::Lock),
    },
    Alternative {
        name: "DROP PARTITION",
        applies: |p| keyword_then(p, Keyword::Drop, Keyword::Partition),
        parse: |p| {
            p.advance();
            p.advance();
            let names = p.parse_identifier_list()?;
            Ok(AlterSpecification::Partition(PartitionOperation::Drop(names)))
        },
    },
    Alternative {
        name: "DROP PRIMARY KEY",
        applies: |p| keyword_then(p, Keyword::Drop, Keyword::Primary),
        parse: |p| {
            p.advance();
            p.advance();
            p.expect_keyword(Keyword::Key)?;
            Ok(AlterSpecification::DropPrimaryKey)
        },
    },
    Alternative {
        name: "DROP FOREIGN KEY",
        applies: |p| keyword_then(p, Keyword::Drop, Keyword::Foreign),
        parse: |p| {
            p.advance();
            p.advance();
            p.expect_keyword(Keyword::Key)?;
            p.expect_identifier().map(AlterSpecification::DropForeignKey)
        },
    },
    Alternative {
        name: "DROP INDEX",
        applies: |p| second_is_any(p, Keyword::Drop, &[Keyword::Index, Keyword::Key]),
        parse: |p| {
            p.advance();
            p.advance();
            p.expect_identifier().map(AlterSpecification::DropIndex)
        },
    },
    Alternative {
        name: "DROP COLUMN",
        applies: |p| {
            p.check_keyword(Keyword::Drop)
                && (p.peek_keyword(1, Keyword::Column) || p.peek(1).is_identifier_like())
        },
        parse: |p| {
            p.advance();
            p.eat_keyword(Keyword::Column);
            p.expect_identifier().map(AlterSpecification::DropColumn)
        },
    },
    Alternative {
        name: "DISABLE KEYS",
        applies: |p| p.check_keyword(Keyword::Disable),
        parse: |p| {
            p.advance();
            p.expect_keyword(Keyword::Keys)?;
            Ok(AlterSpecification::DisableKeys)
        },
    },
    Alternative {
        name: "ENABLE KEYS",
        applies: |p| p.check_keyword(Keyword::Enable),
        parse: |p| {
            p.advance();
            p.expect_keyword(Keyword::Keys)?;
            Ok(AlterSpecification::EnableKeys)
        },
    },
    Alternative {
        name: "RENAME INDEX",
        applies: |p| second_is_any(p, Keyword::Rename, &[Keyword::Index, Keyword::Key]),
        parse: |p| {
            p.advance();
            p.advance();
            let (from, to) = p.parse_rename_pair()?;
            Ok(AlterSpecification::RenameIndex { from, to })
        },
    },
    Alternative {
        name: "RENAME COLUMN",
        applies: |p| keyword_then(p, Keyword::Rename, Keyword::Column),
        parse: |p| {
            p.advance();
            p.advance();
            let (from, to) = p.parse_rename_pair()?;
            Ok(AlterSpecification::RenameColumn { from, to })
        },
    },
    Alternative {
        name: "RENAME TABLE",
        applies: |p| p.check_keyword(Keyword::Rename),
        parse: |p| {
            p.advance();
            if !p.eat_keyword(Keyword::To) {
                p.eat_keyword(Keyword::As);
            }
            p.parse_table_name().map(AlterSpecification::RenameTable)
        },
    },
    Alternative {
        name: "ORDER BY",
        applies: |p| p.check_keyword(Keyword::Order),
        parse: |p| {
            p.advance();
            p.expect_keyword(Keyword::By)?;
            let columns = p.parse_comma_separated(|p| {
                let column = p.expect_identifier()?;
                let direction = p.parse_order_direction();
                Ok(ColumnOrder { column, direction })
            })?;
            Ok(AlterSpecification::OrderBy(columns))
        },
    },
    Alternative {
        name: "CONVERT TO CHARACTER SET",
        applies: |p| p.check_keyword(Keyword::Convert),
        parse: |p| {
            p.advance();
            p.expect_keyword(Keyword::To)?;
            let Some(charset) = p.parse_charset_clause()? else {
                return Err(p.error_expected(&[
                    TokenKind::Keyword(Keyword::Character),
                    TokenKind::Keyword(Keyword::Charset),
                ]));
            };
            let collation = if p.eat_keyword(Keyword::Collate) {
                Some(p.parse_collation_name()?)
            } else {
                None
            };
            Ok(AlterSpecification::ConvertToCharset { charset, collation })
        },
    },
    Alternative {
        name: "DISCARD TABLESPACE",
        applies: |p| keyword_then(p, Keyword::Discard, Keyword::Tablespace),
        parse: |p| {
            p.advance();
            p.advance();
            Ok(AlterSpecification::DiscardTablespace)
        },
    },
    Alternative {
        name: "IMPORT TABLESPACE",
        applies: |p| keyword_then(p, Keyword::Import, Keyword::Tablespace),
        parse: |p| {
            p.advance();
            p.advance();
            Ok(AlterSpecification::ImportTablespace)
        },
    },
    Alternative {
        name: "DISCARD|IMPORT PARTITION",
        applies: |p| {
            keyword_then(p, Keyword::Discard, Keyword::Partition)
                || keyword_then(p, Keyword::Import, Keyword::Partition)
        },
        parse: |p| {
            let kind = if p.check_keyword(Keyword::Discard) {
                PartitionMaintenance::DiscardTablespace
            } else {
                PartitionMaintenance::ImportTablespace
            };
            p.advance();
            p.advance();
            let targets = p.parse_partition_targets()?;
            p.expect_keyword(Keyword::Tablespace)?;
            Ok(AlterSpecification::Partition(PartitionOperation::Maintain {
                kind,
                targets,
            }))
        },
    },
    Alternative {
        name: "PARTITION MAINTENANCE",
        applies: |p| {
            p.peek_keyword(1, Keyword::Partition)
                && MAINTENANCE_KEYWORDS.iter().any(|kw| p.check_keyword(*kw))
        },
        parse: |p| {
            let kind = match p.current().as_keyword() {
                Some(Keyword::Truncate) => PartitionMaintenance::Truncate,
                Some(Keyword::Analyze) => PartitionMaintenance::Analyze,
                Some(Keyword::Check) => PartitionMaintenance::Check,
                Some(Keyword::Optimize) => PartitionMaintenance::Optimize,
                Some(Keyword::Rebuild) => PartitionMaintenance::Rebuild,
                _ => PartitionMaintenance::Repair,
            };
            p.advance();
            p.advance();
            let targets = p.parse_partition_targets()?;
            Ok(AlterSpecification::Partition(PartitionOperation::Maintain {
                kind,
                targets,
            }))
        },
    },
    Alternative {
        name: "COALESCE PARTITION",
        applies: |p| p.check_keyword(Keyword::Coalesce),
        parse: |p| {
            p.advance();
            p.expect_keyword(Keyword::Partition)?;
            let count = p.parse_u64()?;
            Ok(AlterSpecification::Partition(PartitionOperation::Coalesce(
                count,
            )))
        },
    },
    Alternative {
        name: "REORGANIZE PARTITION",
        applies: |p| p.check_keyword(Keyword::Reorganize),
        parse: |p| {
            p.advance();
            p.expect_keyword(Keyword::Partition)?;
            let (names, into) = if p.check_identifier() {
                let names = p.parse_identifier_list()?;
                p.expect_keyword(Keyword::Into)?;
                (names, p.parse_partition_definitions()?)
            } else {
                (vec![], vec![])
            };
            Ok(AlterSpecification::Partition(
                PartitionOperation::Reorganize { names, into },
            ))
        },
    },
    Alternative {
        name: "EXCHANGE PARTITION",
        applies: |p| p.check_keyword(Keyword::Exchange),
        parse: |p| {
            p.advance();
            p.expect_keyword(Keyword::Partition)?;
            let partition = p.expect_identifier()?;
            p.expect_keyword(Keyword::With)?;
            p.expect_keyword(Keyword::Table)?;
            let table = p.parse_table_name()?;
            let validation = p.parse_validation()?;
            Ok(AlterSpecification::Partition(PartitionOperation::Exchange {
                partition,
                table,
                validation,
            }))
        },
    },
    Alternative {
        name: "REMOVE PARTITIONING",
        applies: |p| p.check_keyword(Keyword::Remove),
        parse: |p| {
            p.advance();
            p.expect_keyword(Keyword::Partitioning)?;
            Ok(AlterSpecification::Partition(
                PartitionOperation::RemovePartitioning,
            ))
        },
    },
    Alternative {
        name: "UPGRADE PARTITIONING",
        applies: |p| p.check_keyword(Keyword::Upgrade),
        parse: |p| {
            p.advance();
            p.expect_keyword(Keyword::Partitioning)?;
            Ok(AlterSpecification::Partition(
                PartitionOperation::UpgradePartitioning,
            ))
        },
    },
    Alternative {
        name: "FORCE",
        applies: |p| p.check_keyword(Keyword::Force),
        parse: |p| {
            p.advance();
            Ok(AlterSpecification::Force)
        },
    },
    Alternative {
        name: "WITH|WITHOUT VALIDATION",
        applies: |p| {
            keyword_then(p, Keyword::With, Keyword::Validation)
                || p.check_keyword(Keyword::Without)
        },
        parse: |p| match p.parse_validation()? {
            Some(validation) => Ok(AlterSpecification::Validation(validation)),
            None => Err(p.error_expected(&[
                TokenKind::Keyword(Keyword::With),
                TokenKind::Keyword(Keyword::Without),
            ])),
        },
    },
    Alternative {
        name: "PARTITION BY",
        applies: |p| keyword_then(p, Keyword::Partition, Keyword::By),
        parse: |p| p.parse_partition_by().map(AlterSpecification::PartitionBy),
    },
    Alternative {
        name: "table options",
        applies: |p| p.check_table_option(),
        parse: |p| {
            p.parse_table_options(false)
                .map(AlterSpecification::TableOptions)
        },
    },
];

impl Parser<'_> {
    /// Resolves and parses one ALTER TABLE specification.
    pub(super) fn parse_alter_specification(&mut self) -> Result<AlterSpecification> {
        let Some(alternative) = ALTERNATIVES.iter().find(|alt| (alt.applies)(self)) else {
            return Err(self.no_alter_alternative());
        };
        trace!(
            alternative = alternative.name,
            position = self.position(),
            "resolved alter specification"
        );
        (alternative.parse)(self)
    }

    fn no_alter_alternative(&self) -> Box<ParseError> {
        match self.current().as_keyword() {
            Some(keyword) if LEADING_KEYWORDS.contains(&keyword) => ParseError::unexpected(
                format!("{} specification", keyword.as_str()),
                self.nth(1),
            ),
            _ => {
                let mut error = self.error_unexpected("ALTER TABLE specification");
                error.expected = LEADING_KEYWORDS
                    .iter()
                    .map(|kw| TokenKind::Keyword(*kw))
                    .collect();
                error
            }
        }
    }

    /// `ADD [COLUMN] (definitions)` or `ADD [COLUMN] definition [FIRST|AFTER c]`.
    ///
    /// With a parenthesis the column list is tried first; if it fails the
    /// stream is rewound and a single definition is tried.
    fn parse_add_column(&mut self) -> Result<AlterSpecification> {
        self.expect_keyword(Keyword::Add)?;
        self.eat_keyword(Keyword::Column);

        if !self.check(TokenKind::LeftParen) {
            return self.parse_single_added_column();
        }

        let snapshot = self.snapshot();
        let list_error = match self.parse_parenthesized(|p| {
            p.parse_comma_separated(Self::parse_column_definition)
        }) {
            Ok(columns) => return Ok(AlterSpecification::AddColumns(columns)),
            Err(error) => error,
        };
        self.restore(snapshot);

        self.parse_single_added_column().map_err(|single_error| {
            ParseError::exhausted(
                &["column list", "column definition"],
                vec![list_error, single_error],
            )
        })
    }

    fn parse_single_added_column(&mut self) -> Result<AlterSpecification> {
        let column = self.parse_column_definition()?;
        let position = self.parse_column_position()?;
        Ok(AlterSpecification::AddColumn { column, position })
    }

    /// `ALTER [COLUMN] c {SET DEFAULT value | DROP DEFAULT}`
    fn parse_alter_column(&mut self) -> Result<AlterSpecification> {
        self.expect_keyword(Keyword::Alter)?;
        self.eat_keyword(Keyword::Column);
        let column = self.expect_identifier()?;
        match self.expect_one_of(&[Keyword::Set, Keyword::Drop])? {
            Keyword::Set => {
                self.expect_keyword(Keyword::Default)?;
                let value = self.parse_default_value()?;
                Ok(AlterSpecification::AlterColumnSetDefault { column, value })
            }
            _ => {
                self.expect_keyword(Keyword::Default)?;
                Ok(AlterSpecification::AlterColumnDropDefault { column })
            }
        }
    }

    /// `old TO new`
    fn parse_rename_pair(&mut self) -> Result<(String, String)> {
        let from = self.expect_identifier()?;
        self.expect_keyword(Keyword::To)?;
        let to = self.expect_identifier()?;
        Ok((from, to))
    }

    /// `ALL` or a list of partition names.
    fn parse_partition_targets(&mut self) -> Result<PartitionTargets> {
        if self.eat_keyword(Keyword::All) {
            Ok(PartitionTargets::All)
        } else {
            self.parse_identifier_list().map(PartitionTargets::Names)
        }
    }

    /// `WITH VALIDATION` or `WITHOUT VALIDATION`, if present.
    fn parse_validation(&mut self) -> Result<Option<bool>> {
        let validation = if self.check_keyword(Keyword::With)
            && self.peek_keyword(1, Keyword::Validation)
        {
            self.advance();
            true
        } else if self.eat_keyword(Keyword::Without) {
            false
        } else {
            return Ok(None);
        };
        self.expect_keyword(Keyword::Validation)?;
        Ok(Some(validation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{
        AlterTableStatement, ColumnPosition, ConstraintKind, Expr, IndexKind, Literal,
        OptionValue, PartitionMethod, Statement, TableName, TableOptionKind,
    };
    use crate::lexer::{Lexer, Token};
    use crate::parser::ParseErrorKind;

    fn tokens(sql: &str) -> Vec<Token> {
        Lexer::new(sql).tokenize()
    }

    fn alter(sql: &str) -> AlterTableStatement {
        let tokens = tokens(sql);
        match Parser::new(&tokens).parse_complete() {
            Ok(Statement::AlterTable(alter)) => alter,
            other => panic!("expected ALTER TABLE from {sql}, got {other:?}"),
        }
    }

    fn single(sql: &str) -> AlterSpecification {
        let mut alter = alter(sql);
        assert_eq!(alter.specifications.len(), 1, "{sql}");
        alter.specifications.remove(0)
    }

    fn alter_err(sql: &str) -> Box<ParseError> {
        let tokens = tokens(sql);
        Parser::new(&tokens).parse_complete().unwrap_err()
    }

    #[test]
    fn test_add_shapes_are_distinguished() {
        assert_eq!(single("ALTER TABLE t ADD c INT").name(), "add column");
        assert_eq!(single("ALTER TABLE t ADD INDEX (c)").name(), "add index");
        assert_eq!(
            single("ALTER TABLE t ADD CONSTRAINT FOREIGN KEY (c) REFERENCES u(c)").name(),
            "add constraint"
        );
        assert_eq!(
            single("ALTER TABLE t ADD PARTITION (PARTITION p3 VALUES LESS THAN (2030))").name(),
            "partition operation"
        );
        assert_eq!(single("ALTER TABLE t ADD SPATIAL KEY (g)").name(), "add index");
    }

    #[test]
    fn test_add_then_drop_column() {
        let alter = alter("ALTER TABLE t1 ADD COLUMN c INT NOT NULL DEFAULT 0, DROP COLUMN d;");
        assert_eq!(alter.table, TableName::new("t1"));
        match &alter.specifications[..] {
            [AlterSpecification::AddColumn { column, position: None }, AlterSpecification::DropColumn(dropped)] =>
            {
                assert_eq!(column.name, "c");
                assert!(column.options.is_not_null());
                assert_eq!(column.options.default, Some(Expr::integer(0)));
                assert_eq!(dropped, "d");
            }
            other => panic!("unexpected specifications: {other:?}"),
        }
    }

    #[test]
    fn test_add_column_list() {
        let AlterSpecification::AddColumns(columns) =
            single("ALTER TABLE t ADD COLUMN (a INT, b TEXT)")
        else {
            panic!("expected a column list");
        };
        assert_eq!(columns.len(), 2);
    }

    #[test]
    fn test_add_column_list_failure_is_exhausted() {
        let err = alter_err("ALTER TABLE t ADD (a INT, b NOPE)");
        assert_eq!(err.kind, ParseErrorKind::AmbiguousAlternativeExhausted);
        assert_eq!(err.alternatives, vec!["column list", "column definition"]);
        // The column list got further than the single definition.
        assert_eq!(err.lexeme, "NOPE");
    }

    #[test]
    fn test_add_column_position() {
        let AlterSpecification::AddColumn { position, .. } =
            single("ALTER TABLE t ADD COLUMN status INT AFTER id")
        else {
            panic!("expected add column");
        };
        assert_eq!(position, Some(ColumnPosition::After(String::from("id"))));
    }

    #[test]
    fn test_drop_shapes() {
        assert_eq!(
            single("ALTER TABLE t DROP PRIMARY KEY;"),
            AlterSpecification::DropPrimaryKey
        );
        assert_eq!(
            single("ALTER TABLE t DROP FOREIGN KEY fk_1"),
            AlterSpecification::DropForeignKey(String::from("fk_1"))
        );
        assert_eq!(
            single("ALTER TABLE t DROP KEY ix"),
            AlterSpecification::DropIndex(String::from("ix"))
        );
        assert_eq!(
            single("ALTER TABLE t DROP status"),
            AlterSpecification::DropColumn(String::from("status"))
        );
        assert_eq!(
            single("ALTER TABLE t DROP PARTITION p0, p1"),
            AlterSpecification::Partition(PartitionOperation::Drop(vec![
                String::from("p0"),
                String::from("p1")
            ]))
        );
    }

    #[test]
    fn test_change_and_modify() {
        let AlterSpecification::ChangeColumn {
            old_name,
            column,
            position,
        } = single("ALTER TABLE t CHANGE COLUMN a b BIGINT UNSIGNED FIRST")
        else {
            panic!("expected change column");
        };
        assert_eq!(old_name, "a");
        assert_eq!(column.name, "b");
        assert_eq!(position, Some(ColumnPosition::First));

        assert_eq!(
            single("ALTER TABLE t MODIFY b TEXT").name(),
            "modify column"
        );
    }

    #[test]
    fn test_alter_column_default() {
        assert_eq!(
            single("ALTER TABLE t ALTER COLUMN a SET DEFAULT 'x'"),
            AlterSpecification::AlterColumnSetDefault {
                column: String::from("a"),
                value: Expr::literal(Literal::String {
                    value: String::from("x"),
                    charset: None,
                }),
            }
        );
        assert_eq!(
            single("ALTER TABLE t ALTER a DROP DEFAULT"),
            AlterSpecification::AlterColumnDropDefault {
                column: String::from("a")
            }
        );
    }

    #[test]
    fn test_renames() {
        assert_eq!(
            single("ALTER TABLE t RENAME INDEX a TO b"),
            AlterSpecification::RenameIndex {
                from: String::from("a"),
                to: String::from("b")
            }
        );
        assert_eq!(
            single("ALTER TABLE t RENAME COLUMN a TO b").name(),
            "rename column"
        );
        assert_eq!(
            single("ALTER TABLE t RENAME TO db.u"),
            AlterSpecification::RenameTable(TableName::qualified("db", "u"))
        );
        assert_eq!(
            single("ALTER TABLE t RENAME u"),
            AlterSpecification::RenameTable(TableName::new("u"))
        );
    }

    #[test]
    fn test_table_options_and_misc() {
        let alter = alter(
            "ALTER TABLE t ENGINE = InnoDB AUTO_INCREMENT = 5, ALGORITHM = INPLACE, LOCK = NONE, FORCE",
        );
        let names: Vec<&str> = alter.specifications.iter().map(AlterSpecification::name).collect();
        assert_eq!(names, vec!["table options", "algorithm", "lock", "force"]);
        let AlterSpecification::TableOptions(options) = &alter.specifications[0] else {
            panic!("expected table options");
        };
        assert_eq!(options.len(), 2);
        assert_eq!(options[0].kind, TableOptionKind::Engine);

        assert_eq!(
            single("ALTER TABLE t DEFAULT CHARACTER SET utf8mb4").name(),
            "table options"
        );
    }

    #[test]
    fn test_convert_and_order_by() {
        assert_eq!(
            single("ALTER TABLE t CONVERT TO CHARACTER SET utf8mb4 COLLATE utf8mb4_bin"),
            AlterSpecification::ConvertToCharset {
                charset: String::from("utf8mb4"),
                collation: Some(String::from("utf8mb4_bin")),
            }
        );
        let AlterSpecification::OrderBy(columns) = single("ALTER TABLE t ORDER BY a, b DESC") else {
            panic!("expected order by");
        };
        assert_eq!(columns.len(), 2);
    }

    #[test]
    fn test_partition_maintenance() {
        assert_eq!(
            single("ALTER TABLE t TRUNCATE PARTITION ALL"),
            AlterSpecification::Partition(PartitionOperation::Maintain {
                kind: PartitionMaintenance::Truncate,
                targets: PartitionTargets::All,
            })
        );
        assert_eq!(
            single("ALTER TABLE t CHECK PARTITION p0, p1"),
            AlterSpecification::Partition(PartitionOperation::Maintain {
                kind: PartitionMaintenance::Check,
                targets: PartitionTargets::Names(vec![String::from("p0"), String::from("p1")]),
            })
        );
        assert_eq!(
            single("ALTER TABLE t DISCARD PARTITION p0 TABLESPACE"),
            AlterSpecification::Partition(PartitionOperation::Maintain {
                kind: PartitionMaintenance::DiscardTablespace,
                targets: PartitionTargets::Names(vec![String::from("p0")]),
            })
        );
        assert_eq!(
            single("ALTER TABLE t IMPORT TABLESPACE"),
            AlterSpecification::ImportTablespace
        );
        assert_eq!(
            single("ALTER TABLE t COALESCE PARTITION 2"),
            AlterSpecification::Partition(PartitionOperation::Coalesce(2))
        );
    }

    #[test]
    fn test_reorganize_and_exchange() {
        let AlterSpecification::Partition(PartitionOperation::Reorganize { names, into }) = single(
            "ALTER TABLE t REORGANIZE PARTITION p0, p1 INTO (PARTITION p2 VALUES LESS THAN (10))",
        ) else {
            panic!("expected reorganize");
        };
        assert_eq!(names.len(), 2);
        assert_eq!(into.len(), 1);

        assert_eq!(
            single("ALTER TABLE t EXCHANGE PARTITION p0 WITH TABLE u WITHOUT VALIDATION"),
            AlterSpecification::Partition(PartitionOperation::Exchange {
                partition: String::from("p0"),
                table: TableName::new("u"),
                validation: Some(false),
            })
        );
        assert_eq!(
            single("ALTER TABLE t WITH VALIDATION"),
            AlterSpecification::Validation(true)
        );
    }

    #[test]
    fn test_partitioning_clauses() {
        let AlterSpecification::PartitionBy(options) =
            single("ALTER TABLE t PARTITION BY KEY (id) PARTITIONS 8")
        else {
            panic!("expected partition by");
        };
        assert!(matches!(options.method, PartitionMethod::Key { .. }));
        assert_eq!(
            single("ALTER TABLE t REMOVE PARTITIONING"),
            AlterSpecification::Partition(PartitionOperation::RemovePartitioning)
        );
    }

    #[test]
    fn test_add_constraint_kinds() {
        let AlterSpecification::AddConstraint(constraint) =
            single("ALTER TABLE t ADD CONSTRAINT ck CHECK (a > 0)")
        else {
            panic!("expected constraint");
        };
        assert_eq!(constraint.name.as_deref(), Some("ck"));
        assert!(matches!(constraint.kind, ConstraintKind::Check(_)));

        let AlterSpecification::AddIndex(index) = single("ALTER TABLE t ADD FULLTEXT (body)") else {
            panic!("expected index");
        };
        assert_eq!(index.kind, IndexKind::Fulltext);
    }

    #[test]
    fn test_table_option_value() {
        let AlterSpecification::TableOptions(options) = single("ALTER TABLE t COMMENT = 'c'") else {
            panic!("expected table options");
        };
        assert_eq!(options[0].value, OptionValue::Text(String::from("c")));
    }

    #[test]
    fn test_unknown_specification() {
        let err = alter_err("ALTER TABLE t FROBNICATE");
        assert_eq!(err.kind, ParseErrorKind::UnexpectedToken);
        assert_eq!(err.expected_desc, "ALTER TABLE specification");
        assert!(err.expected.contains(&TokenKind::Keyword(Keyword::Add)));
    }

    #[test]
    fn test_bad_second_token_reported_after_leading_keyword() {
        let err = alter_err("ALTER TABLE t ADD 42");
        assert_eq!(err.expected_desc, "ADD specification");
        assert_eq!(err.found, TokenKind::Number);
        assert_eq!(err.span.start, 18);
    }
}
