//! Tests for ALTER TABLE: choosing between specifications that share a
//! leading keyword, and statements mixing several specifications.

mod common;
use common::*;

use oxide_ddl_core::ast::{
    AlgorithmOption, AlterSpecification, ColumnPosition, ConstraintKind, DataType, Expr,
    IndexKind, IntegerKind, LockOption, PartitionOperation, TableName,
};
use oxide_ddl_core::parser::ParseErrorKind;
use oxide_ddl_core::TokenKind;

fn single(sql: &str) -> AlterSpecification {
    let mut alter = parse_alter(sql);
    assert_eq!(alter.specifications.len(), 1, "{sql}");
    alter.specifications.remove(0)
}

// ===================================================================
// Alternative selection
// ===================================================================

#[test]
fn add_column_index_and_constraint_are_distinguished() {
    assert!(matches!(
        single("ALTER TABLE t ADD c INT"),
        AlterSpecification::AddColumn { .. }
    ));
    assert!(matches!(
        single("ALTER TABLE t ADD INDEX (c)"),
        AlterSpecification::AddIndex(_)
    ));
    assert!(matches!(
        single("ALTER TABLE t ADD CONSTRAINT FOREIGN KEY (c) REFERENCES u(c)"),
        AlterSpecification::AddConstraint(_)
    ));
}

#[test]
fn add_keyword_prefixes() {
    assert!(matches!(
        single("ALTER TABLE t ADD KEY k (a)"),
        AlterSpecification::AddIndex(ref index) if index.kind == IndexKind::Plain
    ));
    assert!(matches!(
        single("ALTER TABLE t ADD PRIMARY KEY (id)"),
        AlterSpecification::AddConstraint(ref c)
            if matches!(c.kind, ConstraintKind::PrimaryKey { .. })
    ));
    assert!(matches!(
        single("ALTER TABLE t ADD UNIQUE INDEX u (a, b)"),
        AlterSpecification::AddConstraint(ref c)
            if matches!(c.kind, ConstraintKind::Unique { .. })
    ));
    assert!(matches!(
        single("ALTER TABLE t ADD PARTITION (PARTITION p9 VALUES IN (9))"),
        AlterSpecification::Partition(PartitionOperation::Add(_))
    ));
}

#[test]
fn add_column_named_like_a_keyword() {
    let AlterSpecification::AddColumn { column, .. } = single("ALTER TABLE t ADD status INT")
    else {
        panic!("Expected ADD COLUMN");
    };
    assert_eq!(column.name, "status");
}

#[test]
fn add_parenthesised_column_list() {
    let AlterSpecification::AddColumns(columns) =
        single("ALTER TABLE t ADD (a INT, b VARCHAR(10) NOT NULL)")
    else {
        panic!("Expected ADD COLUMN list");
    };
    let names: Vec<_> = columns.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["a", "b"]);
}

#[test]
fn drop_variants() {
    let alter = parse_alter(
        "ALTER TABLE t DROP PRIMARY KEY, DROP FOREIGN KEY fk, DROP INDEX ix, DROP COLUMN c, DROP d",
    );
    assert_eq!(
        alter.specifications,
        vec![
            AlterSpecification::DropPrimaryKey,
            AlterSpecification::DropForeignKey(String::from("fk")),
            AlterSpecification::DropIndex(String::from("ix")),
            AlterSpecification::DropColumn(String::from("c")),
            AlterSpecification::DropColumn(String::from("d")),
        ]
    );
}

#[test]
fn rename_variants() {
    assert!(matches!(
        single("ALTER TABLE t RENAME KEY a TO b"),
        AlterSpecification::RenameIndex { .. }
    ));
    assert!(matches!(
        single("ALTER TABLE t RENAME COLUMN a TO b"),
        AlterSpecification::RenameColumn { .. }
    ));
    assert_eq!(
        single("ALTER TABLE t RENAME AS u"),
        AlterSpecification::RenameTable(TableName::new("u"))
    );
}

// ===================================================================
// Whole statements
// ===================================================================

#[test]
fn add_then_drop_column() {
    let alter = parse_alter("ALTER TABLE t1 ADD COLUMN c INT NOT NULL DEFAULT 0, DROP COLUMN d;");
    assert_eq!(alter.table, TableName::new("t1"));
    assert_eq!(alter.specifications.len(), 2);

    let AlterSpecification::AddColumn { column, position } = &alter.specifications[0] else {
        panic!("Expected ADD COLUMN");
    };
    assert_eq!(column.name, "c");
    assert_eq!(
        column.data_type,
        DataType::Integer {
            kind: IntegerKind::Int,
            width: None,
            unsigned: false,
            zerofill: false,
        }
    );
    assert!(column.options.is_not_null());
    assert_eq!(column.options.default, Some(Expr::integer(0)));
    assert_eq!(*position, None);

    assert_eq!(
        alter.specifications[1],
        AlterSpecification::DropColumn(String::from("d"))
    );
}

#[test]
fn drop_primary_key() {
    let alter = parse_alter("ALTER TABLE t DROP PRIMARY KEY;");
    assert_eq!(alter.specifications, vec![AlterSpecification::DropPrimaryKey]);
}

#[test]
fn ignore_and_qualified_table() {
    let alter = parse_alter("ALTER IGNORE TABLE db.t ENABLE KEYS");
    assert!(alter.ignore);
    assert_eq!(alter.table, TableName::qualified("db", "t"));
    assert_eq!(alter.specifications, vec![AlterSpecification::EnableKeys]);
}

#[test]
fn no_specifications() {
    assert!(parse_alter("ALTER TABLE t").specifications.is_empty());
    assert!(parse_alter("ALTER TABLE t;").specifications.is_empty());
}

#[test]
fn mixed_specifications_keep_order() {
    let alter = parse_alter(
        "ALTER TABLE orders
            MODIFY COLUMN total DECIMAL(12, 2) NOT NULL AFTER id,
            CHANGE note memo TEXT FIRST,
            ALTER COLUMN state SET DEFAULT 'new',
            ADD CONSTRAINT fk_c FOREIGN KEY (customer) REFERENCES customers (id) ON DELETE CASCADE,
            ENGINE = InnoDB,
            ALGORITHM = INPLACE,
            LOCK SHARED",
    );
    let names: Vec<_> = alter
        .specifications
        .iter()
        .map(AlterSpecification::name)
        .collect();
    assert_eq!(
        names,
        [
            "modify column",
            "change column",
            "alter column set default",
            "add constraint",
            "table options",
            "algorithm",
            "lock",
        ]
    );
    assert!(matches!(
        &alter.specifications[0],
        AlterSpecification::ModifyColumn {
            position: Some(ColumnPosition::After(after)),
            ..
        } if after == "id"
    ));
    assert_eq!(
        alter.specifications[5],
        AlterSpecification::Algorithm(AlgorithmOption::Inplace)
    );
    assert_eq!(
        alter.specifications[6],
        AlterSpecification::Lock(LockOption::Shared)
    );
}

#[test]
fn partition_operations() {
    let alter = parse_alter(
        "ALTER TABLE t COALESCE PARTITION 2, OPTIMIZE PARTITION ALL, UPGRADE PARTITIONING",
    );
    assert!(alter
        .specifications
        .iter()
        .all(|s| matches!(s, AlterSpecification::Partition(_))));
}

// ===================================================================
// Errors
// ===================================================================

#[test]
fn unknown_specification() {
    let err = parse_err("ALTER TABLE t EXPLODE");
    assert_eq!(err.kind, ParseErrorKind::UnexpectedToken);
    assert_eq!(err.lexeme, "EXPLODE");
    assert!(!err.expected.is_empty());
}

#[test]
fn trailing_comma() {
    let err = parse_err("ALTER TABLE t DROP a,");
    assert_eq!(err.found, TokenKind::Eof);
}

#[test]
fn bad_column_list_exhausts_both_alternatives() {
    let err = parse_err("ALTER TABLE t ADD COLUMN (a INT, 5)");
    assert_eq!(err.kind, ParseErrorKind::AmbiguousAlternativeExhausted);
    assert_eq!(err.alternatives.len(), 2);
    assert!(err.cause.is_some());
}

#[test]
fn drop_without_target() {
    let err = parse_err("ALTER TABLE t DROP");
    assert_eq!(err.found, TokenKind::Eof);
}
